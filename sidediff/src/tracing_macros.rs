//! Logging macros for the comparison pass.
//!
//! They forward to `tracing` when the `tracing` feature is on (and always under
//! `cfg(test)`), and expand to nothing otherwise.

/// Per-node-pair decisions of the walker.
#[cfg(any(test, feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*);
    };
}

/// Per-node-pair decisions of the walker (disabled).
#[cfg(not(any(test, feature = "tracing")))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

/// Marks, text rebuilds and pass boundaries.
#[cfg(any(test, feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*);
    };
}

/// Marks, text rebuilds and pass boundaries (disabled).
#[cfg(not(any(test, feature = "tracing")))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}
