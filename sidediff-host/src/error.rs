use facet::Facet;

/// Where in a comparison session an error happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Validating what the user asked to compare
    Input,
    /// Getting the bytes of a document
    Fetch,
    /// Turning fetched bytes into a comparable document
    Load,
    /// Writing the report or the summary
    Output,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Input => write!(f, "input"),
            Stage::Fetch => write!(f, "fetch"),
            Stage::Load => write!(f, "load"),
            Stage::Output => write!(f, "output"),
        }
    }
}

/// Errors that can end a comparison session.
#[derive(Facet, Debug, Clone, PartialEq)]
#[facet(derive(Error))]
#[repr(u8)]
pub enum CompareError {
    /// invalid URL "{input}": expected an absolute http:// or https:// URL
    InvalidUrl { input: String },

    /// could not fetch {target}: {reason}
    Fetch { target: String, reason: String },

    /// timed out after {timeout_ms} ms while loading {target}
    Timeout { target: String, timeout_ms: u64 },

    /// {target} answered with HTTP status {status}
    Status { target: String, status: u16 },

    /// proxy failed to fetch {target}: {message}
    ProxyReported { target: String, message: String },

    /// could not read {path}: {reason}
    Read { path: String, reason: String },

    /// {target} has no content to compare
    EmptyDocument { target: String },

    /// could not write {path}: {reason}
    Write { path: String, reason: String },

    /// could not serialize the summary: {reason}
    Serialize { reason: String },
}

impl CompareError {
    pub fn stage(&self) -> Stage {
        match self {
            CompareError::InvalidUrl { .. } => Stage::Input,
            CompareError::Fetch { .. }
            | CompareError::Timeout { .. }
            | CompareError::Status { .. }
            | CompareError::ProxyReported { .. }
            | CompareError::Read { .. } => Stage::Fetch,
            CompareError::EmptyDocument { .. } => Stage::Load,
            CompareError::Write { .. } | CompareError::Serialize { .. } => Stage::Output,
        }
    }
}
