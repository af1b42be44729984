//! Host side of sidediff: get two pages, compare them, show the result.
//!
//! - **Providers**: [`HttpProvider`] fetches over HTTP(S), optionally through a
//!   proxy endpoint; [`FileProvider`] reads local files
//! - **Session**: [`ComparisonSession`] fetches both sides concurrently, parses
//!   them and runs the comparison
//! - **Report**: [`render_report`] builds a standalone page with both documents
//!   side by side and scroll mirroring
//!
//! Every failure is a [`CompareError`] that knows which [`Stage`] it came from.

pub mod config;
pub mod error;
pub mod provider;
pub mod report;
pub mod scroll;
pub mod session;

pub use config::{HighlightStyle, HostConfig, Side, StyledSides};
pub use error::{CompareError, Stage};
pub use provider::{DocumentProvider, FileProvider, HttpProvider, validate_url};
pub use report::{inject_into_head, render_report, render_side};
pub use scroll::{Clock, ScrollOffset, ScrollSync, SystemClock};
pub use session::{Comparison, ComparisonSession, SideSummary, Summary};
