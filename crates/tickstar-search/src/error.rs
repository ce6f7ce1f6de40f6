use std::fmt;

use tickstar_core::GridError;

/// Errors surfaced by search setup and path reconstruction.
///
/// An unreachable goal is not an error: it is reported as
/// [`StepResult::Exhausted`](crate::StepResult::Exhausted).
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Grid construction or an out-of-bounds coordinate.
    Grid(GridError),
    /// A configuration value outside its allowed range.
    InvalidConfig(String),
    /// Path reconstruction was requested before the goal was reached.
    ReconstructBeforeReached,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::InvalidConfig(msg) => write!(f, "invalid search config: {msg}"),
            Self::ReconstructBeforeReached => {
                f.write_str("cannot reconstruct a path before the goal is reached")
            }
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SearchError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
