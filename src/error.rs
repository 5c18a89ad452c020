use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while turning a map CSV into a dense grid.
///
/// Each pipeline stage fails with the most specific variant; [`MapParseError::Unexpected`]
/// wraps lower-level I/O and CSV structural failures, keeping the cause attached.
#[derive(Debug, Error)]
pub enum MapParseError {
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("no data rows in {path}")]
    EmptyInput { path: PathBuf },

    #[error("missing required columns: {missing:?} (found: {found:?})")]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("no valid numeric data found after coercion")]
    NoValidData,

    #[error("insufficient known data points for interpolation: {known} (need at least 3)")]
    InsufficientData { known: usize },

    #[error("unable to completely fill all gaps in grid")]
    UnfillableGrid,

    #[error("unexpected parse failure: {source}")]
    Unexpected {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl MapParseError {
    /// Whether this error means the input simply wasn't there.
    ///
    /// A serving layer maps this kind to a 404; every other variant describes
    /// bad input and belongs in the 400 class.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<csv::Error> for MapParseError {
    fn from(err: csv::Error) -> Self {
        Self::Unexpected {
            source: Box::new(err),
        }
    }
}

impl From<std::io::Error> for MapParseError {
    fn from(err: std::io::Error) -> Self {
        Self::Unexpected {
            source: Box::new(err),
        }
    }
}
