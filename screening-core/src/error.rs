use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScreeningError {
    #[error("Invalid screening query: {0}")]
    InvalidQuery(String),

    #[error("Invalid threshold: {0} (must be between 0 and 100)")]
    InvalidThreshold(u8),

    /// No country lists were selected, so nothing was searched.
    #[error("No sanctions lists selected")]
    NoListsSelected,

    #[error("Screening aborted after {scanned} of {total} subjects")]
    ScanAborted { scanned: usize, total: usize },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ScreeningError>;
