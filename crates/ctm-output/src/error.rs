use ctm_core::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A link's density left the fundamental diagram's valid range (an
    /// unstable step size), so derived flow/speed could not be recorded.
    #[error("cannot derive link state: {0}")]
    Domain(#[from] DomainError),
}

pub type OutputResult<T> = Result<T, OutputError>;
