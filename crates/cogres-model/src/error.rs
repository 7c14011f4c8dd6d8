use thiserror::Error;

#[derive(Debug, Error)]
pub enum CogresError {
    /// Malformed caller input: empty/duplicate proxy lists, unresolvable
    /// column names, out-of-range options. Always fatal.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Polars(#[from] polars::error::PolarsError),
}

pub type Result<T> = std::result::Result<T, CogresError>;
