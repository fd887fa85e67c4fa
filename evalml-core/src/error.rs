use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("Invalid average mode: {0}")]
    InvalidAverageMode(String),
    #[error("Invalid label set: {0}")]
    InvalidLabelSet(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Parser error: {0}")]
    ParserError(String),
}

pub type Result<T> = std::result::Result<T, Error>;
