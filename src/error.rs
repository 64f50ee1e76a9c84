use thiserror::Error;

pub type Result<T> = std::result::Result<T, LocvizError>;

#[derive(Error, Debug)]
pub enum LocvizError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid region: {0}")]
    InvalidRegion(String),
    #[error("Other: {0}")]
    Other(String),
}
