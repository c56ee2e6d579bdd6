use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("IO Error: {0:?}")]
    Io(#[from] std::io::Error),
    #[error("Serde json conversion error: {0:?}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("CSV error: {0:?}")]
    Csv(#[from] csv::Error),
    #[error("Timestamp parse error: {0:?}")]
    Timestamp(#[from] chrono::ParseError),
    #[error("Invalid configuration: {msg}")]
    Config { msg: String },
    #[error("{msg}")]
    Custom { msg: String },
}
