use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimelinerError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),

    #[error("Unknown project id: {0}")]
    UnknownProject(i64),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TimelinerError>;
