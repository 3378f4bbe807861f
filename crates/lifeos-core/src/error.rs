use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Payload encode error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid row: {0}")]
    InvalidRow(String),
}

pub type Result<T> = std::result::Result<T, Error>;
