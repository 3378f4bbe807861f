use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Non-success response from the store. Never retried.
    #[error("Store error {status}: {body}")]
    Store { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Mapping error: {0}")]
    Mapping(#[from] lifeos_core::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// HTTP status of a store rejection, if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Store { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
