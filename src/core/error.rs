use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Unknown job line: {0}")]
    UnknownJob(String),

    #[error("Invalid job data for '{job}': {reason}")]
    InvalidJobData { job: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
