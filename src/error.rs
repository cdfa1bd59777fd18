//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// No image was supplied with the submission.
    #[error("{0}")]
    MissingInput(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("Multipart form error: {0}")]
    Multipart(String),

    #[error("Upload exceeds the {0} byte limit")]
    UploadTooLarge(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
