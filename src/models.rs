//! Data models and structures
//!
//! Defines the submission data flowing from the upload form to the model API,
//! plus the runtime configuration.

use crate::ai::gemini::client::DEFAULT_BASE_URL;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// Mime type declared for every uploaded image, whatever its real format.
pub const DECLARED_IMAGE_MIME: &str = "image/jpeg";

/// Encoded image unit sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

/// One-element sequence of image payloads, shaped the way the model API
/// expects its image input.
pub type ImageParts = Vec<ImagePayload>;

/// A file as received from the upload form.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(file_name: Option<String>, bytes: Vec<u8>) -> Self {
        Self { file_name, bytes }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub instruction: String,
    pub image: ImagePayload,
    /// Free text typed by the user, possibly empty.
    pub requirement: String,
}

impl AnalysisRequest {
    pub fn new(instruction: String, image: ImagePayload, requirement: String) -> Self {
        Self {
            instruction,
            image,
            requirement,
        }
    }
}

/// Opaque text returned by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResponse {
    pub text: String,
}

impl AnalysisResponse {
    pub fn new(text: String) -> Self {
        Self { text }
    }
}

// Configuration
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8501;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_timeout: Duration,
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_api_key = lookup("GOOGLE_GEMINI_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config("GOOGLE_GEMINI_KEY not set".to_string()))?;

        Ok(Self {
            gemini_api_key,
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: lookup("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            gemini_timeout: Duration::from_secs(non_zero(
                "GEMINI_TIMEOUT_SECS",
                parse_var(&lookup, "GEMINI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            )?),
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_var(&lookup, "PORT", DEFAULT_PORT)?,
            max_upload_bytes: non_zero(
                "MAX_UPLOAD_BYTES",
                parse_var(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            )?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid {} value '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}

fn non_zero<T>(key: &str, value: T) -> Result<T>
where
    T: Default + PartialEq,
{
    if value == T::default() {
        Err(Error::Config(format!("{} must be greater than zero", key)))
    } else {
        Ok(value)
    }
}
