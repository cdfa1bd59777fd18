//! Know Your Ingredient - a single-page form that sends a photo of a food
//! label to a multimodal model and shows its pros/cons table.
//!
//! The uploaded image is base64-encoded, paired with a fixed instruction and
//! the user's optional requirement, and forwarded to Gemini in one request.

pub mod ai;
pub mod app;
pub mod error;
pub mod ingest;
pub mod models;
pub mod prompts;
pub mod web;

pub use error::{Error, Result};
