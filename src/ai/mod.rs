//! AI service integration for ingredient analysis
//!
//! Sends the instruction, the encoded label image and the user's requirement
//! to a multimodal model and returns its text answer.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::GeminiAnalysisClient;
pub use mock::MockAnalysisClient;

use crate::models::{AnalysisRequest, AnalysisResponse};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse>;
}
