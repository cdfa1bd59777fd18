//! Application orchestration for analyzing an uploaded food label.

use crate::ai::{AnalysisService, GeminiAnalysisClient};
use crate::models::{AnalysisRequest, AnalysisResponse, Config, UploadedImage};
use crate::{ingest, prompts, Result};
use tracing::{info, Instrument};
use uuid::Uuid;

/// Runs ingestion and dispatch for each submission.
pub struct App {
    analysis: Box<dyn AnalysisService>,
    instruction: String,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub analysis: Box<dyn AnalysisService>,
}

impl App {
    /// Build an app from concrete service dependencies, using the built-in
    /// ingredient analysis instruction.
    pub fn with_services(services: AppServices) -> Self {
        Self {
            analysis: services.analysis,
            instruction: prompts::INGREDIENT_ANALYSIS.to_string(),
        }
    }

    /// Construct an app talking to Gemini with the given configuration.
    pub fn from_config(config: &Config) -> Self {
        let client = GeminiAnalysisClient::from_config(config);
        info!("Analysis provider: Gemini (model: {})", client.model());

        Self::with_services(AppServices {
            analysis: Box::new(client),
        })
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Analyze one submission.
    ///
    /// A missing upload fails with `Error::MissingInput` before anything is
    /// dispatched.
    pub async fn analyze(
        &self,
        upload: Option<&UploadedImage>,
        requirement: &str,
    ) -> Result<AnalysisResponse> {
        let span = tracing::info_span!("submission", id = %Uuid::new_v4());
        self.dispatch(upload, requirement).instrument(span).await
    }

    async fn dispatch(
        &self,
        upload: Option<&UploadedImage>,
        requirement: &str,
    ) -> Result<AnalysisResponse> {
        let image = ingest::image_payload(upload)?;
        let request = AnalysisRequest::new(self.instruction.clone(), image, requirement.to_string());

        info!(
            "Dispatching analysis (requirement: {} chars)",
            request.requirement.chars().count()
        );
        let response = self.analysis.analyze(&request).await?;
        info!("Analysis completed ({} chars)", response.text.chars().count());

        Ok(response)
    }
}
