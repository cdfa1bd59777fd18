use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentRequest, GenerateContentResponse, InlineData, Part};
use crate::ai::AnalysisService;
use crate::models::{AnalysisRequest, AnalysisResponse, Config};
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct GeminiAnalysisClient {
    http: GeminiHttpClient,
}

impl GeminiAnalysisClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        Self::new_with_client(api_key, model, timeout, reqwest::Client::new())
    }

    pub fn new_with_client(
        api_key: String,
        model: String,
        timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, timeout, client),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_timeout,
        )
        .with_base_url(config.gemini_base_url.clone())
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }

    /// Parts go out as instruction, image, requirement. An empty requirement
    /// is left out.
    fn build_request(request: &AnalysisRequest) -> GenerateContentRequest {
        let mut parts = vec![
            Part::Text {
                text: request.instruction.clone(),
            },
            Part::InlineData {
                inline_data: InlineData::from(&request.image),
            },
        ];

        if !request.requirement.is_empty() {
            parts.push(Part::Text {
                text: request.requirement.clone(),
            });
        }

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
        }
    }
}

#[async_trait]
impl AnalysisService for GeminiAnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        tracing::debug!(
            "Requesting ingredient analysis from Gemini model {} ({} base64 chars)",
            self.model(),
            request.image.data.len()
        );

        let body = Self::build_request(request);
        let response: GenerateContentResponse = self.http.generate_content(&body).await?;

        match response.first_text() {
            Some(text) => Ok(AnalysisResponse::new(text)),
            None => {
                let reason = response
                    .block_reason()
                    .map(|r| format!("prompt blocked ({})", r))
                    .or_else(|| {
                        response
                            .candidates
                            .first()
                            .and_then(|c| c.finish_reason.clone())
                            .map(|r| format!("finish reason {}", r))
                    })
                    .unwrap_or_else(|| "no candidates".to_string());
                tracing::error!("Gemini returned no analysis text: {}", reason);
                Err(Error::AiProvider(format!(
                    "No text in Gemini analysis response: {}",
                    reason
                )))
            }
        }
    }
}
