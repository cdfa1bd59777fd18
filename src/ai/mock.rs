use super::AnalysisService;
use crate::models::{AnalysisRequest, AnalysisResponse};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub struct MockAnalysisClient {
    responses: Arc<Mutex<Vec<String>>>,
    failure: Arc<Mutex<Option<String>>>,
    requests: Arc<Mutex<Vec<AnalysisRequest>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockAnalysisClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    /// Every call fails with an `AiProvider` error carrying `message`.
    pub fn with_failure(self, message: String) -> Self {
        *self.failure.lock().unwrap() = Some(message);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn recorded_requests(&self) -> Vec<AnalysisRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Handle sharing this mock's state, for inspection after the mock has
    /// been moved into an app.
    pub fn handle(&self) -> Self {
        Self {
            responses: Arc::clone(&self.responses),
            failure: Arc::clone(&self.failure),
            requests: Arc::clone(&self.requests),
            call_count: Arc::clone(&self.call_count),
        }
    }
}

impl Default for MockAnalysisClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisService for MockAnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        let count = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count
        };
        self.requests.lock().unwrap().push(request.clone());

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(Error::AiProvider(message));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(AnalysisResponse::new(
                "| Ingredient | Pros | Cons |\n|---|---|---|\n| Sugar | Energy | Tooth decay |"
                    .to_string(),
            ))
        } else {
            let index = (count - 1) % responses.len();
            Ok(AnalysisResponse::new(responses[index].clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImagePayload;

    fn request(requirement: &str) -> AnalysisRequest {
        AnalysisRequest::new(
            "instruction".to_string(),
            ImagePayload {
                mime_type: "image/jpeg".to_string(),
                data: "/9j/".to_string(),
            },
            requirement.to_string(),
        )
    }

    #[tokio::test]
    async fn test_mock_default_response() {
        let client = MockAnalysisClient::new();

        let response = client.analyze(&request("")).await.unwrap();
        assert!(response.text.contains("Ingredient"));
    }

    #[tokio::test]
    async fn test_mock_custom_responses_cycle() {
        let client = MockAnalysisClient::new()
            .with_response("first".to_string())
            .with_response("second".to_string());

        assert_eq!(client.analyze(&request("")).await.unwrap().text, "first");
        assert_eq!(client.analyze(&request("")).await.unwrap().text, "second");
        assert_eq!(client.analyze(&request("")).await.unwrap().text, "first");
    }

    #[tokio::test]
    async fn test_mock_failure_and_recording() {
        let client = MockAnalysisClient::new().with_failure("boom".to_string());
        let handle = client.handle();

        let err = client.analyze(&request("low sugar")).await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));

        assert_eq!(handle.get_call_count(), 1);
        assert_eq!(handle.recorded_requests()[0].requirement, "low sugar");
    }
}
