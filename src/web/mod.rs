//! HTTP front end: the upload form, its submission endpoint and a health probe.

pub mod error;
pub mod page;
pub mod routes;

use crate::app::App;
use crate::models::Config;
use crate::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use routes::{analyze_handler, health_handler, index_handler};

pub struct AppState {
    pub app: App,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(app: App, max_upload_bytes: usize) -> Arc<Self> {
        Arc::new(Self {
            app,
            max_upload_bytes,
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let max_upload_bytes = state.max_upload_bytes;

    Router::new()
        .route("/", get(index_handler))
        .route("/analyze", post(analyze_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to the configured address and serve until Ctrl+C or SIGTERM.
pub async fn serve(config: Config) -> Result<()> {
    let state = AppState::new(App::from_config(&config), config.max_upload_bytes);

    let address = config.bind_address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on http://{address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockAnalysisClient;
    use crate::app::AppServices;
    use axum::body::Body;
    use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
    use tower::ServiceExt;

    const BOUNDARY: &str = "----know-your-ingredient-test";

    const JPEG_BYTES: [u8; 12] = [
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01,
    ];

    fn multipart_body(requirement: Option<&str>, image: Option<(&str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some(requirement) = requirement {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"requirement\"\r\n\r\n{requirement}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((file_name, bytes)) = image {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: image/jpeg\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn analyze_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn test_router(mock: MockAnalysisClient, max_upload_bytes: usize) -> Router {
        let app = App::with_services(AppServices {
            analysis: Box::new(mock),
        });
        router(AppState::new(app, max_upload_bytes))
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let response = test_router(MockAnalysisClient::new(), 1024)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(page::TITLE));
        assert!(html.contains("action=\"/analyze\""));
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_router(MockAnalysisClient::new(), 1024)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn test_analysis_shown_under_subheader() {
        let mock = MockAnalysisClient::new().with_response("Salt: high sodium risk.".to_string());
        let handle = mock.handle();

        let response = test_router(mock, 1024 * 1024)
            .oneshot(analyze_request(multipart_body(
                Some(""),
                Some(("label.jpg", &JPEG_BYTES)),
            )))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        let header = html.find(page::ANALYSIS_SUBHEADER).unwrap();
        let result = html.find("Salt: high sodium risk.").unwrap();
        assert!(header < result);
        assert!(html.contains(page::UPLOAD_SUCCESS));
        assert!(html.contains("notice success"));
        assert_eq!(handle.get_call_count(), 1);
    }

    #[tokio::test]
    async fn test_requirement_forwarded_verbatim() {
        let mock = MockAnalysisClient::new();
        let handle = mock.handle();

        test_router(mock, 1024 * 1024)
            .oneshot(analyze_request(multipart_body(
                Some("Is this OK for kids under 5? <no sugar>"),
                Some(("label.png", &JPEG_BYTES)),
            )))
            .await
            .unwrap();

        let requests = handle.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].requirement,
            "Is this OK for kids under 5? <no sugar>"
        );
    }

    #[tokio::test]
    async fn test_missing_image_warns_without_dispatch() {
        let mock = MockAnalysisClient::new();
        let handle = mock.handle();

        let response = test_router(mock, 1024)
            .oneshot(analyze_request(multipart_body(Some("anything"), None)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("notice warning"));
        assert!(html.contains("Please upload your image..."));
        assert!(!html.contains(page::ANALYSIS_SUBHEADER));
        assert_eq!(handle.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_file_field_counts_as_missing() {
        let mock = MockAnalysisClient::new();
        let handle = mock.handle();

        let response = test_router(mock, 1024)
            .oneshot(analyze_request(multipart_body(None, Some(("", &[])))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("notice warning"));
        assert_eq!(handle.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_is_visible() {
        let mock = MockAnalysisClient::new().with_failure("Gemini API error (status 500)".to_string());

        let response = test_router(mock, 1024 * 1024)
            .oneshot(analyze_request(multipart_body(
                None,
                Some(("label.jpg", &JPEG_BYTES)),
            )))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let html = body_text(response).await;
        assert!(html.contains("notice error"));
        assert!(html.contains("Gemini API error (status 500)"));
        assert!(!html.contains(page::ANALYSIS_SUBHEADER));
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_rejected() {
        let mock = MockAnalysisClient::new();
        let handle = mock.handle();

        let response = test_router(mock, 1024 * 1024)
            .oneshot(analyze_request(multipart_body(
                None,
                Some(("label.gif", &JPEG_BYTES)),
            )))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = body_text(response).await;
        assert!(!html.contains(page::UPLOAD_SUCCESS));
        assert_eq!(handle.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_non_multipart_post_renders_error_page() {
        let mock = MockAnalysisClient::new();
        let handle = mock.handle();

        let response = test_router(mock, 1024)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/analyze")
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("requirement=salt"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = body_text(response).await;
        assert!(html.contains("notice error"));
        assert!(html.contains(page::TITLE));
        assert!(html.contains("Multipart form error"));
        assert_eq!(handle.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let mock = MockAnalysisClient::new();
        let handle = mock.handle();
        let big = vec![0xFF; 4096];

        let response = test_router(mock, 256)
            .oneshot(analyze_request(multipart_body(
                None,
                Some(("label.jpg", &big)),
            )))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(handle.get_call_count(), 0);
    }
}
