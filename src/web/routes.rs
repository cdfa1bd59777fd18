use super::page::{self, Notice, PageView, UPLOAD_SUCCESS};
use super::AppState;
use crate::models::UploadedImage;
use crate::{ingest, Error, Result};
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, warn};

/// Form fields of one submission.
#[derive(Debug, Default)]
pub struct Submission {
    pub requirement: String,
    pub image: Option<UploadedImage>,
}

pub async fn index_handler() -> Html<String> {
    Html(page::render(&PageView::default()))
}

pub async fn health_handler() -> &'static str {
    "ok"
}

pub async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Response {
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            warn!("Rejected non-multipart submission: {}", rejection.body_text());
            return Error::Multipart(rejection.body_text()).into_response();
        }
    };

    let submission = match read_submission(multipart, state.max_upload_bytes).await {
        Ok(submission) => submission,
        Err(e) => {
            warn!("Rejected submission: {}", e);
            return e.into_response();
        }
    };

    let mut view = PageView::with_requirement(submission.requirement.clone());
    if let Some(image) = &submission.image {
        view = view.notice(Notice::Success(UPLOAD_SUCCESS.to_string()));
        view.preview = Some(ingest::preview_data_url(&image.bytes));
    }

    match state
        .app
        .analyze(submission.image.as_ref(), &submission.requirement)
        .await
    {
        Ok(response) => {
            view.analysis = Some(response.text);
            (StatusCode::OK, Html(page::render(&view))).into_response()
        }
        Err(e) => {
            match &e {
                Error::MissingInput(_) => warn!("Submission without an image"),
                Error::InvalidInput(_) => {
                    warn!("Invalid submission: {}", e);
                    view.preview = None;
                    view.notices.clear();
                }
                _ => error!("Ingredient analysis failed: {}", e),
            }

            let status = e.status_code();
            let view = view.notice(e.notice());
            (status, Html(page::render(&view))).into_response()
        }
    }
}

/// Reads the `requirement` and `image` fields; other fields are ignored.
///
/// An image field with no content counts as no upload.
pub async fn read_submission(mut multipart: Multipart, limit: usize) -> Result<Submission> {
    let mut submission = Submission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("requirement") => {
                submission.requirement = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, limit))?;
            }
            Some("image") => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, limit))?;
                if !bytes.is_empty() {
                    submission.image = Some(UploadedImage::new(file_name, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    Ok(submission)
}

fn multipart_error(e: MultipartError, limit: usize) -> Error {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::UploadTooLarge(limit)
    } else {
        Error::Multipart(e.body_text())
    }
}
