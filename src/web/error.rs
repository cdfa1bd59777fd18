use super::page::{self, Notice, PageView};
use crate::Error;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Rendered as a warning on an otherwise normal page.
            Error::MissingInput(_) => StatusCode::OK,
            Error::InvalidInput(_) | Error::Multipart(_) => StatusCode::BAD_REQUEST,
            Error::UploadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Error::AiProvider(_) | Error::Http(_) => StatusCode::BAD_GATEWAY,
            Error::Io(_) | Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn notice(&self) -> Notice {
        match self {
            Error::MissingInput(message) => Notice::Warning(message.clone()),
            other => Notice::Error(other.to_string()),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let view = PageView::default().notice(self.notice());
        (self.status_code(), Html(page::render(&view))).into_response()
    }
}
