use crate::errors::PaperlessError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error("Document {0} not found")]
    DocumentNotFound(i32),

    #[error("Invalid page")]
    InvalidPage,

    #[error("Bad request: {0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl From<PaperlessError> for MockError {
    fn from(e: PaperlessError) -> Self {
        MockError::BadRequest(e.to_string())
    }
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let status = match &self {
            MockError::DocumentNotFound(_) | MockError::InvalidPage => StatusCode::NOT_FOUND,
            MockError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
