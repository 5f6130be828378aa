//! Request errors and their HTTP mapping

use axum::extract::multipart::MultipartError;
use axum::http::header::InvalidHeaderValue;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use md2hwpx_core::ConvertError;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

/// Errors that end a request
#[derive(Error, Debug)]
pub enum ServerError {
    /// A required form field was not sent
    #[error("Missing form field '{0}'")]
    MissingField(&'static str),

    /// The multipart body could not be read
    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),

    /// Conversion failed
    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// The conversion task panicked or was cancelled
    #[error("Conversion task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// A response header could not be built
    #[error("Invalid response header: {0}")]
    Header(#[from] InvalidHeaderValue),
}

/// JSON error body, `{"detail": "..."}`
#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl ServerError {
    /// Status code reported to the client
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Multipart(_) => StatusCode::BAD_REQUEST,
            ServerError::Convert(err) if err.is_input_error() => StatusCode::BAD_REQUEST,
            ServerError::Convert(_) | ServerError::Task(_) | ServerError::Header(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            debug!(error = %self, %status, "request rejected");
        }
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for request handlers
pub type Result<T> = std::result::Result<T, ServerError>;
