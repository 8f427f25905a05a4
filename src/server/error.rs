use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::pipeline::InputError;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    code: u16,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error, message)
    }

    /// Failure while analyzing; the message is prefixed the way clients expect
    pub fn analysis_failed(reason: impl std::fmt::Display) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "AnalysisError",
            format!("Error analyzing code: {}", reason),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        match err {
            InputError::UnsupportedExtension { .. } => {
                Self::bad_request("UnsupportedFileType", err.to_string())
            }
            InputError::EmptyInput => Self::bad_request("EmptyInput", err.to_string()),
            InputError::InvalidUtf8 { .. } => Self::analysis_failed(err),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::new(err.status(), "InvalidUpload", err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{}: {}", self.error, self.message);
        }
        let payload = ErrorResponse {
            error: self.error,
            message: self.message,
            code: self.status.as_u16(),
        };
        (self.status, Json(payload)).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_map_to_status() {
        let unsupported = ApiError::from(InputError::UnsupportedExtension {
            filename: "a.txt".to_string(),
        });
        assert_eq!(unsupported.status(), StatusCode::BAD_REQUEST);
        assert_eq!(unsupported.message, "Only Python files (.py) are supported");

        assert_eq!(
            ApiError::from(InputError::EmptyInput).status(),
            StatusCode::BAD_REQUEST
        );

        let utf8 = ApiError::from(InputError::InvalidUtf8 {
            filename: "a.py".to_string(),
            reason: "bad byte".to_string(),
        });
        assert_eq!(utf8.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(utf8.message.starts_with("Error analyzing code: "));
    }
}
