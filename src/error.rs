// src/error.rs
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub use crate::types::{ErrorResponse, RustFinderError};

pub type Result<T> = std::result::Result<T, RustFinderError>;

impl RustFinderError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RustFinderError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RustFinderError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RustFinderError::InvalidInput("Domain is required".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RustFinderError::EngineInit("missing".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RustFinderError::EngineInvocation("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_are_formatted_not_debug() {
        let err = RustFinderError::EngineInit("subfinder: cannot find binary path".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to create subfinder runner: subfinder: cannot find binary path"
        );
    }
}
