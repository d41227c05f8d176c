// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides a consistent error format for every surface
// - Logs errors for debugging

use log::error;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Session or resource not found (404)
    NotFound,

    /// Invalid input/validation error (400)
    Validation,

    /// Domain invariant violation (422)
    DomainError,

    /// Working area already being executed (409)
    Busy,

    /// File system error (500)
    FileSystem,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self {
                success: false,
                error_type: ErrorType::NotFound,
                message: "Session not found".to_string(),
                details: None,
            },

            AppError::InvalidInput(message) => Self::validation(message),

            AppError::Domain(domain_error) => Self {
                success: false,
                error_type: ErrorType::DomainError,
                message: "Mapping validation failed".to_string(),
                details: Some(domain_error.to_string()),
            },

            AppError::AreaBusy(area) => Self {
                success: false,
                error_type: ErrorType::Busy,
                message: "A rename is already running for this session".to_string(),
                details: Some(area.display().to_string()),
            },

            AppError::Serialization(serde_error) => {
                error!("Serialization error: {:?}", serde_error);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message: "Data serialization failed".to_string(),
                    details: Some(serde_error.to_string()),
                }
            }

            AppError::Io(io_error) => {
                error!("IO error: {:?}", io_error);

                Self {
                    success: false,
                    error_type: ErrorType::FileSystem,
                    message: "File system operation failed".to_string(),
                    details: Some(io_error.to_string()),
                }
            }

            AppError::Other(message) => {
                error!("Other error: {}", message);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message,
                    details: None,
                }
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self {
            success: false,
            error_type: ErrorType::Validation,
            message,
            details: None,
        }
    }
}

/// Helper trait to convert Results to a serialized ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| {
            let error_response = ErrorResponse::from_app_error(e);
            serde_json::to_string(&error_response).unwrap_or_else(|_| "Internal error".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::from_app_error(AppError::NotFound);
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "Session not found");
        assert!(!error.success);
    }

    #[test]
    fn test_invalid_input_is_validation() {
        let error = ErrorResponse::from_app_error(AppError::InvalidInput(
            "Please upload a mapping first".to_string(),
        ));
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.message, "Please upload a mapping first");
    }

    #[test]
    fn test_busy_area() {
        let error =
            ErrorResponse::from_app_error(AppError::AreaBusy(PathBuf::from("/sessions/abc")));
        assert_eq!(error.error_type, ErrorType::Busy);
        assert_eq!(error.details.as_deref(), Some("/sessions/abc"));
    }

    #[test]
    fn test_serialization() {
        let result: Result<(), AppError> = Err(AppError::NotFound);
        let json = result.to_error_response().unwrap_err();
        assert!(json.contains("not_found"));
        assert!(json.contains("\"success\":false"));
    }
}
