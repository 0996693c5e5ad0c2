/// Error types for Leaderboard Service
///
/// Every failure a handler can hit is one of these variants. They map to HTTP
/// responses through `ResponseError`, so handlers just propagate with `?`.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for leaderboard-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed request field
    #[error("{0}")]
    InvalidInput(String),

    /// Registration conflict
    #[error("User already exists")]
    DuplicateUser,

    /// Backing ranked store call failed
    #[error("Ranked store unavailable: {0}")]
    StoreUnavailable(String),

    /// Registry snapshot or export file could not be written
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    /// Registry snapshot unreadable (only surfaced in strict mode)
    #[error("Corrupt state: {0}")]
    CorruptState(String),
}

impl AppError {
    /// Log error with a level matching its class
    pub fn log(&self) {
        match self {
            Self::InvalidInput(_) | Self::DuplicateUser => {
                tracing::debug!(error = %self, "Client error");
            }
            Self::StoreUnavailable(_) => {
                tracing::warn!(error = %self, "Dependency issue");
            }
            Self::PersistenceError(_) | Self::CorruptState(_) => {
                tracing::error!(error = %self, "Server error");
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::DuplicateUser => StatusCode::BAD_REQUEST,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::PersistenceError(_) | AppError::CorruptState(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.log();

        let status = self.status_code();
        let error_msg = match self {
            // Don't expose backend details to clients
            AppError::StoreUnavailable(_) => "Leaderboard store unavailable".to_string(),
            AppError::PersistenceError(_) | AppError::CorruptState(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(status).json(serde_json::json!({
            "error": error_msg,
            "status": status.as_u16(),
        }))
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::StoreUnavailable(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::PersistenceError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::PersistenceError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_bad_request() {
        assert_eq!(
            AppError::InvalidInput("Username required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::DuplicateUser.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::DuplicateUser.to_string(), "User already exists");
    }

    #[test]
    fn redis_errors_map_to_store_unavailable() {
        let err: AppError =
            redis::RedisError::from((redis::ErrorKind::IoError, "connection refused")).into();
        assert!(matches!(err, AppError::StoreUnavailable(_)));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn io_errors_map_to_persistence() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "ro").into();
        assert!(matches!(err, AppError::PersistenceError(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
