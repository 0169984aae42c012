//! Marketplace error type with HTTP status code mapping.
//!
//! [`MarketError`] is the central error type of the service. Each variant
//! maps to one HTTP status code and renders the flat JSON body
//! `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// JSON error body returned by every failing endpoint.
///
/// ```json
/// { "error": "name is required" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Message sent to clients for every 500 response. The real cause is
/// only written to the server log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message for paths that match no resource.
pub const RESOURCE_NOT_FOUND_MESSAGE: &str = "Resource not found";

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant           | HTTP Status                 |
/// |-------------------|-----------------------------|
/// | `InvalidRequest`  | 400 Bad Request             |
/// | `Unauthenticated` | 401 Unauthorized            |
/// | `Forbidden`       | 403 Forbidden               |
/// | `NotFound`        | 404 Not Found               |
/// | `Conflict`        | 409 Conflict                |
/// | `Persistence`     | 500 Internal Server Error   |
/// | `Internal`        | 500 Internal Server Error   |
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    /// A required field is missing or a value is invalid.
    #[error("{0}")]
    InvalidRequest(String),

    /// No valid session accompanies the request, or credentials are wrong.
    #[error("{0}")]
    Unauthenticated(String),

    /// The caller is authenticated but not allowed to do this.
    #[error("{0}")]
    Forbidden(String),

    /// The addressed resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A unique key already exists, or the row is still referenced.
    #[error("{0}")]
    Conflict(String),

    /// Storage layer failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Anything else that went wrong on the server side.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MarketError {
    /// Shorthand for the `"<field> is required"` validation error.
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::InvalidRequest(format!("{field} is required"))
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to the client. Server-side failures are opaque.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::Persistence(_) | Self::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<sqlx::Error> for MarketError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Conflict("Record already exists".to_string())
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                Self::Conflict("Record is still referenced by other records".to_string())
            }
            _ => Self::Persistence(err.to_string()),
        }
    }
}

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: self.client_message(),
        };
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            MarketError::missing_field("name").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            MarketError::Unauthenticated("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            MarketError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            MarketError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            MarketError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            MarketError::Persistence("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn missing_field_message() {
        assert_eq!(
            MarketError::missing_field("email").client_message(),
            "email is required"
        );
    }

    #[test]
    fn server_errors_are_opaque() {
        let err = MarketError::Persistence("connection refused on 10.0.0.3".into());
        assert_eq!(err.client_message(), INTERNAL_ERROR_MESSAGE);
        let err = MarketError::Internal("argon2 blew up".into());
        assert_eq!(err.client_message(), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn non_database_sqlx_errors_become_persistence() {
        let err = MarketError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, MarketError::Persistence(_)));
    }
}
