//! HTTP error mapping.
//!
//! Authentication failures surface as 401, authorization as 403, and
//! collaborator failures as 500 — an unavailable store must never be
//! masked as an auth failure. Internal details are logged, not leaked.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kantin_auth::error::AuthError;
use kantin_core::error::KantinError;
use serde_json::json;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: reason.into(),
        }
    }

    pub fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!(%detail, "internal error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal Server Error".into(),
        }
    }

    #[cfg(test)]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[cfg(test)]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<KantinError> for ApiError {
    fn from(err: KantinError) -> Self {
        match err {
            KantinError::AuthenticationFailed { reason } => Self {
                status: StatusCode::UNAUTHORIZED,
                message: reason,
            },
            KantinError::AuthorizationDenied { reason } => Self {
                status: StatusCode::FORBIDDEN,
                message: reason,
            },
            KantinError::NotFound { entity, .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: format!("{entity} not found"),
            },
            KantinError::Validation { message } => Self {
                status: StatusCode::BAD_REQUEST,
                message,
            },
            KantinError::AlreadyExists { entity } => Self {
                status: StatusCode::BAD_REQUEST,
                message: format!("{entity} already exists"),
            },
            KantinError::Database(_)
            | KantinError::Crypto(_)
            | KantinError::Configuration(_)
            | KantinError::Internal(_) => Self::internal(err),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        KantinError::from(err).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_failures_map_to_401() {
        let err = ApiError::from(AuthError::MissingToken);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "No token provided");

        let err = ApiError::from(AuthError::InvalidApiKey);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "Invalid API key");

        let err = ApiError::from(AuthError::SubjectNotFound);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "User not found");
    }

    #[test]
    fn authorization_failures_map_to_403() {
        let err = ApiError::from(KantinError::AuthorizationDenied {
            reason: "role STUDENT is not permitted for this operation".into(),
        });
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn store_failure_is_a_500_not_a_401() {
        let err = ApiError::from(AuthError::Store(KantinError::Database(
            "connection refused".into(),
        )));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // The raw failure detail stays out of the response body.
        assert_eq!(err.message(), "Internal Server Error");
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::from(KantinError::NotFound {
            entity: "user".into(),
            id: "x".into(),
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicate_maps_to_400() {
        let err = ApiError::from(KantinError::AlreadyExists {
            entity: "user".into(),
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
