//! Error types for the gateway crate.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hero_core::CoreError;
use hero_store::StoreError;
use serde_json::json;

pub const HERO_NOT_FOUND: &str = "Hero not found";
pub const POWER_NOT_FOUND: &str = "Power not found";
pub const HERO_OR_POWER_NOT_FOUND: &str = "Hero or Power not found";

/// Errors that can occur during request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The requested entity does not exist. Carries the client-facing message.
    #[error("{0}")]
    NotFound(&'static str),

    /// The request body is malformed or fails validation.
    #[error("validation errors")]
    Validation,

    /// An unexpected failure in the store layer.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::HeroNotFound(_) => ApiError::NotFound(HERO_NOT_FOUND),
            StoreError::PowerNotFound(_) => ApiError::NotFound(POWER_NOT_FOUND),
            other => ApiError::Store(other),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(_: CoreError) -> Self {
        ApiError::Validation
    }
}

impl From<JsonRejection> for ApiError {
    fn from(_: JsonRejection) -> Self {
        ApiError::Validation
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({"error": message}))).into_response()
            }
            ApiError::Validation => (
                StatusCode::BAD_REQUEST,
                Json(json!({"errors": ["validation errors"]})),
            )
                .into_response(),
            ApiError::Store(err) => {
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Internal Server Error"})),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hero_core::{HeroId, PowerId};

    #[test]
    fn api_error_status_codes_map_correctly() {
        let resp = ApiError::NotFound(HERO_NOT_FOUND).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = ApiError::Validation.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiError::Store(StoreError::InvalidSeed { reason: "x".to_owned() }).into_response();
        assert_eq!(
            resp.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "Store errors must map to 500"
        );
    }

    #[test]
    fn store_not_found_errors_become_entity_messages() {
        match ApiError::from(StoreError::HeroNotFound(HeroId(3))) {
            ApiError::NotFound(msg) => assert_eq!(msg, HERO_NOT_FOUND),
            other => panic!("expected NotFound, got {other:?}"),
        }
        match ApiError::from(StoreError::PowerNotFound(PowerId(3))) {
            ApiError::NotFound(msg) => assert_eq!(msg, POWER_NOT_FOUND),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn core_errors_become_validation_failures() {
        let err = ApiError::from(CoreError::InvalidStrength { value: "Mighty".to_owned() });
        assert!(matches!(err, ApiError::Validation));
    }
}
