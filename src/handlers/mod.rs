pub mod auth;
pub mod health;
pub mod sessions;
pub mod settings;
pub mod stats;
pub mod subjects;
pub mod topics;

use axum::{http::StatusCode, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::storage::StorageError;

pub(crate) type ApiError = (StatusCode, Json<Value>);

/// Map a storage failure onto an HTTP error response. Unexpected
/// failures are logged and surfaced as opaque 500s.
pub(crate) fn storage_error(err: StorageError) -> ApiError {
    match err {
        StorageError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "Not found"
            })),
        ),
        StorageError::AlreadyExists => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "Already exists"
            })),
        ),
        StorageError::InvalidData(msg) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": msg
            })),
        ),
        StorageError::ConnectionError(msg) => {
            tracing::error!("Storage failure: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error"
                })),
            )
        }
    }
}

/// Pull the authenticated user's id out of the JWT subject claim.
pub(crate) fn require_user_id(auth_user: &AuthUser) -> Result<Uuid, ApiError> {
    auth_user.user_id().map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Unauthorized"
            })),
        )
    })
}
