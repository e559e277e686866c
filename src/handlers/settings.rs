use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::middleware::auth::AuthUser;
use crate::models::{TimerSettings, UpdateSettingsRequest};
use crate::AppState;

use super::{require_user_id, storage_error, ApiError};

pub async fn get_settings(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<(StatusCode, Json<TimerSettings>), ApiError> {
    let user_id = require_user_id(&auth_user)?;

    // Accounts provisioned before a defaults change may lack a row;
    // fall back to the configured defaults.
    let settings = state
        .store
        .get_settings(user_id)
        .await
        .map_err(storage_error)?
        .unwrap_or_else(|| state.config.defaults.clone());

    Ok((StatusCode::OK, Json(settings)))
}

pub async fn update_settings(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<(StatusCode, Json<TimerSettings>), ApiError> {
    let user_id = require_user_id(&auth_user)?;

    let settings = state
        .store
        .update_settings(user_id, payload)
        .await
        .map_err(storage_error)?;

    Ok((StatusCode::OK, Json(settings)))
}
