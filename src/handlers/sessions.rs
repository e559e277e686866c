use axum::{extract::State, http::StatusCode, Extension, Json};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::models::{RecordSessionRequest, TimerSession};
use crate::AppState;

use super::{require_user_id, storage_error, ApiError};

pub async fn list_sessions(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<(StatusCode, Json<Vec<TimerSession>>), ApiError> {
    let user_id = require_user_id(&auth_user)?;
    let sessions = state
        .store
        .list_sessions(user_id)
        .await
        .map_err(storage_error)?;
    Ok((StatusCode::OK, Json(sessions)))
}

pub async fn record_session(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<RecordSessionRequest>,
) -> Result<(StatusCode, Json<TimerSession>), ApiError> {
    let user_id = require_user_id(&auth_user)?;

    let session = TimerSession {
        id: Uuid::new_v4(),
        user_id,
        kind: payload.kind,
        duration: payload.duration,
        completed: payload.completed,
        start_time: payload.start_time,
        end_time: payload.end_time,
        subject_id: payload.subject_id,
    };

    state
        .store
        .record_session(session.clone())
        .await
        .map_err(storage_error)?;

    Ok((StatusCode::CREATED, Json(session)))
}
