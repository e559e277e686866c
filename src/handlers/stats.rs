use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::middleware::auth::AuthUser;
use crate::stats::{average_progress, compute_stats};
use crate::AppState;

use super::{require_user_id, storage_error, ApiError};

/// Number of recent sessions included in the analytics summary.
const RECENT_SESSIONS: usize = 7;

pub async fn get_stats(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let user_id = require_user_id(&auth_user)?;

    let subjects = state
        .store
        .list_subjects(user_id)
        .await
        .map_err(storage_error)?;
    let sessions = state
        .store
        .list_sessions(user_id)
        .await
        .map_err(storage_error)?;

    let stats = compute_stats(&subjects, &sessions, Utc::now().date_naive());
    let recent_sessions: Vec<_> = sessions.iter().take(RECENT_SESSIONS).collect();

    Ok((
        StatusCode::OK,
        Json(json!({
            "stats": stats,
            "total_subjects": subjects.len(),
            "average_progress": average_progress(&subjects),
            "recent_sessions": recent_sessions,
        })),
    ))
}
