use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::models::{CreateTopicRequest, ReorderTopicsRequest, Topic, UpdateTopicRequest};
use crate::AppState;

use super::{require_user_id, storage_error, ApiError};

pub async fn add_topic(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(subject_id): Path<Uuid>,
    Json(payload): Json<CreateTopicRequest>,
) -> Result<(StatusCode, Json<Topic>), ApiError> {
    let user_id = require_user_id(&auth_user)?;

    let title = payload.title.trim();
    if title.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Topic title is required"
            })),
        ));
    }

    let topic = state
        .store
        .add_topic(user_id, subject_id, title.to_string())
        .await
        .map_err(storage_error)?;

    Ok((StatusCode::CREATED, Json(topic)))
}

pub async fn update_topic(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((subject_id, topic_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateTopicRequest>,
) -> Result<(StatusCode, Json<Topic>), ApiError> {
    let user_id = require_user_id(&auth_user)?;

    let topic = state
        .store
        .update_topic(user_id, subject_id, topic_id, payload.title, payload.completed)
        .await
        .map_err(storage_error)?;

    Ok((StatusCode::OK, Json(topic)))
}

pub async fn toggle_topic(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((subject_id, topic_id)): Path<(Uuid, Uuid)>,
) -> Result<(StatusCode, Json<Topic>), ApiError> {
    let user_id = require_user_id(&auth_user)?;

    let topic = state
        .store
        .toggle_topic(user_id, subject_id, topic_id)
        .await
        .map_err(storage_error)?;

    Ok((StatusCode::OK, Json(topic)))
}

pub async fn delete_topic(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((subject_id, topic_id)): Path<(Uuid, Uuid)>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let user_id = require_user_id(&auth_user)?;

    state
        .store
        .delete_topic(user_id, subject_id, topic_id)
        .await
        .map_err(storage_error)?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Topic deleted"
        })),
    ))
}

pub async fn reorder_topics(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(subject_id): Path<Uuid>,
    Json(payload): Json<ReorderTopicsRequest>,
) -> Result<(StatusCode, Json<Vec<Topic>>), ApiError> {
    let user_id = require_user_id(&auth_user)?;

    let topics = state
        .store
        .reorder_topics(user_id, subject_id, &payload.topic_ids)
        .await
        .map_err(storage_error)?;

    Ok((StatusCode::OK, Json(topics)))
}
