use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::models::{CreateSubjectRequest, Subject, UpdateSubjectRequest};
use crate::AppState;

use super::{require_user_id, storage_error, ApiError};

pub async fn list_subjects(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<(StatusCode, Json<Vec<Subject>>), ApiError> {
    let user_id = require_user_id(&auth_user)?;
    let subjects = state
        .store
        .list_subjects(user_id)
        .await
        .map_err(storage_error)?;
    Ok((StatusCode::OK, Json(subjects)))
}

pub async fn create_subject(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<CreateSubjectRequest>,
) -> Result<(StatusCode, Json<Subject>), ApiError> {
    let user_id = require_user_id(&auth_user)?;

    let name = payload.name.trim();
    if name.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Subject name is required"
            })),
        ));
    }

    let subject = Subject::new(user_id, name.to_string());
    state
        .store
        .create_subject(subject.clone())
        .await
        .map_err(storage_error)?;

    Ok((StatusCode::CREATED, Json(subject)))
}

pub async fn get_subject(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(subject_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Subject>), ApiError> {
    let user_id = require_user_id(&auth_user)?;

    let subject = state
        .store
        .get_subject(user_id, subject_id)
        .await
        .map_err(storage_error)?
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "Subject not found"
            })),
        ))?;

    Ok((StatusCode::OK, Json(subject)))
}

pub async fn update_subject(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(subject_id): Path<Uuid>,
    Json(payload): Json<UpdateSubjectRequest>,
) -> Result<(StatusCode, Json<Subject>), ApiError> {
    let user_id = require_user_id(&auth_user)?;

    let subject = state
        .store
        .update_subject(user_id, subject_id, payload.name, payload.color)
        .await
        .map_err(storage_error)?;

    Ok((StatusCode::OK, Json(subject)))
}

pub async fn delete_subject(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(subject_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let user_id = require_user_id(&auth_user)?;

    state
        .store
        .delete_subject(user_id, subject_id)
        .await
        .map_err(storage_error)?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Subject deleted"
        })),
    ))
}
