use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use crate::auth::{create_token, hash_password, signing_secret, verify_password};
use crate::middleware::auth::AuthUser;
use crate::models::{AuthResponse, Claims, LoginRequest, RegisterRequest, User, UserInfo};
use crate::storage::StorageError;
use crate::AppState;

use super::{require_user_id, ApiError};

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let name = payload.name.trim();
    let email = payload.email.trim();

    // Validate input
    if name.is_empty() || email.is_empty() || payload.password.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Name, email, and password are required"
            })),
        ));
    }

    let min_len = state.config.auth.min_password_length;
    if payload.password.len() < min_len {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("Password must be at least {} characters", min_len)
            })),
        ));
    }

    // Hash the password
    let password_hash = hash_password(&payload.password).map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Failed to hash password"
            })),
        )
    })?;

    let user = User::new(name.to_string(), email.to_string(), password_hash);

    match state.store.create_user(user.clone()).await {
        Ok(()) => {}
        Err(StorageError::AlreadyExists) => {
            return Err((
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "Email already registered"
                })),
            ));
        }
        Err(e) => return Err(super::storage_error(e)),
    }

    // Provisioning hook: every new account gets a default settings row.
    // On failure the user row is rolled back so the email stays free
    // for a retry.
    match state
        .store
        .create_settings(user.id, state.config.defaults.clone())
        .await
    {
        Ok(()) | Err(StorageError::AlreadyExists) => {}
        Err(e) => {
            tracing::error!("Failed to provision settings for {}: {}", user.id, e);
            if let Err(rollback) = state.store.delete_user(user.id).await {
                tracing::error!("Failed to roll back user {}: {}", user.id, rollback);
            }
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to provision account"
                })),
            ));
        }
    }

    tracing::info!("Registered new user {}", user.id);

    let token = issue_token(&state, &user)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserInfo::from(user),
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let invalid_credentials = || {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid credentials"
            })),
        )
    };

    let user = state
        .store
        .get_user_by_email(payload.email.trim())
        .await
        .map_err(super::storage_error)?
        .ok_or_else(invalid_credentials)?;

    // Verify password
    let is_valid = verify_password(&payload.password, &user.password_hash).map_err(|e| {
        tracing::error!("Password verification failed: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Password verification failed"
            })),
        )
    })?;

    if !is_valid {
        return Err(invalid_credentials());
    }

    let token = issue_token(&state, &user)?;
    Ok((
        StatusCode::OK,
        Json(AuthResponse {
            token,
            user: UserInfo::from(user),
        }),
    ))
}

/// Revoke the presented token until its natural expiry.
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let expires_at = Utc
        .timestamp_opt(auth_user.claims.exp as i64, 0)
        .single()
        .unwrap_or_else(Utc::now);

    state
        .store
        .revoke_token(&auth_user.token, expires_at)
        .await
        .map_err(super::storage_error)?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Signed out"
        })),
    ))
}

/// Current session: return the authenticated user's profile.
pub async fn session(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<(StatusCode, Json<UserInfo>), ApiError> {
    let user_id = require_user_id(&auth_user)?;

    let user = state
        .store
        .get_user(user_id)
        .await
        .map_err(super::storage_error)?
        .ok_or((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Unauthorized"
            })),
        ))?;

    Ok((StatusCode::OK, Json(UserInfo::from(user))))
}

fn issue_token(state: &AppState, user: &User) -> Result<String, ApiError> {
    let expiration = chrono::Duration::seconds(state.config.auth.token_expiration_secs);
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        exp: (Utc::now() + expiration).timestamp() as usize,
    };

    create_token(&claims, &signing_secret(&state.config.auth)).map_err(|e| {
        tracing::error!("Failed to create token: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Failed to create token"
            })),
        )
    })
}
