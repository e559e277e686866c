use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::auth::jwt::{signing_secret, validate_token};
use crate::models::Claims;
use crate::AppState;

// Extension to store the authenticated user's claims in the request
#[derive(Clone)]
pub struct AuthUser {
    pub claims: Claims,
    /// The raw bearer token, kept so logout can revoke it.
    pub token: String,
}

impl AuthUser {
    pub fn user_id(&self) -> Result<uuid::Uuid, uuid::Error> {
        uuid::Uuid::parse_str(&self.claims.sub)
    }
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // Extract the Authorization header
    let auth_header = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // Check if it starts with "Bearer "
    if !auth_header.starts_with("Bearer ") {
        return Err(StatusCode::UNAUTHORIZED);
    }

    // Extract the token
    let token = &auth_header[7..];

    // Reject tokens revoked by logout
    let revoked = state
        .store
        .is_token_revoked(token)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    if revoked {
        return Err(StatusCode::UNAUTHORIZED);
    }

    // Validate the token
    let claims = validate_token(token, &signing_secret(&state.config.auth))
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    // Add the claims to the request extensions
    request.extensions_mut().insert(AuthUser {
        claims,
        token: token.to_string(),
    });

    Ok(next.run(request).await)
}
