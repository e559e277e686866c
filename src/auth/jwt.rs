use crate::config::AuthConfig;
use crate::models::Claims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::env;

const DEV_SECRET: &str = "change-this-development-secret";

/// Resolve the signing secret: explicit config value first, then the
/// JWT_SECRET environment variable, then a development fallback.
pub fn signing_secret(config: &AuthConfig) -> String {
    if let Some(secret) = &config.jwt_secret {
        return secret.clone();
    }
    env::var("JWT_SECRET").unwrap_or_else(|_| DEV_SECRET.to_string())
}

pub fn create_token(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn validate_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}
