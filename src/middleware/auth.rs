use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::{error::AppError, state::AppState};

/// Bearer token claims issued by the identity provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Identity-provider user id, stored as `users.auth0_id`.
    pub sub: String,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub auth0_id: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        let Some(token) = auth_str.strip_prefix("Bearer ") else {
            return Err(AppError::Unauthorized("Invalid Authorization scheme".into()));
        };
        let token = token.trim();

        let secret = state
            .config
            .jwt_secret
            .as_ref()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("AUTH_JWT_SECRET is not set")))?;

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

        if decoded.claims.sub.trim().is_empty() {
            return Err(AppError::Unauthorized("Token has no subject".into()));
        }

        Ok(AuthUser {
            auth0_id: decoded.claims.sub,
        })
    }
}
