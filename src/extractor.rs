use axum::extract::FromRequestParts;
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use http::request::Parts;
use once_cell::sync::Lazy;

use crate::config::APP_CONFIG;
use crate::domain::Actor;
use crate::error::AppError;
use crate::utils::jwt::{JwtManager, TokenClaims};

pub static JWT_MANAGER: Lazy<JwtManager> = Lazy::new(|| JwtManager::new(&APP_CONFIG.jwt_secret));

/// Verified bearer-token claims of the caller.
#[derive(Debug, Clone)]
pub struct AuthClaims(pub TokenClaims);

impl AuthClaims {
    pub fn actor(&self) -> Actor {
        Actor::new(self.0.user_id, self.0.role)
    }
}

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    AppError::Unauthenticated("Access token is required".to_string())
                })?;

        let claims = JWT_MANAGER.decode_jwt(bearer.token()).map_err(|e| {
            tracing::debug!(error = %e, "rejected access token");
            AppError::InvalidToken("Invalid or expired token".to_string())
        })?;

        Ok(AuthClaims(claims))
    }
}
