use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::RoleEnum;

/// Claims carried by every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub email: String,
    pub role: RoleEnum,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtManager {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn create_jwt(
        &self,
        user_id: Uuid,
        email: &str,
        role: RoleEnum,
        expires_in: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            user_id,
            email: email.to_string(),
            role,
            iat: now,
            exp: now + expires_in,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    pub fn decode_jwt(&self, token: &str) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_decode() {
        let manager = JwtManager::new("unit-test-secret");
        let user_id = Uuid::new_v4();

        let token = manager
            .create_jwt(user_id, "ta@example.com", RoleEnum::Ta, 3600)
            .unwrap();
        let claims = manager.decode_jwt(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, "ta@example.com");
        assert_eq!(claims.role, RoleEnum::Ta);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let manager = JwtManager::new("unit-test-secret");
        let token = manager
            .create_jwt(Uuid::new_v4(), "s@example.com", RoleEnum::Student, -3600)
            .unwrap();

        assert!(manager.decode_jwt(&token).is_err());
    }

    #[test]
    fn test_foreign_secret_is_rejected() {
        let issuer = JwtManager::new("issuer-secret");
        let verifier = JwtManager::new("another-secret");
        let token = issuer
            .create_jwt(Uuid::new_v4(), "e@example.com", RoleEnum::Educator, 3600)
            .unwrap();

        assert!(verifier.decode_jwt(&token).is_err());
    }
}
