//! HS256 JWT session tokens.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rolegate_application::{IssuedToken, TokenIssuer};
use rolegate_core::{AppError, AppResult, ClaimsPayload, SessionClaims};
use serde::{Deserialize, Serialize};
use tracing::debug;

const INVALID_TOKEN: &str = "invalid or expired token";

/// Claims as encoded in the token body.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenClaims {
    sub: String,
    email: String,
    first_name: String,
    last_name: String,
    roles: Vec<String>,
    iat: i64,
    exp: i64,
}

impl TokenClaims {
    fn into_session(self) -> SessionClaims {
        SessionClaims::new(
            ClaimsPayload::new(
                self.sub,
                self.email,
                self.first_name,
                self.last_name,
                self.roles,
            ),
            self.iat,
            self.exp,
        )
    }
}

/// Token issuer signing with a shared HMAC secret.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenIssuer {
    /// Creates an issuer for the given HMAC secret.
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn sign(&self, payload: &ClaimsPayload, ttl: Duration) -> AppResult<IssuedToken> {
        let ttl_secs = i64::try_from(ttl.as_secs())
            .map_err(|_| AppError::Internal("token lifetime is out of range".to_owned()))?;
        let issued_at = Utc::now().timestamp();
        let expires_at = issued_at.saturating_add(ttl_secs);

        let claims = TokenClaims {
            sub: payload.subject().to_owned(),
            email: payload.email().to_owned(),
            first_name: payload.first_name().to_owned(),
            last_name: payload.last_name().to_owned(),
            roles: payload.roles().to_vec(),
            iat: issued_at,
            exp: expires_at,
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|error| AppError::Internal(format!("failed to sign token: {error}")))?;

        Ok(IssuedToken {
            access_token,
            expires_at,
        })
    }

    fn verify(&self, token: &str) -> AppResult<SessionClaims> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.into_session())
            .map_err(|error| {
                debug!(%error, "bearer token rejected");
                AppError::Unauthorized(INVALID_TOKEN.to_owned())
            })
    }
}
