//! Credential verification and session token issuance.

use std::sync::Arc;
use std::time::Duration;

use rolegate_core::{AppError, AppResult, ClaimsPayload, SessionClaims};
use rolegate_domain::EmailAddress;
use tracing::warn;

use crate::{PasswordHasher, PublicUser, UserRepository};

/// Signed bearer token handed to a caller after login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Encoded bearer token.
    pub access_token: String,
    /// Expiry timestamp in unix seconds.
    pub expires_at: i64,
}

/// Port for signing and verifying session tokens.
pub trait TokenIssuer: Send + Sync {
    /// Signs the payload into a token valid for `ttl`.
    fn sign(&self, payload: &ClaimsPayload, ttl: Duration) -> AppResult<IssuedToken>;

    /// Verifies a token's signature and expiry and returns its claims.
    fn verify(&self, token: &str) -> AppResult<SessionClaims>;
}

/// Application service for password login.
#[derive(Clone)]
pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_issuer: Arc<dyn TokenIssuer>,
    token_ttl: Duration,
}

impl AuthService {
    /// Creates a new auth service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_issuer: Arc<dyn TokenIssuer>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_issuer,
            token_ttl,
        }
    }

    /// Checks an email/password pair against the stored hash.
    ///
    /// Returns `None` for an unknown email and for a wrong password alike,
    /// so the outcome never reveals whether the account exists.
    pub async fn validate(&self, email: &str, password: &str) -> AppResult<Option<PublicUser>> {
        let Ok(email) = EmailAddress::new(email) else {
            let _ = self.password_hasher.hash_password(password);
            return Ok(None);
        };

        let Some(user) = self.user_repository.find_by_email(email.as_str()).await? else {
            // Hash anyway so unknown emails cost the same as wrong passwords.
            let _ = self.password_hasher.hash_password(password);
            return Ok(None);
        };

        if self
            .password_hasher
            .verify_password(password, &user.password_hash)?
        {
            Ok(Some(user.into()))
        } else {
            Ok(None)
        }
    }

    /// Signs a session token carrying the user's identity and roles.
    pub fn issue_token(&self, user: &PublicUser) -> AppResult<IssuedToken> {
        let payload = ClaimsPayload::new(
            user.id.to_string(),
            user.email.clone(),
            user.first_name.clone(),
            user.last_name.clone(),
            user.roles.clone(),
        );

        self.token_issuer.sign(&payload, self.token_ttl)
    }

    /// Validates credentials and issues a token on success.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<IssuedToken> {
        match self.validate(email, password).await? {
            Some(user) => self.issue_token(&user),
            None => {
                warn!("login rejected: incorrect email or password");
                Err(AppError::Unauthorized(
                    "incorrect email or password".to_owned(),
                ))
            }
        }
    }

    /// Decodes a bearer token into verified claims.
    pub fn verify_token(&self, token: &str) -> AppResult<SessionClaims> {
        self.token_issuer.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use crate::CreateUserInput;
    use crate::test_support::harness;

    #[tokio::test]
    async fn validate_strips_hash_and_matches_any_case() {
        let harness = harness();
        let created = harness
            .user_service
            .create(CreateUserInput {
                email: "ada@example.com".to_owned(),
                first_name: "Ada".to_owned(),
                last_name: "Lovelace".to_owned(),
                password: "analytical-engine".to_owned(),
            })
            .await
            .unwrap_or_else(|error| panic!("registration failed: {error}"));

        let validated = harness
            .auth_service
            .validate("ADA@EXAMPLE.COM", "analytical-engine")
            .await;
        assert_eq!(validated.ok().flatten(), Some(created));
    }

    #[tokio::test]
    async fn validate_unknown_or_malformed_email_is_no_match() {
        let harness = harness();

        let unknown = harness
            .auth_service
            .validate("ghost@example.com", "whatever-secret")
            .await;
        assert!(matches!(unknown, Ok(None)));

        let malformed = harness.auth_service.validate("not-an-email", "x").await;
        assert!(matches!(malformed, Ok(None)));
    }

    #[tokio::test]
    async fn issue_token_signs_identity_and_roles() {
        let harness = harness();
        let created = harness
            .user_service
            .create(CreateUserInput {
                email: "ada@example.com".to_owned(),
                first_name: "Ada".to_owned(),
                last_name: "Lovelace".to_owned(),
                password: "analytical-engine".to_owned(),
            })
            .await
            .unwrap_or_else(|error| panic!("registration failed: {error}"));

        let token = harness.auth_service.issue_token(&created);
        assert!(token.is_ok());

        let signed = harness
            .issuer
            .signed
            .lock()
            .map(|payloads| payloads.clone())
            .unwrap_or_default();
        assert_eq!(signed.len(), 1);
        assert_eq!(signed[0].subject(), created.id.to_string());
        assert_eq!(signed[0].email(), "ada@example.com");
        assert_eq!(signed[0].first_name(), "Ada");
        assert_eq!(signed[0].roles(), ["user".to_owned()].as_slice());
    }
}
