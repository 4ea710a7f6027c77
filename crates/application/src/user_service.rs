//! User directory ports and application service.
//!
//! Owns the user lifecycle: registration, lookup, profile updates,
//! removal and role assignment. Credential checks are delegated to
//! [`AuthService`].

use std::sync::Arc;

use async_trait::async_trait;

use rolegate_core::{AppError, AppResult};
use rolegate_domain::{Role, UserId, normalize_email};

use crate::{AuthService, IssuedToken};

mod bootstrap;
mod profile;
mod registration;
mod retrieval;
mod roles;

#[cfg(test)]
mod tests;

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// User record returned by repository queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique user identifier.
    pub id: UserId,
    /// Normalized email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Argon2id password hash.
    pub password_hash: String,
    /// Role tags in grant order.
    pub roles: Vec<String>,
}

impl UserRecord {
    /// Returns whether the record holds the given role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.iter().any(|value| value == role.as_str())
    }
}

/// Document inserted for a newly registered user.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    /// Identifier assigned by the service.
    pub id: UserId,
    /// Normalized email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Argon2id password hash.
    pub password_hash: String,
    /// Initial role tags.
    pub roles: Vec<String>,
}

/// Partial update applied to a stored user. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New password hash.
    pub password_hash: Option<String>,
    /// Replacement role set.
    pub roles: Option<Vec<String>>,
}

impl UserChanges {
    /// Returns true when no field would be written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.password_hash.is_none()
            && self.roles.is_none()
    }
}

/// Repository port for the credential store.
///
/// Email arguments are expected in normalized form; the store enforces
/// email uniqueness.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by normalized email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>>;

    /// Finds a user by their unique identifier.
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>>;

    /// Lists every user ordered by email.
    async fn list(&self) -> AppResult<Vec<UserRecord>>;

    /// Inserts a new user. Fails with [`AppError::Conflict`] when the
    /// email is already taken.
    async fn insert(&self, user: NewUserRecord) -> AppResult<UserRecord>;

    /// Applies changes to the user with the given email, returning the
    /// updated record or `None` if no such user exists.
    async fn update(&self, email: &str, changes: UserChanges) -> AppResult<Option<UserRecord>>;

    /// Deletes the user with the given email. Returns whether a record was removed.
    async fn delete(&self, email: &str) -> AppResult<bool>;
}

/// Port for password hashing operations. Keeps domain/application free of
/// direct cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password with a fresh salt.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    /// Must run in constant time regardless of validity.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

// ---------------------------------------------------------------------------
// Request and response types
// ---------------------------------------------------------------------------

/// User view returned to callers. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUser {
    /// Unique user identifier.
    pub id: UserId,
    /// Normalized email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Role tags.
    pub roles: Vec<String>,
}

impl From<UserRecord> for PublicUser {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            first_name: record.first_name,
            last_name: record.last_name,
            roles: record.roles,
        }
    }
}

/// Parameters for user registration.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Email address for the new account.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Plaintext password.
    pub password: String,
}

/// Profile patch. Absent or blank fields are left untouched.
///
/// `email` and `roles` are accepted so the access policy can see them, but
/// the update path never applies them.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    /// Ignored: email is immutable after registration.
    pub email: Option<String>,
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New plaintext password.
    pub password: Option<String>,
    /// Ignored: roles change only through role operations.
    pub roles: Option<Vec<String>>,
}

/// Credentials submitted at login.
#[derive(Debug, Clone)]
pub struct LoginUserInput {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for the user directory.
#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    auth_service: AuthService,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        auth_service: AuthService,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            auth_service,
        }
    }

    /// Verifies credentials and issues a session token.
    pub async fn login(&self, input: LoginUserInput) -> AppResult<IssuedToken> {
        self.auth_service.login(&input.email, &input.password).await
    }

    async fn require_by_email(&self, email: &str) -> AppResult<UserRecord> {
        let normalized = normalize_email(email);
        self.user_repository
            .find_by_email(normalized.as_str())
            .await?
            .ok_or_else(|| user_not_found(email))
    }
}

fn user_not_found(identifier: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("user {identifier} not found"))
}
