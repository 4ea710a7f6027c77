//! In-memory fakes for application service tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rolegate_core::{AppError, AppResult, ClaimsPayload, SessionClaims};
use rolegate_domain::UserId;
use tokio::sync::Mutex;

use crate::{
    AuthService, IssuedToken, NewUserRecord, PasswordHasher, TokenIssuer, UserChanges,
    UserRecord, UserRepository, UserService,
};

#[derive(Default)]
pub(crate) struct FakeUserRepository {
    users: Mutex<HashMap<String, UserRecord>>,
    writes: AtomicUsize,
    fail_inserts: bool,
}

impl FakeUserRepository {
    pub(crate) fn failing_inserts() -> Self {
        Self {
            fail_inserts: true,
            ..Self::default()
        }
    }

    pub(crate) fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub(crate) async fn len(&self) -> usize {
        self.users.lock().await.len()
    }

    pub(crate) async fn stored(&self, email: &str) -> Option<UserRecord> {
        self.users.lock().await.get(email).cloned()
    }
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        Ok(self.users.lock().await.get(email).cloned())
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .lock()
            .await
            .values()
            .find(|user| user.id == user_id)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<UserRecord>> {
        let mut users: Vec<UserRecord> = self.users.lock().await.values().cloned().collect();
        users.sort_by(|left, right| left.email.cmp(&right.email));
        Ok(users)
    }

    async fn insert(&self, user: NewUserRecord) -> AppResult<UserRecord> {
        if self.fail_inserts {
            return Err(AppError::Internal(
                "connection reset by peer (driver detail)".to_owned(),
            ));
        }

        let mut users = self.users.lock().await;
        if users.contains_key(&user.email) {
            return Err(AppError::Conflict(format!(
                "E11000 duplicate key error: {}",
                user.email
            )));
        }

        let record = UserRecord {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            password_hash: user.password_hash,
            roles: user.roles,
        };
        users.insert(record.email.clone(), record.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(record)
    }

    async fn update(&self, email: &str, changes: UserChanges) -> AppResult<Option<UserRecord>> {
        let mut users = self.users.lock().await;
        let Some(user) = users.get_mut(email) else {
            return Ok(None);
        };

        if let Some(first_name) = changes.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = last_name;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(roles) = changes.roles {
            user.roles = roles;
        }

        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(Some(user.clone()))
    }

    async fn delete(&self, email: &str) -> AppResult<bool> {
        let removed = self.users.lock().await.remove(email).is_some();
        if removed {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(removed)
    }
}

/// Reversible "hash" so tests can assert on stored values.
pub(crate) struct FakePasswordHasher;

impl PasswordHasher for FakePasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        Ok(format!("hashed:{password}"))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        Ok(hash == format!("hashed:{password}"))
    }
}

#[derive(Default)]
pub(crate) struct FakeTokenIssuer {
    pub(crate) signed: std::sync::Mutex<Vec<ClaimsPayload>>,
}

impl TokenIssuer for FakeTokenIssuer {
    fn sign(&self, payload: &ClaimsPayload, ttl: Duration) -> AppResult<IssuedToken> {
        if let Ok(mut signed) = self.signed.lock() {
            signed.push(payload.clone());
        }
        Ok(IssuedToken {
            access_token: format!("token-for-{}", payload.subject()),
            expires_at: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
        })
    }

    fn verify(&self, token: &str) -> AppResult<SessionClaims> {
        Err(AppError::Unauthorized(format!("unknown token '{token}'")))
    }
}

pub(crate) struct Harness {
    pub(crate) repository: Arc<FakeUserRepository>,
    pub(crate) issuer: Arc<FakeTokenIssuer>,
    pub(crate) auth_service: AuthService,
    pub(crate) user_service: UserService,
}

pub(crate) fn harness() -> Harness {
    harness_with(FakeUserRepository::default())
}

pub(crate) fn harness_with(repository: FakeUserRepository) -> Harness {
    let repository = Arc::new(repository);
    let issuer = Arc::new(FakeTokenIssuer::default());
    let hasher = Arc::new(FakePasswordHasher);
    let auth_service = AuthService::new(
        repository.clone(),
        hasher.clone(),
        issuer.clone(),
        Duration::from_secs(3600),
    );
    let user_service = UserService::new(repository.clone(), hasher, auth_service.clone());

    Harness {
        repository,
        issuer,
        auth_service,
        user_service,
    }
}

pub(crate) fn claims(email: &str, roles: &[&str]) -> SessionClaims {
    SessionClaims::new(
        ClaimsPayload::new(
            UserId::new().to_string(),
            email,
            "Test",
            "Caller",
            roles.iter().map(|role| (*role).to_owned()).collect(),
        ),
        0,
        3600,
    )
}
