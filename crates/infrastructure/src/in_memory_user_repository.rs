//! In-memory user repository.

use std::collections::HashMap;

use async_trait::async_trait;
use rolegate_application::{NewUserRecord, UserChanges, UserRecord, UserRepository};
use rolegate_core::{AppError, AppResult};
use rolegate_domain::{UserId, normalize_email};
use tokio::sync::RwLock;


/// In-memory user repository keyed by normalized email.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .await
            .get(normalize_email(email).as_str())
            .cloned())
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.id == user_id)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<UserRecord>> {
        let mut users: Vec<UserRecord> = self.users.read().await.values().cloned().collect();
        users.sort_by(|left, right| left.email.cmp(&right.email));
        Ok(users)
    }

    async fn insert(&self, user: NewUserRecord) -> AppResult<UserRecord> {
        let email = normalize_email(&user.email);
        let mut users = self.users.write().await;

        if users.contains_key(&email) {
            return Err(AppError::Conflict(format!("duplicate email '{email}'")));
        }

        let record = UserRecord {
            id: user.id,
            email: email.clone(),
            first_name: user.first_name,
            last_name: user.last_name,
            password_hash: user.password_hash,
            roles: user.roles,
        };
        users.insert(email, record.clone());
        Ok(record)
    }

    async fn update(&self, email: &str, changes: UserChanges) -> AppResult<Option<UserRecord>> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(normalize_email(email).as_str()) else {
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

        Ok(Some(user.clone()))
    }

    async fn delete(&self, email: &str) -> AppResult<bool> {
        Ok(self
            .users
            .write()
            .await
            .remove(normalize_email(email).as_str())
            .is_some())
    }
}
