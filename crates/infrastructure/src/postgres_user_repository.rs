//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use sqlx::PgPool;

use rolegate_application::{NewUserRecord, UserChanges, UserRecord, UserRepository};
use rolegate_core::{AppError, AppResult};
use rolegate_domain::UserId;

mod account;
mod lookup;

/// PostgreSQL implementation of the user repository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: uuid::Uuid,
    email: String,
    first_name: String,
    last_name: String,
    password_hash: String,
    roles: Vec<String>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            password_hash: row.password_hash,
            roles: row.roles,
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        self.find_by_email_impl(email).await
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        self.find_by_id_impl(user_id).await
    }

    async fn list(&self) -> AppResult<Vec<UserRecord>> {
        self.list_impl().await
    }

    async fn insert(&self, user: NewUserRecord) -> AppResult<UserRecord> {
        self.insert_impl(user).await
    }

    async fn update(&self, email: &str, changes: UserChanges) -> AppResult<Option<UserRecord>> {
        self.update_impl(email, changes).await
    }

    async fn delete(&self, email: &str) -> AppResult<bool> {
        self.delete_impl(email).await
    }
}

fn email_conflict_or_internal(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict(format!("duplicate email: {database_error}"));
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}
