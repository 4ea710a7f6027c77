use super::*;

impl PostgresUserRepository {
    pub(super) async fn insert_impl(&self, user: NewUserRecord) -> AppResult<UserRecord> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, email, first_name, last_name, password_hash, roles)
            VALUES ($1, LOWER($2), $3, $4, $5, $6)
            RETURNING id, email, first_name, last_name, password_hash, roles
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.email)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.password_hash)
        .bind(user.roles)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| email_conflict_or_internal(error, "create user"))?;

        Ok(row.into())
    }

    pub(super) async fn update_impl(
        &self,
        email: &str,
        changes: UserChanges,
    ) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                password_hash = COALESCE($4, password_hash),
                roles = COALESCE($5, roles),
                updated_at = now()
            WHERE LOWER(email) = LOWER($1)
            RETURNING id, email, first_name, last_name, password_hash, roles
            "#,
        )
        .bind(email)
        .bind(changes.first_name)
        .bind(changes.last_name)
        .bind(changes.password_hash)
        .bind(changes.roles)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update user: {error}")))?;

        Ok(row.map(UserRecord::from))
    }

    pub(super) async fn delete_impl(&self, email: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete user: {error}")))?;

        Ok(result.rows_affected() > 0)
    }
}
