use tracing::info;

use super::*;

impl UserService {
    /// Grants a role. Granting a role the user already holds is a no-op.
    pub async fn add_role(&self, role: Role, email: &str) -> AppResult<PublicUser> {
        let existing = self.require_by_email(email).await?;
        if existing.has_role(role) {
            return Ok(existing.into());
        }

        let mut roles = existing.roles.clone();
        roles.push(role.as_str().to_owned());

        let updated = self.write_roles(&existing, roles).await?;
        info!(user_id = %updated.id, role = role.as_str(), "role granted");
        Ok(updated.into())
    }

    /// Revokes a role. Revoking a role the user does not hold is a no-op.
    ///
    /// A user always keeps at least one role.
    pub async fn remove_role(&self, role: Role, email: &str) -> AppResult<PublicUser> {
        let existing = self.require_by_email(email).await?;
        if !existing.has_role(role) {
            return Ok(existing.into());
        }

        let roles: Vec<String> = existing
            .roles
            .iter()
            .filter(|value| value.as_str() != role.as_str())
            .cloned()
            .collect();

        if roles.is_empty() {
            return Err(AppError::Validation(format!(
                "user {} must keep at least one role",
                existing.email
            )));
        }

        let updated = self.write_roles(&existing, roles).await?;
        info!(user_id = %updated.id, role = role.as_str(), "role revoked");
        Ok(updated.into())
    }

    async fn write_roles(&self, existing: &UserRecord, roles: Vec<String>) -> AppResult<UserRecord> {
        self.user_repository
            .update(
                existing.email.as_str(),
                UserChanges {
                    roles: Some(roles),
                    ..UserChanges::default()
                },
            )
            .await?
            .ok_or_else(|| user_not_found(existing.email.as_str()))
    }
}
