use rolegate_domain::validate_password;
use tracing::{debug, info};

use super::*;

impl UserService {
    /// Applies a profile patch to the user with the given email.
    ///
    /// Only non-blank fields are written. A new password is validated and
    /// re-hashed. When nothing applicable remains the stored record is
    /// returned untouched and no write is issued.
    pub async fn update(&self, email: &str, patch: UpdateUserInput) -> AppResult<PublicUser> {
        let existing = self.require_by_email(email).await?;

        if patch.email.is_some() || patch.roles.is_some() {
            debug!(user_id = %existing.id, "ignoring email/roles in profile patch");
        }

        let mut changes = UserChanges {
            first_name: non_blank(patch.first_name),
            last_name: non_blank(patch.last_name),
            ..UserChanges::default()
        };

        if let Some(password) = patch.password.filter(|value| !value.is_empty()) {
            validate_password(&password)?;
            changes.password_hash = Some(self.password_hasher.hash_password(&password)?);
        }

        if changes.is_empty() {
            return Ok(existing.into());
        }

        let updated = self
            .user_repository
            .update(existing.email.as_str(), changes)
            .await?
            .ok_or_else(|| user_not_found(email))?;

        info!(user_id = %updated.id, "user profile updated");
        Ok(updated.into())
    }

    /// Deletes the user with the given email and returns the removed record.
    pub async fn remove(&self, email: &str) -> AppResult<PublicUser> {
        let existing = self.require_by_email(email).await?;

        if !self.user_repository.delete(existing.email.as_str()).await? {
            return Err(user_not_found(email));
        }

        info!(user_id = %existing.id, "user removed");
        Ok(existing.into())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
