use tracing::info;

use super::*;

const BOOTSTRAP_FIRST_NAME: &str = "Admin";
const BOOTSTRAP_LAST_NAME: &str = "Account";

impl UserService {
    /// Ensures an administrator account exists for the given email.
    ///
    /// Creates the account when missing, then grants the admin role.
    /// Running it again against an existing admin changes nothing.
    pub async fn ensure_admin(&self, email: &str, password: Option<&str>) -> AppResult<PublicUser> {
        let normalized = normalize_email(email);
        let existing = self
            .user_repository
            .find_by_email(normalized.as_str())
            .await?;

        if existing.is_none() {
            let password = password.ok_or_else(|| {
                AppError::Validation(format!(
                    "a password is required to create bootstrap admin {normalized}"
                ))
            })?;

            let created = self
                .create(CreateUserInput {
                    email: normalized.clone(),
                    first_name: BOOTSTRAP_FIRST_NAME.to_owned(),
                    last_name: BOOTSTRAP_LAST_NAME.to_owned(),
                    password: password.to_owned(),
                })
                .await?;
            info!(user_id = %created.id, "bootstrap admin account created");
        }

        self.add_role(Role::Admin, normalized.as_str()).await
    }
}
