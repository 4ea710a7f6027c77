use rolegate_core::NonEmptyString;
use rolegate_domain::{EmailAddress, validate_password};
use tracing::{error, info, warn};

use super::*;

impl UserService {
    /// Registers a new user with the default `user` role.
    ///
    /// A duplicate email is reported as a validation error naming the
    /// address; other store failures are reported without driver detail.
    pub async fn create(&self, input: CreateUserInput) -> AppResult<PublicUser> {
        let email = EmailAddress::new(&input.email)?;
        let first_name = NonEmptyString::new(input.first_name)
            .map_err(|_| AppError::Validation("first name must not be empty".to_owned()))?;
        let last_name = NonEmptyString::new(input.last_name)
            .map_err(|_| AppError::Validation("last name must not be empty".to_owned()))?;
        validate_password(&input.password)?;

        let password_hash = self.password_hasher.hash_password(&input.password)?;

        let record = NewUserRecord {
            id: UserId::new(),
            email: email.as_str().to_owned(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            password_hash,
            roles: vec![Role::User.as_str().to_owned()],
        };

        match self.user_repository.insert(record).await {
            Ok(user) => {
                info!(user_id = %user.id, "user registered");
                Ok(user.into())
            }
            Err(AppError::Conflict(_)) => {
                warn!(email = %email, "registration rejected for duplicate email");
                Err(AppError::Validation(format!(
                    "email {email} is already registered"
                )))
            }
            Err(error) => {
                error!(%error, "failed to create user");
                Err(AppError::Internal("failed to create user".to_owned()))
            }
        }
    }
}
