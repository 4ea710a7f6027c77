use rolegate_application::UserService;
use rolegate_core::AppError;
use tracing::info;

use crate::api_config::BootstrapAdminConfig;

/// Creates or promotes the configured bootstrap admin.
pub async fn ensure_bootstrap_admin(
    user_service: &UserService,
    bootstrap: Option<&BootstrapAdminConfig>,
) -> Result<(), AppError> {
    let Some(bootstrap) = bootstrap else {
        return Ok(());
    };

    let admin = user_service
        .ensure_admin(&bootstrap.email, bootstrap.password.as_deref())
        .await?;
    info!(user_id = %admin.id, "bootstrap admin is ready");

    Ok(())
}
