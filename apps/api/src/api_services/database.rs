use rolegate_core::AppError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

const MAX_CONNECTIONS: u32 = 10;

/// Opens the user store pool and brings the `users` schema up to date.
pub async fn connect_and_migrate(database_url: &str) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to connect to user store: {error}"))
        })?;

    let migrator = sqlx::migrate!("../../crates/infrastructure/migrations");
    migrator
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to migrate user store: {error}")))?;

    info!(
        migrations = migrator.iter().count(),
        max_connections = MAX_CONNECTIONS,
        "user store ready"
    );
    Ok(pool)
}
