use rolegate_application::{AuthService, UserService};
use sqlx::PgPool;

use crate::graphql::UserSchema;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub schema: UserSchema,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub graphql_playground: bool,
    pub postgres_pool: Option<PgPool>,
}
