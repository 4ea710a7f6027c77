use std::sync::Arc;
use std::time::Duration;

use rolegate_application::{
    AccessPolicyService, AuthService, OperationRegistry, TokenIssuer, UserRepository, UserService,
};
use rolegate_infrastructure::{
    Argon2PasswordHasher, InMemoryUserRepository, JwtTokenIssuer, PostgresUserRepository,
};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::api_config::ApiConfig;
use crate::graphql::{GraphqlServices, build_schema};
use crate::state::AppState;

/// Wires the services for the configured store.
pub fn build_app_state(pool: Option<PgPool>, config: &ApiConfig) -> AppState {
    let user_repository: Arc<dyn UserRepository> = match &pool {
        Some(pool) => {
            info!("using postgres user store");
            Arc::new(PostgresUserRepository::new(pool.clone()))
        }
        None => {
            warn!("DATABASE_URL is not set; users are kept in memory and lost on restart");
            Arc::new(InMemoryUserRepository::new())
        }
    };
    let token_issuer = Arc::new(JwtTokenIssuer::new(config.jwt_secret.as_bytes()));

    let mut state = build_state(
        user_repository,
        token_issuer,
        config.token_ttl,
        config.graphql_playground,
    );
    state.postgres_pool = pool;
    state
}

pub fn build_state(
    user_repository: Arc<dyn UserRepository>,
    token_issuer: Arc<dyn TokenIssuer>,
    token_ttl: Duration,
    graphql_playground: bool,
) -> AppState {
    let password_hasher = Arc::new(Argon2PasswordHasher::new());

    let auth_service = AuthService::new(
        user_repository.clone(),
        password_hasher.clone(),
        token_issuer,
        token_ttl,
    );
    let user_service = UserService::new(user_repository, password_hasher, auth_service.clone());

    let schema = build_schema(GraphqlServices {
        access_policy: AccessPolicyService::new(OperationRegistry::user_operations()),
        user_service: user_service.clone(),
    });

    AppState {
        schema,
        auth_service,
        user_service,
        graphql_playground,
        postgres_pool: None,
    }
}
