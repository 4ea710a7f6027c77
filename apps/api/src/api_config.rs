use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use rolegate_core::AppError;
use tracing_subscriber::EnvFilter;

const MIN_JWT_SECRET_LENGTH: usize = 32;
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
const DEFAULT_API_PORT: u16 = 3000;

/// Account created or promoted to admin at startup.
#[derive(Clone)]
pub struct BootstrapAdminConfig {
    pub email: String,
    pub password: Option<String>,
}

/// Runtime configuration read from the environment.
#[derive(Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub api_host: String,
    pub api_port: u16,
    pub graphql_playground: bool,
    pub bootstrap_admin: Option<BootstrapAdminConfig>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");
        Self::from_lookup(migrate_only, |name| env::var(name).ok())
    }

    fn from_lookup(
        migrate_only: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_url = optional("DATABASE_URL");

        let jwt_secret = optional("JWT_SECRET")
            .ok_or_else(|| AppError::Validation("JWT_SECRET is required".to_owned()))?;
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::Validation(format!(
                "JWT_SECRET must be at least {MIN_JWT_SECRET_LENGTH} characters"
            )));
        }

        let token_ttl_secs = match optional("JWT_EXPIRES_IN") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "JWT_EXPIRES_IN must be a positive number of seconds, got '{value}'"
                    ))
                })?,
            None => DEFAULT_TOKEN_TTL_SECS,
        };

        let api_host = optional("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = match optional("API_PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| {
                AppError::Validation(format!("API_PORT must be a port number, got '{value}'"))
            })?,
            None => DEFAULT_API_PORT,
        };

        let graphql_playground = optional("GRAPHQL_PLAYGROUND")
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"));

        let bootstrap_admin = optional("BOOTSTRAP_ADMIN_EMAIL").map(|email| BootstrapAdminConfig {
            email,
            password: optional("BOOTSTRAP_ADMIN_PASSWORD"),
        });

        Ok(Self {
            migrate_only,
            database_url,
            jwt_secret,
            token_ttl: Duration::from_secs(token_ttl_secs),
            api_host,
            api_port,
            graphql_playground,
            bootstrap_admin,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
