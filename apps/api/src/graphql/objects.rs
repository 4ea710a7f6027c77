use async_graphql::{ID, SimpleObject};
use rolegate_application::{IssuedToken, PublicUser};

/// A registered user. The password hash is never exposed.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "User")]
pub struct UserObject {
    pub id: ID,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<String>,
}

impl From<PublicUser> for UserObject {
    fn from(user: PublicUser) -> Self {
        Self {
            id: ID(user.id.to_string()),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            roles: user.roles,
        }
    }
}

/// Session token returned by `loginUser`.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(rename_fields = "snake_case")]
pub struct LoggedUserOutput {
    pub access_token: String,
    /// Unix timestamp (seconds) after which the token is rejected.
    pub expires_at: i64,
}

impl From<IssuedToken> for LoggedUserOutput {
    fn from(token: IssuedToken) -> Self {
        Self {
            access_token: token.access_token,
            expires_at: token.expires_at,
        }
    }
}
