//! GraphQL surface of the user API.
//!
//! Every resolver asks the access policy first and only then calls into the
//! user services, so no resolver carries authorization logic of its own.

use async_graphql::{Context, EmptySubscription, Schema};
use rolegate_application::{AccessPolicyService, ArgumentFields, UserService};
use rolegate_core::SessionClaims;

mod errors;
mod inputs;
mod mutation;
mod objects;
mod query;


use errors::GraphqlResultExt;
pub use mutation::MutationRoot;
pub use query::QueryRoot;

/// Executable schema type served at `/graphql`.
pub type UserSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Services resolvers reach through the schema data.
#[derive(Clone)]
pub struct GraphqlServices {
    pub access_policy: AccessPolicyService,
    pub user_service: UserService,
}

pub fn build_schema(services: GraphqlServices) -> UserSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(services)
        .finish()
}

fn caller<'a>(ctx: &Context<'a>) -> Option<&'a SessionClaims> {
    ctx.data_opt::<SessionClaims>()
}

/// Runs the access policy for `operation` and returns the services on success.
fn authorize<'a>(
    ctx: &Context<'a>,
    operation: &str,
    arguments: &dyn ArgumentFields,
) -> async_graphql::Result<&'a GraphqlServices> {
    let services = ctx.data::<GraphqlServices>()?;
    services
        .access_policy
        .authorize(operation, caller(ctx), arguments)
        .into_graphql()?;
    Ok(services)
}

/// Resolves an optional target email, defaulting to the caller's own.
fn target_or_caller(ctx: &Context<'_>, email: Option<String>) -> Option<String> {
    email
        .filter(|value| !value.trim().is_empty())
        .or_else(|| caller(ctx).map(|claims| claims.email().to_owned()))
}
