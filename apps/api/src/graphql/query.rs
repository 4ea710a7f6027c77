use async_graphql::{Context, ID, Object};
use rolegate_application::{EmailArgs, NoArguments, UserIdArgs, operations};
use rolegate_core::AppError;
use rolegate_domain::UserId;

use super::objects::UserObject;
use super::{GraphqlResultExt, authorize, target_or_caller};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Every registered user, ordered by email. Admin only.
    async fn users(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<UserObject>> {
        let services = authorize(ctx, operations::USERS, &NoArguments)?;
        let users = services.user_service.list().await.into_graphql()?;
        Ok(users.into_iter().map(UserObject::from).collect())
    }

    /// One user by email; defaults to the caller.
    async fn user(
        &self,
        ctx: &Context<'_>,
        email: Option<String>,
    ) -> async_graphql::Result<UserObject> {
        let arguments = EmailArgs {
            email: target_or_caller(ctx, email),
        };
        let services = authorize(ctx, operations::USER, &arguments)?;

        let email = arguments
            .email
            .ok_or_else(|| AppError::Validation("an email must be included".to_owned()))
            .into_graphql()?;

        services
            .user_service
            .find_by_email(&email)
            .await
            .map(UserObject::from)
            .into_graphql()
    }

    /// One user by id. Admin only.
    async fn user_by_id(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<UserObject> {
        let arguments = UserIdArgs { id: id.0 };
        let services = authorize(ctx, operations::USER_BY_ID, &arguments)?;
        let user_id = UserId::parse(&arguments.id).into_graphql()?;

        services
            .user_service
            .find_by_id(user_id)
            .await
            .map(UserObject::from)
            .into_graphql()
    }
}
