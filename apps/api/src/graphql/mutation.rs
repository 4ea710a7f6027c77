use async_graphql::{Context, Object};
use rolegate_application::{CreateUserArgs, EmailArgs, LoginUserArgs, UpdateUserArgs, operations};
use rolegate_core::AppError;
use rolegate_domain::Role;

use super::inputs::{CreateUserInputObject, LoginUserInputObject, UpdateUserInputObject};
use super::objects::{LoggedUserOutput, UserObject};
use super::{GraphqlResultExt, authorize, target_or_caller};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Exchanges credentials for a session token.
    async fn login_user(
        &self,
        ctx: &Context<'_>,
        login_user_input: LoginUserInputObject,
    ) -> async_graphql::Result<LoggedUserOutput> {
        let arguments = LoginUserArgs {
            login_user_input: login_user_input.into(),
        };
        let services = authorize(ctx, operations::LOGIN_USER, &arguments)?;

        services
            .user_service
            .login(arguments.login_user_input)
            .await
            .map(LoggedUserOutput::from)
            .into_graphql()
    }

    /// Registers a new account with the `user` role.
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        create_user_input: CreateUserInputObject,
    ) -> async_graphql::Result<UserObject> {
        let arguments = CreateUserArgs {
            create_user_input: create_user_input.into(),
        };
        let services = authorize(ctx, operations::CREATE_USER, &arguments)?;

        services
            .user_service
            .create(arguments.create_user_input)
            .await
            .map(UserObject::from)
            .into_graphql()
    }

    /// Patches a profile; defaults to the caller's own.
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        email: Option<String>,
        update_user_input: UpdateUserInputObject,
    ) -> async_graphql::Result<UserObject> {
        let arguments = UpdateUserArgs {
            email: target_or_caller(ctx, email),
            update_user_input: update_user_input.into(),
        };
        let services = authorize(ctx, operations::UPDATE_USER, &arguments)?;

        let email = arguments
            .email
            .ok_or_else(|| AppError::Validation("an email must be included".to_owned()))
            .into_graphql()?;

        services
            .user_service
            .update(&email, arguments.update_user_input)
            .await
            .map(UserObject::from)
            .into_graphql()
    }

    /// Deletes a user and returns the removed record. Admin only.
    async fn remove_user(
        &self,
        ctx: &Context<'_>,
        email: String,
    ) -> async_graphql::Result<UserObject> {
        let services = authorize(ctx, operations::REMOVE_USER, &EmailArgs {
            email: Some(email.clone()),
        })?;

        services
            .user_service
            .remove(&email)
            .await
            .map(UserObject::from)
            .into_graphql()
    }

    /// Grants the admin role. Admin only.
    async fn add_admin_role(
        &self,
        ctx: &Context<'_>,
        email: String,
    ) -> async_graphql::Result<UserObject> {
        let services = authorize(ctx, operations::ADD_ADMIN_ROLE, &EmailArgs {
            email: Some(email.clone()),
        })?;

        services
            .user_service
            .add_role(Role::Admin, &email)
            .await
            .map(UserObject::from)
            .into_graphql()
    }

    /// Revokes the admin role. Admin only.
    async fn remove_admin_role(
        &self,
        ctx: &Context<'_>,
        email: String,
    ) -> async_graphql::Result<UserObject> {
        let services = authorize(ctx, operations::REMOVE_ADMIN_ROLE, &EmailArgs {
            email: Some(email.clone()),
        })?;

        services
            .user_service
            .remove_role(Role::Admin, &email)
            .await
            .map(UserObject::from)
            .into_graphql()
    }
}
