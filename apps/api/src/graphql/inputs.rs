use async_graphql::InputObject;
use rolegate_application::{CreateUserInput, LoginUserInput, UpdateUserInput};

#[derive(Debug, Clone, InputObject)]
#[graphql(name = "CreateUserInput")]
pub struct CreateUserInputObject {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl From<CreateUserInputObject> for CreateUserInput {
    fn from(input: CreateUserInputObject) -> Self {
        Self {
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            password: input.password,
        }
    }
}

/// Profile patch. `email` and `roles` are accepted but never applied.
#[derive(Debug, Clone, Default, InputObject)]
#[graphql(name = "UpdateUserInput")]
pub struct UpdateUserInputObject {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub roles: Option<Vec<String>>,
}

impl From<UpdateUserInputObject> for UpdateUserInput {
    fn from(input: UpdateUserInputObject) -> Self {
        Self {
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            password: input.password,
            roles: input.roles,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
#[graphql(name = "LoginUserInput")]
pub struct LoginUserInputObject {
    pub email: String,
    pub password: String,
}

impl From<LoginUserInputObject> for LoginUserInput {
    fn from(input: LoginUserInputObject) -> Self {
        Self {
            email: input.email,
            password: input.password,
        }
    }
}
