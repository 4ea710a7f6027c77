//! Application services and ports.

#![forbid(unsafe_code)]

mod access_policy_service;
mod auth_service;
mod user_service;

pub use access_policy_service::{
    AccessPolicyService, ArgumentFields, CreateUserArgs, EmailArgs, FieldAccessRule, Guard,
    LoginUserArgs, NoArguments, OperationPolicy, OperationRegistry, UpdateUserArgs, UserIdArgs,
    operations,
};
pub use auth_service::{AuthService, IssuedToken, TokenIssuer};
pub use user_service::{
    CreateUserInput, LoginUserInput, NewUserRecord, PasswordHasher, PublicUser, UpdateUserInput,
    UserChanges, UserRecord, UserRepository, UserService,
};

#[cfg(test)]
mod test_support;
