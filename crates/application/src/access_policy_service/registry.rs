use std::collections::HashMap;

use super::{FieldAccessRule, Guard, OperationPolicy};

/// Operation names exposed by the user API.
pub mod operations {
    /// Password login.
    pub const LOGIN_USER: &str = "loginUser";
    /// Self-service registration.
    pub const CREATE_USER: &str = "createUser";
    /// List every user.
    pub const USERS: &str = "users";
    /// Look up one user by email.
    pub const USER: &str = "user";
    /// Look up one user by id.
    pub const USER_BY_ID: &str = "userById";
    /// Patch a user's profile.
    pub const UPDATE_USER: &str = "updateUser";
    /// Delete a user.
    pub const REMOVE_USER: &str = "removeUser";
    /// Grant the admin role.
    pub const ADD_ADMIN_ROLE: &str = "addAdminRole";
    /// Revoke the admin role.
    pub const REMOVE_ADMIN_ROLE: &str = "removeAdminRole";
}

/// Static map from operation name to its declared policy.
#[derive(Debug, Clone, Default)]
pub struct OperationRegistry {
    policies: HashMap<&'static str, OperationPolicy>,
}

impl OperationRegistry {
    /// Creates an empty registry; every operation is denied until registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the policy for an operation, replacing any earlier entry.
    #[must_use]
    pub fn register(mut self, operation: &'static str, policy: OperationPolicy) -> Self {
        self.policies.insert(operation, policy);
        self
    }

    /// Returns the policy declared for an operation.
    #[must_use]
    pub fn policy(&self, operation: &str) -> Option<&OperationPolicy> {
        self.policies.get(operation)
    }

    /// Registry for the user management API.
    #[must_use]
    pub fn user_operations() -> Self {
        let admin_only = OperationPolicy::guarded([Guard::Authenticated, Guard::Admin]);
        let same_user_or_admin =
            OperationPolicy::guarded([Guard::Authenticated, Guard::SameUserOrAdmin]);

        Self::new()
            .register(operations::LOGIN_USER, OperationPolicy::public())
            .register(operations::CREATE_USER, OperationPolicy::public())
            .register(operations::USERS, admin_only.clone())
            .register(operations::USER_BY_ID, admin_only.clone())
            .register(operations::USER, same_user_or_admin.clone())
            .register(
                operations::UPDATE_USER,
                same_user_or_admin.with_field_rule(FieldAccessRule::new([
                    "email",
                    "updateUserInput.email",
                    "updateUserInput.firstName",
                    "updateUserInput.lastName",
                ])),
            )
            .register(operations::REMOVE_USER, admin_only.clone())
            .register(operations::ADD_ADMIN_ROLE, admin_only.clone())
            .register(operations::REMOVE_ADMIN_ROLE, admin_only)
    }
}
