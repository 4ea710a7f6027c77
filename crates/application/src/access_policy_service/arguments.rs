use crate::{CreateUserInput, LoginUserInput, UpdateUserInput};

/// Typed view of an operation's arguments for the access policy.
///
/// Paths use the names callers submit (`updateUserInput.firstName`).
/// Nested inputs expand to dotted paths; scalars and lists are leaves.
/// Only supplied fields are reported.
pub trait ArgumentFields {
    /// Email identifying the record the operation acts on, if supplied.
    fn target_email(&self) -> Option<&str> {
        None
    }

    /// Appends the path of every supplied field below `prefix`.
    fn collect_field_paths(&self, prefix: &str, paths: &mut Vec<String>);

    /// Returns the path of every supplied field.
    fn field_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_field_paths("", &mut paths);
        paths
    }
}

fn field_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}

fn push_present<T>(value: Option<&T>, prefix: &str, name: &str, paths: &mut Vec<String>) {
    if value.is_some() {
        paths.push(field_path(prefix, name));
    }
}

/// Operation without arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoArguments;

impl ArgumentFields for NoArguments {
    fn collect_field_paths(&self, _prefix: &str, _paths: &mut Vec<String>) {}
}

/// Arguments of operations addressed by an optional `email`.
#[derive(Debug, Clone, Default)]
pub struct EmailArgs {
    /// Target email; `None` targets the caller.
    pub email: Option<String>,
}

impl ArgumentFields for EmailArgs {
    fn target_email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn collect_field_paths(&self, prefix: &str, paths: &mut Vec<String>) {
        push_present(self.email.as_ref(), prefix, "email", paths);
    }
}

/// Arguments of `userById`. The id is kept as submitted so that access is
/// decided before it is parsed.
#[derive(Debug, Clone)]
pub struct UserIdArgs {
    /// Target user id.
    pub id: String,
}

impl ArgumentFields for UserIdArgs {
    fn collect_field_paths(&self, prefix: &str, paths: &mut Vec<String>) {
        paths.push(field_path(prefix, "id"));
    }
}

/// Arguments of `updateUser`.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserArgs {
    /// Target email; `None` targets the caller.
    pub email: Option<String>,
    /// Profile patch.
    pub update_user_input: UpdateUserInput,
}

impl ArgumentFields for UpdateUserArgs {
    fn target_email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn collect_field_paths(&self, prefix: &str, paths: &mut Vec<String>) {
        push_present(self.email.as_ref(), prefix, "email", paths);
        self.update_user_input
            .collect_field_paths(&field_path(prefix, "updateUserInput"), paths);
    }
}

impl ArgumentFields for UpdateUserInput {
    fn collect_field_paths(&self, prefix: &str, paths: &mut Vec<String>) {
        push_present(self.email.as_ref(), prefix, "email", paths);
        push_present(self.first_name.as_ref(), prefix, "firstName", paths);
        push_present(self.last_name.as_ref(), prefix, "lastName", paths);
        push_present(self.password.as_ref(), prefix, "password", paths);
        push_present(self.roles.as_ref(), prefix, "roles", paths);
    }
}

/// Arguments of `createUser`.
#[derive(Debug, Clone)]
pub struct CreateUserArgs {
    /// Registration payload.
    pub create_user_input: CreateUserInput,
}

impl ArgumentFields for CreateUserArgs {
    fn collect_field_paths(&self, prefix: &str, paths: &mut Vec<String>) {
        let prefix = field_path(prefix, "createUserInput");
        for name in ["email", "firstName", "lastName", "password"] {
            paths.push(field_path(&prefix, name));
        }
    }
}

/// Arguments of `loginUser`.
#[derive(Debug, Clone)]
pub struct LoginUserArgs {
    /// Submitted credentials.
    pub login_user_input: LoginUserInput,
}

impl ArgumentFields for LoginUserArgs {
    fn collect_field_paths(&self, prefix: &str, paths: &mut Vec<String>) {
        let prefix = field_path(prefix, "loginUserInput");
        for name in ["email", "password"] {
            paths.push(field_path(&prefix, name));
        }
    }
}
