//! Per-operation access policy.
//!
//! Every sensitive operation is looked up in an [`OperationRegistry`] and
//! its guards are evaluated against the caller's verified claims before
//! the operation runs. Operations without a registry entry are denied.

use std::collections::BTreeSet;
use std::sync::Arc;

use rolegate_core::{AppError, AppResult, SessionClaims};
use rolegate_domain::{Role, normalize_email};
use tracing::{debug, warn};

mod arguments;
mod registry;


pub use arguments::{
    ArgumentFields, CreateUserArgs, EmailArgs, LoginUserArgs, NoArguments, UpdateUserArgs,
    UserIdArgs,
};
pub use registry::{OperationRegistry, operations};

const NO_PERMISSIONS: &str = "user does not have permissions";

/// Authorization check evaluated before an operation executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Caller must present verified claims.
    Authenticated,
    /// Caller must hold the admin role.
    Admin,
    /// Caller must target their own record, or be an admin.
    SameUserOrAdmin,
}

/// Dotted field paths an admin may supply when acting on another user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldAccessRule {
    allowed: BTreeSet<String>,
}

impl FieldAccessRule {
    /// Creates a rule from dotted paths such as `updateUserInput.firstName`.
    #[must_use]
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns whether the path is on the allow-list.
    #[must_use]
    pub fn allows(&self, path: &str) -> bool {
        self.allowed.contains(path)
    }

    /// Returns the first supplied path missing from the allow-list.
    #[must_use]
    pub fn first_violation<'a>(&self, paths: &'a [String]) -> Option<&'a str> {
        paths
            .iter()
            .map(String::as_str)
            .find(|path| !self.allows(path))
    }
}

/// Guards and field rule declared for one operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperationPolicy {
    guards: Vec<Guard>,
    field_rule: Option<FieldAccessRule>,
}

impl OperationPolicy {
    /// Policy for an operation anyone may call.
    #[must_use]
    pub fn public() -> Self {
        Self::default()
    }

    /// Policy requiring every listed guard to pass, in order.
    #[must_use]
    pub fn guarded(guards: impl Into<Vec<Guard>>) -> Self {
        Self {
            guards: guards.into(),
            field_rule: None,
        }
    }

    /// Restricts the fields an admin may supply on behalf of another user.
    #[must_use]
    pub fn with_field_rule(mut self, rule: FieldAccessRule) -> Self {
        self.field_rule = Some(rule);
        self
    }

    /// Returns the guards in evaluation order.
    #[must_use]
    pub fn guards(&self) -> &[Guard] {
        self.guards.as_slice()
    }

    /// Returns the admin field rule, if any.
    #[must_use]
    pub fn field_rule(&self) -> Option<&FieldAccessRule> {
        self.field_rule.as_ref()
    }
}

/// Application service evaluating operation guards.
#[derive(Clone)]
pub struct AccessPolicyService {
    registry: Arc<OperationRegistry>,
}

impl AccessPolicyService {
    /// Creates a policy service over a fixed registry.
    #[must_use]
    pub fn new(registry: OperationRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Decides whether the caller may run the operation with these arguments.
    pub fn authorize(
        &self,
        operation: &str,
        claims: Option<&SessionClaims>,
        arguments: &dyn ArgumentFields,
    ) -> AppResult<()> {
        let Some(policy) = self.registry.policy(operation) else {
            warn!(operation, "no access policy registered");
            return Err(AppError::Forbidden(NO_PERMISSIONS.to_owned()));
        };

        for guard in policy.guards() {
            let outcome = match guard {
                Guard::Authenticated => require_authenticated(claims).map(|_| ()),
                Guard::Admin => require_admin(claims).map(|_| ()),
                Guard::SameUserOrAdmin => {
                    require_same_user_or_admin(claims, arguments, policy.field_rule())
                }
            };

            if let Err(error) = outcome {
                warn!(
                    operation,
                    subject = claims.map(SessionClaims::subject),
                    ?guard,
                    "access denied"
                );
                return Err(error);
            }
        }

        debug!(operation, "access granted");
        Ok(())
    }
}

/// Succeeds when verified claims are present.
fn require_authenticated(claims: Option<&SessionClaims>) -> AppResult<&SessionClaims> {
    claims.ok_or_else(|| AppError::Forbidden(NO_PERMISSIONS.to_owned()))
}

/// Succeeds when the caller holds the admin role.
fn require_admin(claims: Option<&SessionClaims>) -> AppResult<&SessionClaims> {
    let claims = require_authenticated(claims)?;
    if claims.has_role(Role::Admin.as_str()) {
        Ok(claims)
    } else {
        Err(AppError::Forbidden(NO_PERMISSIONS.to_owned()))
    }
}

/// Succeeds when the caller targets their own record, or is an admin whose
/// submitted fields all appear in the operation's field rule.
///
/// An operation without a target argument acts on the caller and is allowed.
fn require_same_user_or_admin(
    claims: Option<&SessionClaims>,
    arguments: &dyn ArgumentFields,
    field_rule: Option<&FieldAccessRule>,
) -> AppResult<()> {
    let claims = require_authenticated(claims)?;

    let Some(target) = arguments.target_email() else {
        return Ok(());
    };

    if normalize_email(target) == normalize_email(claims.email()) {
        return Ok(());
    }

    require_admin(Some(claims))?;

    if let Some(rule) = field_rule {
        let paths = arguments.field_paths();
        if let Some(field) = rule.first_violation(&paths) {
            return Err(AppError::Forbidden(format!(
                "admin is not allowed to modify {field}"
            )));
        }
    }

    Ok(())
}
