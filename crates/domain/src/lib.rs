//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod user;

pub use user::{
    EmailAddress, PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH, Role, UserId, normalize_email,
    validate_password,
};
