use async_graphql::ErrorExtensions;
use rolegate_core::{AppError, AppResult};
use tracing::error;

const INTERNAL_MESSAGE: &str = "internal server error";

/// Converts an application error into a GraphQL error carrying `code` and
/// `name` extensions. Internal details are logged and never returned.
pub fn graphql_error(app_error: AppError) -> async_graphql::Error {
    let (code, name) = match &app_error {
        AppError::Validation(_) => ("BAD_USER_INPUT", "ValidationError"),
        AppError::NotFound(_) => ("NOT_FOUND", "NotFoundError"),
        AppError::Conflict(_) => ("CONFLICT", "ConflictError"),
        AppError::Unauthorized(_) => ("UNAUTHENTICATED", "AuthenticationError"),
        AppError::Forbidden(_) => ("FORBIDDEN", "AuthorizationError"),
        AppError::Internal(_) => ("INTERNAL_SERVER_ERROR", "InternalError"),
    };

    let message = match &app_error {
        AppError::Internal(detail) => {
            error!(%detail, "graphql operation failed");
            INTERNAL_MESSAGE
        }
        other => other.message(),
    };

    async_graphql::Error::new(message).extend_with(|_, extensions| {
        extensions.set("code", code);
        extensions.set("name", name);
    })
}

/// Maps `AppResult` into a GraphQL result with typed error extensions.
///
/// `async_graphql::Error` converts from any `Display` type, so a bare `?`
/// on an `AppResult` would compile but drop the extensions.
pub trait GraphqlResultExt<T> {
    /// Converts the error side with [`graphql_error`].
    fn into_graphql(self) -> async_graphql::Result<T>;
}

impl<T> GraphqlResultExt<T> for AppResult<T> {
    fn into_graphql(self) -> async_graphql::Result<T> {
        self.map_err(graphql_error)
    }
}
