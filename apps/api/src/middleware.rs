use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use rolegate_core::SessionClaims;
use tracing::debug;

use crate::state::AppState;

/// Verified claims of the caller, or `None` for an anonymous request.
#[derive(Debug, Clone, Default)]
pub struct Caller(pub Option<SessionClaims>);

/// Verifies an optional bearer token and records the caller on the request.
///
/// A missing, malformed or invalid credential leaves the request anonymous.
/// Public operations still run and guarded ones are denied by the access
/// policy.
pub async fn attach_caller(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let claims = bearer_token(request.headers()).and_then(|token| {
        state
            .auth_service
            .verify_token(token)
            .map_err(|error| debug!(%error, "ignoring bearer token"))
            .ok()
    });

    request.extensions_mut().insert(Caller(claims));
    next.run(request).await
}

/// Extracts the token of an `Authorization: Bearer <token>` header. The
/// scheme is matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        debug!("ignoring malformed authorization header");
        None
    }
}
