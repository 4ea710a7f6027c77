use async_graphql::http::GraphiQLSource;
use axum::extract::State;
use axum::response::Html;
use axum::{Extension, Json};
use rolegate_core::AppError;

use crate::error::ApiResult;
use crate::middleware::Caller;
use crate::state::AppState;

pub async fn graphql_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    let request = match caller.0 {
        Some(claims) => request.data(claims),
        None => request,
    };

    Json(state.schema.execute(request).await)
}

pub async fn graphiql_handler(State(state): State<AppState>) -> ApiResult<Html<String>> {
    if !state.graphql_playground {
        return Err(AppError::NotFound("graphql playground is disabled".to_owned()).into());
    }

    Ok(Html(GraphiQLSource::build().endpoint("/graphql").finish()))
}
