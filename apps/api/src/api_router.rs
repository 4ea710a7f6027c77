use axum::Router;
use axum::http::header::AUTHORIZATION;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::graphql::{graphiql_handler, graphql_handler};
use crate::handlers::health::health_handler;
use crate::middleware;
use crate::state::AppState;

pub fn build_router(app_state: AppState) -> Router {
    let graphql_routes = Router::new()
        .route("/graphql", get(graphiql_handler).post(graphql_handler))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::attach_caller,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .merge(graphql_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetSensitiveRequestHeadersLayer::new([AUTHORIZATION]))
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(app_state)
}
