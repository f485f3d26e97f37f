//! Router assembly for the auth service API.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::handlers;
use crate::api::state::AppState;
use crate::auth::gateway;

/// Build the full application router.
///
/// Routes under the gateway middleware require a valid access token; the
/// register/login/refresh endpoints are reachable without one.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/v1/auth/me", get(handlers::current_principal))
        .route("/api/v1/accounts/{id}", put(handlers::update_account))
        .route_layer(middleware::from_fn_with_state(
            state.gateway.clone(),
            gateway::authenticate,
        ));

    Router::new()
        .route("/healthz", get(handlers::health))
        .route("/api/v1/auth/register", post(handlers::register))
        .route("/api/v1/auth/login", post(handlers::login))
        .route("/api/v1/auth/refresh", post(handlers::refresh))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
