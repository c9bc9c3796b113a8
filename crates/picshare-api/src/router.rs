//! Route definitions for the PicShare HTTP API.
//!
//! All routes are mounted under `/api`. The image listing, upload, and
//! like routes sit behind the bearer token middleware; registration,
//! login, file serving, and health are public.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let body_limit = match state.config.server.max_body_bytes {
        0 => DefaultBodyLimit::disable(),
        max => DefaultBodyLimit::max(max),
    };

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(public_image_routes())
        .merge(protected_image_routes(state.clone()))
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Registration and login
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
}

/// File serving, no token required
fn public_image_routes() -> Router<AppState> {
    Router::new().route(
        "/images/expose/{filename}",
        get(handlers::image::expose_image),
    )
}

/// Listing, upload, and likes
fn protected_image_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/images",
            get(handlers::image::list_images).post(handlers::image::upload_image),
        )
        .route("/images/{id}/like", post(handlers::image::like_image))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::auth::require_auth,
        ))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
