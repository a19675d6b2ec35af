//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route(
            "/sports",
            get(handlers::list_sports).post(handlers::create_sport),
        )
        .route("/teams", get(handlers::list_teams).post(handlers::create_team))
        .route(
            "/teams/{team_id}",
            get(handlers::get_team).delete(handlers::delete_team),
        )
        .route("/games", get(handlers::list_games).post(handlers::create_game))
        .route(
            "/games/{game_id}",
            get(handlers::get_game)
                .patch(handlers::update_game)
                .delete(handlers::delete_game),
        )
        // Scheduling
        .route("/schedules/generate", post(handlers::generate_schedule))
        .route(
            "/schedules",
            axum::routing::delete(handlers::clear_schedule),
        )
        .route("/standings", get(handlers::get_standings));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
