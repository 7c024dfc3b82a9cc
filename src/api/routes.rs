use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        // Player endpoints
        .route("/players", get(handlers::get_players))
        .route("/players/search", get(handlers::search_players))
        .route("/players/:player_id", get(handlers::get_player))
        .route("/players/by-name/:full_name", get(handlers::get_player_by_name))
        // Advanced stats endpoints
        .route("/stats/:player_id", get(handlers::get_stats))
        .route("/stats/by-name/:full_name", get(handlers::get_stats_by_name))
        // Percentile endpoints
        .route("/stats/percentiles/:player_id", get(handlers::get_percentiles))
        .route(
            "/stats/percentiles/by-name/:full_name",
            get(handlers::get_percentiles_by_name),
        )
        // Traditional stats endpoints
        .route("/traditional_stats/:player_id", get(handlers::get_traditional_stats))
        .route(
            "/traditional_stats/by-name/:full_name",
            get(handlers::get_traditional_stats_by_name),
        )
        // Add state and CORS
        .with_state(state)
        .layer(cors)
}
