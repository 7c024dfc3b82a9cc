use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::{state::AppState, types::*};

const SEARCH_LIMIT_CAP: i64 = 25;

/// GET /
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Welcome to the HoopCast API" }))
}

/// GET /players
pub async fn get_players(
    State(state): State<AppState>,
) -> std::result::Result<Json<Vec<PlayerResponse>>, (StatusCode, String)> {
    let players = state
        .store
        .list_players()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(players.into_iter().map(PlayerResponse::from).collect()))
}

/// GET /players/search?q=leb&limit=10
pub async fn search_players(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> std::result::Result<Json<Vec<PlayerSearchResult>>, (StatusCode, String)> {
    let q = query.q.trim();
    if q.is_empty() {
        return Ok(Json(Vec::new()));
    }
    let limit = query.limit.unwrap_or(10).clamp(1, SEARCH_LIMIT_CAP);

    let players = state
        .store
        .search_players(q, limit)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(
        players.into_iter().map(PlayerSearchResult::from).collect(),
    ))
}

/// GET /players/:player_id
pub async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<i32>,
) -> std::result::Result<Json<PlayerResponse>, (StatusCode, String)> {
    let player = state
        .store
        .get_player(player_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Player not found".to_string()))?;

    Ok(Json(PlayerResponse::from(player)))
}

/// GET /players/by-name/:full_name
///
/// Partial match, case- and diacritic-insensitive. First match wins.
pub async fn get_player_by_name(
    State(state): State<AppState>,
    Path(full_name): Path<String>,
) -> std::result::Result<Json<PlayerResponse>, (StatusCode, String)> {
    let player = state
        .store
        .find_player_by_name(&full_name)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Player not found".to_string()))?;

    Ok(Json(PlayerResponse::from(player)))
}
