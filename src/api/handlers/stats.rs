use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::{state::AppState, types::SeasonQuery};
use crate::domain::{AdvancedStats, Season, StatPercentiles, TraditionalStats, DEFAULT_SEASON};

/// A malformed `?season=` is rejected with 400 up front instead of being
/// passed through to the query, where it would match nothing and read as
/// a missing stats record.
fn parse_season(query: &SeasonQuery) -> std::result::Result<Season, (StatusCode, String)> {
    query
        .season
        .as_deref()
        .unwrap_or(DEFAULT_SEASON)
        .parse()
        .map_err(|e: crate::error::HoopcastError| (StatusCode::BAD_REQUEST, e.to_string()))
}

async fn resolve_by_name(
    state: &AppState,
    full_name: &str,
) -> std::result::Result<i32, (StatusCode, String)> {
    state
        .store
        .find_player_by_name(full_name)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .and_then(|p| p.player_id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Player not found".to_string()))
}

async fn advanced_stats_for(
    state: &AppState,
    player_id: i32,
    season: &Season,
) -> std::result::Result<AdvancedStats, (StatusCode, String)> {
    state
        .store
        .get_advanced_stats(player_id, season)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                "Stats not found for the given player and season".to_string(),
            )
        })
}

async fn percentiles_for(
    state: &AppState,
    player_id: i32,
    season: &Season,
) -> std::result::Result<StatPercentiles, (StatusCode, String)> {
    state
        .store
        .get_percentiles(player_id, season)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                "Percentile stats not found for the given player and season".to_string(),
            )
        })
}

async fn traditional_stats_for(
    state: &AppState,
    player_id: i32,
    season: &Season,
) -> std::result::Result<TraditionalStats, (StatusCode, String)> {
    state
        .store
        .get_traditional_stats(player_id, season)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                "Traditional stats not found for the given player and season".to_string(),
            )
        })
}

/// GET /stats/:player_id?season=2024-25
pub async fn get_stats(
    State(state): State<AppState>,
    Path(player_id): Path<i32>,
    Query(query): Query<SeasonQuery>,
) -> std::result::Result<Json<AdvancedStats>, (StatusCode, String)> {
    let season = parse_season(&query)?;
    Ok(Json(advanced_stats_for(&state, player_id, &season).await?))
}

/// GET /stats/by-name/:full_name?season=2024-25
pub async fn get_stats_by_name(
    State(state): State<AppState>,
    Path(full_name): Path<String>,
    Query(query): Query<SeasonQuery>,
) -> std::result::Result<Json<AdvancedStats>, (StatusCode, String)> {
    let season = parse_season(&query)?;
    let player_id = resolve_by_name(&state, &full_name).await?;
    Ok(Json(advanced_stats_for(&state, player_id, &season).await?))
}

/// GET /stats/percentiles/:player_id?season=2024-25
pub async fn get_percentiles(
    State(state): State<AppState>,
    Path(player_id): Path<i32>,
    Query(query): Query<SeasonQuery>,
) -> std::result::Result<Json<StatPercentiles>, (StatusCode, String)> {
    let season = parse_season(&query)?;
    Ok(Json(percentiles_for(&state, player_id, &season).await?))
}

/// GET /stats/percentiles/by-name/:full_name?season=2024-25
pub async fn get_percentiles_by_name(
    State(state): State<AppState>,
    Path(full_name): Path<String>,
    Query(query): Query<SeasonQuery>,
) -> std::result::Result<Json<StatPercentiles>, (StatusCode, String)> {
    let season = parse_season(&query)?;
    let player_id = resolve_by_name(&state, &full_name).await?;
    Ok(Json(percentiles_for(&state, player_id, &season).await?))
}

/// GET /traditional_stats/:player_id?season=2024-25
pub async fn get_traditional_stats(
    State(state): State<AppState>,
    Path(player_id): Path<i32>,
    Query(query): Query<SeasonQuery>,
) -> std::result::Result<Json<TraditionalStats>, (StatusCode, String)> {
    let season = parse_season(&query)?;
    Ok(Json(
        traditional_stats_for(&state, player_id, &season).await?,
    ))
}

/// GET /traditional_stats/by-name/:full_name?season=2024-25
pub async fn get_traditional_stats_by_name(
    State(state): State<AppState>,
    Path(full_name): Path<String>,
    Query(query): Query<SeasonQuery>,
) -> std::result::Result<Json<TraditionalStats>, (StatusCode, String)> {
    let season = parse_season(&query)?;
    let player_id = resolve_by_name(&state, &full_name).await?;
    Ok(Json(
        traditional_stats_for(&state, player_id, &season).await?,
    ))
}
