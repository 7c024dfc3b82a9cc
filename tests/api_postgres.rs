//! End-to-end checks against a real Postgres: missing stats must surface
//! as 404s (never empty records), name lookups must ignore case and
//! diacritics, and re-running a sync must overwrite rows in place.
//!
//! Each test gets its own scratch database from `sqlx::test`, created off
//! the `DATABASE_URL` connection and migrated before the test body runs.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use hoopcast::api::{create_router, AppState};
use hoopcast::domain::{AdvancedStats, Player, Season};
use hoopcast::store::PostgresStore;
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceExt;

fn router(pool: PgPool) -> (axum::Router, PostgresStore) {
    let store = PostgresStore::from_pool(pool);
    let router = create_router(AppState::new(Arc::new(store.clone())));
    (router, store)
}

async fn get(router: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn player(nba_player_id: i64, full_name: &str) -> Player {
    Player {
        player_id: None,
        nba_player_id,
        full_name: full_name.to_string(),
        first_name: None,
        last_name: None,
        team: None,
        team_abbreviation: None,
        position: None,
        birthdate: None,
        height_in: None,
        weight_lbs: None,
        country: None,
        draft_year: None,
        draft_round: None,
        draft_number: None,
        from_year: None,
        to_year: None,
        is_active: true,
    }
}

fn advanced(player_id: i32, season: &str, pts: f64) -> AdvancedStats {
    AdvancedStats {
        stat_id: None,
        player_id,
        season: season.to_string(),
        off_rating: Some(112.5),
        def_rating: Some(108.0),
        ts_pct: Some(0.61),
        usg_pct: Some(0.28),
        efg_pct: Some(0.56),
        pie: Some(0.14),
        pts: Some(pts),
        reb: Some(8.1),
        ast: Some(5.4),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn missing_season_stats_are_a_404_not_an_empty_record(pool: PgPool) {
    let (router, store) = router(pool);
    let id = store.upsert_player(&player(2544, "LeBron James")).await.unwrap();

    let (status, body) = get(router.clone(), &format!("/stats/{id}?season=2024-25")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Stats not found"), "unexpected body: {body}");

    let (status, body) = get(
        router.clone(),
        &format!("/stats/percentiles/{id}?season=2024-25"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Percentile stats not found"), "unexpected body: {body}");

    let (status, body) = get(router, &format!("/traditional_stats/{id}?season=2024-25")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Traditional stats not found"), "unexpected body: {body}");
}

#[sqlx::test(migrations = "./migrations")]
async fn unknown_player_name_is_a_404(pool: PgPool) {
    let (router, _store) = router(pool);

    let (status, body) = get(router, "/players/by-name/nobody%20whatsoever").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Player not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn malformed_season_is_rejected_with_400(pool: PgPool) {
    let (router, _store) = router(pool);

    let (status, _) = get(router.clone(), "/stats/1?season=2024-26").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(router, "/traditional_stats/1?season=banana").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn name_lookup_ignores_case_and_diacritics(pool: PgPool) {
    let (router, store) = router(pool);
    store
        .upsert_player(&player(1629029, "Luka Dončić"))
        .await
        .unwrap();

    let (status, body) = get(router, "/players/by-name/luka%20doncic").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Luka Dončić"), "unexpected body: {body}");
}

#[sqlx::test(migrations = "./migrations")]
async fn rerunning_a_sync_overwrites_rows_in_place(pool: PgPool) {
    let (_, store) = router(pool.clone());
    let season: Season = "2024-25".parse().unwrap();

    let first_id = store.upsert_player(&player(2544, "LeBron James")).await.unwrap();
    let second_id = store.upsert_player(&player(2544, "LeBron James")).await.unwrap();
    assert_eq!(first_id, second_id);

    store
        .upsert_advanced_stats(&[advanced(first_id, season.as_str(), 25.0)])
        .await
        .unwrap();
    store
        .upsert_advanced_stats(&[advanced(first_id, season.as_str(), 27.5)])
        .await
        .unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM advanced_stats")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1, "re-sync must not duplicate (player, season) rows");

    let stats = store
        .get_advanced_stats(first_id, &season)
        .await
        .unwrap()
        .expect("row must survive the re-sync");
    assert_eq!(stats.pts, Some(27.5));
}
