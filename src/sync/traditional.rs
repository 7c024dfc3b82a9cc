use crate::domain::{Season, TraditionalStats};
use crate::error::Result;
use crate::feed::{MeasureType, PerMode, StatsFeedClient};
use crate::store::PostgresStore;
use crate::sync::SyncReport;
use tracing::{debug, info};

/// Sync traditional per-game stats for a season: one league-wide table,
/// resolved and batch-upserted with the same skip-or-write rules as the
/// advanced sync.
pub async fn sync_traditional(
    feed: &StatsFeedClient,
    store: &PostgresStore,
    season: &Season,
) -> Result<SyncReport> {
    let table = feed
        .fetch_league_stats(season, MeasureType::Base, PerMode::PerGame)
        .await?;
    info!("Traditional table returned {} rows", table.len());

    let mut report = SyncReport::default();
    let mut batch = Vec::with_capacity(table.len());

    for row in table.rows() {
        let external_id = row.i64_value("PLAYER_ID");
        let name = row.str_value("PLAYER_NAME");

        let player_id = match store.resolve_player_id(external_id, name).await? {
            Some(id) => id,
            None => {
                debug!("Unresolved stat row: {:?} {:?}", external_id, name);
                report.skipped += 1;
                continue;
            }
        };

        batch.push(TraditionalStats {
            stat_id: None,
            player_id,
            season: season.as_str().to_string(),
            ppg: row.f64_value("PTS"),
            apg: row.f64_value("AST"),
            rpg: row.f64_value("REB"),
            spg: row.f64_value("STL"),
            bpg: row.f64_value("BLK"),
            fg_pct: row.f64_value("FG_PCT"),
            fg3_pct: row.f64_value("FG3_PCT"),
            ft_pct: row.f64_value("FT_PCT"),
        });
    }

    report.written = store.upsert_traditional_stats(&batch).await?;
    Ok(report)
}
