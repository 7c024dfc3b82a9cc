use crate::domain::{AdvancedStats, Season};
use crate::error::Result;
use crate::feed::{MeasureType, PerMode, StatsFeedClient};
use crate::store::PostgresStore;
use crate::sync::SyncReport;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Per-36 scoring-line metrics joined in from the base table.
#[derive(Debug, Clone, Copy, Default)]
struct BaseLine {
    pts: Option<f64>,
    reb: Option<f64>,
    ast: Option<f64>,
}

/// Sync per-36 advanced stats for a season.
///
/// The feed splits the metrics across two league-wide tables (Advanced for
/// the rating/efficiency columns, Base for pts/reb/ast), joined here on the
/// external player id. Each row's identity is resolved external-id-first
/// with a fuzzy name fallback; unresolved rows are counted and skipped,
/// never written as orphans. The resulting batch is upserted in a single
/// transaction.
pub async fn sync_advanced(
    feed: &StatsFeedClient,
    store: &PostgresStore,
    season: &Season,
) -> Result<SyncReport> {
    let advanced = feed
        .fetch_league_stats(season, MeasureType::Advanced, PerMode::Per36)
        .await?;
    let base = feed
        .fetch_league_stats(season, MeasureType::Base, PerMode::Per36)
        .await?;
    info!(
        "League tables: {} advanced rows, {} base rows",
        advanced.len(),
        base.len()
    );

    let base_by_id: HashMap<i64, BaseLine> = base
        .rows()
        .filter_map(|row| {
            Some((
                row.i64_value("PLAYER_ID")?,
                BaseLine {
                    pts: row.f64_value("PTS"),
                    reb: row.f64_value("REB"),
                    ast: row.f64_value("AST"),
                },
            ))
        })
        .collect();

    let mut report = SyncReport::default();
    let mut batch = Vec::with_capacity(advanced.len());

    for row in advanced.rows() {
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

        let base_line = external_id
            .and_then(|id| base_by_id.get(&id).copied())
            .unwrap_or_default();
        if base_line.pts.is_none() {
            warn!("No base line for {:?}; scoring columns will be null", name);
        }

        batch.push(AdvancedStats {
            stat_id: None,
            player_id,
            season: season.as_str().to_string(),
            off_rating: row.f64_value("OFF_RATING"),
            def_rating: row.f64_value("DEF_RATING"),
            ts_pct: row.f64_value("TS_PCT"),
            usg_pct: row.f64_value("USG_PCT"),
            efg_pct: row.f64_value("EFG_PCT"),
            pie: row.f64_value("PIE"),
            pts: base_line.pts,
            reb: base_line.reb,
            ast: base_line.ast,
        });
    }

    report.written = store.upsert_advanced_stats(&batch).await?;
    Ok(report)
}
