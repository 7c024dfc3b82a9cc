use crate::domain::{OnOffStats, Season};
use crate::error::Result;
use crate::feed::StatsFeedClient;
use crate::store::PostgresStore;
use crate::sync::SyncReport;
use tracing::{debug, info};

/// Sync on/off-court rating splits for a season.
pub async fn sync_on_off(
    feed: &StatsFeedClient,
    store: &PostgresStore,
    season: &Season,
) -> Result<SyncReport> {
    let table = feed.fetch_on_off(season).await?;
    info!("On/off table returned {} rows", table.len());

    let mut report = SyncReport::default();
    let mut batch = Vec::with_capacity(table.len());

    for row in table.rows() {
        let external_id = row.i64_value("PLAYER_ID");
        let name = row.str_value("PLAYER_NAME");

        let player_id = match store.resolve_player_id(external_id, name).await? {
            Some(id) => id,
            None => {
                debug!("Unresolved on/off row: {:?} {:?}", external_id, name);
                report.skipped += 1;
                continue;
            }
        };

        batch.push(OnOffStats {
            stat_id: None,
            player_id,
            season: season.as_str().to_string(),
            off_rating_on: row.f64_value("OFF_RATING_ON"),
            off_rating_off: row.f64_value("OFF_RATING_OFF"),
            def_rating_on: row.f64_value("DEF_RATING_ON"),
            def_rating_off: row.f64_value("DEF_RATING_OFF"),
            net_rating_on: row.f64_value("NET_RATING_ON"),
            net_rating_off: row.f64_value("NET_RATING_OFF"),
        });
    }

    report.written = store.upsert_on_off_stats(&batch).await?;
    Ok(report)
}
