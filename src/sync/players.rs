use crate::domain::Season;
use crate::error::Result;
use crate::feed::StatsFeedClient;
use crate::store::PostgresStore;
use crate::sync::SyncReport;
use tracing::{info, warn};

/// Sync the player roster: fetch the current roster, then the bio profile
/// for each player, and upsert each one keyed on the external id.
///
/// A feed failure for one player is logged and skipped so a single flaky
/// profile call cannot kill a 500-player run. Database errors propagate.
pub async fn sync_players(
    feed: &StatsFeedClient,
    store: &PostgresStore,
    season: &Season,
) -> Result<SyncReport> {
    let roster = feed.fetch_roster(season).await?;
    info!("Roster returned {} players", roster.len());

    let mut report = SyncReport::default();

    for entry in &roster {
        let player = match feed.fetch_player_profile(entry).await {
            Ok(player) => player,
            Err(e) => {
                warn!(
                    nba_player_id = entry.nba_player_id,
                    "Skipping {}: profile fetch failed: {e}", entry.full_name
                );
                report.skipped += 1;
                continue;
            }
        };

        store.upsert_player(&player).await?;
        report.written += 1;
    }

    Ok(report)
}
