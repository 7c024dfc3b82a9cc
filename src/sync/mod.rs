//! ETL sync runs against the external stats feed.
//!
//! Each run fetches a feed table, resolves external identities onto
//! internal player ids, and batch-upserts the result. Feed errors skip the
//! current item and the run continues; persistence errors roll the batch
//! back and propagate.

pub mod on_off;
pub mod players;
pub mod stats;
pub mod traditional;

pub use on_off::sync_on_off;
pub use players::sync_players;
pub use stats::sync_advanced;
pub use traditional::sync_traditional;

use crate::domain::Season;
use crate::error::Result;
use crate::feed::StatsFeedClient;
use crate::store::PostgresStore;
use std::fmt;
use tracing::info;

/// Outcome of one sync run: rows written vs. rows skipped because their
/// external identity could not be resolved (or the feed failed for them).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub written: u64,
    pub skipped: u64,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} written, {} skipped", self.written, self.skipped)
    }
}

/// Run every sync in dependency order: players first so the stat syncs
/// have identities to resolve against.
pub async fn sync_all(
    feed: &StatsFeedClient,
    store: &PostgresStore,
    season: &Season,
) -> Result<()> {
    let report = sync_players(feed, store, season).await?;
    info!("Player sync: {report}");

    let report = sync_advanced(feed, store, season).await?;
    info!("Advanced stats sync: {report}");

    let report = sync_traditional(feed, store, season).await?;
    info!("Traditional stats sync: {report}");

    let report = sync_on_off(feed, store, season).await?;
    info!("On/off stats sync: {report}");

    Ok(())
}
