pub mod client;
pub mod types;

pub use client::{MeasureType, PerMode, StatsFeedClient};
pub use types::{FeedResponse, ResultSet, RosterEntry, StatRow};
