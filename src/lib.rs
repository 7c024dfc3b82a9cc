pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod store;
pub mod sync;

pub use config::AppConfig;
pub use domain::{AdvancedStats, Player, Season, StatPercentiles, TraditionalStats};
pub use error::{HoopcastError, Result};
pub use feed::StatsFeedClient;
pub use store::PostgresStore;
pub use sync::SyncReport;
