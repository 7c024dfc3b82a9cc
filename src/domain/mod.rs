pub mod player;
pub mod stats;

pub use player::{parse_birthdate, parse_height, Player};
pub use stats::{
    AdvancedStats, MetricDirection, OnOffStats, Season, StatPercentiles, TraditionalStats,
    ADVANCED_METRICS, DEFAULT_SEASON,
};
