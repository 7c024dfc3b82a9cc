use crate::error::{HoopcastError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Season used when a request does not name one.
pub const DEFAULT_SEASON: &str = "2024-25";

/// An NBA season label, e.g. "2024-25". The suffix must be the starting
/// year plus one, modulo a century.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Season(String);

impl Season {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Season {
    type Err = HoopcastError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || HoopcastError::InvalidSeason(s.to_string());

        let (start, end) = s.split_once('-').ok_or_else(invalid)?;
        if start.len() != 4 || end.len() != 2 {
            return Err(invalid());
        }
        let start_year: u32 = start.parse().map_err(|_| invalid())?;
        let end_year: u32 = end.parse().map_err(|_| invalid())?;
        if (start_year + 1) % 100 != end_year {
            return Err(invalid());
        }

        Ok(Season(s.to_string()))
    }
}

/// Whether a higher or lower raw value is better for a metric. Drives the
/// percentile window ordering: lower-is-better metrics rank ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricDirection {
    HigherIsBetter,
    LowerIsBetter,
}

/// The advanced metrics that participate in percentile ranking, with
/// their ranking direction. Defensive rating is the lower-is-better case.
pub const ADVANCED_METRICS: &[(&str, MetricDirection)] = &[
    ("off_rating", MetricDirection::HigherIsBetter),
    ("def_rating", MetricDirection::LowerIsBetter),
    ("ts_pct", MetricDirection::HigherIsBetter),
    ("usg_pct", MetricDirection::HigherIsBetter),
    ("efg_pct", MetricDirection::HigherIsBetter),
    ("pie", MetricDirection::HigherIsBetter),
    ("pts", MetricDirection::HigherIsBetter),
    ("reb", MetricDirection::HigherIsBetter),
    ("ast", MetricDirection::HigherIsBetter),
];

/// Per-36 advanced stats for one (player, season). Metrics are nullable
/// because the feed omits them for low-minute players.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvancedStats {
    pub stat_id: Option<i32>,
    pub player_id: i32,
    pub season: String,
    pub off_rating: Option<f64>,
    pub def_rating: Option<f64>,
    pub ts_pct: Option<f64>,
    pub usg_pct: Option<f64>,
    pub efg_pct: Option<f64>,
    pub pie: Option<f64>,
    pub pts: Option<f64>,
    pub reb: Option<f64>,
    pub ast: Option<f64>,
}

/// Per-game traditional stats for one (player, season).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraditionalStats {
    pub stat_id: Option<i32>,
    pub player_id: i32,
    pub season: String,
    pub ppg: Option<f64>,
    pub apg: Option<f64>,
    pub rpg: Option<f64>,
    pub spg: Option<f64>,
    pub bpg: Option<f64>,
    pub fg_pct: Option<f64>,
    pub fg3_pct: Option<f64>,
    pub ft_pct: Option<f64>,
}

/// On/off-court rating splits for one (player, season).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnOffStats {
    pub stat_id: Option<i32>,
    pub player_id: i32,
    pub season: String,
    pub off_rating_on: Option<f64>,
    pub off_rating_off: Option<f64>,
    pub def_rating_on: Option<f64>,
    pub def_rating_off: Option<f64>,
    pub net_rating_on: Option<f64>,
    pub net_rating_off: Option<f64>,
}

/// Percentile ranks (0-100) for each advanced metric, computed against
/// the full season population.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatPercentiles {
    pub player_id: i32,
    pub off_rating_pct: f64,
    pub def_rating_pct: f64,
    pub ts_pct_pct: f64,
    pub usg_pct_pct: f64,
    pub efg_pct_pct: f64,
    pub pie_pct: f64,
    pub pts_pct: f64,
    pub reb_pct: f64,
    pub ast_pct: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_accepts_valid_labels() {
        assert!("2024-25".parse::<Season>().is_ok());
        assert!("1999-00".parse::<Season>().is_ok());
        assert_eq!("2024-25".parse::<Season>().unwrap().as_str(), "2024-25");
    }

    #[test]
    fn test_season_rejects_mismatched_suffix() {
        assert!("2024-26".parse::<Season>().is_err());
        assert!("2024-24".parse::<Season>().is_err());
    }

    #[test]
    fn test_season_rejects_malformed_labels() {
        assert!("2024".parse::<Season>().is_err());
        assert!("24-25".parse::<Season>().is_err());
        assert!("2024-2025".parse::<Season>().is_err());
        assert!("abcd-ef".parse::<Season>().is_err());
    }

    #[test]
    fn test_default_season_is_valid() {
        assert!(DEFAULT_SEASON.parse::<Season>().is_ok());
    }

    #[test]
    fn test_only_def_rating_ranks_ascending() {
        let lower: Vec<&str> = ADVANCED_METRICS
            .iter()
            .filter(|(_, d)| *d == MetricDirection::LowerIsBetter)
            .map(|(m, _)| *m)
            .collect();
        assert_eq!(lower, vec!["def_rating"]);
    }
}
