use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A player row. `player_id` is the internal surrogate key; `nba_player_id`
/// is the external feed identifier and carries the uniqueness constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub player_id: Option<i32>,
    pub nba_player_id: i64,
    pub full_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub team: Option<String>,
    pub team_abbreviation: Option<String>,
    pub position: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub height_in: Option<i32>,
    pub weight_lbs: Option<f64>,
    pub country: Option<String>,
    pub draft_year: Option<String>,
    pub draft_round: Option<String>,
    pub draft_number: Option<String>,
    pub from_year: Option<i32>,
    pub to_year: Option<i32>,
    pub is_active: bool,
}

/// Convert a height string in the feed's "6-9" (feet-inches) format
/// into total inches.
pub fn parse_height(height: &str) -> Option<i32> {
    let (feet, inches) = height.trim().split_once('-')?;
    let feet: i32 = feet.trim().parse().ok()?;
    let inches: i32 = inches.trim().parse().ok()?;
    Some(feet * 12 + inches)
}

/// Parse a birthdate from the handful of formats the feed has been seen
/// to emit: ISO timestamps, plain dates, and US-style spelled-out dates.
pub fn parse_birthdate(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.contains('T') {
        if let Some((date_part, _)) = raw.split_once('T') {
            if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
                return Some(date);
            }
        }
    }

    for fmt in ["%Y-%m-%d", "%b %d, %Y", "%B %d, %Y", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_height() {
        assert_eq!(parse_height("6-9"), Some(81));
        assert_eq!(parse_height("5-11"), Some(71));
        assert_eq!(parse_height("7-0"), Some(84));
    }

    #[test]
    fn test_parse_height_rejects_garbage() {
        assert_eq!(parse_height(""), None);
        assert_eq!(parse_height("tall"), None);
        assert_eq!(parse_height("6"), None);
        assert_eq!(parse_height("6-x"), None);
    }

    #[test]
    fn test_parse_birthdate_iso_timestamp() {
        assert_eq!(
            parse_birthdate("1984-12-30T00:00:00"),
            NaiveDate::from_ymd_opt(1984, 12, 30)
        );
    }

    #[test]
    fn test_parse_birthdate_plain_and_spelled_out() {
        let expected = NaiveDate::from_ymd_opt(1984, 12, 30);
        assert_eq!(parse_birthdate("1984-12-30"), expected);
        assert_eq!(parse_birthdate("Dec 30, 1984"), expected);
        assert_eq!(parse_birthdate("December 30, 1984"), expected);
        assert_eq!(parse_birthdate("12/30/1984"), expected);
    }

    #[test]
    fn test_parse_birthdate_empty() {
        assert_eq!(parse_birthdate(""), None);
        assert_eq!(parse_birthdate("   "), None);
        assert_eq!(parse_birthdate("unknown"), None);
    }
}
