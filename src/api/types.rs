use crate::domain::Player;
use serde::{Deserialize, Serialize};

/// The player view the API exposes: the identity/bio subset of the row.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerResponse {
    pub player_id: i32,
    pub full_name: String,
    pub team: Option<String>,
    pub position: Option<String>,
    pub birthdate: Option<String>,
    pub height_in: Option<i32>,
    pub weight_lbs: Option<f64>,
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        Self {
            player_id: player.player_id.unwrap_or_default(),
            full_name: player.full_name,
            team: player.team,
            position: player.position,
            birthdate: player.birthdate.map(|d| d.format("%Y-%m-%d").to_string()),
            height_in: player.height_in,
            weight_lbs: player.weight_lbs,
        }
    }
}

/// Compact row for autocomplete results.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSearchResult {
    pub player_id: i32,
    pub full_name: String,
    pub team_abbreviation: Option<String>,
}

impl From<Player> for PlayerSearchResult {
    fn from(player: Player) -> Self {
        Self {
            player_id: player.player_id.unwrap_or_default(),
            full_name: player.full_name,
            team_abbreviation: player.team_abbreviation,
        }
    }
}

/// `?season=` query parameter shared by the stats endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SeasonQuery {
    pub season: Option<String>,
}

/// `?q=&limit=` parameters for autocomplete search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_player() -> Player {
        Player {
            player_id: Some(7),
            nba_player_id: 2544,
            full_name: "LeBron James".to_string(),
            first_name: Some("LeBron".to_string()),
            last_name: Some("James".to_string()),
            team: Some("Lakers".to_string()),
            team_abbreviation: Some("LAL".to_string()),
            position: Some("Forward".to_string()),
            birthdate: NaiveDate::from_ymd_opt(1984, 12, 30),
            height_in: Some(81),
            weight_lbs: Some(250.0),
            country: Some("USA".to_string()),
            draft_year: Some("2003".to_string()),
            draft_round: Some("1".to_string()),
            draft_number: Some("1".to_string()),
            from_year: Some(2003),
            to_year: Some(2024),
            is_active: true,
        }
    }

    #[test]
    fn test_player_response_formats_birthdate() {
        let response = PlayerResponse::from(sample_player());
        assert_eq!(response.player_id, 7);
        assert_eq!(response.birthdate.as_deref(), Some("1984-12-30"));
    }

    #[test]
    fn test_search_result_is_compact() {
        let result = PlayerSearchResult::from(sample_player());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "player_id": 7,
                "full_name": "LeBron James",
                "team_abbreviation": "LAL"
            })
        );
    }
}
