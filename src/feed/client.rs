//! HTTP client for the external stats feed.
//!
//! All calls are plain GETs returning tabular `resultSets` payloads. The
//! feed rate-limits aggressively, so a fixed delay is slept after every
//! request. There is no adaptive backoff: a 429 surfaces as an error and
//! the caller decides whether to skip the item.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};
use reqwest::StatusCode;
use tracing::debug;

use crate::config::FeedConfig;
use crate::domain::{parse_birthdate, parse_height, Player, Season};
use crate::error::{HoopcastError, Result};
use crate::feed::types::{FeedResponse, ResultSet, RosterEntry};

/// Stat family requested from the league-wide table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureType {
    Base,
    Advanced,
}

impl MeasureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "Base",
            Self::Advanced => "Advanced",
        }
    }
}

/// Playing-time normalization for the league-wide table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerMode {
    Per36,
    PerGame,
}

impl PerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Per36 => "Per36",
            Self::PerGame => "PerGame",
        }
    }
}

/// Stats feed client with fixed inter-call throttling.
pub struct StatsFeedClient {
    client: reqwest::Client,
    base_url: String,
    delay: Duration,
}

impl StatsFeedClient {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        // The feed rejects requests without browser-like headers.
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 hoopcast/0.1",
            ),
        );
        headers.insert(REFERER, HeaderValue::from_static("https://stats.nba.com/"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            delay: Duration::from_millis(config.delay_ms),
        })
    }

    /// Fetch the roster of current players for a season.
    pub async fn fetch_roster(&self, season: &Season) -> Result<Vec<RosterEntry>> {
        let response = self
            .get(
                "commonallplayers",
                &[
                    ("LeagueID", "00"),
                    ("Season", season.as_str()),
                    ("IsOnlyCurrentSeason", "1"),
                ],
            )
            .await?;

        let set = response
            .into_first_result_set()
            .ok_or_else(|| HoopcastError::MissingResultSet("commonallplayers".to_string()))?;

        let entries: Vec<RosterEntry> = set
            .rows()
            .filter_map(|row| RosterEntry::from_row(&row))
            .collect();

        debug!("Fetched {} roster entries", entries.len());
        Ok(entries)
    }

    /// Fetch the bio row for one player and map it onto the domain type.
    /// Career span and active flag come from the roster entry, which is
    /// authoritative for them.
    pub async fn fetch_player_profile(&self, roster: &RosterEntry) -> Result<Player> {
        let player_id = roster.nba_player_id.to_string();
        let response = self
            .get("commonplayerinfo", &[("PlayerID", player_id.as_str())])
            .await?;

        let set = response
            .into_first_result_set()
            .ok_or_else(|| HoopcastError::MissingResultSet("commonplayerinfo".to_string()))?;

        let row = set
            .rows()
            .next()
            .ok_or_else(|| HoopcastError::Feed(format!("empty profile for {player_id}")))?;

        Ok(Player {
            player_id: None,
            nba_player_id: roster.nba_player_id,
            full_name: row
                .str_value("DISPLAY_FIRST_LAST")
                .unwrap_or(&roster.full_name)
                .to_string(),
            first_name: row.str_value("FIRST_NAME").map(str::to_string),
            last_name: row.str_value("LAST_NAME").map(str::to_string),
            team: row
                .str_value("TEAM_NAME")
                .map(str::to_string)
                .or_else(|| roster.team.clone()),
            team_abbreviation: row
                .str_value("TEAM_ABBREVIATION")
                .map(str::to_string)
                .or_else(|| roster.team_abbreviation.clone()),
            position: row.str_value("POSITION").map(str::to_string),
            birthdate: row.str_value("BIRTHDATE").and_then(parse_birthdate),
            height_in: row.str_value("HEIGHT").and_then(parse_height),
            weight_lbs: row.f64_value("WEIGHT"),
            country: row.str_value("COUNTRY").map(str::to_string),
            draft_year: row.str_value("DRAFT_YEAR").map(str::to_string),
            draft_round: row.str_value("DRAFT_ROUND").map(str::to_string),
            draft_number: row.str_value("DRAFT_NUMBER").map(str::to_string),
            from_year: roster.from_year,
            to_year: roster.to_year,
            is_active: roster.is_active,
        })
    }

    /// Fetch the league-wide per-player stat table for a season.
    pub async fn fetch_league_stats(
        &self,
        season: &Season,
        measure: MeasureType,
        per_mode: PerMode,
    ) -> Result<ResultSet> {
        let response = self
            .get(
                "leaguedashplayerstats",
                &[
                    ("Season", season.as_str()),
                    ("MeasureType", measure.as_str()),
                    ("PerMode", per_mode.as_str()),
                ],
            )
            .await?;

        response
            .into_first_result_set()
            .ok_or_else(|| HoopcastError::MissingResultSet("leaguedashplayerstats".to_string()))
    }

    /// Fetch the league-wide on/off-court rating split table for a season.
    pub async fn fetch_on_off(&self, season: &Season) -> Result<ResultSet> {
        let response = self
            .get(
                "leagueplayerondetails",
                &[("Season", season.as_str()), ("PerMode", "Per36")],
            )
            .await?;

        response
            .into_first_result_set()
            .ok_or_else(|| HoopcastError::MissingResultSet("leagueplayerondetails".to_string()))
    }

    async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<FeedResponse> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("Fetching feed endpoint: {}", url);

        let response = self.client.get(&url).query(params).send().await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(HoopcastError::RateLimited(url));
        }
        if !status.is_success() {
            return Err(HoopcastError::Feed(format!("{url} returned {status}")));
        }

        let payload = response.json::<FeedResponse>().await?;

        // Fixed preventive throttle, not reactive backoff.
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: String) -> FeedConfig {
        FeedConfig {
            base_url,
            delay_ms: 0,
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_fetch_roster_parses_rows() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/commonallplayers")
            .match_query(mockito::Matcher::UrlEncoded(
                "Season".into(),
                "2024-25".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "resultSets": [{
                        "name": "CommonAllPlayers",
                        "headers": ["PERSON_ID", "DISPLAY_FIRST_LAST", "ROSTERSTATUS",
                                    "FROM_YEAR", "TO_YEAR", "TEAM_NAME", "TEAM_ABBREVIATION"],
                        "rowSet": [[2544, "LeBron James", 1, "2003", "2024", "Lakers", "LAL"]]
                    }]
                }"#,
            )
            .create_async()
            .await;

        let client = StatsFeedClient::new(&test_config(server.url())).unwrap();
        let season: Season = "2024-25".parse().unwrap();
        let roster = client.fetch_roster(&season).await.unwrap();

        mock.assert_async().await;
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].nba_player_id, 2544);
        assert_eq!(roster[0].full_name, "LeBron James");
    }

    #[tokio::test]
    async fn test_fetch_player_profile_maps_bio_fields() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/commonplayerinfo")
            .match_query(mockito::Matcher::UrlEncoded(
                "PlayerID".into(),
                "2544".into(),
            ))
            .with_status(200)
            .with_body(
                r#"{
                    "resultSets": [{
                        "name": "CommonPlayerInfo",
                        "headers": ["DISPLAY_FIRST_LAST", "FIRST_NAME", "LAST_NAME",
                                    "TEAM_NAME", "TEAM_ABBREVIATION", "POSITION",
                                    "BIRTHDATE", "HEIGHT", "WEIGHT", "COUNTRY",
                                    "DRAFT_YEAR", "DRAFT_ROUND", "DRAFT_NUMBER"],
                        "rowSet": [["LeBron James", "LeBron", "James",
                                    "Lakers", "LAL", "Forward",
                                    "1984-12-30T00:00:00", "6-9", "250", "USA",
                                    "2003", "1", "1"]]
                    }]
                }"#,
            )
            .create_async()
            .await;

        let client = StatsFeedClient::new(&test_config(server.url())).unwrap();
        let roster = RosterEntry {
            nba_player_id: 2544,
            full_name: "LeBron James".to_string(),
            is_active: true,
            from_year: Some(2003),
            to_year: Some(2024),
            team: None,
            team_abbreviation: None,
        };

        let player = client.fetch_player_profile(&roster).await.unwrap();
        assert_eq!(player.nba_player_id, 2544);
        assert_eq!(player.height_in, Some(81));
        assert_eq!(player.weight_lbs, Some(250.0));
        assert_eq!(
            player.birthdate,
            chrono::NaiveDate::from_ymd_opt(1984, 12, 30)
        );
        assert!(player.is_active);
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_rate_limited_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let client = StatsFeedClient::new(&test_config(server.url())).unwrap();
        let season: Season = "2024-25".parse().unwrap();
        let err = client.fetch_roster(&season).await.unwrap_err();

        assert!(matches!(err, HoopcastError::RateLimited(_)));
    }

    #[tokio::test]
    async fn test_missing_result_set_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"resultSets": []}"#)
            .create_async()
            .await;

        let client = StatsFeedClient::new(&test_config(server.url())).unwrap();
        let season: Season = "2024-25".parse().unwrap();
        let err = client
            .fetch_league_stats(&season, MeasureType::Advanced, PerMode::Per36)
            .await
            .unwrap_err();

        assert!(matches!(err, HoopcastError::MissingResultSet(_)));
    }
}
