//! Wire types for the external stats feed.
//!
//! The feed returns tabular payloads: a list of named result sets, each a
//! `headers` array plus a `rowSet` of positional values. Values are loosely
//! typed (numbers sometimes arrive as strings, missing values as "" or
//! null), so row access goes through tolerant accessors.

use serde::Deserialize;
use serde_json::Value;

/// Top-level feed payload.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    #[serde(rename = "resultSets", default)]
    pub result_sets: Vec<ResultSet>,
}

impl FeedResponse {
    /// Find a result set by name.
    pub fn result_set(&self, name: &str) -> Option<&ResultSet> {
        self.result_sets.iter().find(|rs| rs.name == name)
    }

    /// Take the first result set, consuming the response.
    pub fn into_first_result_set(self) -> Option<ResultSet> {
        self.result_sets.into_iter().next()
    }
}

/// One named table in a feed payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultSet {
    pub name: String,
    pub headers: Vec<String>,
    #[serde(rename = "rowSet")]
    pub row_set: Vec<Vec<Value>>,
}

impl ResultSet {
    fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Iterate rows with header-indexed access.
    pub fn rows(&self) -> impl Iterator<Item = StatRow<'_>> {
        self.row_set.iter().map(move |values| StatRow {
            set: self,
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.row_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_set.is_empty()
    }
}

/// A single row of a result set, addressed by header name.
#[derive(Debug, Clone, Copy)]
pub struct StatRow<'a> {
    set: &'a ResultSet,
    values: &'a [Value],
}

impl<'a> StatRow<'a> {
    fn value(&self, header: &str) -> Option<&'a Value> {
        self.set.column(header).and_then(|i| self.values.get(i))
    }

    /// String column; empty strings count as absent.
    pub fn str_value(&self, header: &str) -> Option<&'a str> {
        match self.value(header)?.as_str() {
            Some("") => None,
            other => other,
        }
    }

    /// Integer column; tolerates string-encoded numbers.
    pub fn i64_value(&self, header: &str) -> Option<i64> {
        let value = self.value(header)?;
        value
            .as_i64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
    }

    /// Float column; tolerates string-encoded numbers.
    pub fn f64_value(&self, header: &str) -> Option<f64> {
        let value = self.value(header)?;
        value
            .as_f64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
    }
}

/// One roster row: external identifier plus the identity fields carried by
/// the roster table itself.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub nba_player_id: i64,
    pub full_name: String,
    pub is_active: bool,
    pub from_year: Option<i32>,
    pub to_year: Option<i32>,
    pub team: Option<String>,
    pub team_abbreviation: Option<String>,
}

impl RosterEntry {
    /// Parse one roster row; rows without an id or name are unusable.
    pub fn from_row(row: &StatRow<'_>) -> Option<Self> {
        Some(Self {
            nba_player_id: row.i64_value("PERSON_ID")?,
            full_name: row.str_value("DISPLAY_FIRST_LAST")?.to_string(),
            is_active: row.i64_value("ROSTERSTATUS").unwrap_or(0) == 1,
            from_year: row.i64_value("FROM_YEAR").map(|y| y as i32),
            to_year: row.i64_value("TO_YEAR").map(|y| y as i32),
            team: row.str_value("TEAM_NAME").map(str::to_string),
            team_abbreviation: row.str_value("TEAM_ABBREVIATION").map(str::to_string),
        })
    }
}
