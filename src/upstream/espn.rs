//! ESPN site API response shapes
//!
//! Only the fields the dashboard reads are modelled. Everything is optional or defaulted:
//! the public API omits fields freely and a missing one must not fail the whole payload.

use serde::Deserialize;
use serde_json::Value;

/// `GET {site}/teams/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamResponse {
    #[serde(default)]
    pub team: Option<TeamSummary>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    #[serde(default)]
    pub next_event: Vec<Event>,
}

/// `GET {site}/teams/{id}/schedule`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub competitions: Vec<Competition>,
}

impl Event {
    pub fn competition(&self) -> Option<&Competition> {
        self.competitions.first()
    }

    /// Raw status code of the first competition, e.g. `STATUS_SCHEDULED`; empty when absent.
    pub fn status_code(&self) -> &str {
        self.competition()
            .and_then(|c| c.status.as_ref())
            .and_then(|s| s.kind.as_ref())
            .map(|t| t.name.as_str())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Competition {
    #[serde(default)]
    pub competitors: Vec<Competitor>,
    #[serde(default)]
    pub status: Option<EventStatus>,
}

impl Competition {
    pub fn side(&self, home_away: &str) -> Option<&Competitor> {
        self.competitors.iter().find(|c| c.home_away == home_away)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStatus {
    #[serde(default)]
    pub display_clock: Option<String>,
    #[serde(default)]
    pub period: Option<u32>,
    #[serde(rename = "type", default)]
    pub kind: Option<StatusType>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatusType {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    #[serde(default)]
    pub home_away: String,
    /// Either a bare value (`"2"`, `2`) or `{ "value": 2.0, "displayValue": "2" }`
    #[serde(default)]
    pub score: Option<Value>,
    #[serde(default)]
    pub team: TeamRef,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub short_display_name: Option<String>,
}

/// `GET {v2}/standings`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StandingsResponse {
    #[serde(default)]
    pub children: Vec<StandingsGroup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StandingsGroup {
    #[serde(default)]
    pub standings: Option<StandingsTable>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StandingsTable {
    #[serde(default)]
    pub entries: Vec<StandingsEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StandingsEntry {
    #[serde(default)]
    pub team: TeamRef,
    #[serde(default)]
    pub stats: Vec<Stat>,
}

impl StandingsEntry {
    pub fn stat(&self, name: &str) -> Option<f64> {
        self.stats
            .iter()
            .find(|s| s.name == name)
            .and_then(|s| s.value)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Stat {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: Option<f64>,
}
