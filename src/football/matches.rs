//! Match Resolver
//!
//! Picks the one match the dashboard shows for the followed club. The team summary's next-event
//! pointer wins unless it is canceled. Otherwise the full schedule is scanned for the earliest
//! upcoming fixture, and failing that the most recent full-time result is shown as a past match.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use log::{debug, info};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::cache::Fetcher;
use crate::error::{DashboardError, Result};
use crate::upstream::espn::{Event, ScheduleResponse, TeamRef, TeamResponse};
use crate::upstream::UpstreamClient;

/// Local classification of upstream status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    FullTime,
    Postponed,
    Suspended,
    Canceled,
    /// Any code not in the table; displayed like a scheduled match
    Unknown,
}

const STATUS_TABLE: &[(&str, MatchStatus)] = &[
    ("STATUS_SCHEDULED", MatchStatus::Scheduled),
    ("STATUS_IN_PROGRESS", MatchStatus::InProgress),
    ("STATUS_FULL_TIME", MatchStatus::FullTime),
    ("STATUS_POSTPONED", MatchStatus::Postponed),
    ("STATUS_SUSPENDED", MatchStatus::Suspended),
    ("STATUS_CANCELED", MatchStatus::Canceled),
];

impl MatchStatus {
    pub fn from_code(code: &str) -> Self {
        STATUS_TABLE
            .iter()
            .find(|(name, _)| *name == code)
            .map(|(_, status)| *status)
            .unwrap_or(MatchStatus::Unknown)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub home_team: String,
    pub away_team: String,
    pub home_score: String,
    pub away_score: String,
    pub date: String,
    pub status: String,
    pub display_clock: String,
    pub period: u32,
    pub competition: String,
    pub is_live: bool,
    pub is_postponed: bool,
    pub is_suspended: bool,
    pub is_canceled: bool,
    pub is_past_match: bool,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchPayload {
    #[serde(rename = "match")]
    pub fixture: Match,
}

/// The event picked for display and whether it is a past result shown for lack of fixtures
#[derive(Debug, Clone, PartialEq)]
pub struct ChosenMatch {
    pub event: Event,
    pub is_past_match: bool,
}

/// ESPN sends either full RFC 3339 or minute precision (`2025-03-09T13:30Z`).
pub fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ").map(|dt| Utc.from_utc_datetime(&dt))
        })
        .ok()
}

/// The team's next event, unless it is missing or canceled.
pub fn usable_next_event(team: &TeamResponse) -> Option<&Event> {
    let next = team.team.as_ref()?.next_event.first()?;
    if MatchStatus::from_code(next.status_code()) == MatchStatus::Canceled {
        debug!("Next event is canceled: {}, falling back to schedule", next.name);
        return None;
    }
    Some(next)
}

/// Earliest upcoming scheduled/postponed fixture, else the latest full-time result.
pub fn scan_schedule(events: &[Event], now: DateTime<Utc>) -> Option<ChosenMatch> {
    let mut next_upcoming: Option<(DateTime<Utc>, &Event)> = None;
    let mut most_recent: Option<(DateTime<Utc>, &Event)> = None;

    for event in events {
        let status = MatchStatus::from_code(event.status_code());
        if status == MatchStatus::Canceled {
            continue;
        }
        let Some(date) = parse_event_date(&event.date) else {
            debug!("Skipping event with unreadable date: {:?}", event.date);
            continue;
        };

        if date > now && matches!(status, MatchStatus::Scheduled | MatchStatus::Postponed) {
            if next_upcoming.map_or(true, |(best, _)| date < best) {
                next_upcoming = Some((date, event));
            }
        }

        if date < now && status == MatchStatus::FullTime {
            if most_recent.map_or(true, |(best, _)| date > best) {
                most_recent = Some((date, event));
            }
        }
    }

    match (next_upcoming, most_recent) {
        (Some((_, event)), _) => Some(ChosenMatch {
            event: event.clone(),
            is_past_match: false,
        }),
        (None, Some((_, event))) => Some(ChosenMatch {
            event: event.clone(),
            is_past_match: true,
        }),
        (None, None) => None,
    }
}

/// Pure decision: next-event pointer, then schedule scan, then failure.
pub fn resolve_match(
    next_event: Option<&Event>,
    schedule: &[Event],
    now: DateTime<Utc>,
) -> Result<ChosenMatch> {
    if let Some(event) = next_event {
        if MatchStatus::from_code(event.status_code()) != MatchStatus::Canceled {
            return Ok(ChosenMatch {
                event: event.clone(),
                is_past_match: false,
            });
        }
    }

    scan_schedule(schedule, now).ok_or(DashboardError::NoMatchesFound)
}

/// Score as a string: display form, then raw value, then "0".
pub fn normalize_score(score: Option<&Value>) -> String {
    match score {
        Some(Value::Object(fields)) => fields
            .get("displayValue")
            .and_then(non_empty_text)
            .or_else(|| fields.get("value").and_then(non_empty_text))
            .unwrap_or_else(|| "0".to_string()),
        Some(other) => non_empty_text(other).unwrap_or_else(|| "0".to_string()),
        None => "0".to_string(),
    }
}

fn non_empty_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        }),
        _ => None,
    }
}

/// Short display name, falling back to the full one.
pub fn team_display_name(team: &TeamRef) -> String {
    team.short_display_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .or(team.display_name.as_deref())
        .unwrap_or_default()
        .to_string()
}

/// Shapes the chosen event into the dashboard payload.
pub fn build_match(chosen: &ChosenMatch, competition_name: &str) -> Result<Match> {
    let competition = chosen
        .event
        .competition()
        .ok_or_else(|| DashboardError::MissingData(format!("Event {} has no competition", chosen.event.name)))?;
    let home = competition
        .side("home")
        .ok_or_else(|| DashboardError::MissingData("No home competitor".to_string()))?;
    let away = competition
        .side("away")
        .ok_or_else(|| DashboardError::MissingData("No away competitor".to_string()))?;

    let code = chosen.event.status_code().to_string();
    let status = MatchStatus::from_code(&code);
    let event_status = competition.status.as_ref();

    Ok(Match {
        home_team: team_display_name(&home.team),
        away_team: team_display_name(&away.team),
        home_score: normalize_score(home.score.as_ref()),
        away_score: normalize_score(away.score.as_ref()),
        date: chosen.event.date.clone(),
        display_clock: event_status
            .and_then(|s| s.display_clock.clone())
            .unwrap_or_default(),
        period: event_status.and_then(|s| s.period).unwrap_or(0),
        competition: competition_name.to_string(),
        is_live: status == MatchStatus::InProgress,
        is_postponed: status == MatchStatus::Postponed,
        is_suspended: status == MatchStatus::Suspended,
        is_canceled: status == MatchStatus::Canceled,
        is_completed: status == MatchStatus::FullTime,
        is_past_match: chosen.is_past_match,
        status: code,
    })
}

pub struct MatchFetcher {
    client: Arc<UpstreamClient>,
    team_url: String,
    schedule_url: String,
    competition_name: String,
}

impl MatchFetcher {
    pub fn new(
        client: Arc<UpstreamClient>,
        team_url: impl Into<String>,
        schedule_url: impl Into<String>,
        competition_name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            team_url: team_url.into(),
            schedule_url: schedule_url.into(),
            competition_name: competition_name.into(),
        }
    }
}

#[async_trait]
impl Fetcher<MatchPayload> for MatchFetcher {
    async fn fetch(&self) -> Result<MatchPayload> {
        let team: TeamResponse = self.client.get_json(&self.team_url).await?;
        let now = Utc::now();

        // The schedule is only requested when the next-event pointer is unusable.
        let chosen = match usable_next_event(&team) {
            Some(next) => resolve_match(Some(next), &[], now)?,
            None => {
                info!("No usable next event, fetching schedule");
                let schedule: ScheduleResponse = self.client.get_json(&self.schedule_url).await?;
                resolve_match(None, &schedule.events, now)?
            }
        };

        if chosen.is_past_match {
            info!(
                "⚽ No upcoming matches, showing most recent: {} (event {})",
                chosen.event.name, chosen.event.id
            );
        } else {
            info!("⚽ Next match: {} (event {})", chosen.event.name, chosen.event.id);
        }

        Ok(MatchPayload {
            fixture: build_match(&chosen, &self.competition_name)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn event(name: &str, date: &str, status: &str) -> Event {
        serde_json::from_value(json!({
            "name": name,
            "date": date,
            "competitions": [{
                "competitors": [
                    {"homeAway": "home", "score": {"value": 2.0, "displayValue": "2"},
                     "team": {"displayName": "Feyenoord Rotterdam", "shortDisplayName": "Feyenoord"}},
                    {"homeAway": "away", "score": "1",
                     "team": {"displayName": "AFC Ajax"}}
                ],
                "status": {"displayClock": "90'+4'", "period": 2, "type": {"name": status}}
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_status_table() {
        assert_eq!(MatchStatus::from_code("STATUS_IN_PROGRESS"), MatchStatus::InProgress);
        assert_eq!(MatchStatus::from_code("STATUS_FULL_TIME"), MatchStatus::FullTime);
        assert_eq!(MatchStatus::from_code("STATUS_CANCELED"), MatchStatus::Canceled);
        assert_eq!(MatchStatus::from_code("STATUS_HALFTIME"), MatchStatus::Unknown);
        assert_eq!(MatchStatus::from_code(""), MatchStatus::Unknown);
    }

    #[test]
    fn test_next_event_chosen_verbatim() {
        // Even a past event is taken as-is when the pointer is usable.
        let next = event("Feyenoord vs Ajax", "2025-02-28T19:00Z", "STATUS_IN_PROGRESS");
        let schedule = vec![event("Later", "2025-03-08T19:00Z", "STATUS_SCHEDULED")];

        let chosen = resolve_match(Some(&next), &schedule, now()).unwrap();
        assert_eq!(chosen.event, next);
        assert!(!chosen.is_past_match);
    }

    #[test]
    fn test_canceled_next_event_falls_back_to_upcoming() {
        let next = event("Canceled", "2025-03-02T19:00Z", "STATUS_CANCELED");
        let schedule = vec![
            event("Past", "2025-02-20T19:00Z", "STATUS_FULL_TIME"),
            event("Future", "2025-03-05T19:00Z", "STATUS_SCHEDULED"),
        ];

        let chosen = resolve_match(Some(&next), &schedule, now()).unwrap();
        assert_eq!(chosen.event.name, "Future");
        assert!(!chosen.is_past_match);
    }

    #[test]
    fn test_only_past_result_is_marked_past() {
        let schedule = vec![event("Past", "2025-02-20T19:00Z", "STATUS_FULL_TIME")];

        let chosen = resolve_match(None, &schedule, now()).unwrap();
        assert_eq!(chosen.event.name, "Past");
        assert!(chosen.is_past_match);
    }

    #[test]
    fn test_no_events_is_failure() {
        assert!(matches!(
            resolve_match(None, &[], now()),
            Err(DashboardError::NoMatchesFound)
        ));
        let only_canceled = vec![event("X", "2025-03-05T19:00Z", "STATUS_CANCELED")];
        assert!(matches!(
            resolve_match(None, &only_canceled, now()),
            Err(DashboardError::NoMatchesFound)
        ));
    }

    #[test]
    fn test_scan_picks_earliest_upcoming_and_latest_past() {
        let schedule = vec![
            event("Far", "2025-04-01T19:00Z", "STATUS_SCHEDULED"),
            event("Canceled sooner", "2025-03-02T19:00Z", "STATUS_CANCELED"),
            event("Postponed soon", "2025-03-03T19:00Z", "STATUS_POSTPONED"),
            event("Live in future?", "2025-03-02T20:00Z", "STATUS_IN_PROGRESS"),
        ];
        assert_eq!(scan_schedule(&schedule, now()).unwrap().event.name, "Postponed soon");

        let past_only = vec![
            event("Old", "2025-01-10T19:00Z", "STATUS_FULL_TIME"),
            event("Recent", "2025-02-25T19:00Z", "STATUS_FULL_TIME"),
            event("Suspended", "2025-02-28T19:00Z", "STATUS_SUSPENDED"),
        ];
        let chosen = scan_schedule(&past_only, now()).unwrap();
        assert_eq!(chosen.event.name, "Recent");
        assert!(chosen.is_past_match);
    }

    #[test]
    fn test_resolver_is_idempotent() {
        let schedule = vec![
            event("A", "2025-03-05T19:00Z", "STATUS_SCHEDULED"),
            event("B", "2025-03-05T19:00Z", "STATUS_SCHEDULED"),
            event("C", "2025-02-05T19:00Z", "STATUS_FULL_TIME"),
        ];
        let first = resolve_match(None, &schedule, now()).unwrap();
        let second = resolve_match(None, &schedule, now()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.event.name, "A");
    }

    #[test]
    fn test_score_normalization() {
        assert_eq!(normalize_score(Some(&json!({"value": 2}))), "2");
        assert_eq!(normalize_score(Some(&json!({"value": 2.0, "displayValue": ""}))), "2");
        assert_eq!(normalize_score(Some(&json!({"displayValue": "4"}))), "4");
        assert_eq!(normalize_score(Some(&json!(3))), "3");
        assert_eq!(normalize_score(Some(&json!("1"))), "1");
        assert_eq!(normalize_score(Some(&json!({}))), "0");
        assert_eq!(normalize_score(Some(&Value::Null)), "0");
        assert_eq!(normalize_score(None), "0");
    }

    #[test]
    fn test_team_display_name_fallback() {
        let short = TeamRef {
            display_name: Some("Feyenoord Rotterdam".into()),
            short_display_name: Some("Feyenoord".into()),
        };
        let long_only = TeamRef {
            display_name: Some("AFC Ajax".into()),
            short_display_name: Some(String::new()),
        };
        assert_eq!(team_display_name(&short), "Feyenoord");
        assert_eq!(team_display_name(&long_only), "AFC Ajax");
        assert_eq!(team_display_name(&TeamRef::default()), "");
    }

    #[test]
    fn test_parse_event_date_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 9, 13, 30, 0).unwrap();
        assert_eq!(parse_event_date("2025-03-09T13:30Z"), Some(expected));
        assert_eq!(parse_event_date("2025-03-09T13:30:00Z"), Some(expected));
        assert_eq!(parse_event_date("2025-03-09T14:30:00+01:00"), Some(expected));
        assert_eq!(parse_event_date("next week"), None);
    }

    #[test]
    fn test_build_match_classifies_and_normalizes() {
        let chosen = ChosenMatch {
            event: event("Feyenoord vs Ajax", "2025-02-20T19:00Z", "STATUS_FULL_TIME"),
            is_past_match: true,
        };
        let fixture = build_match(&chosen, "Eredivisie").unwrap();

        assert_eq!(
            fixture,
            Match {
                home_team: "Feyenoord".into(),
                away_team: "AFC Ajax".into(),
                home_score: "2".into(),
                away_score: "1".into(),
                date: "2025-02-20T19:00Z".into(),
                status: "STATUS_FULL_TIME".into(),
                display_clock: "90'+4'".into(),
                period: 2,
                competition: "Eredivisie".into(),
                is_live: false,
                is_postponed: false,
                is_suspended: false,
                is_canceled: false,
                is_past_match: true,
                is_completed: true,
            }
        );
    }

    #[test]
    fn test_unknown_status_sets_no_flags() {
        let chosen = ChosenMatch {
            event: event("Halftime", "2025-03-01T11:00Z", "STATUS_HALFTIME"),
            is_past_match: false,
        };
        let fixture = build_match(&chosen, "Eredivisie").unwrap();
        assert!(!fixture.is_live && !fixture.is_completed && !fixture.is_postponed);
        assert!(!fixture.is_suspended && !fixture.is_canceled);
    }

    #[test]
    fn test_payload_wraps_under_match_key() {
        let chosen = ChosenMatch {
            event: event("Feyenoord vs Ajax", "2025-03-05T19:00Z", "STATUS_SCHEDULED"),
            is_past_match: false,
        };
        let payload = MatchPayload {
            fixture: build_match(&chosen, "Eredivisie").unwrap(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["match"]["homeTeam"], "Feyenoord");
        assert_eq!(value["match"]["isPastMatch"], false);
        assert_eq!(value["match"]["displayClock"], "90'+4'");
    }

    #[test]
    fn test_usable_next_event() {
        let team: TeamResponse = serde_json::from_value(json!({
            "team": {"nextEvent": [
                {"name": "Canceled", "competitions": [{"status": {"type": {"name": "STATUS_CANCELED"}}}]}
            ]}
        }))
        .unwrap();
        assert!(usable_next_event(&team).is_none());

        let empty: TeamResponse = serde_json::from_value(json!({"team": {}})).unwrap();
        assert!(usable_next_event(&empty).is_none());
    }
}
