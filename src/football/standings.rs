//! League table around the followed club

use async_trait::async_trait;
use log::info;
use serde::Serialize;
use std::sync::Arc;

use crate::cache::Fetcher;
use crate::error::{DashboardError, Result};
use crate::upstream::espn::{StandingsEntry, StandingsResponse};
use crate::upstream::UpstreamClient;

/// Rows shown on the dashboard when the table is cut down.
pub const WINDOW_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    pub position: u32,
    pub name: String,
    pub points: u32,
    pub is_target_team: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingsPayload {
    pub standings: Vec<TeamStanding>,
}

/// Turns the upstream table into ranked rows. Returns the rows and the index of the last row
/// whose full name contains `target_team`. Negative or missing points are shown as 0.
pub fn parse_standings(
    response: &StandingsResponse,
    target_team: &str,
) -> Result<(Vec<TeamStanding>, Option<usize>)> {
    let season = response.children.first().ok_or_else(|| {
        DashboardError::MissingData("No standings data found in ESPN response".to_string())
    })?;

    let entries = season
        .standings
        .as_ref()
        .map(|s| s.entries.as_slice())
        .unwrap_or_default();
    if entries.is_empty() {
        return Err(DashboardError::MissingData(
            "No standings entries found".to_string(),
        ));
    }

    let table: Vec<TeamStanding> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| standing_from_entry(index, entry, target_team))
        .collect();
    // Several matching names: the lowest-ranked one wins.
    let target_index = table.iter().rposition(|row| row.is_target_team);

    Ok((table, target_index))
}

fn standing_from_entry(index: usize, entry: &StandingsEntry, target_team: &str) -> TeamStanding {
    let display_name = entry.team.display_name.clone().unwrap_or_default();
    let name = entry
        .team
        .short_display_name
        .clone()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| display_name.clone());
    let points = entry
        .stat("points")
        .filter(|p| p.is_finite() && *p > 0.0)
        .map(|p| p.trunc() as u32)
        .unwrap_or(0);

    TeamStanding {
        position: index as u32 + 1,
        name,
        points,
        is_target_team: display_name.contains(target_team),
    }
}

/// Cuts the table down to at most five rows around the target.
///
/// First and second place both show positions 1–5; the second-place case could have been
/// "one above, three below" but deliberately matches first place. Everyone else gets two rows
/// above and two below, clamped to the table. Without a target the full table is returned.
pub fn window_standings(table: &[TeamStanding], target_index: Option<usize>) -> Vec<TeamStanding> {
    let target = match target_index {
        Some(index) if index < table.len() => index,
        _ => return table.to_vec(),
    };

    let (start, end) = match target {
        0 | 1 => (0, WINDOW_SIZE.min(table.len())),
        _ => (target - 2, (target + 3).min(table.len())),
    };

    table[start..end].to_vec()
}

pub struct StandingsFetcher {
    client: Arc<UpstreamClient>,
    standings_url: String,
    target_team: String,
}

impl StandingsFetcher {
    pub fn new(
        client: Arc<UpstreamClient>,
        standings_url: impl Into<String>,
        target_team: impl Into<String>,
    ) -> Self {
        Self {
            client,
            standings_url: standings_url.into(),
            target_team: target_team.into(),
        }
    }
}

#[async_trait]
impl Fetcher<StandingsPayload> for StandingsFetcher {
    async fn fetch(&self) -> Result<StandingsPayload> {
        let response: StandingsResponse = self.client.get_json(&self.standings_url).await?;
        let (table, target_index) = parse_standings(&response, &self.target_team)?;
        let standings = window_standings(&table, target_index);

        info!(
            "📊 Fetched {} standings rows ({} shown)",
            table.len(),
            standings.len()
        );
        Ok(StandingsPayload { standings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn league(size: u32) -> Vec<TeamStanding> {
        (1..=size)
            .map(|position| TeamStanding {
                position,
                name: format!("Team {position}"),
                points: 80 - position,
                is_target_team: false,
            })
            .collect()
    }

    fn positions(rows: &[TeamStanding]) -> Vec<u32> {
        rows.iter().map(|r| r.position).collect()
    }

    #[test]
    fn test_first_place_shows_top_five() {
        let table = league(20);
        assert_eq!(positions(&window_standings(&table, Some(0))), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_second_place_matches_first_place_window() {
        // Intentionally not "one above, three below".
        let table = league(20);
        assert_eq!(positions(&window_standings(&table, Some(1))), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_mid_table_two_above_two_below() {
        let table = league(20);
        assert_eq!(positions(&window_standings(&table, Some(9))), vec![8, 9, 10, 11, 12]);
        assert_eq!(positions(&window_standings(&table, Some(2))), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_tail_clamps_and_shrinks() {
        let table = league(20);
        // index 19 -> [17, 20)
        assert_eq!(positions(&window_standings(&table, Some(19))), vec![18, 19, 20]);
        assert_eq!(positions(&window_standings(&table, Some(18))), vec![17, 18, 19, 20]);
    }

    #[test]
    fn test_absent_target_returns_full_table() {
        let table = league(18);
        assert_eq!(window_standings(&table, None), table);
        assert_eq!(window_standings(&table, Some(18)), table);
    }

    #[test]
    fn test_small_league() {
        let table = league(3);
        assert_eq!(positions(&window_standings(&table, Some(0))), vec![1, 2, 3]);
        assert_eq!(positions(&window_standings(&table, Some(2))), vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_marks_target_and_prefers_short_name() {
        let response: StandingsResponse = serde_json::from_value(json!({
            "children": [{
                "standings": {
                    "entries": [
                        {"team": {"displayName": "PSV Eindhoven", "shortDisplayName": "PSV"},
                         "stats": [{"name": "points", "value": 64.0}]},
                        {"team": {"displayName": "Feyenoord Rotterdam", "shortDisplayName": ""},
                         "stats": [{"name": "points", "value": 58.0}]},
                        {"team": {"displayName": "FC Twente"}, "stats": []}
                    ]
                }
            }]
        }))
        .unwrap();

        let (table, target) = parse_standings(&response, "Feyenoord").unwrap();
        assert_eq!(target, Some(1));
        assert_eq!(
            table,
            vec![
                TeamStanding { position: 1, name: "PSV".into(), points: 64, is_target_team: false },
                TeamStanding { position: 2, name: "Feyenoord Rotterdam".into(), points: 58, is_target_team: true },
                TeamStanding { position: 3, name: "FC Twente".into(), points: 0, is_target_team: false },
            ]
        );
    }

    #[test]
    fn test_parse_picks_last_matching_row() {
        let response: StandingsResponse = serde_json::from_value(json!({
            "children": [{
                "standings": {
                    "entries": [
                        {"team": {"displayName": "Feyenoord Rotterdam"}, "stats": [{"name": "points", "value": 40.0}]},
                        {"team": {"displayName": "PSV Eindhoven"}, "stats": [{"name": "points", "value": 38.0}]},
                        {"team": {"displayName": "Jong Feyenoord"}, "stats": [{"name": "points", "value": -3.0}]}
                    ]
                }
            }]
        }))
        .unwrap();

        let (table, target) = parse_standings(&response, "Feyenoord").unwrap();
        assert_eq!(target, Some(2));
        assert_eq!(table[2].points, 0);
    }

    #[test]
    fn test_parse_missing_data() {
        let empty: StandingsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(
            parse_standings(&empty, "Feyenoord"),
            Err(DashboardError::MissingData(_))
        ));

        let no_entries: StandingsResponse =
            serde_json::from_value(json!({"children": [{"standings": {"entries": []}}]})).unwrap();
        assert!(matches!(
            parse_standings(&no_entries, "Feyenoord"),
            Err(DashboardError::MissingData(_))
        ));
    }

    #[test]
    fn test_payload_serializes_camel_case() {
        let payload = StandingsPayload {
            standings: vec![TeamStanding {
                position: 2,
                name: "Feyenoord".into(),
                points: 58,
                is_target_team: true,
            }],
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"standings": [{"position": 2, "name": "Feyenoord", "points": 58, "isTargetTeam": true}]})
        );
    }
}
