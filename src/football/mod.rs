/// Football data shaping
///
/// - `standings`: league table parsing and the window around the followed club
/// - `matches`: status classification and the next/most-recent match resolver
pub mod matches;
pub mod standings;

pub use matches::{resolve_match, Match, MatchFetcher, MatchPayload, MatchStatus};
pub use standings::{window_standings, StandingsFetcher, StandingsPayload, TeamStanding};
