//! Today's games from the cdn.nba.com live scoreboard.
//!
//! The live feed is the only source trusted for day-of games: the static
//! schedule files lag behind postponements and the per-day feeds often do
//! not exist until tip-off. Every record it yields is dated today.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{info, instrument};

use super::NbaGame;
use crate::http;
use crate::models::{GameRecord, SourceId};

pub const TODAYS_SCOREBOARD: &str =
    "https://cdn.nba.com/static/json/liveData/scoreboard/todaysScoreboard_00.json";

#[derive(Debug, Deserialize)]
pub struct ScoreboardPayload {
    pub scoreboard: Option<Scoreboard>,
}

#[derive(Debug, Deserialize)]
pub struct Scoreboard {
    #[serde(default)]
    pub games: Vec<NbaGame>,
}

/// Fetch today's games; empty on any failure.
#[instrument(level = "info", skip(client))]
pub fn todays_games(client: &Client, today: NaiveDate) -> Vec<GameRecord> {
    let Some(payload) =
        http::get_json::<ScoreboardPayload>(client, TODAYS_SCOREBOARD, http::FETCH_TIMEOUT)
    else {
        return Vec::new();
    };
    let records = parse_payload(payload, today);
    info!(count = records.len(), "Loaded live scoreboard");
    records
}

/// Convert a scoreboard payload into records dated `today`.
pub fn parse_payload(payload: ScoreboardPayload, today: NaiveDate) -> Vec<GameRecord> {
    payload
        .scoreboard
        .map(|sb| sb.games)
        .unwrap_or_default()
        .iter()
        .map(|game: &NbaGame| GameRecord {
            date: today,
            home_raw: game.home_team.full_name(),
            away_raw: game.away_team.full_name(),
            source: SourceId::LiveScoreboard,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payload_dates_everything_today() {
        let json = r#"{
            "scoreboard": {
                "games": [
                    {
                        "homeTeam": {"teamCity": "Boston", "teamName": "Celtics"},
                        "awayTeam": {"teamCity": "LA", "teamName": "Clippers"}
                    }
                ]
            }
        }"#;
        let payload: ScoreboardPayload = serde_json::from_str(json).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap();

        let records = parse_payload(payload, today);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, today);
        assert_eq!(records[0].home_raw, "Boston Celtics");
        assert_eq!(records[0].away_raw, "LA Clippers");
        assert_eq!(records[0].source, SourceId::LiveScoreboard);
    }

    #[test]
    fn test_parse_payload_tolerates_missing_scoreboard() {
        let payload: ScoreboardPayload = serde_json::from_str("{}").unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap();
        assert!(parse_payload(payload, today).is_empty());
    }
}
