//! Season schedule discovery over the cdn.nba.com static files.
//!
//! The league schedule is published as `scheduleLeagueV2.json`, but mid
//! season the CDN rotates in versioned copies (`scheduleLeagueV2_1.json`
//! and up) and the unversioned file can go stale or 403. Rather than trust
//! any one name, every candidate is probed and the feed whose records best
//! cover the next 30 days wins; first-probed wins ties. An empty result
//! means no season feed was usable, and the day-granular fallback carries
//! the whole window.

use chrono::{Duration, NaiveDate};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::NbaGame;
use crate::http;
use crate::models::{GameRecord, SourceId};

pub const SCHEDULE_BASE: &str = "https://cdn.nba.com/static/json/staticData/";

/// How many versioned schedule files to probe after the unversioned one.
const VERSIONED_CANDIDATES: usize = 20;

/// Days ahead of today that count toward a feed's coverage score.
const COVERAGE_HORIZON_DAYS: i64 = 30;

#[derive(Debug, Deserialize)]
pub struct SeasonPayload {
    #[serde(rename = "leagueSchedule")]
    pub league_schedule: Option<LeagueSchedule>,
}

#[derive(Debug, Deserialize)]
pub struct LeagueSchedule {
    #[serde(rename = "gameDates", default)]
    pub game_dates: Vec<GameDate>,
}

#[derive(Debug, Deserialize)]
pub struct GameDate {
    #[serde(rename = "gameDate")]
    pub game_date: Option<String>,
    #[serde(default)]
    pub games: Vec<NbaGame>,
}

/// The candidate schedule URLs, in probe order.
pub fn candidate_urls() -> Vec<String> {
    let mut urls = vec![format!("{SCHEDULE_BASE}scheduleLeagueV2.json")];
    for i in 1..=VERSIONED_CANDIDATES {
        urls.push(format!("{SCHEDULE_BASE}scheduleLeagueV2_{i}.json"));
    }
    urls
}

/// Probe every candidate file and keep the one with the best coverage of
/// `[today, today + 30]`. Empty when nothing usable was found.
#[instrument(level = "info", skip(client))]
pub fn discover(client: &Client, today: NaiveDate) -> Vec<GameRecord> {
    let mut best: Vec<GameRecord> = Vec::new();
    let mut best_coverage: Option<usize> = None;

    for url in candidate_urls() {
        let Some(payload) =
            http::get_json::<SeasonPayload>(client, &url, http::SEASON_FETCH_TIMEOUT)
        else {
            continue;
        };
        let records = parse_payload(payload);
        if records.is_empty() {
            continue;
        }
        let covered = coverage(&records, today);
        debug!(%url, games = records.len(), covered, "Probed season schedule candidate");
        if best_coverage.is_none_or(|b| covered > b) {
            best_coverage = Some(covered);
            best = records;
        }
    }

    info!(
        games = best.len(),
        covered = best_coverage.unwrap_or(0),
        "Season schedule discovery finished"
    );
    best
}

/// Flatten a schedule payload into game records. Date groups whose
/// `gameDate` is missing or not `YYYY-MM-DD` are skipped.
pub fn parse_payload(payload: SeasonPayload) -> Vec<GameRecord> {
    let game_dates = payload
        .league_schedule
        .map(|ls| ls.game_dates)
        .unwrap_or_default();

    let mut records = Vec::new();
    for group in game_dates {
        let Some(date) = group
            .game_date
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        else {
            continue;
        };
        for game in &group.games {
            records.push(GameRecord {
                date,
                home_raw: game.home_team.full_name(),
                away_raw: game.away_team.full_name(),
                source: SourceId::SeasonSchedule,
            });
        }
    }
    records
}

/// How many records fall inside `[today, today + 30]` inclusive.
pub fn coverage(records: &[GameRecord], today: NaiveDate) -> usize {
    let horizon = today + Duration::days(COVERAGE_HORIZON_DAYS);
    records
        .iter()
        .filter(|r| r.date >= today && r.date <= horizon)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_payload_flattens_date_groups() {
        let json = r#"{
            "leagueSchedule": {
                "gameDates": [
                    {
                        "gameDate": "2026-01-08",
                        "games": [
                            {
                                "homeTeam": {"teamCity": "Denver", "teamName": "Nuggets"},
                                "awayTeam": {"teamCity": "Utah", "teamName": "Jazz"}
                            },
                            {
                                "homeTeam": {"teamCity": "Miami", "teamName": "Heat"},
                                "awayTeam": {"teamCity": "Orlando", "teamName": "Magic"}
                            }
                        ]
                    },
                    {
                        "gameDate": "not a date",
                        "games": [
                            {
                                "homeTeam": {"teamCity": "Boston", "teamName": "Celtics"},
                                "awayTeam": {"teamCity": "Chicago", "teamName": "Bulls"}
                            }
                        ]
                    }
                ]
            }
        }"#;
        let payload: SeasonPayload = serde_json::from_str(json).unwrap();

        let records = parse_payload(payload);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, date(2026, 1, 8));
        assert_eq!(records[0].home_raw, "Denver Nuggets");
        assert_eq!(records[1].away_raw, "Orlando Magic");
        assert!(records.iter().all(|r| r.source == SourceId::SeasonSchedule));
    }

    #[test]
    fn test_parse_payload_tolerates_empty_body() {
        let payload: SeasonPayload = serde_json::from_str("{}").unwrap();
        assert!(parse_payload(payload).is_empty());
    }

    #[test]
    fn test_coverage_counts_only_the_next_month() {
        let today = date(2026, 1, 7);
        let record = |d: NaiveDate| GameRecord {
            date: d,
            home_raw: "Denver Nuggets".to_string(),
            away_raw: "Utah Jazz".to_string(),
            source: SourceId::SeasonSchedule,
        };
        let records = vec![
            record(date(2026, 1, 6)),  // yesterday
            record(date(2026, 1, 7)),  // today
            record(date(2026, 2, 6)),  // today + 30
            record(date(2026, 2, 7)),  // past the horizon
        ];
        assert_eq!(coverage(&records, today), 2);
    }

    #[test]
    fn test_candidate_urls_probe_unversioned_first() {
        let urls = candidate_urls();
        assert_eq!(urls.len(), 21);
        assert!(urls[0].ends_with("scheduleLeagueV2.json"));
        assert!(urls[1].ends_with("scheduleLeagueV2_1.json"));
        assert!(urls[20].ends_with("scheduleLeagueV2_20.json"));
    }
}
