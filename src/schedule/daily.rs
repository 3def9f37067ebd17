//! Day-granular future games from the ESPN public scoreboard.
//!
//! The fallback for window dates the season schedule does not cover. ESPN's
//! scoreboard is queried once per date (`?dates=YYYYMMDD`) and its event
//! shape differs completely from the NBA feeds, so it gets its own payload
//! types here. The [`DailyGames`] trait is the seam the merge goes through;
//! tests substitute a canned implementation.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::http;
use crate::models::{GameRecord, SourceId};

pub const ESPN_SCOREBOARD: &str =
    "https://site.api.espn.com/apis/site/v2/sports/basketball/nba/scoreboard";

/// A source of games for one specific date.
pub trait DailyGames {
    fn games_on(&self, date: NaiveDate) -> Vec<GameRecord>;
}

/// The real ESPN-backed implementation.
pub struct EspnScoreboard<'a> {
    pub client: &'a Client,
}

impl DailyGames for EspnScoreboard<'_> {
    #[instrument(level = "debug", skip(self))]
    fn games_on(&self, date: NaiveDate) -> Vec<GameRecord> {
        let url = format!("{ESPN_SCOREBOARD}?dates={}", date.format("%Y%m%d"));
        let Some(payload) = http::get_json::<EspnPayload>(self.client, &url, http::FETCH_TIMEOUT)
        else {
            return Vec::new();
        };
        let records = parse_payload(payload, date);
        debug!(count = records.len(), %date, "Loaded ESPN scoreboard");
        records
    }
}

#[derive(Debug, Deserialize)]
pub struct EspnPayload {
    #[serde(default)]
    pub events: Vec<EspnEvent>,
}

#[derive(Debug, Deserialize)]
pub struct EspnEvent {
    #[serde(default)]
    pub competitions: Vec<EspnCompetition>,
}

#[derive(Debug, Deserialize)]
pub struct EspnCompetition {
    #[serde(default)]
    pub competitors: Vec<EspnCompetitor>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EspnCompetitor {
    #[serde(default)]
    pub team: EspnTeam,
    #[serde(rename = "homeAway", default)]
    pub home_away: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct EspnTeam {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub location: Option<String>,
    pub name: Option<String>,
}

impl EspnTeam {
    /// `displayName` when present, otherwise `location name` glued together.
    fn label(&self) -> String {
        if let Some(display) = self.display_name.as_deref() {
            if !display.trim().is_empty() {
                return display.trim().to_string();
            }
        }
        let location = self.location.as_deref().unwrap_or("");
        let name = self.name.as_deref().unwrap_or("");
        format!("{location} {name}").trim().to_string()
    }
}

/// Convert an ESPN payload into records dated `date`.
///
/// Only an event's first competition counts, and only when it names both a
/// home and an away side.
pub fn parse_payload(payload: EspnPayload, date: NaiveDate) -> Vec<GameRecord> {
    let mut records = Vec::new();
    for event in payload.events {
        let Some(competition) = event.competitions.into_iter().next() else {
            continue;
        };

        let mut home = None;
        let mut away = None;
        for competitor in competition.competitors {
            let label = competitor.team.label();
            if competitor.home_away == "home" {
                home = Some(label);
            } else {
                away = Some(label);
            }
        }

        if let (Some(home_raw), Some(away_raw)) = (home, away) {
            records.push(GameRecord {
                date,
                home_raw,
                away_raw,
                source: SourceId::DailyScoreboard,
            });
        }
    }
    records
}
