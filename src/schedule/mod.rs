//! Multi-source schedule aggregation.
//!
//! Three feeds describe upcoming games, and they disagree: the live
//! scoreboard knows about postponements the static schedule missed, the
//! static schedule reaches weeks ahead, and ESPN covers the dates the
//! static files drop. The merge here resolves every date in the window by
//! fixed source precedence:
//!
//! - **today**: the live scoreboard only; records for today from any other
//!   source are discarded even when present
//! - **future dates**: the discovered season schedule where it has data for
//!   that date; the ESPN daily scoreboard is queried only for the dates it
//!   does not cover
//!
//! Raw feed spellings are canonicalized through the registry before they
//! are matched against the target teams; spellings that do not resolve keep
//! their trimmed original form as opponent labels but can never match a
//! target.

pub mod daily;
pub mod live;
pub mod season;

use std::collections::{BTreeMap, HashMap};

use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use tracing::{debug, info, instrument};

pub use daily::DailyGames;

use crate::models::{GameRecord, OpponentEntry, Venue};
use crate::registry::TeamRegistry;

/// Team shape shared by the cdn.nba.com feeds.
#[derive(Debug, Default, Deserialize)]
pub struct NbaTeam {
    #[serde(rename = "teamCity", default)]
    pub team_city: String,
    #[serde(rename = "teamName", default)]
    pub team_name: String,
}

impl NbaTeam {
    /// `"City Name"`, tolerating either half being absent.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.team_city.trim(), self.team_name.trim())
            .trim()
            .to_string()
    }
}

/// Game shape shared by the cdn.nba.com feeds.
#[derive(Debug, Default, Deserialize)]
pub struct NbaGame {
    #[serde(rename = "homeTeam", default)]
    pub home_team: NbaTeam,
    #[serde(rename = "awayTeam", default)]
    pub away_team: NbaTeam,
}

/// Merge the sources into each target team's opponent list for the window
/// `[today, today + days - 1]`.
///
/// Returns one `(team, opponents)` pair per target, in target order, with
/// opponents ascending by date and exact duplicates removed. A target with
/// no games in the window gets an empty list.
#[instrument(level = "info", skip_all, fields(targets = targets.len(), days))]
pub fn upcoming_opponents(
    registry: &TeamRegistry,
    targets: &[String],
    today: NaiveDate,
    days: u32,
    live: &[GameRecord],
    season: &[GameRecord],
    daily: &dyn DailyGames,
) -> Vec<(String, Vec<OpponentEntry>)> {
    let mut lists: Vec<Vec<OpponentEntry>> = vec![Vec::new(); targets.len()];
    let want: HashMap<String, usize> = targets
        .iter()
        .enumerate()
        .map(|(i, team)| (registry.normalize(team), i))
        .collect();

    if days == 0 {
        return finish(targets, lists);
    }
    let end = today + Duration::days(i64::from(days) - 1);

    // Today belongs to the live scoreboard alone.
    for record in live.iter().filter(|r| r.date == today) {
        add_record(record, registry, &want, &mut lists);
    }

    // Season schedule records for future window dates, grouped by date;
    // anything it claims about today is dropped.
    let mut season_by_date: BTreeMap<NaiveDate, Vec<&GameRecord>> = BTreeMap::new();
    for record in season {
        if record.date == today {
            debug!(source = ?record.source, "Discarding non-live record for today");
            continue;
        }
        if record.date > today && record.date <= end {
            season_by_date.entry(record.date).or_default().push(record);
        }
    }

    let mut date = today + Duration::days(1);
    while date <= end {
        match season_by_date.get(&date) {
            Some(records) => {
                for record in records {
                    add_record(record, registry, &want, &mut lists);
                }
            }
            None => {
                debug!(%date, "Season schedule has no games; querying daily scoreboard");
                for record in daily.games_on(date) {
                    if record.date == date {
                        add_record(&record, registry, &want, &mut lists);
                    }
                }
            }
        }
        date += Duration::days(1);
    }

    for list in &mut lists {
        list.sort();
        list.dedup();
    }

    let total: usize = lists.iter().map(Vec::len).sum();
    info!(games = total, "Schedule merge finished");
    finish(targets, lists)
}

fn finish(targets: &[String], lists: Vec<Vec<OpponentEntry>>) -> Vec<(String, Vec<OpponentEntry>)> {
    targets.iter().cloned().zip(lists).collect()
}

fn add_record(
    record: &GameRecord,
    registry: &TeamRegistry,
    want: &HashMap<String, usize>,
    lists: &mut [Vec<OpponentEntry>],
) {
    let home = registry.canonicalize(&record.home_raw);
    let away = registry.canonicalize(&record.away_raw);

    if let Some(&i) = want.get(&registry.normalize(&home)) {
        lists[i].push(OpponentEntry {
            date: record.date,
            opponent: away.clone(),
            venue: Venue::Home,
        });
    }
    if let Some(&i) = want.get(&registry.normalize(&away)) {
        lists[i].push(OpponentEntry {
            date: record.date,
            opponent: home,
            venue: Venue::Away,
        });
    }
}
