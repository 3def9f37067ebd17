//! Final report rendering: console text and the optional JSON file.
//!
//! The console format mirrors a box score read aloud: the article the
//! rankings came from, then each ranked team with one line per game,
//! `vs` for home dates and `@` for road dates.

use std::error::Error;
use std::fs;

use serde::Serialize;
use tracing::{info, instrument};

use crate::models::{OpponentEntry, RankedTeam, Venue};

/// Everything the run produced, ready to render.
#[derive(Debug)]
pub struct RankingsReport {
    pub article_url: String,
    pub window_days: u32,
    pub teams: Vec<TeamOutlook>,
}

/// One ranked team and its merged opponent list.
#[derive(Debug)]
pub struct TeamOutlook {
    pub rank: usize,
    pub team: String,
    pub opponents: Vec<OpponentEntry>,
}

/// Assemble the report from the extraction and the merged schedules.
///
/// `schedules` must be in ranked-team order, as produced by the aggregator
/// when given the ranked names as targets.
pub fn build(
    article_url: &str,
    window_days: u32,
    ranked: &[RankedTeam],
    schedules: Vec<(String, Vec<OpponentEntry>)>,
) -> RankingsReport {
    let teams = ranked
        .iter()
        .zip(schedules)
        .map(|(ranked_team, (team, opponents))| TeamOutlook {
            rank: ranked_team.rank,
            team,
            opponents,
        })
        .collect();

    RankingsReport {
        article_url: article_url.to_string(),
        window_days,
        teams,
    }
}

/// Render the console report.
pub fn render_text(report: &RankingsReport) -> String {
    let mut out = String::new();
    out.push_str("Latest NBA.com Power Rankings article:\n");
    out.push_str(&format!("  {}\n\n", report.article_url));
    out.push_str(&format!(
        "Top {} teams and opponents in the next {} days:\n\n",
        report.teams.len(),
        report.window_days
    ));

    for outlook in &report.teams {
        out.push_str(&format!("{}:\n", outlook.team));
        if outlook.opponents.is_empty() {
            out.push_str(&format!(
                "  (No games in the next {} days)\n",
                report.window_days
            ));
        } else {
            for game in &outlook.opponents {
                out.push_str(&format!(
                    "  {} — {} {}\n",
                    game.date,
                    game.venue.prefix(),
                    game.opponent
                ));
            }
        }
        out.push('\n');
    }

    out
}

/// Write the report as JSON.
#[instrument(level = "info", skip(report))]
pub fn write_json(report: &RankingsReport, path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(&to_json(report))?;
    fs::write(path, json)?;
    info!(path, "Wrote JSON report");
    Ok(())
}

// Serialized mirror of the report; dates become ISO strings.

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    article_url: &'a str,
    window_days: u32,
    teams: Vec<JsonTeam<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonTeam<'a> {
    rank: usize,
    team: &'a str,
    opponents: Vec<JsonGame<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonGame<'a> {
    date: String,
    opponent: &'a str,
    venue: &'static str,
}

fn to_json<'a>(report: &'a RankingsReport) -> JsonReport<'a> {
    JsonReport {
        article_url: &report.article_url,
        window_days: report.window_days,
        teams: report
            .teams
            .iter()
            .map(|outlook| JsonTeam {
                rank: outlook.rank,
                team: &outlook.team,
                opponents: outlook
                    .opponents
                    .iter()
                    .map(|game| JsonGame {
                        date: game.date.to_string(),
                        opponent: &game.opponent,
                        venue: match game.venue {
                            Venue::Home => "HOME",
                            Venue::Away => "AWAY",
                        },
                    })
                    .collect(),
            })
            .collect(),
    }
}
