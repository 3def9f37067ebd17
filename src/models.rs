//! Core data types shared across the pipeline.
//!
//! This module defines the data structures passed between the pipeline
//! stages:
//! - [`RankedTeam`]: one resolved rank from the Power Rankings article
//! - [`GameRecord`]: a raw game as received from one upstream feed
//! - [`OpponentEntry`]: one line of a team's merged schedule
//!
//! `GameRecord` carries team names exactly as the feed spelled them; they
//! are canonicalized against the registry only at merge time.

use chrono::NaiveDate;

/// Which extraction strategy resolved a rank.
///
/// The extractor runs its strategies in this order and stops as soon as
/// every requested rank is filled, so the variant on a [`RankedTeam`] also
/// tells you how far down the cascade the article forced us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Exact `"#N"` marker nodes with a bounded forward scan.
    MarkerScan,
    /// Block-level elements with a leading `"N."`-style ordinal.
    OrdinalBlocks,
    /// Rank-prefixed lines with a small look-down window.
    LineWindow,
}

/// One rank resolved from the rankings article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedTeam {
    /// Position in the rankings, starting at 1.
    pub rank: usize,
    /// The canonical team display name.
    pub team: String,
    /// The strategy that resolved this rank.
    pub strategy: Strategy,
}

/// The upstream feed a [`GameRecord`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceId {
    /// The cdn.nba.com live scoreboard, day-of games only.
    LiveScoreboard,
    /// A cdn.nba.com season schedule file.
    SeasonSchedule,
    /// The ESPN public scoreboard, queried per date.
    DailyScoreboard,
}

/// A raw game record as received from one upstream feed.
///
/// `home_raw` and `away_raw` are the feed's own spellings and may not match
/// the canonical roster ("LA Clippers" vs "Los Angeles Clippers").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub date: NaiveDate,
    pub home_raw: String,
    pub away_raw: String,
    pub source: SourceId,
}

/// Whether the team of interest hosts the game or travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Venue {
    Home,
    Away,
}

impl Venue {
    /// The conventional schedule prefix: `"vs"` at home, `"@"` on the road.
    pub fn prefix(&self) -> &'static str {
        match self {
            Venue::Home => "vs",
            Venue::Away => "@",
        }
    }
}

/// One line of a team's merged schedule: who they play and where, on a date
/// inside the requested window.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct OpponentEntry {
    pub date: NaiveDate,
    pub opponent: String,
    pub venue: Venue,
}
