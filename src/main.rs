//! # Courtside
//!
//! Fetches the latest NBA.com Power Rankings article, extracts the top
//! ranked teams, and reports each team's opponents over the coming week by
//! merging several schedule feeds.
//!
//! ## Architecture
//!
//! The application is a sequential pipeline:
//! 1. **Discovery**: scan the nba.com index pages for rankings article links
//! 2. **Selection**: probe candidates and pick the freshest plausible article
//! 3. **Extraction**: resolve ranks 1..N with a cascade of three strategies
//! 4. **Aggregation**: merge the live scoreboard, the discovered season
//!    schedule, and the ESPN daily scoreboard into per-team opponent lists
//! 5. **Output**: print the report, optionally writing it as JSON
//!
//! Every stage runs synchronously; fetches are blocking calls with a fixed
//! timeout and are never retried. A failed feed degrades to an empty
//! contribution, while a failed discovery or extraction aborts the run.

use chrono::Local;
use clap::Parser;
use scraper::Html;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod article;
mod cli;
mod error;
mod extract;
mod http;
mod models;
mod registry;
mod report;
mod schedule;

use cli::Cli;
use error::CourtsideError;
use extract::document::ArticleDoc;
use registry::TeamRegistry;
use schedule::daily::EspnScoreboard;

fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("courtside starting up");

    let args = Cli::parse();
    debug!(?args.top, ?args.days, ?args.probe_limit, "Parsed CLI arguments");

    let registry = TeamRegistry::nba();
    let client = http::build_client()?;
    let today = Local::now().date_naive();

    // ---- Find the latest Power Rankings article ----
    let candidates = article::discover_candidates(&client);
    info!(count = candidates.len(), "Collected article candidates");
    if candidates.is_empty() {
        let e = CourtsideError::NoCandidates;
        error!(error = %e, "Article discovery failed");
        return Err(e.into());
    }

    let article_url = article::select_latest(&client, &candidates, args.probe_limit, &registry)
        .ok_or(CourtsideError::NoCandidates)?;

    // ---- Extract the top teams ----
    let body = match http::try_get_text(&client, &article_url) {
        Ok(body) => body,
        Err(source) => {
            let e = CourtsideError::ArticleDownload {
                url: article_url.clone(),
                source,
            };
            error!(error = %e, "Article download failed");
            return Err(e.into());
        }
    };
    let html = Html::parse_document(&body);
    let doc = ArticleDoc::from_html(&html);

    let extraction = extract::top_teams(&doc, args.top, &registry);
    if !extraction.is_complete(args.top) {
        let e = CourtsideError::Extraction {
            url: article_url,
            wanted: args.top,
            resolved: extraction.teams.len(),
        };
        error!(error = %e, "Rank extraction failed");
        return Err(e.into());
    }
    info!(attempted = ?extraction.attempted, "Extraction cascade finished");
    for ranked in &extraction.teams {
        info!(rank = ranked.rank, team = %ranked.team, strategy = ?ranked.strategy, "Ranked team");
    }

    // ---- Load schedule sources ----
    let live = schedule::live::todays_games(&client, today);
    let season = schedule::season::discover(&client, today);
    let espn = EspnScoreboard { client: &client };

    // ---- Merge into per-team opponent lists ----
    let targets: Vec<String> = extraction.teams.iter().map(|t| t.team.clone()).collect();
    let schedules = schedule::upcoming_opponents(
        &registry,
        &targets,
        today,
        args.days,
        &live,
        &season,
        &espn,
    );

    // ---- Output ----
    let rankings = report::build(&article_url, args.days, &extraction.teams, schedules);
    print!("{}", report::render_text(&rankings));

    if let Some(path) = &args.json_out {
        if let Err(e) = report::write_json(&rankings, path) {
            error!(path = %path, error = %e, "Failed to write JSON report");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
