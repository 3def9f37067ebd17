//! Power Rankings article discovery and selection.
//!
//! Discovery scans a fixed, ordered list of nba.com index pages for anchors
//! that look like a rankings article. The listing pages are untrusted: they
//! mix in category links, the landing page itself, and unrelated stories,
//! and the freshest article is not reliably first. Selection therefore
//! probes up to a bounded number of candidates, keeps the ones whose body
//! actually looks like a rankings article, and picks the one with the
//! latest publish timestamp.
//!
//! A candidate that fails to download or parse is skipped, never fatal;
//! only an empty candidate list aborts the run (handled by the caller).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::extract::document;
use crate::http;
use crate::registry::TeamRegistry;

/// Index pages scanned for article links, in order.
pub const INDEX_CANDIDATES: [&str; 2] = [
    "https://www.nba.com/news/category/power-rankings",
    "https://www.nba.com/news/power-rankings",
];

const NBA_BASE: &str = "https://www.nba.com";

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static META_PUBLISHED: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="article:published_time"]"#).unwrap());
static META_PUBLISH_DATE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="publishDate"]"#).unwrap());
static TIME_TAG: Lazy<Selector> = Lazy::new(|| Selector::parse("time[datetime]").unwrap());

/// Standalone `#N` rank marker token inside normalized article text.
static MARKER_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|\s)#\d{1,2}(?:\s|$)").unwrap());

/// Collect candidate article URLs from the index pages.
///
/// Unreachable index pages are skipped with a warning. The result is
/// absolute URLs, deduplicated preserving first-seen order; it may be
/// empty, which the caller treats as fatal.
#[instrument(level = "info", skip_all)]
pub fn discover_candidates(client: &Client) -> Vec<String> {
    let mut candidates = Vec::new();
    for index_url in INDEX_CANDIDATES {
        let Some(body) = http::get_text(client, index_url) else {
            warn!(url = index_url, "Index page unavailable; trying next");
            continue;
        };
        let html = Html::parse_document(&body);
        let found = candidate_hrefs(&html);
        info!(url = index_url, count = found.len(), "Scanned index page");
        candidates.extend(found);
    }

    candidates.into_iter().unique().collect()
}

/// Probe up to `probe_limit` candidates and pick the freshest plausible one.
///
/// A candidate is plausible when its body carries at least two standalone
/// `#N` markers or mentions at least ten distinct roster teams. Among
/// plausible candidates the latest publish timestamp wins, earlier-probed
/// winning ties; candidates without a parseable timestamp rank oldest. If
/// nothing is plausible the first candidate is returned unchanged.
#[instrument(level = "info", skip_all, fields(candidates = candidates.len()))]
pub fn select_latest(
    client: &Client,
    candidates: &[String],
    probe_limit: usize,
    registry: &TeamRegistry,
) -> Option<String> {
    let deduped: Vec<&str> = candidates.iter().map(String::as_str).unique().collect();
    let first = deduped.first().copied()?;

    let mut best: Option<(Option<NaiveDateTime>, &str)> = None;
    for url in deduped.iter().take(probe_limit).copied() {
        let Some(body) = http::get_text(client, url) else {
            continue;
        };
        let html = Html::parse_document(&body);
        if !looks_like_rankings_article(&html, registry) {
            debug!(%url, "Candidate does not look like a rankings article");
            continue;
        }

        let published = publish_time(&html);
        debug!(%url, ?published, "Plausible rankings article");
        let newer = match &best {
            Some((best_ts, _)) => published > *best_ts,
            None => true,
        };
        if newer {
            best = Some((published, url));
        }
    }

    let selected = best.map(|(_, url)| url).unwrap_or(first);
    info!(url = selected, "Selected rankings article");
    Some(selected.to_string())
}

/// Qualifying article hrefs on one index page, in document order.
fn candidate_hrefs(html: &Html) -> Vec<String> {
    html.select(&ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| is_article_href(href))
        .filter_map(absolutize)
        .collect()
}

/// Relative nba.com news hrefs that name a specific rankings article.
fn is_article_href(href: &str) -> bool {
    let href = href.to_lowercase();
    href.starts_with("/news/")
        && !href.contains("/category/")
        && href.trim_end_matches('/') != "/news/power-rankings"
        && href.contains("power-rankings")
}

fn absolutize(href: &str) -> Option<String> {
    let base = Url::parse(NBA_BASE).ok()?;
    base.join(href).ok().map(|url| url.to_string())
}

fn looks_like_rankings_article(html: &Html, registry: &TeamRegistry) -> bool {
    let text = document::article_text(html);
    let markers = MARKER_TOKEN.find_iter(&text).count();
    markers >= 2 || registry.count_displays_in(&text) >= 10
}

/// Publish timestamp from page metadata, tried in order:
/// `article:published_time`, `publishDate`, then the first
/// `<time datetime>`. `None` when nothing parses.
fn publish_time(html: &Html) -> Option<NaiveDateTime> {
    let meta_content = html
        .select(&META_PUBLISHED)
        .next()
        .or_else(|| html.select(&META_PUBLISH_DATE).next())
        .and_then(|meta| meta.value().attr("content"));

    if let Some(content) = meta_content {
        if let Ok(dt) = NaiveDateTime::parse_from_str(content, "%Y-%m-%dT%H:%M:%SZ") {
            return Some(dt);
        }
        if let Ok(dt) = DateTime::parse_from_str(content, "%Y-%m-%dT%H:%M:%S%z") {
            return Some(dt.naive_utc());
        }
        if let Ok(date) = NaiveDate::parse_from_str(content, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    let datetime = html
        .select(&TIME_TAG)
        .next()
        .and_then(|t| t.value().attr("datetime"))?;
    DateTime::parse_from_rfc3339(datetime)
        .ok()
        .map(|dt| dt.naive_utc())
}
