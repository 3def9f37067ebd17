//! Shared blocking HTTP client and fetch helpers.
//!
//! All network access goes through the one client built here. nba.com can
//! reject non-browser requests, so the client carries browser-like default
//! headers. Every request is bounded by a fixed timeout and never retried;
//! the `get_*` helpers fold any transport failure or non-2xx status into
//! `None` so callers can move on to their next fallback.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::warn;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36";

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_JSON: &str = "application/json, text/plain, */*";

/// Timeout for HTML pages and small JSON feeds.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Timeout for the season schedule files, which run to several megabytes.
pub const SEASON_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the blocking client used for every request in a run.
pub fn build_client() -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));

    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(FETCH_TIMEOUT)
        .build()
}

/// Fetch a page body, or `None` on any failure.
pub fn get_text(client: &Client, url: &str) -> Option<String> {
    match try_get_text(client, url) {
        Ok(body) => Some(body),
        Err(e) => {
            warn!(%url, error = %e, "Fetch failed; skipping");
            None
        }
    }
}

/// Fetch a page body, surfacing the failure to the caller.
///
/// Used where a failed download is fatal rather than skippable (the article
/// the selector already committed to).
pub fn try_get_text(client: &Client, url: &str) -> Result<String, reqwest::Error> {
    client.get(url).send()?.error_for_status()?.text()
}

/// Fetch and deserialize a JSON feed, or `None` on any failure.
pub fn get_json<T: DeserializeOwned>(client: &Client, url: &str, timeout: Duration) -> Option<T> {
    let result = client
        .get(url)
        .header(ACCEPT, ACCEPT_JSON)
        .timeout(timeout)
        .send()
        .and_then(|resp| resp.error_for_status())
        .and_then(|resp| resp.json::<T>());

    match result {
        Ok(payload) => Some(payload),
        Err(e) => {
            warn!(%url, error = %e, "JSON fetch failed; skipping");
            None
        }
    }
}
