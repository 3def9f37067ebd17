//! The three rank-resolution strategies, in fallback order.
//!
//! Each strategy is a pure function over an [`ArticleDoc`] and returns the
//! `(rank, canonical name)` pairs it could resolve. The cascade in the
//! parent module decides which ranks each strategy is still allowed to
//! fill; nothing here performs I/O.

use once_cell::sync::Lazy;
use regex::Regex;

use super::document::{ArticleDoc, DocNode};
use crate::registry::TeamRegistry;

/// How far past a rank marker the adjacency scan may look.
const MARKER_LOOKAHEAD: usize = 600;

/// How many flattened lines (inclusive) the line-window scan reads below a
/// rank-prefixed line.
const LINE_WINDOW: usize = 3;

/// Leading ordinal: one or two digits, a separator, then the name fragment
/// up to a trailing dash/parenthetical annotation.
static ORDINAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{1,2})\s*[.)\-–—:]\s+(.+?)\s*(?:[–—-]\s+.*|\(.*|$)").unwrap());

/// Highest rank the ordinal scan will accept; articles count down from 30.
const MAX_RANK: usize = 30;

/// Strategy 1: exact `"#r"` marker nodes with a bounded forward scan.
///
/// For each requested rank, finds a node whose entire trimmed text is the
/// marker, then walks forward through the node sequence. The walk stops at
/// the next rank's marker or after [`MARKER_LOOKAHEAD`] nodes. A `/team/`
/// link with a known team name wins; failing that, the first element whose
/// text contains a canonical name as a substring. If one marker occurrence
/// yields nothing, later occurrences of the same marker are tried.
pub fn marker_scan(
    doc: &ArticleDoc,
    registry: &TeamRegistry,
    ranks: &[usize],
) -> Vec<(usize, String)> {
    let mut found = Vec::new();

    for &rank in ranks {
        let mut resolved = None;

        for (i, node) in doc.nodes.iter().enumerate() {
            if !is_rank_marker(node, rank) {
                continue;
            }

            let window_end = doc.nodes.len().min(i + MARKER_LOOKAHEAD);
            for next in &doc.nodes[i + 1..window_end] {
                if is_rank_marker(next, rank + 1) {
                    break;
                }
                let DocNode::Element(el) = next else {
                    continue;
                };

                if el.name == "a"
                    && el.href.as_deref().is_some_and(|h| h.contains("/team/"))
                    && registry.is_known(&el.spaced)
                {
                    resolved = Some(registry.canonicalize(&el.spaced));
                    break;
                }
                if !el.spaced.is_empty() {
                    if let Some(display) = registry.first_display_in(&el.spaced) {
                        resolved = Some(display.to_string());
                        break;
                    }
                }
            }

            if resolved.is_some() {
                break;
            }
        }

        if let Some(team) = resolved {
            found.push((rank, team));
        }
    }

    found
}

/// Strategy 2: block-level elements with a leading `"N."`-style ordinal.
///
/// Scans every block in document order. A block's first `/team/` link text
/// overrides the regex capture. Only known team names are accepted; ranks
/// outside `1..=30` are discarded and the first occurrence of a rank wins.
pub fn ordinal_blocks(doc: &ArticleDoc, registry: &TeamRegistry) -> Vec<(usize, String)> {
    let mut found: Vec<(usize, String)> = Vec::new();

    for block in &doc.blocks {
        let Some(caps) = ORDINAL.captures(&block.text) else {
            continue;
        };
        let Ok(rank) = caps[1].parse::<usize>() else {
            continue;
        };

        let mut name = caps[2].trim().to_string();
        if let Some(link_text) = &block.team_link_text {
            name = link_text.clone();
        }

        if rank < 1 || rank > MAX_RANK {
            continue;
        }
        if !registry.is_known(&name) {
            continue;
        }
        if found.iter().any(|(r, _)| *r == rank) {
            continue;
        }

        found.push((rank, registry.canonicalize(&name)));
    }

    found
}

/// Strategy 3: rank-prefixed lines with a small look-down window.
///
/// For each requested rank, finds a flattened line starting with the rank
/// (optionally prefixed `"#"` or `"No."`) and searches that line plus the
/// next two for a canonical name substring.
pub fn line_window(
    doc: &ArticleDoc,
    registry: &TeamRegistry,
    ranks: &[usize],
) -> Vec<(usize, String)> {
    let mut found = Vec::new();

    for &rank in ranks {
        let pattern = Regex::new(&format!(r"^(?:#|No\.\s*)?{rank}(?:[.)\-–—: ]|$)")).unwrap();

        for (i, line) in doc.lines.iter().enumerate() {
            if !pattern.is_match(line) {
                continue;
            }
            let window = doc.lines[i..doc.lines.len().min(i + LINE_WINDOW)].join(" ");
            if let Some(display) = registry.first_display_in(&window) {
                found.push((rank, display.to_string()));
                break;
            }
        }
    }

    found
}

fn is_rank_marker(node: &DocNode, rank: usize) -> bool {
    let marker = format!("#{rank}");
    match node {
        DocNode::Text(text) => text.trim() == marker,
        DocNode::Element(el) => el.compact == marker,
    }
}
