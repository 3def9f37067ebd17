//! Rank extraction: top-N team names out of one rankings article.
//!
//! Article markup changes week to week, so extraction is a fixed-order
//! cascade of three strategies over a single materialized [`ArticleDoc`]:
//!
//! 1. [`strategies::marker_scan`]: exact `"#N"` marker nodes
//! 2. [`strategies::ordinal_blocks`]: `"N. Team Name"` block prefixes
//! 3. [`strategies::line_window`]: rank-prefixed lines of flattened text
//!
//! Ranks resolved by an earlier strategy are never overwritten; each later
//! strategy only fills the ranks still missing, and the cascade stops as
//! soon as every requested rank is populated. The contract is best effort:
//! if ranks are still missing after all three passes, the caller gets a
//! partial result and fails loudly.

pub mod document;
pub mod strategies;

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::models::{RankedTeam, Strategy};
use crate::registry::TeamRegistry;
use document::ArticleDoc;

/// The cascade's strategies, in the order they are attempted.
const CASCADE: [Strategy; 3] = [
    Strategy::MarkerScan,
    Strategy::OrdinalBlocks,
    Strategy::LineWindow,
];

/// Result of running the cascade over one document.
#[derive(Debug)]
pub struct RankExtraction {
    /// Resolved ranks in ascending order; may be shorter than requested.
    pub teams: Vec<RankedTeam>,
    /// The strategies that actually ran, in order.
    pub attempted: Vec<Strategy>,
}

impl RankExtraction {
    /// Whether every rank `1..=wanted` was resolved.
    pub fn is_complete(&self, wanted: usize) -> bool {
        self.teams.len() == wanted
    }
}

/// Run the strategy cascade for ranks `1..=top_n`.
pub fn top_teams(doc: &ArticleDoc, top_n: usize, registry: &TeamRegistry) -> RankExtraction {
    let mut resolved: BTreeMap<usize, RankedTeam> = BTreeMap::new();
    let mut attempted = Vec::new();

    for strategy in CASCADE {
        if resolved.len() >= top_n {
            break;
        }
        attempted.push(strategy);

        let missing: Vec<usize> = (1..=top_n).filter(|r| !resolved.contains_key(r)).collect();
        let found = match strategy {
            Strategy::MarkerScan => strategies::marker_scan(doc, registry, &missing),
            Strategy::OrdinalBlocks => strategies::ordinal_blocks(doc, registry),
            Strategy::LineWindow => strategies::line_window(doc, registry, &missing),
        };

        for (rank, team) in found {
            if !(1..=top_n).contains(&rank) {
                continue;
            }
            resolved
                .entry(rank)
                .or_insert(RankedTeam { rank, team, strategy });
        }

        debug!(
            ?strategy,
            resolved = resolved.len(),
            wanted = top_n,
            "Strategy pass complete"
        );
    }

    info!(
        resolved = resolved.len(),
        wanted = top_n,
        strategies = attempted.len(),
        "Rank extraction finished"
    );

    RankExtraction {
        teams: resolved.into_values().collect(),
        attempted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn doc(html: &str) -> ArticleDoc {
        ArticleDoc::from_html(&Html::parse_document(html))
    }

    // Four marker nodes, each followed by a /team/ link inside the
    // lookahead window.
    const MARKER_ARTICLE: &str = "<article>\
        <span>#1</span><p><a href=\"/team/1610612738/celtics\">Boston Celtics</a> won again.</p>\
        <span>#2</span><p><a href=\"/team/1610612743/nuggets\">Denver Nuggets</a> cruised.</p>\
        <span>#3</span><p><a href=\"/team/1610612760/thunder\">Oklahoma City Thunder</a> rolled.</p>\
        <span>#4</span><p><a href=\"/team/1610612750/timberwolves\">Minnesota Timberwolves</a> held on.</p>\
        </article>";

    // Plain numbered headings, no "#N" markers anywhere.
    const HEADING_ARTICLE: &str = "<article>\
        <h3>1. Boston Celtics</h3><p>Still the team to beat.</p>\
        <h3>2. Denver Nuggets</h3><p>The champs reloaded.</p>\
        <h3>3. Oklahoma City Thunder</h3><p>Young and deep.</p>\
        <h3>4. Minnesota Timberwolves</h3><p>Defense travels.</p>\
        </article>";

    fn names(extraction: &RankExtraction) -> Vec<(usize, &str)> {
        extraction
            .teams
            .iter()
            .map(|t| (t.rank, t.team.as_str()))
            .collect()
    }

    #[test]
    fn test_marker_article_resolves_in_rank_order() {
        let registry = TeamRegistry::nba();
        let extraction = top_teams(&doc(MARKER_ARTICLE), 4, &registry);

        assert!(extraction.is_complete(4));
        assert_eq!(
            names(&extraction),
            vec![
                (1, "Boston Celtics"),
                (2, "Denver Nuggets"),
                (3, "Oklahoma City Thunder"),
                (4, "Minnesota Timberwolves"),
            ]
        );
        assert!(extraction
            .teams
            .iter()
            .all(|t| t.strategy == Strategy::MarkerScan));
    }

    #[test]
    fn test_cascade_short_circuits_after_first_complete_pass() {
        let registry = TeamRegistry::nba();
        let extraction = top_teams(&doc(MARKER_ARTICLE), 4, &registry);
        assert_eq!(extraction.attempted, vec![Strategy::MarkerScan]);
    }

    #[test]
    fn test_heading_article_falls_back_to_ordinal_blocks() {
        let registry = TeamRegistry::nba();
        let extraction = top_teams(&doc(HEADING_ARTICLE), 4, &registry);

        assert!(extraction.is_complete(4));
        assert_eq!(
            extraction.attempted,
            vec![Strategy::MarkerScan, Strategy::OrdinalBlocks]
        );
        assert_eq!(
            names(&extraction),
            vec![
                (1, "Boston Celtics"),
                (2, "Denver Nuggets"),
                (3, "Oklahoma City Thunder"),
                (4, "Minnesota Timberwolves"),
            ]
        );
        assert!(extraction
            .teams
            .iter()
            .all(|t| t.strategy == Strategy::OrdinalBlocks));
    }

    #[test]
    fn test_partial_marker_results_carry_forward() {
        // Markers resolve ranks 1 and 2; headings supply 3 and 4.
        let registry = TeamRegistry::nba();
        let mixed = "<article>\
            <span>#1</span><p><a href=\"/team/1610612738\">Boston Celtics</a></p>\
            <span>#2</span><p><a href=\"/team/1610612743\">Denver Nuggets</a></p>\
            <h3>3. Miami Heat</h3>\
            <h3>4. New York Knicks</h3>\
            </article>";
        let extraction = top_teams(&doc(mixed), 4, &registry);

        assert!(extraction.is_complete(4));
        assert_eq!(
            extraction.attempted,
            vec![Strategy::MarkerScan, Strategy::OrdinalBlocks]
        );
        let strategies: Vec<Strategy> = extraction.teams.iter().map(|t| t.strategy).collect();
        assert_eq!(
            strategies,
            vec![
                Strategy::MarkerScan,
                Strategy::MarkerScan,
                Strategy::OrdinalBlocks,
                Strategy::OrdinalBlocks,
            ]
        );
    }

    #[test]
    fn test_later_strategies_never_overwrite_resolved_ranks() {
        // Rank 1 resolves via markers to the Celtics; a conflicting heading
        // later in the document must not replace it.
        let registry = TeamRegistry::nba();
        let conflicted = "<article>\
            <span>#1</span><p><a href=\"/team/1610612738\">Boston Celtics</a></p>\
            <h3>1. Utah Jazz</h3>\
            <h3>2. Denver Nuggets</h3>\
            </article>";
        let extraction = top_teams(&doc(conflicted), 2, &registry);

        assert!(extraction.is_complete(2));
        assert_eq!(
            names(&extraction),
            vec![(1, "Boston Celtics"), (2, "Denver Nuggets")]
        );
    }

    #[test]
    fn test_line_window_is_the_last_resort() {
        let registry = TeamRegistry::nba();
        let plain = "<article><div>Power Rankings, Week 12\n\
            No. 1 in our book\n\
            The Boston Celtics keep rolling\n\
            2) Denver Nuggets\n\
            Still elite.</div></article>";
        let extraction = top_teams(&doc(plain), 2, &registry);

        assert!(extraction.is_complete(2));
        assert_eq!(
            extraction.attempted,
            vec![
                Strategy::MarkerScan,
                Strategy::OrdinalBlocks,
                Strategy::LineWindow
            ]
        );
        assert_eq!(
            names(&extraction),
            vec![(1, "Boston Celtics"), (2, "Denver Nuggets")]
        );
    }

    #[test]
    fn test_incomplete_extraction_reports_partial_ranks() {
        let registry = TeamRegistry::nba();
        let thin = "<article><h3>1. Boston Celtics</h3><p>Nothing else here.</p></article>";
        let extraction = top_teams(&doc(thin), 4, &registry);

        assert!(!extraction.is_complete(4));
        assert_eq!(names(&extraction), vec![(1, "Boston Celtics")]);
        assert_eq!(extraction.attempted.len(), 3);
    }
}
