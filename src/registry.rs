//! Canonical team roster and name normalization.
//!
//! Every upstream source spells team names its own way: "LA Clippers",
//! "L.A. Clippers", "la   clippers" and "Los Angeles Clippers" all mean the
//! same franchise. [`TeamRegistry`] owns the roster of canonical display
//! names plus the normalization and alias rules that fold all of those
//! spellings onto one key, and it is the single authority the extractor,
//! the article selector and the schedule merge all consult.
//!
//! The registry is immutable: it is built once at startup from the constant
//! tables below and passed by reference everywhere it is needed.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

/// The 30 NBA franchises, in the display form the report uses.
pub const NBA_TEAMS: [&str; 30] = [
    "Atlanta Hawks",
    "Boston Celtics",
    "Brooklyn Nets",
    "Charlotte Hornets",
    "Chicago Bulls",
    "Cleveland Cavaliers",
    "Dallas Mavericks",
    "Denver Nuggets",
    "Detroit Pistons",
    "Golden State Warriors",
    "Houston Rockets",
    "Indiana Pacers",
    "Los Angeles Clippers",
    "Los Angeles Lakers",
    "Memphis Grizzlies",
    "Miami Heat",
    "Milwaukee Bucks",
    "Minnesota Timberwolves",
    "New Orleans Pelicans",
    "New York Knicks",
    "Oklahoma City Thunder",
    "Orlando Magic",
    "Philadelphia 76ers",
    "Phoenix Suns",
    "Portland Trail Blazers",
    "Sacramento Kings",
    "San Antonio Spurs",
    "Toronto Raptors",
    "Utah Jazz",
    "Washington Wizards",
];

/// Shorthand spellings seen in articles and feeds, mapped to the canonical
/// name they stand for.
pub const NBA_ALIASES: [(&str, &str); 10] = [
    ("la clippers", "Los Angeles Clippers"),
    ("la lakers", "Los Angeles Lakers"),
    ("ny knicks", "New York Knicks"),
    ("portland blazers", "Portland Trail Blazers"),
    ("gs warriors", "Golden State Warriors"),
    ("okc thunder", "Oklahoma City Thunder"),
    ("phx suns", "Phoenix Suns"),
    ("76ers", "Philadelphia 76ers"),
    ("san antonio", "San Antonio Spurs"),
    ("new orleans", "New Orleans Pelicans"),
];

static STANDALONE_LA: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bla\b").unwrap());

/// Outcome of looking a raw name up against the roster.
///
/// `Unresolved` carries the trimmed input so callers can still display the
/// name; an unresolved name can never match the roster-derived target set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    Resolved(&'a str),
    Unresolved(String),
}

/// Canonical roster plus the normalization rules that map raw spellings
/// onto it.
#[derive(Debug)]
pub struct TeamRegistry {
    teams: Vec<String>,
    by_key: HashMap<String, usize>,
    aliases: HashMap<String, String>,
}

impl TeamRegistry {
    /// Build a registry from a roster of display names and an alias table.
    ///
    /// Alias keys and values are normalized with the same cleaning rules
    /// applied to lookups, so an alias written as `"L.A. Clippers"` would
    /// work just as well as `"la clippers"`.
    pub fn new(roster: &[&str], aliases: &[(&str, &str)]) -> Self {
        let alias_map: HashMap<String, String> = aliases
            .iter()
            .map(|(from, to)| (clean(from), clean(to)))
            .collect();

        let teams: Vec<String> = roster.iter().map(|t| t.to_string()).collect();
        let mut by_key = HashMap::new();
        for (i, team) in teams.iter().enumerate() {
            let key = clean(team);
            let key = alias_map.get(&key).cloned().unwrap_or(key);
            by_key.insert(key, i);
        }

        TeamRegistry {
            teams,
            by_key,
            aliases: alias_map,
        }
    }

    /// The standard NBA registry over [`NBA_TEAMS`] and [`NBA_ALIASES`].
    pub fn nba() -> Self {
        Self::new(&NBA_TEAMS, &NBA_ALIASES)
    }

    /// Reduce a raw name to its normalized lookup key.
    ///
    /// Lowercases, strips punctuation to single spaces, collapses
    /// whitespace, expands a standalone "la" token to "los angeles", then
    /// substitutes through the alias table. Idempotent:
    /// `normalize(normalize(x)) == normalize(x)`.
    pub fn normalize(&self, text: &str) -> String {
        let key = clean(text);
        self.aliases.get(&key).cloned().unwrap_or(key)
    }

    /// Whether the name resolves to a roster team.
    pub fn is_known(&self, text: &str) -> bool {
        self.by_key.contains_key(&self.normalize(text))
    }

    /// Look a raw name up against the roster.
    pub fn resolve(&self, text: &str) -> Resolution<'_> {
        match self.by_key.get(&self.normalize(text)) {
            Some(&i) => Resolution::Resolved(&self.teams[i]),
            None => {
                debug!(name = %text.trim(), "Name did not resolve to a roster team");
                Resolution::Unresolved(text.trim().to_string())
            }
        }
    }

    /// The display form if the name is known, otherwise the trimmed input
    /// unchanged. Total: never fails, and a fixed point on its own output.
    pub fn canonicalize(&self, text: &str) -> String {
        match self.resolve(text) {
            Resolution::Resolved(display) => display.to_string(),
            Resolution::Unresolved(original) => original,
        }
    }

    /// The first canonical display name appearing as a substring of `text`,
    /// in roster order.
    pub fn first_display_in(&self, text: &str) -> Option<&str> {
        self.teams
            .iter()
            .find(|team| text.contains(team.as_str()))
            .map(|team| team.as_str())
    }

    /// How many distinct canonical display names appear as substrings of
    /// `text`. Used by the article plausibility check.
    pub fn count_displays_in(&self, text: &str) -> usize {
        self.teams
            .iter()
            .filter(|team| text.contains(team.as_str()))
            .count()
    }
}

/// Lowercase, strip non-alphanumerics to spaces, collapse whitespace, and
/// expand the standalone "la" token.
fn clean(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    STANDALONE_LA
        .replace_all(&collapsed, "los angeles")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_folds_case_punctuation_and_whitespace() {
        let registry = TeamRegistry::nba();
        let expected = registry.normalize("Los Angeles Clippers");
        assert_eq!(registry.normalize("LA Clippers"), expected);
        assert_eq!(registry.normalize("la   clippers"), expected);
        assert_eq!(registry.normalize("LA. Clippers!"), expected);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let registry = TeamRegistry::nba();
        for raw in ["LA Clippers", "OKC Thunder", "76ers", "Phoenix Suns", "not a team"] {
            let once = registry.normalize(raw);
            assert_eq!(registry.normalize(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_aliases_resolve_to_canonical_display() {
        let registry = TeamRegistry::nba();
        assert_eq!(registry.canonicalize("OKC Thunder"), "Oklahoma City Thunder");
        assert_eq!(registry.canonicalize("76ers"), "Philadelphia 76ers");
        assert_eq!(registry.canonicalize("NY Knicks"), "New York Knicks");
        assert_eq!(registry.canonicalize("San Antonio"), "San Antonio Spurs");
    }

    #[test]
    fn test_all_spellings_of_one_team_agree() {
        let registry = TeamRegistry::nba();
        let spellings = ["LA Clippers", "Los Angeles Clippers", "la   clippers"];
        let displays: Vec<String> = spellings.iter().map(|s| registry.canonicalize(s)).collect();
        assert!(displays.iter().all(|d| d == "Los Angeles Clippers"));
    }

    #[test]
    fn test_canonicalize_is_a_fixed_point() {
        let registry = TeamRegistry::nba();
        for raw in ["LA Lakers", "Portland Blazers", "  Boston Celtics ", "Springfield Tigers"] {
            let once = registry.canonicalize(raw);
            assert_eq!(registry.canonicalize(&once), once);
        }
    }

    #[test]
    fn test_unknown_name_passes_through_trimmed() {
        let registry = TeamRegistry::nba();
        assert_eq!(registry.canonicalize("  Springfield Tigers "), "Springfield Tigers");
        assert!(!registry.is_known("Springfield Tigers"));
    }

    #[test]
    fn test_resolve_distinguishes_known_from_unknown() {
        let registry = TeamRegistry::nba();
        assert_eq!(
            registry.resolve("gs warriors"),
            Resolution::Resolved("Golden State Warriors")
        );
        assert_eq!(
            registry.resolve(" Springfield Tigers "),
            Resolution::Unresolved("Springfield Tigers".to_string())
        );
    }

    #[test]
    fn test_first_display_in_scans_roster_order() {
        let registry = TeamRegistry::nba();
        let text = "The Denver Nuggets beat the Utah Jazz on Tuesday";
        assert_eq!(registry.first_display_in(text), Some("Denver Nuggets"));
        assert_eq!(registry.first_display_in("no teams here"), None);
    }

    #[test]
    fn test_count_displays_in() {
        let registry = TeamRegistry::nba();
        let text = "Boston Celtics, Denver Nuggets and the Miami Heat all won.";
        assert_eq!(registry.count_displays_in(text), 3);
    }
}
