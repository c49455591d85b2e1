//! Fuzzy and substring ranking using nucleo-matcher.

use nucleo_matcher::Config;
use nucleo_matcher::Matcher;
use nucleo_matcher::Utf32Str;
use nucleo_matcher::pattern::AtomKind;
use nucleo_matcher::pattern::CaseMatching;
use nucleo_matcher::pattern::Normalization;
use nucleo_matcher::pattern::Pattern;
use serde::Deserialize;
use serde::Serialize;

/// How a query is matched against item text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Characters in order, gaps allowed (command palette).
    #[default]
    Fuzzy,
    /// Contiguous substring (search suggestions).
    Substring,
}

/// A ranked match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterMatch {
    /// Index of the matched item in the input list.
    pub index: usize,
    /// Match score (higher is better).
    pub score: u32,
}

/// Fuzzy-rank `items` against `query`.
///
/// Returns matches by score, highest first; equal scores keep input order.
/// An empty (or whitespace-only) query returns every item in input order
/// with score 0. Whitespace separates atoms that must all match.
///
/// # Example
///
/// ```
/// use mero_lib::palette::fuzzy_filter;
///
/// let items = vec!["apple".to_string(), "banana".to_string(), "apricot".to_string()];
/// let matches = fuzzy_filter("ap", &items);
/// assert_eq!(matches.len(), 2);
/// ```
pub fn fuzzy_filter<S: AsRef<str>>(query: &str, items: &[S]) -> Vec<FilterMatch> {
    rank(query, items, MatchMode::Fuzzy)
}

/// Substring-rank `items` against `query`, case-insensitively.
pub fn substring_filter<S: AsRef<str>>(query: &str, items: &[S]) -> Vec<FilterMatch> {
    rank(query, items, MatchMode::Substring)
}

/// Rank `items` against `query` with the given match mode.
pub fn rank<S: AsRef<str>>(query: &str, items: &[S], mode: MatchMode) -> Vec<FilterMatch> {
    if query.trim().is_empty() {
        return (0..items.len())
            .map(|index| FilterMatch { index, score: 0 })
            .collect();
    }

    let pattern = match mode {
        MatchMode::Fuzzy => Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart),
        MatchMode::Substring => Pattern::new(
            query,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Substring,
        ),
    };
    let mut matcher = Matcher::new(Config::DEFAULT);
    let mut buf = Vec::new();

    let mut matches: Vec<FilterMatch> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let haystack = Utf32Str::new(item.as_ref(), &mut buf);
            pattern
                .score(haystack, &mut matcher)
                .map(|score| FilterMatch { index, score })
        })
        .collect();

    // Stable, so equal scores keep input order.
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}
