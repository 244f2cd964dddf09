use crate::constants::DERIVATIVE_PRODUCT_MARKERS;
use crate::types::SelectionScore;

/// How strongly a security name matches an entity name, strongest last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NameMatchTier {
    None,
    Substring,
    WordBoundary,
    StartsWith,
    Exact,
}

impl NameMatchTier {
    pub fn score(self) -> SelectionScore {
        match self {
            NameMatchTier::Exact => 10_000,
            NameMatchTier::StartsWith => 5_000,
            NameMatchTier::WordBoundary => 3_000,
            NameMatchTier::Substring => 1_000,
            NameMatchTier::None => 0,
        }
    }
}

/// Classifies how `name` matches `query`. Both are expected to be lowercased.
///
/// # Example
/// ```
/// use ticker_resolver::utils::{name_match_tier, NameMatchTier};
///
/// assert_eq!(name_match_tier("alibaba group", "alibaba"), NameMatchTier::StartsWith);
/// assert_eq!(name_match_tier("the alibaba group", "alibaba"), NameMatchTier::WordBoundary);
/// assert_eq!(name_match_tier("alibabagroup", "baba"), NameMatchTier::Substring);
/// ```
pub fn name_match_tier(name: &str, query: &str) -> NameMatchTier {
    if query.is_empty() {
        NameMatchTier::None
    } else if name == query {
        NameMatchTier::Exact
    } else if name.starts_with(query) {
        NameMatchTier::StartsWith
    } else if contains_whole_word(name, query) {
        NameMatchTier::WordBoundary
    } else if name.contains(query) {
        NameMatchTier::Substring
    } else {
        NameMatchTier::None
    }
}

/// Whether `needle` occurs in `haystack` delimited by non-word characters on both sides.
pub fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }

    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();

        !before.map_or(false, is_word_char) && !after.map_or(false, is_word_char)
    })
}

/// Whether `query` is one of the alphanumeric tokens of `name`.
pub fn is_whole_token(name: &str, query: &str) -> bool {
    !query.is_empty()
        && name
            .split(|c: char| !c.is_alphanumeric())
            .any(|token| token == query)
}

/// Whether a lowercased security name looks like an ETF, tracker or leveraged product.
pub fn has_derivative_marker(name: &str) -> bool {
    DERIVATIVE_PRODUCT_MARKERS
        .iter()
        .any(|marker| name.contains(marker))
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
