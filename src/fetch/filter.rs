use regex::Regex;

use crate::error::{GitHubError, GitHubResult};
use crate::models::LabeledItem;

/// Per-item inclusion decision. Only items carrying exactly one applicable
/// label enter the output stream; everything else is dropped, never
/// defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inclusion {
    /// Exactly one label matched; the item is paired with it.
    Accepted(String),
    /// More labels exist than were fetched, so no conclusion can be drawn.
    LabelsTruncated,
    /// Zero or two-plus applicable labels found.
    NotExactlyOne(usize),
}

/// Apply the inclusion policy to one item.
pub fn evaluate<T, P>(item: &T, predicate: P) -> Inclusion
where
    T: LabeledItem,
    P: Fn(&str) -> bool,
{
    // An incomplete label set could hide other applicable labels.
    if item.labels_truncated() {
        return Inclusion::LabelsTruncated;
    }

    let matched: Vec<&str> = item
        .label_names()
        .into_iter()
        .filter(|name| predicate(name))
        .collect();

    match matched.as_slice() {
        [single] => Inclusion::Accepted((*single).to_string()),
        other => Inclusion::NotExactlyOne(other.len()),
    }
}

/// Caller-supplied label predicate forms.
#[derive(Debug, Clone)]
pub enum LabelMatcher {
    /// Case-insensitive prefix match.
    Prefix(String),
    /// Regular-expression match.
    Pattern(Regex),
}

impl LabelMatcher {
    pub fn prefix(prefix: &str) -> Self {
        LabelMatcher::Prefix(prefix.to_string())
    }

    pub fn pattern(pattern: &str) -> GitHubResult<Self> {
        let re = Regex::new(pattern)
            .map_err(|e| GitHubError::InvalidInput(format!("Invalid label pattern: {}", e)))?;
        Ok(LabelMatcher::Pattern(re))
    }

    pub fn matches(&self, label: &str) -> bool {
        match self {
            LabelMatcher::Prefix(prefix) => label
                .get(..prefix.len())
                .map_or(false, |head| head.eq_ignore_ascii_case(prefix)),
            LabelMatcher::Pattern(re) => re.is_match(label),
        }
    }
}
