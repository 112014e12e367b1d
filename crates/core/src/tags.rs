//! Hashtag extraction for note content.
//!
//! A tag is `#` followed by one or more word characters. Tags are
//! case-folded to lowercase and deduplicated, keeping the order of first
//! occurrence. Both store implementations derive tags through this module so
//! their listings agree for the same set of notes.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

/// Regex pattern matching `#word` markers in note content.
pub const TAG_PATTERN: &str = r"#(\w+)";

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TAG_PATTERN).expect("valid regex"));

/// Extract the distinct, lowercased tag names from `content`.
///
/// # Examples
///
/// ```
/// use notebook_core::tags::extract_tags;
/// assert_eq!(extract_tags("hello #foo #Foo #bar"), vec!["foo", "bar"]);
/// assert!(extract_tags("no tags here").is_empty());
/// ```
pub fn extract_tags(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    TAG_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Count tag usage across a set of note contents.
///
/// Each content string contributes at most one to a tag's count. The result
/// is ordered by count descending, then name ascending.
pub fn count_tags<'a, I>(contents: I) -> Vec<(String, i64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<String, i64> = BTreeMap::new();
    for content in contents {
        for name in extract_tags(content) {
            *counts.entry(name).or_insert(0) += 1;
        }
    }

    let mut counted: Vec<(String, i64)> = counts.into_iter().collect();
    // BTreeMap already yields names ascending; a stable sort on count keeps that.
    counted.sort_by(|a, b| b.1.cmp(&a.1));
    counted
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
