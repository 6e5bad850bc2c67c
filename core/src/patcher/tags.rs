//! # Tag Rendering
//!
//! Builds the new tag text for a region from its current and replacement metadata.

use crate::parser::models::{EditRegion, RegionKind};
use regex::Regex;
use std::sync::OnceLock;

/// A single `key:"value"` pair of a Go struct tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPair {
    /// Tag key, e.g. `json`.
    pub key: String,
    /// Quoted value including the quotes, e.g. `"name,omitempty"`.
    pub value: String,
}

impl std::fmt::Display for TagPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.key, self.value)
    }
}

/// Extracts every well-formed pair from tag text, in order.
///
/// Separators between pairs (spaces, commas) are irrelevant; anything that is
/// not a `key:"value"` pair is dropped.
pub fn tag_pairs(metadata: &str) -> Vec<TagPair> {
    static PAIR_RE: OnceLock<Regex> = OnceLock::new();
    let pair_re = PAIR_RE.get_or_init(|| Regex::new(r#"[\w_]+:"[^"]+""#).expect("Invalid regex"));

    pair_re
        .find_iter(metadata)
        .filter_map(|m| {
            let (key, value) = m.as_str().split_once(':')?;
            Some(TagPair {
                key: key.to_string(),
                value: value.to_string(),
            })
        })
        .collect()
}

/// Appends `additions` to `current`; an addition whose key already exists
/// overwrites that pair in place.
pub fn merge_pairs(mut current: Vec<TagPair>, additions: Vec<TagPair>) -> Vec<TagPair> {
    for pair in additions {
        match current.iter_mut().find(|p| p.key == pair.key) {
            Some(existing) => existing.value = pair.value,
            None => current.push(pair),
        }
    }
    current
}

/// Space-joins pairs into tag text.
pub fn format_pairs(pairs: &[TagPair]) -> String {
    pairs
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The tag text (without backticks) a region should end up with.
pub fn render_tag(region: &EditRegion) -> String {
    if region.replacement_metadata.is_empty() {
        return String::new();
    }

    match region.kind {
        RegionKind::SkipList => format_pairs(&merge_pairs(
            tag_pairs(&region.current_metadata),
            tag_pairs(&region.replacement_metadata),
        )),
        RegionKind::Direct | RegionKind::Oneof => region.replacement_metadata.clone(),
    }
}
