//! Cross-component capability heuristics.
//!
//! Capabilities that apply to tests owned by many different components are
//! derived here from structural signals in the test name, so each one only
//! has to be defined once instead of repeated in every rule set. Matchers
//! still attach component-specific capabilities; the resolver merges both.

use crate::types::TestInfo;
use regex::Regex;
use std::sync::OnceLock;

static FEATURE_TAG_REGEX: OnceLock<Regex> = OnceLock::new();

fn feature_tag_regex() -> &'static Regex {
    FEATURE_TAG_REGEX
        .get_or_init(|| Regex::new(r"\[Feature:([^\]]+)\]").expect("feature tag regex"))
}

/// Derive capabilities from a test's name and observed variants.
///
/// Total function: it never fails, and unrecognized patterns simply
/// contribute nothing. Output may contain duplicates; the resolver
/// deduplicates when merging with matcher capabilities.
#[must_use]
pub fn derive_capabilities(test: &TestInfo) -> Vec<String> {
    let mut capabilities = Vec::new();

    for capture in feature_tag_regex().captures_iter(&test.name) {
        capabilities.push(capture[1].to_string());
    }

    if test.name.to_lowercase().contains("upgrade") {
        capabilities.push("Upgrade".to_string());
    }

    if test.name.contains("[Conformance]") {
        capabilities.push("Conformance".to_string());
    }

    capabilities
}
