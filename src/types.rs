//! Wire-level types: the test record consumed by resolution and the
//! ownership record it produces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const TEST_OWNERSHIP_API_VERSION: &str = "v1";
pub const TEST_OWNERSHIP_KIND: &str = "TestOwnership";

/// Sentinel owner for tests no rule set claims. A well-known constant, not a
/// registered component; registries reject rule sets using this name.
pub const UNKNOWN_COMPONENT: &str = "Unknown";

/// A test instance to classify, as materialized by the acquisition layer.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestInfo {
    /// Current display name; may include brackets/tags as free text.
    pub name: String,

    /// Junit-style suite name, possibly empty.
    #[serde(default)]
    pub suite: String,

    /// `key:value` job-variant pairs the test was observed under,
    /// e.g. `Platform:aws`. Set semantics; insertion order irrelevant.
    #[serde(default)]
    pub variants: BTreeSet<String>,
}

impl TestInfo {
    #[must_use]
    pub fn new(name: impl Into<String>, suite: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suite: suite.into(),
            variants: BTreeSet::new(),
        }
    }
}

/// Resolved ownership for one test.
///
/// Created once per resolution pass and never mutated; a later pass
/// supersedes the record rather than editing it. Field names follow the
/// published snapshot format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOwnership {
    /// Schema version, in case the snapshot format ever needs a breaking
    /// change. Filled in by the resolver.
    #[serde(rename = "apiVersion", default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_kind")]
    pub kind: String,

    /// Stable name for the test: the oldest known name, so records can be
    /// correlated even after the display name changes.
    #[serde(default)]
    pub id: String,

    /// Current display name.
    pub name: String,

    #[serde(default)]
    pub suite: String,

    /// Layer product name; generally empty.
    #[serde(default)]
    pub product: String,

    /// Principal owner, or [`UNKNOWN_COMPONENT`] when no matcher fired.
    pub component: String,

    /// Deduplicated, lexicographically sorted capability tags.
    #[serde(default)]
    pub capabilities: Vec<String>,

    #[serde(default)]
    pub jira_component: String,

    #[serde(default)]
    pub jira_project: String,

    /// Winning matcher's priority; 0 when unmatched.
    #[serde(default)]
    pub priority: i32,

    /// Staff sign-off that this test may disappear from the corpus without
    /// the readiness dashboard flagging it. Round-tripped verbatim.
    #[serde(default)]
    pub staff_approved_obsolete: bool,

    /// When this record was produced. Volatile; excluded from snapshot
    /// equality and content hashing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TestOwnership {
    /// Whether this record carries the unowned sentinel.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.component == UNKNOWN_COMPONENT
    }
}

fn default_api_version() -> String {
    TEST_OWNERSHIP_API_VERSION.to_string()
}

fn default_kind() -> String {
    TEST_OWNERSHIP_KIND.to_string()
}
