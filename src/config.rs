//! Declarative component rule sets and matcher evaluation.
//!
//! A rule set is plain data: the evaluation algorithm is uniform across all
//! components and only the matcher tables, rename history, and JIRA targets
//! vary. Nothing here is polymorphic; a component that needs new matching
//! behavior gets a new [`Matcher`] field, not a subclass.

use crate::error::{Error, Result};
use crate::types::{TestInfo, UNKNOWN_COMPONENT};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// One rule clause within a component's rule set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Matcher {
    /// Substrings that must all appear in the test identity string.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_all: Vec<String>,

    /// Substrings of which at least one must appear.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_any: Vec<String>,

    /// Exact-match constraint on the junit suite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite: Option<String>,

    /// Higher wins when components contest the same test. Default 0.
    #[serde(default)]
    pub priority: i32,

    /// Overrides the component's default JIRA component for this match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira_component: Option<String>,

    /// Capabilities attached unconditionally when this matcher fires.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<String>,
}

impl Matcher {
    /// A matcher with no constraints at all would claim every test.
    pub fn validate(&self) -> Result<()> {
        if self.include_all.is_empty() && self.include_any.is_empty() && self.suite.is_none() {
            return Err(Error::validation(
                "matcher has no include_all, include_any, or suite constraint",
            ));
        }
        Ok(())
    }

    /// Evaluate this matcher against a test.
    ///
    /// Substring checks are case-sensitive literal containment; the suite
    /// constraint is exact equality. All set constraints must hold; empty
    /// substring sets are vacuously true. Pure, so safe to call concurrently.
    #[must_use]
    pub fn matches(&self, test: &TestInfo) -> bool {
        let identity = test_identity(test);

        if !self.include_all.iter().all(|s| contains(&identity, s)) {
            return false;
        }

        if !self.include_any.is_empty() && !self.include_any.iter().any(|s| contains(&identity, s))
        {
            return false;
        }

        if let Some(suite) = &self.suite {
            if *suite != test.suite {
                return false;
            }
        }

        true
    }
}

/// The identity string substring checks run against: the test name, plus the
/// suite when one is present. Suites carry ownership signal for harnesses
/// that encode the owning team in the junit suite rather than the test name.
fn test_identity(test: &TestInfo) -> String {
    if test.suite.is_empty() {
        test.name.clone()
    } else {
        format!("{} {}", test.name, test.suite)
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    memchr::memmem::find(haystack.as_bytes(), needle.as_bytes()).is_some()
}

/// A per-team declarative rule set.
///
/// Immutable after registration; concurrent resolution reads rule sets
/// without synchronization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Component {
    /// Owning-component identifier, globally unique across the registry.
    pub name: String,

    /// Fallback JIRA component when a matcher doesn't override it.
    #[serde(default)]
    pub default_jira_component: String,

    #[serde(default)]
    pub jira_project: String,

    /// Namespaces owned by this component. Informational; never matched on.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub namespaces: BTreeSet<String>,

    /// Job-variant names this component claims. Informational.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<String>,

    /// All matchers are evaluated; declaration order only breaks priority
    /// ties.
    #[serde(default)]
    pub matchers: Vec<Matcher>,

    /// Current test name -> oldest known name. Used only for identity
    /// stabilization, never for matching.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub test_renames: HashMap<String, String>,
}

impl Component {
    /// Reject rule sets that could not resolve deterministically.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::validation("component name must not be empty"));
        }
        if self.name == UNKNOWN_COMPONENT {
            return Err(Error::validation(format!(
                "component name {UNKNOWN_COMPONENT:?} is reserved for unowned tests"
            )));
        }
        for (idx, matcher) in self.matchers.iter().enumerate() {
            matcher.validate().map_err(|err| {
                Error::validation(format!("component {:?}, matcher #{idx}: {err}", self.name))
            })?;
        }
        Ok(())
    }

    /// Select this component's firing matcher for a test, if any: the highest
    /// priority wins, and among equal priorities the earliest declared wins,
    /// keeping resolution independent of iteration order.
    #[must_use]
    pub fn find_match(&self, test: &TestInfo) -> Option<&Matcher> {
        let mut best: Option<&Matcher> = None;
        for matcher in &self.matchers {
            if !matcher.matches(test) {
                continue;
            }
            match best {
                Some(held) if held.priority >= matcher.priority => {}
                _ => best = Some(matcher),
            }
        }
        best
    }

    /// Stable historical identifier for a test under this component's rename
    /// history. Rename tables are component-scoped, so this is only
    /// meaningful for the component that ultimately owns the test.
    #[must_use]
    pub fn stable_id(&self, test: &TestInfo) -> String {
        self.test_renames
            .get(&test.name)
            .cloned()
            .unwrap_or_else(|| test.name.clone())
    }

    /// Every JIRA component this rule set can emit: the default plus any
    /// per-matcher overrides.
    #[must_use]
    pub fn jira_components(&self) -> Vec<String> {
        let mut components = vec![self.default_jira_component.clone()];
        for matcher in &self.matchers {
            if let Some(jira) = &matcher.jira_component {
                if !components.contains(jira) {
                    components.push(jira.clone());
                }
            }
        }
        components
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test(name: &str, suite: &str) -> TestInfo {
        TestInfo::new(name, suite)
    }

    #[test]
    fn include_all_and_any_combine() {
        let matcher = Matcher {
            include_all: vec!["foo".to_string()],
            include_any: vec!["bar".to_string(), "baz".to_string()],
            ..Matcher::default()
        };
        assert!(matcher.matches(&test("foobar", "")));
        assert!(!matcher.matches(&test("foobam", "")));
    }

    #[test]
    fn include_all_requires_every_entry() {
        let matcher = Matcher {
            include_all: vec!["alpha".to_string(), "omega".to_string()],
            ..Matcher::default()
        };
        assert!(matcher.matches(&test("alpha to omega", "")));
        assert!(!matcher.matches(&test("alpha only", "")));
    }

    #[test]
    fn suite_constraint_is_exact_and_case_sensitive() {
        let matcher = Matcher {
            suite: Some("Machine features testing".to_string()),
            ..Matcher::default()
        };
        assert!(matcher.matches(&test("anything", "Machine features testing")));
        assert!(!matcher.matches(&test("anything", "machine features testing")));
        assert!(!matcher.matches(&test("anything", "")));
    }

    #[test]
    fn suite_participates_in_identity_string() {
        let matcher = Matcher {
            include_all: vec!["install suite".to_string()],
            ..Matcher::default()
        };
        assert!(matcher.matches(&test("some test", "install suite")));
        assert!(!matcher.matches(&test("some test", "other")));
    }

    #[test]
    fn substring_checks_are_case_sensitive() {
        let matcher = Matcher {
            include_any: vec![":Authentication:".to_string()],
            ..Matcher::default()
        };
        assert!(matcher.matches(&test("OCP-123:Authentication:login works", "")));
        assert!(!matcher.matches(&test("ocp-123:authentication:login works", "")));
    }

    #[test]
    fn unconstrained_matcher_is_rejected() {
        assert!(Matcher::default().validate().is_err());
        let suite_only = Matcher {
            suite: Some("s".to_string()),
            ..Matcher::default()
        };
        assert!(suite_only.validate().is_ok());
    }

    #[test]
    fn evaluation_is_deterministic() {
        let matcher = Matcher {
            include_any: vec!["etcd".to_string()],
            ..Matcher::default()
        };
        let record = test("etcd leader changes", "parallel");
        assert_eq!(matcher.matches(&record), matcher.matches(&record));
    }

    fn component_with(matchers: Vec<Matcher>) -> Component {
        Component {
            name: "team".to_string(),
            default_jira_component: "team".to_string(),
            matchers,
            ..Component::default()
        }
    }

    #[test]
    fn find_match_prefers_highest_priority() {
        let component = component_with(vec![
            Matcher {
                include_any: vec!["t".to_string()],
                priority: 0,
                jira_component: Some("low".to_string()),
                ..Matcher::default()
            },
            Matcher {
                include_any: vec!["t".to_string()],
                priority: 5,
                jira_component: Some("high".to_string()),
                ..Matcher::default()
            },
        ]);
        let found = component.find_match(&test("t", "")).unwrap();
        assert_eq!(found.jira_component.as_deref(), Some("high"));
    }

    #[test]
    fn find_match_breaks_ties_by_declaration_order() {
        let component = component_with(vec![
            Matcher {
                include_any: vec!["t".to_string()],
                jira_component: Some("first".to_string()),
                ..Matcher::default()
            },
            Matcher {
                include_any: vec!["t".to_string()],
                jira_component: Some("second".to_string()),
                ..Matcher::default()
            },
        ]);
        let found = component.find_match(&test("t", "")).unwrap();
        assert_eq!(found.jira_component.as_deref(), Some("first"));
    }

    #[test]
    fn find_match_returns_none_when_nothing_fires() {
        let component = component_with(vec![Matcher {
            include_all: vec!["nope".to_string()],
            ..Matcher::default()
        }]);
        assert!(component.find_match(&test("t", "")).is_none());
    }

    #[test]
    fn stable_id_uses_rename_table() {
        let mut component = component_with(vec![]);
        component.test_renames.insert(
            "new name".to_string(),
            "oldest name".to_string(),
        );
        assert_eq!(component.stable_id(&test("new name", "")), "oldest name");
        assert_eq!(component.stable_id(&test("other", "")), "other");
    }

    #[test]
    fn component_validation_rejects_reserved_and_empty_names() {
        let mut component = component_with(vec![]);
        component.name = String::new();
        assert!(component.validate().is_err());
        component.name = UNKNOWN_COMPONENT.to_string();
        assert!(component.validate().is_err());
    }

    #[test]
    fn component_validation_names_the_offending_matcher() {
        let mut component = component_with(vec![Matcher::default()]);
        component.name = "storage".to_string();
        let err = component.validate().unwrap_err().to_string();
        assert!(err.contains("storage"));
        assert!(err.contains("#0"));
    }

    #[test]
    fn jira_components_lists_default_and_overrides_once() {
        let component = component_with(vec![
            Matcher {
                include_any: vec!["a".to_string()],
                jira_component: Some("router".to_string()),
                ..Matcher::default()
            },
            Matcher {
                include_any: vec!["b".to_string()],
                jira_component: Some("router".to_string()),
                ..Matcher::default()
            },
            Matcher {
                include_any: vec!["c".to_string()],
                ..Matcher::default()
            },
        ]);
        assert_eq!(component.jira_components(), vec!["team", "router"]);
    }
}
