//! Cross-component ownership resolution.

use crate::capabilities::derive_capabilities;
use crate::config::{Component, Matcher};
use crate::registry::ComponentRegistry;
use crate::types::{
    TEST_OWNERSHIP_API_VERSION, TEST_OWNERSHIP_KIND, TestInfo, TestOwnership, UNKNOWN_COMPONENT,
};
use chrono::Utc;
use rayon::prelude::*;
use std::collections::BTreeSet;
use tracing::warn;

/// Resolve ownership for a single test against the registered components.
///
/// Every component's matchers are evaluated; the component whose winning
/// matcher has the strictly highest priority owns the test. An equal-priority
/// tie across components means two teams contest the same test: that is a
/// configuration error, logged with full context, and the first registered
/// component wins deterministically. With no firing matcher anywhere the
/// record carries the [`UNKNOWN_COMPONENT`] sentinel.
///
/// Exactly one record is produced per call; resolution itself never fails.
#[must_use]
pub fn resolve(test: &TestInfo, registry: &ComponentRegistry) -> TestOwnership {
    let mut winner: Option<(&Component, &Matcher)> = None;
    let mut contenders: Vec<String> = Vec::new();

    for component in registry.components() {
        let Some(matcher) = component.find_match(test) else {
            continue;
        };
        match winner {
            None => winner = Some((component, matcher)),
            Some((_, held)) if matcher.priority > held.priority => {
                winner = Some((component, matcher));
                contenders.clear();
            }
            Some((held_component, held)) if matcher.priority == held.priority => {
                if contenders.is_empty() {
                    contenders.push(held_component.name.clone());
                }
                contenders.push(component.name.clone());
            }
            Some(_) => {}
        }
    }

    if contenders.len() > 1 {
        warn!(
            test = %test.name,
            suite = %test.suite,
            components = ?contenders,
            "multiple components claim this test at equal priority; keeping the first registered"
        );
    }

    winner.map_or_else(
        || unowned_record(test),
        |(component, matcher)| owned_record(test, component, matcher),
    )
}

/// Resolve a whole batch. Resolution is pure per test, so the batch is
/// embarrassingly parallel; output order follows input order.
#[must_use]
pub fn resolve_all(tests: &[TestInfo], registry: &ComponentRegistry) -> Vec<TestOwnership> {
    tests.par_iter().map(|test| resolve(test, registry)).collect()
}

fn owned_record(test: &TestInfo, component: &Component, matcher: &Matcher) -> TestOwnership {
    let jira_component = matcher
        .jira_component
        .clone()
        .unwrap_or_else(|| component.default_jira_component.clone());

    let mut capabilities: BTreeSet<String> = matcher.capabilities.iter().cloned().collect();
    capabilities.extend(derive_capabilities(test));

    TestOwnership {
        api_version: TEST_OWNERSHIP_API_VERSION.to_string(),
        kind: TEST_OWNERSHIP_KIND.to_string(),
        id: component.stable_id(test),
        name: test.name.clone(),
        suite: test.suite.clone(),
        product: String::new(),
        component: component.name.clone(),
        capabilities: capabilities.into_iter().collect(),
        jira_component,
        jira_project: component.jira_project.clone(),
        priority: matcher.priority,
        staff_approved_obsolete: false,
        created_at: Some(Utc::now()),
    }
}

fn unowned_record(test: &TestInfo) -> TestOwnership {
    let capabilities: BTreeSet<String> = derive_capabilities(test).into_iter().collect();

    TestOwnership {
        api_version: TEST_OWNERSHIP_API_VERSION.to_string(),
        kind: TEST_OWNERSHIP_KIND.to_string(),
        id: test.name.clone(),
        name: test.name.clone(),
        suite: test.suite.clone(),
        product: String::new(),
        component: UNKNOWN_COMPONENT.to_string(),
        capabilities: capabilities.into_iter().collect(),
        jira_component: String::new(),
        jira_project: String::new(),
        priority: 0,
        staff_approved_obsolete: false,
        created_at: Some(Utc::now()),
    }
}
