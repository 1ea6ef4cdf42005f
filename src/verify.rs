//! Mapping regression verification.
//!
//! Compares a previously published ownership snapshot against a newly
//! generated one and records every test that would fall from a real owner
//! back to `Unknown`. Ownership reassignment between real owners is allowed;
//! only ownership loss is gated, because a silent fall to unattributed breaks
//! downstream attribution dashboards.

use crate::types::{TestOwnership, UNKNOWN_COMPONENT};
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

/// One test that lost its owner between snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Regression {
    pub name: String,
    pub suite: String,
    /// The owner the test had in the previous snapshot.
    pub previous_component: String,
}

/// Single pass, no persisted state: index the old snapshot by
/// `(name, suite)`, then scan the new snapshot for records that regressed to
/// `Unknown`. Tests absent from the old snapshot are new, not regressions.
/// The overall run fails iff the returned list is non-empty.
#[must_use]
pub fn verify(old: &[TestOwnership], new: &[TestOwnership]) -> Vec<Regression> {
    let mut previous: HashMap<(&str, &str), &str> = HashMap::with_capacity(old.len());
    for record in old {
        previous.insert(
            (record.name.as_str(), record.suite.as_str()),
            record.component.as_str(),
        );
    }

    let mut regressions = Vec::new();
    for record in new {
        if !record.is_unknown() {
            continue;
        }
        let Some(&previous_component) =
            previous.get(&(record.name.as_str(), record.suite.as_str()))
        else {
            continue;
        };
        if previous_component == UNKNOWN_COMPONENT {
            continue;
        }
        regressions.push(Regression {
            name: record.name.clone(),
            suite: record.suite.clone(),
            previous_component: previous_component.to_string(),
        });
    }

    regressions
}

/// Report every regression individually, then return whether the run passed.
/// The complete list is surfaced before any overall failure, so one run shows
/// everything that needs reassignment.
pub fn report(regressions: &[Regression]) -> bool {
    for regression in regressions {
        warn!(
            name = %regression.name,
            suite = %regression.suite,
            previous = %regression.previous_component,
            "test moved to {UNKNOWN_COMPONENT:?}"
        );
    }
    regressions.is_empty()
}
