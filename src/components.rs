//! Built-in component rule sets.
//!
//! Rule sets are data, not code paths: adding a team means adding an entry
//! here. Matchers scale linearly with the number of teams; the evaluation
//! algorithm lives in [`crate::config`].

use crate::config::{Component, Matcher};
use crate::error::Result;
use crate::registry::ComponentRegistry;
use std::collections::HashMap;

/// All built-in rule sets, in registration order.
#[must_use]
pub fn builtin_components() -> Vec<Component> {
    vec![apiserver_auth(), etcd(), machine_providers(), networking()]
}

/// Registry over the built-in rule sets.
pub fn builtin_registry() -> Result<ComponentRegistry> {
    ComponentRegistry::from_components(builtin_components())
}

fn apiserver_auth() -> Component {
    Component {
        name: "apiserver-auth".to_string(),
        default_jira_component: "apiserver-auth".to_string(),
        jira_project: "CIBUGS".to_string(),
        namespaces: ["authentication", "authentication-operator"]
            .into_iter()
            .map(str::to_string)
            .collect(),
        matchers: vec![
            Matcher {
                include_all: vec!["[bz-apiserver-auth]".to_string()],
                ..Matcher::default()
            },
            // QE cases carry either ":Authentication " (cucumber-style) or
            // ":Authentication:" (go-style) in the junit name.
            Matcher {
                include_any: vec![
                    ":APIServer ".to_string(),
                    ":Authentication ".to_string(),
                    ":Authentication:".to_string(),
                    "upgrade should succeed: authentication".to_string(),
                ],
                priority: 3,
                ..Matcher::default()
            },
        ],
        test_renames: HashMap::from([(
            "[apiserver-auth][invariant] authentication pods remain ready".to_string(),
            "[bz-apiserver-auth][invariant] authentication pods remain ready".to_string(),
        )]),
        ..Component::default()
    }
}

fn etcd() -> Component {
    Component {
        name: "etcd".to_string(),
        default_jira_component: "etcd".to_string(),
        jira_project: "CIBUGS".to_string(),
        variants: vec!["Procedure:etcd-scaling".to_string()],
        matchers: vec![Matcher {
            include_any: vec!["[sig-etcd]".to_string(), "etcd leader changes".to_string()],
            capabilities: vec!["etcd".to_string()],
            ..Matcher::default()
        }],
        ..Component::default()
    }
}

fn machine_providers() -> Component {
    Component {
        name: "machine-providers".to_string(),
        default_jira_component: "machine-providers".to_string(),
        jira_project: "CIBUGS".to_string(),
        matchers: vec![
            Matcher {
                include_any: vec![
                    "Cluster_Infrastructure MAPI".to_string(),
                    "upgrade should succeed: machine-api".to_string(),
                ],
                priority: 1,
                ..Matcher::default()
            },
            Matcher {
                suite: Some("Alerting for machine-api".to_string()),
                ..Matcher::default()
            },
            Matcher {
                suite: Some("Machine features testing".to_string()),
                ..Matcher::default()
            },
        ],
        ..Component::default()
    }
}

fn networking() -> Component {
    Component {
        name: "networking".to_string(),
        default_jira_component: "networking".to_string(),
        jira_project: "CIBUGS".to_string(),
        matchers: vec![
            Matcher {
                include_all: vec!["[sig-network]".to_string(), "[Feature:Router]".to_string()],
                priority: 2,
                jira_component: Some("router".to_string()),
                ..Matcher::default()
            },
            Matcher {
                include_all: vec!["[sig-network]".to_string()],
                ..Matcher::default()
            },
        ],
        ..Component::default()
    }
}
