//! Regression verification: scenario coverage plus file-backed snapshots.

use pretty_assertions::assert_eq;
use testmap::types::{TestOwnership, UNKNOWN_COMPONENT};
use testmap::{snapshot, verify};

fn record(name: &str, suite: &str, component: &str) -> TestOwnership {
    serde_json::from_value(serde_json::json!({
        "name": name,
        "suite": suite,
        "component": component,
        "jira_component": if component == UNKNOWN_COMPONENT { "" } else { component },
    }))
    .unwrap()
}

#[test]
fn owned_to_unknown_fails_with_one_regression() {
    let old = vec![record("t1", "s1", "auth")];
    let new = vec![record("t1", "s1", UNKNOWN_COMPONENT)];

    let regressions = verify::verify(&old, &new);
    assert_eq!(regressions.len(), 1);
    assert_eq!(regressions[0].name, "t1");
    assert_eq!(regressions[0].suite, "s1");
    assert_eq!(regressions[0].previous_component, "auth");
    assert!(!verify::report(&regressions));
}

#[test]
fn new_unknown_test_is_not_a_regression() {
    let old = vec![];
    let new = vec![record("t2", "s1", UNKNOWN_COMPONENT)];
    assert!(verify::verify(&old, &new).is_empty());
}

#[test]
fn verify_is_idempotent_on_identical_snapshots() {
    let snapshot = vec![
        record("t1", "s1", "auth"),
        record("t2", "s1", "etcd"),
        record("t3", "", UNKNOWN_COMPONENT),
    ];
    assert!(verify::verify(&snapshot, &snapshot).is_empty());
}

#[test]
fn single_flip_to_unknown_reports_exactly_one_regression() {
    let old = vec![
        record("t1", "s1", "auth"),
        record("t2", "s1", "etcd"),
        record("t3", "s2", "networking"),
    ];
    let mut new = old.clone();
    new[1].component = UNKNOWN_COMPONENT.to_string();

    let regressions = verify::verify(&old, &new);
    assert_eq!(regressions.len(), 1);
    assert_eq!(regressions[0].name, "t2");
    assert_eq!(regressions[0].previous_component, "etcd");
}

#[test]
fn reassignment_between_real_owners_passes() {
    let old = vec![record("t1", "s1", "auth")];
    let new = vec![record("t1", "s1", "etcd")];
    assert!(verify::verify(&old, &new).is_empty());
}

#[test]
fn snapshots_round_trip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("component_mapping.json");

    let records = vec![
        record("t1", "s1", "auth"),
        record("t2", "", UNKNOWN_COMPONENT),
    ];
    snapshot::save(&path, &records).unwrap();
    let loaded = snapshot::load(&path).unwrap();

    assert!(snapshot::sets_equal(&records, &loaded));
    assert_eq!(
        snapshot::normalized_hash(&records).unwrap(),
        snapshot::normalized_hash(&loaded).unwrap()
    );
}

#[test]
fn verification_works_across_saved_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let old_path = dir.path().join("published.json");
    let new_path = dir.path().join("generated.json");

    snapshot::save(&old_path, &[record("t1", "s1", "auth")]).unwrap();
    snapshot::save(&new_path, &[record("t1", "s1", UNKNOWN_COMPONENT)]).unwrap();

    let regressions = verify::verify(
        &snapshot::load(&old_path).unwrap(),
        &snapshot::load(&new_path).unwrap(),
    );
    assert_eq!(regressions.len(), 1);
}

#[test]
fn malformed_snapshot_is_a_fatal_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = snapshot::load(&path).unwrap_err();
    assert!(err.to_string().contains("malformed snapshot"));
}

#[test]
fn missing_snapshot_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = snapshot::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}
