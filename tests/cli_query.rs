mod common;

use common::*;
use modelrepo::domain::ports::RowStore;
use modelrepo::infrastructure::FileRowStore;
use modelrepo::{RecordField, RowKey, SemanticVersion};

#[test]
fn get_shows_the_default_projection() {
    let env = TestEnv::initialized();
    env.deploy("org.acme.model-1.0.0", &["--message", "first"]);

    let result = env.run(&["get", "org.acme.model-1.0.0"]);
    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.starts_with("org.acme.model-1.0.0\n"), "{}", result.stdout);
    assert!(result.stdout.contains(&model_location("1.0.0")));
    assert!(result.stdout.contains("production_ready: false"));
    assert!(result.stdout.contains("message:          first"));
    assert!(!result.stdout.contains("uploaded"));
}

#[test]
fn get_limits_output_to_requested_fields() {
    let env = TestEnv::initialized();
    env.deploy("org.acme.model-1.0.0", &["--message", "first"]);

    let result = env.run(&["get", "org.acme.model-1.0.0", "--fields", "location"]);
    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("location:"));
    assert!(!result.stdout.contains("message:"));
    assert!(!result.stdout.contains("production_ready:"));
}

#[test]
fn get_of_unknown_model_cannot_be_extracted() {
    let env = TestEnv::initialized();
    let result = env.run(&["get", "org.acme.model-1.0.0"]);

    assert!(!result.success);
    assert!(result.stderr.contains("requested model could not be extracted"));
}

#[test]
fn get_requires_a_version() {
    let env = TestEnv::initialized();
    let result = env.run(&["get", "org.acme.model"]);

    assert!(!result.success);
    assert!(result.stderr.contains("must specify a version"), "{}", result.stderr);
}

#[test]
fn unknown_field_is_rejected() {
    let env = TestEnv::initialized();
    let result = env.run(&["list", "--fields", "weights"]);

    assert!(!result.success);
    assert!(result.stderr.contains("unknown field 'weights'"), "{}", result.stderr);
}

#[test]
fn list_is_sorted_and_filters_on_readiness() {
    let env = TestEnv::initialized();
    env.deploy("org.acme.model-0.0.2", &[]);
    env.deploy("org.acme.model-0.0.1", &["--production-ready"]);
    env.deploy("org.acme.other-0.0.1", &[]);

    let all = env.run(&["list"]);
    assert!(all.success, "{}", all.combined_output());
    let headers: Vec<&str> = all
        .stdout
        .lines()
        .filter(|line| !line.starts_with(' ') && !line.is_empty())
        .collect();
    assert_eq!(
        headers,
        vec![
            "org.acme.model-0.0.1",
            "org.acme.model-0.0.2",
            "org.acme.other-0.0.1"
        ]
    );

    let ready = env.run(&["list", "--production-ready"]);
    assert!(ready.success, "{}", ready.combined_output());
    assert!(ready.stdout.contains("org.acme.model-0.0.1"));
    assert!(!ready.stdout.contains("org.acme.model-0.0.2"));
    assert!(!ready.stdout.contains("org.acme.other"));
}

#[test]
fn list_on_empty_repository() {
    let env = TestEnv::initialized();
    let result = env.run(&["list"]);
    assert!(result.success);
    assert_eq!(result.stdout.trim(), "No models found.");
}

#[test]
fn reserved_rows_are_not_listed() {
    let env = TestEnv::initialized();
    env.deploy("org.acme.model-1.0.0", &[]);

    // Simulate a deploy that reserved 1.0.1 and has not committed yet.
    let store = FileRowStore::new(env.repo_root());
    store
        .put(
            &RowKey::new("org.acme.model", SemanticVersion::new(1, 0, 1)),
            RecordField::Uploaded,
            false.into(),
        )
        .unwrap();

    let list = env.run(&["list"]);
    assert!(list.success, "{}", list.combined_output());
    assert!(list.stdout.contains("org.acme.model-1.0.0"));
    assert!(!list.stdout.contains("org.acme.model-1.0.1"));

    let get = env.run(&["get", "org.acme.model-1.0.1"]);
    assert!(!get.success);

    // The reservation still counts for auto-versioning.
    let next = env.deploy("org.acme.model", &[]);
    assert!(next.stdout.contains("org.acme.model-1.0.2"), "{}", next.stdout);
}

#[test]
fn max_versions_controls_message_history() {
    let env = TestEnv::initialized();
    env.deploy("org.acme.model-1.0.0", &["--message", "first"]);
    let update = env.run(&[
        "update",
        "org.acme.model-1.0.0",
        "--production-ready",
        "true",
        "--message",
        "promoted",
    ]);
    assert!(update.success, "{}", update.combined_output());

    let latest = env.run(&["list", "--fields", "message"]);
    assert!(latest.stdout.contains("promoted"));
    assert!(!latest.stdout.contains("first"));

    let history = env.run(&["list", "--fields", "message", "--max-versions", "5"]);
    let promoted = history.stdout.find("promoted").unwrap();
    let first = history.stdout.find("first").unwrap();
    assert!(promoted < first, "newest first: {}", history.stdout);

    let zero = env.run(&["list", "--max-versions", "0"]);
    assert!(!zero.success);
    assert!(zero.stderr.contains("max versions must be at least 1"));
}
