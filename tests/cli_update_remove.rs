mod common;

use common::*;
use modelrepo::domain::ports::RowStore;
use modelrepo::infrastructure::FileRowStore;
use modelrepo::{RecordField, RowKey, SemanticVersion};

#[test]
fn update_flips_production_ready_repeatedly() {
    let env = TestEnv::initialized();
    env.deploy("org.acme.model-1.0.0", &[]);

    for ready in ["true", "false", "true"] {
        let result = env.run(&["update", "org.acme.model-1.0.0", "--production-ready", ready]);
        assert!(result.success, "{}", result.combined_output());
        assert!(result.stdout.contains(&format!("production_ready = {ready}")));

        let get = env.run(&["get", "org.acme.model-1.0.0", "--fields", "production_ready"]);
        assert!(get.stdout.contains(&format!("production_ready: {ready}")), "{}", get.stdout);
    }
}

#[test]
fn update_of_missing_model_does_not_exist() {
    let env = TestEnv::initialized();
    let result = env.run(&["update", "org.acme.model-1.0.0", "--production-ready", "true"]);

    assert!(!result.success);
    assert!(
        result.stderr.contains("Model org.acme.model-1.0.0 does not exist."),
        "{}",
        result.stderr
    );
    // Never creates a row.
    assert!(!env.run(&["get", "org.acme.model-1.0.0"]).success);
}

#[test]
fn update_of_reserved_model_does_not_exist() {
    let env = TestEnv::initialized();
    let store = FileRowStore::new(env.repo_root());
    let key = RowKey::new("org.acme.model", SemanticVersion::new(1, 0, 0));
    store.put(&key, RecordField::Uploaded, false.into()).unwrap();

    let result = env.run(&["update", "org.acme.model-1.0.0", "--production-ready", "true"]);
    assert!(!result.success);
    assert!(result.stderr.contains("does not exist."), "{}", result.stderr);

    let row = store
        .get(&key, &Default::default())
        .unwrap()
        .expect("reservation still present");
    assert!(!row.contains(RecordField::ProductionReady));
}

#[test]
fn remove_deletes_the_row_but_keeps_the_package() {
    let env = TestEnv::initialized();
    env.deploy("org.acme.model-1.0.0", &[]);

    let result = env.run(&["remove", "org.acme.model-1.0.0"]);
    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("Removed org.acme.model-1.0.0"));

    assert!(!env.run(&["get", "org.acme.model-1.0.0"]).success);
    assert!(env
        .repo_root()
        .join("artifacts")
        .join(model_location("1.0.0"))
        .is_file());

    let again = env.run(&["remove", "org.acme.model-1.0.0"]);
    assert!(!again.success);
    assert!(again.stderr.contains("does not exist."));
}

#[test]
fn remove_clears_an_abandoned_reservation() {
    let env = TestEnv::initialized();
    let store = FileRowStore::new(env.repo_root());
    let key = RowKey::new("org.acme.model", SemanticVersion::new(1, 0, 0));
    store.put(&key, RecordField::Uploaded, false.into()).unwrap();

    let refused = env.run(&["remove", "org.acme.model-1.0.0"]);
    assert!(!refused.success);
    assert!(refused.stderr.contains("--force"), "{}", refused.stderr);
    assert!(store.get(&key, &Default::default()).unwrap().is_some());

    let result = env.run(&["remove", "org.acme.model-1.0.0", "--force"]);
    assert!(result.success, "{}", result.combined_output());

    // The version can be deployed again.
    env.deploy("org.acme.model-1.0.0", &[]);
}
