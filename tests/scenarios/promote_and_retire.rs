//! A build is cloned under a release version, promoted, and the old
//! candidate is retired.

use crate::common::*;

#[test]
fn clone_promote_then_remove_candidate() {
    let env = TestEnv::initialized();
    let container = env.write_file("container.json", CONTAINER_JSON);
    env.deploy(
        "org.acme.model-0.9.0",
        &["--container", container.to_str().unwrap()],
    );

    let clone = env.run(&[
        "deploy",
        "org.acme.model-1.0.0",
        "--clone-from",
        "org.acme.model-0.9.0",
        "--container",
        container.to_str().unwrap(),
        "-m",
        "release candidate accepted",
    ]);
    assert!(clone.success, "{}", clone.combined_output());

    let promote = env.run(&[
        "update",
        "org.acme.model-1.0.0",
        "--production-ready",
        "true",
        "-m",
        "promoted to production",
    ]);
    assert!(promote.success, "{}", promote.combined_output());

    let production = env.run(&["list", "--production-ready"]);
    assert!(production.stdout.contains("org.acme.model-1.0.0"));
    assert!(!production.stdout.contains("org.acme.model-0.9.0"));

    let retire = env.run(&["remove", "org.acme.model-0.9.0"]);
    assert!(retire.success, "{}", retire.combined_output());

    // The release still resolves to the shared package.
    let get = env.run(&["get", "org.acme.model-1.0.0"]);
    assert!(get.stdout.contains(&model_location("0.9.0")), "{}", get.stdout);
    assert!(get.stdout.contains(CONTAINER_JSON));
    assert!(get.stdout.contains("promoted to production"));
    assert!(env.run(&["check", "--download"]).success);
}
