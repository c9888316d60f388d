//! A team sets up a repository and ships its first two model builds.

use crate::common::*;

#[test]
fn auto_versioned_builds_land_at_canonical_locations() {
    let env = TestEnv::new();
    assert!(env.run(&["init"]).success);

    let first = env.deploy(MODEL_NAME, &["-m", "baseline"]);
    assert!(first.stdout.contains(&model_location("0.0.1")), "{}", first.stdout);

    let second = env.deploy(MODEL_NAME, &["-m", "more data"]);
    assert!(second.stdout.contains(&model_location("0.0.2")), "{}", second.stdout);

    let artifacts = env.repo_root().join("artifacts");
    for version in ["0.0.1", "0.0.2"] {
        let package = artifacts.join(model_location(version));
        assert!(package.is_file(), "missing {}", package.display());
        let digest = std::fs::read_to_string(format!("{}.sha256", package.display())).unwrap();
        assert!(digest.starts_with("sha256:"), "{digest}");
    }

    let list = env.run(&["list", "--fields", "location,message"]);
    assert!(list.success, "{}", list.combined_output());
    assert!(list.stdout.contains("baseline"));
    assert!(list.stdout.contains("more data"));

    assert!(env.run(&["check", "--download"]).success);
}
