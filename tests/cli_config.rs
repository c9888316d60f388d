mod common;

use common::*;

#[test]
fn project_config_sets_repository_path_and_deploy_defaults() {
    let env = TestEnv::new();
    env.write_file(
        "modelrepo.toml",
        r#"
[repository]
path = "registry"
base_storage = "blobs"

[deploy]
production_ready = true
message = "from config"
"#,
    );

    let init = env.run(&["init"]);
    assert!(init.success, "{}", init.combined_output());
    assert!(env.path("registry/repo.toml").is_file());

    env.deploy("org.acme.model-1.0.0", &[]);
    assert!(env
        .path("registry/blobs")
        .join(model_location("1.0.0"))
        .is_file());

    let get = env.run(&["get", "org.acme.model-1.0.0"]);
    assert!(get.stdout.contains("production_ready: true"), "{}", get.stdout);
    assert!(get.stdout.contains("from config"));

    // Flags win over config defaults.
    env.deploy(
        "org.acme.model-1.0.1",
        &["--message", "from flag", "--production-ready=false"],
    );
    let get = env.run(&["get", "org.acme.model-1.0.1"]);
    assert!(get.stdout.contains("production_ready: false"), "{}", get.stdout);
    assert!(get.stdout.contains("from flag"));
}

#[test]
fn user_config_is_used_without_a_project_file() {
    let env = TestEnv::new();
    let user_config = env.config_home.path().join("modelrepo/config.toml");
    std::fs::create_dir_all(user_config.parent().unwrap()).unwrap();
    std::fs::write(&user_config, "[repository]\npath = \"user_repo\"\n").unwrap();

    let init = env.run(&["init"]);
    assert!(init.success, "{}", init.combined_output());
    assert!(env.path("user_repo/repo.toml").is_file());
}

#[test]
fn unknown_keys_warn_with_a_suggestion() {
    let env = TestEnv::new();
    env.write_file("modelrepo.toml", "[deploy]\nproductin_ready = true\n");

    let result = env.run(&["init"]);
    assert!(result.success, "{}", result.combined_output());
    assert!(
        result.stderr.contains("unknown config key 'productin_ready'"),
        "{}",
        result.stderr
    );
    assert!(result.stderr.contains("did you mean 'production_ready'"));
    assert!(result.stderr.contains("modelrepo.toml:2"));
}

#[test]
fn explicit_config_file_and_invalid_toml() {
    let env = TestEnv::new();
    let config = env.write_file("custom.toml", "[repository]\npath = \"custom_repo\"\n");

    let init = env.run(&["--config", config.to_str().unwrap(), "init"]);
    assert!(init.success, "{}", init.combined_output());
    assert!(env.path("custom_repo/repo.toml").is_file());

    let broken = env.write_file("broken.toml", "[repository\n");
    let result = env.run(&["--config", broken.to_str().unwrap(), "init"]);
    assert!(!result.success);
    assert!(result.stderr.contains("invalid config"), "{}", result.stderr);
}

#[test]
fn env_overrides_config_file() {
    let env = TestEnv::new();
    env.write_file("modelrepo.toml", "[repository]\npath = \"from_file\"\n");

    let init = env.run_with_env(&["init"], &[("MODELREPO_PATH", "from_env")]);
    assert!(init.success, "{}", init.combined_output());
    assert!(env.path("from_env/repo.toml").is_file());
    assert!(!env.path("from_file").exists());
}

#[test]
fn verbose_flag_raises_log_level() {
    let env = TestEnv::initialized();

    let quiet = env.deploy("org.acme.model-1.0.0", &[]);
    assert!(!quiet.stderr.contains("deployed"), "{}", quiet.stderr);

    let loud = env.deploy("org.acme.model-1.0.1", &["-v"]);
    assert!(loud.stderr.contains("deployed"), "{}", loud.stderr);
    assert!(loud.stderr.contains("org.acme.model-1.0.1"));
}
