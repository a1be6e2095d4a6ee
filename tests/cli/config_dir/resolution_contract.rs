use crate::harness::TestContext;
use predicates::prelude::*;

#[test]
fn config_dir_flag_and_env_are_honored() {
    let ctx = TestContext::new();

    ctx.cli().args(["--config-dir", "settings", "init"]).assert().success();
    assert!(ctx.work_dir().join("settings/config.toml").is_file());

    ctx.cli()
        .env("DATAFLOW_CONFIG_DIR", "settings")
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 domain(s) valid"));

    // Without either, the default `conf/` is missing.
    ctx.cli()
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config directory not found: conf"));
}

#[test]
fn schedule_fails_fast_without_config() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["schedule", "--drain-timeout", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config directory not found"));
}
