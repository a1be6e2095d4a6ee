use crate::harness::TestContext;
use predicates::prelude::*;

#[test]
fn init_creates_global_and_example_domain() {
    let ctx = TestContext::new();

    ctx.cli()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized configuration"));

    let global = std::fs::read_to_string(ctx.conf_path().join("config.toml")).unwrap();
    assert!(global.contains("[scheduler]"));
    assert!(global.contains("[schedules.nightly]"));

    let example = std::fs::read_to_string(ctx.conf_path().join("domains/example.toml")).unwrap();
    assert!(example.contains("enabled = false"));
}

#[test]
fn run_after_init_selects_nothing_and_succeeds() {
    let ctx = TestContext::new();
    ctx.init();

    ctx.cli()
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("No domains selected"));
}
