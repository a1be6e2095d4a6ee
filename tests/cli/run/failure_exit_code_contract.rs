use crate::harness::TestContext;
use predicates::prelude::*;

#[test]
fn failing_domain_does_not_stop_others_and_exits_one() {
    let ctx = TestContext::new();
    ctx.write_sales_fixture();
    ctx.write_domain("forecast", "tags = [\"daily\"]\n");

    ctx.cli()
        .arg("run")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("DomainNotFound"))
        .stdout(predicate::str::contains("1 succeeded, 1 failed, 0 skipped"));

    assert!(ctx.work_dir().join("data/output/orders.json").exists());
}

#[test]
fn composition_failure_appears_in_the_table() {
    let ctx = TestContext::new();
    ctx.write_sales_fixture();
    ctx.write_domain("inventory", "inputs = [\"stock\"]\n");

    ctx.cli()
        .arg("run")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("ConfigComposition"))
        .stdout(predicate::str::contains("references unknown inputs: stock"));
}

#[test]
fn missing_config_dir_is_fatal() {
    let ctx = TestContext::new();

    ctx.cli()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config directory not found"));
}
