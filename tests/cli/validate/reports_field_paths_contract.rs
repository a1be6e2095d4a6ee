use crate::harness::TestContext;
use predicates::prelude::*;

#[test]
fn validate_passes_on_scaffold() {
    let ctx = TestContext::new();
    ctx.init();

    ctx.cli()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 domain(s) valid"));
}

#[test]
fn validate_names_the_offending_field() {
    let ctx = TestContext::new();
    ctx.write_sales_fixture();
    ctx.write_domain(
        "nightly",
        "[schedule]\nenabled = true\ninterval = \"weekly\"\nhour = 2\n",
    );

    ctx.cli()
        .arg("validate")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("nightly [schedule.day_of_week]"))
        .stdout(predicate::str::contains("1 domain(s) valid, 1 invalid"));
}

#[test]
fn invalid_global_config_is_fatal() {
    let ctx = TestContext::new();
    ctx.write_global("active_tags = \"daily\"\n");

    ctx.cli()
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid global config"));
}
