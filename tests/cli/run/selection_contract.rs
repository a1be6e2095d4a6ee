use crate::harness::TestContext;
use predicates::prelude::*;

fn write_tagged_domains(ctx: &TestContext) {
    ctx.write_sales_fixture();
    ctx.write_domain("audit", "tags = [\"monthly\"]\npipeline = \"missing\"\n");
    ctx.write_domain("legacy", "enabled = false\npipeline = \"copy\"\n");
}

#[test]
fn tag_flag_replaces_configured_tags() {
    let ctx = TestContext::new();
    write_tagged_domains(&ctx);

    ctx.cli()
        .args(["run", "--tag", "daily"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 succeeded, 0 failed, 0 skipped"));
}

#[test]
fn requested_disabled_domain_is_reported_as_skipped() {
    let ctx = TestContext::new();
    write_tagged_domains(&ctx);

    ctx.cli()
        .args(["run", "-d", "legacy", "-d", "sales"])
        .assert()
        .success()
        .stdout(predicate::str::contains("disabled"))
        .stdout(predicate::str::contains("1 succeeded, 0 failed, 1 skipped"));
}

#[test]
fn unknown_batch_lists_available_batches() {
    let ctx = TestContext::new();
    write_tagged_domains(&ctx);

    ctx.cli()
        .args(["run", "--batch", "nightly"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Batch 'nightly' not found. Available: none"));
}
