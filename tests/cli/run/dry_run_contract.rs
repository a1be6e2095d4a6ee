use crate::harness::TestContext;
use predicates::prelude::*;

#[test]
fn dry_run_reports_without_writing_outputs() {
    let ctx = TestContext::new();
    ctx.write_sales_fixture();

    ctx.cli()
        .args(["run", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dry run (pipeline 'copy')"));

    assert!(!ctx.work_dir().join("data/output/orders.json").exists());
}
