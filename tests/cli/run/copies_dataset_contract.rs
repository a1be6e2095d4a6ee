use crate::harness::TestContext;
use predicates::prelude::*;

#[test]
fn run_copies_csv_input_to_json_output() {
    let ctx = TestContext::new();
    ctx.write_sales_fixture();

    ctx.cli()
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("sales"))
        .stdout(predicate::str::contains("1 succeeded, 0 failed, 0 skipped"));

    let output: serde_json::Value =
        serde_json::from_str(&ctx.read_data("data/output/orders.json")).unwrap();
    let records = output.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], "1");
    assert_eq!(records[1]["amount"], "3");
}
