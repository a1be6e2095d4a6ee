use crate::harness::TestContext;
use predicates::prelude::*;

#[test]
fn list_json_includes_trigger_and_failures() {
    let ctx = TestContext::new();
    ctx.write_sales_fixture();
    ctx.write_domain("weekly_report", "[schedule]\nenabled = true\ncron = \"30 6 * * mon\"\n");
    ctx.write_domain("broken", "tags = [\"\"]\n");

    let output = ctx.cli().args(["list", "--json"]).assert().success().get_output().stdout.clone();
    let summaries: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let summaries = summaries.as_array().unwrap();

    let names: Vec<&str> = summaries.iter().map(|s| s["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["broken", "sales", "weekly_report"]);
    assert!(summaries[0]["error"].as_str().unwrap().contains("tags"));
    assert_eq!(summaries[2]["trigger"], "30 6 * * 1");
    assert!(summaries[1].get("trigger").is_none());
}

#[test]
fn list_text_marks_disabled_domains() {
    let ctx = TestContext::new();
    ctx.init();

    ctx.cli()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("example  [disabled]"));
}
