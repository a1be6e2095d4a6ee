use crate::harness::TestContext;
use predicates::prelude::*;

#[test]
fn create_domain_writes_document_that_composes() {
    let ctx = TestContext::new();
    ctx.init();

    ctx.cli()
        .args(["create-domain", "daily_sales", "--tag", "daily"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created domain 'daily_sales'"));

    let content =
        std::fs::read_to_string(ctx.conf_path().join("domains/daily_sales.toml")).unwrap();
    assert!(content.contains("display_name = \"Daily Sales\""));
    assert!(content.contains("tags = [\"daily\"]"));

    ctx.cli()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 domain(s) valid"));
}

#[test]
fn create_domain_rejects_duplicates_and_bad_names() {
    let ctx = TestContext::new();
    ctx.init();

    ctx.cli()
        .args(["create-domain", "example"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Domain 'example' already exists"));

    ctx.cli()
        .args(["create-domain", "../escape"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid domain name"));
}

#[test]
fn create_domain_without_name_and_tty_fails() {
    let ctx = TestContext::new();
    ctx.init();

    ctx.cli()
        .arg("create-domain")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Domain name is required"));
}
