use crate::harness::TestContext;
use predicates::prelude::*;

#[test]
fn init_rejects_when_already_initialized() {
    let ctx = TestContext::new();
    ctx.init();

    ctx.cli()
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_force_keeps_existing_domains() {
    let ctx = TestContext::new();
    ctx.init();
    ctx.write_domain("example", "display_name = \"Edited\"\n");

    ctx.cli()
        .args(["init", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kept existing domain 'example'"));

    let example = std::fs::read_to_string(ctx.conf_path().join("domains/example.toml")).unwrap();
    assert_eq!(example, "display_name = \"Edited\"\n");
}
