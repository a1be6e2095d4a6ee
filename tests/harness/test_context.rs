//! Shared testing harness for `dataflow` integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated environment for CLI exercises.
pub(crate) struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

impl TestContext {
    /// Create a new isolated environment.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Path to the working directory used for CLI invocations.
    pub(crate) fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Default config directory (`conf/` under the work directory).
    pub(crate) fn conf_path(&self) -> PathBuf {
        self.work_dir.join("conf")
    }

    /// Build a command for invoking the compiled `dataflow` binary.
    pub(crate) fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("dataflow").expect("Failed to locate dataflow binary");
        cmd.current_dir(&self.work_dir)
            .env("HOME", self.root.path())
            .env_remove("DATAFLOW_CONFIG_DIR")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Start the `dataflow` binary in the background with piped output.
    pub(crate) fn spawn(&self, args: &[&str]) -> std::process::Child {
        std::process::Command::new(assert_cmd::cargo::cargo_bin("dataflow"))
            .args(args)
            .current_dir(&self.work_dir)
            .env("HOME", self.root.path())
            .env_remove("DATAFLOW_CONFIG_DIR")
            .env_remove("RUST_LOG")
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .spawn()
            .expect("Failed to start dataflow binary")
    }

    /// Run `dataflow init` and assert success.
    pub(crate) fn init(&self) {
        self.cli().arg("init").assert().success();
    }

    /// Write `conf/config.toml`.
    pub(crate) fn write_global(&self, content: &str) {
        self.write_file(&self.conf_path().join("config.toml"), content);
    }

    /// Write `conf/domains/<name>.toml`.
    pub(crate) fn write_domain(&self, name: &str, content: &str) {
        self.write_file(&self.conf_path().join("domains").join(format!("{}.toml", name)), content);
    }

    /// Write a file relative to the work directory.
    pub(crate) fn write_data(&self, relative: &str, content: &str) {
        self.write_file(&self.work_dir.join(relative), content);
    }

    /// Read a file relative to the work directory.
    pub(crate) fn read_data(&self, relative: &str) -> String {
        fs::read_to_string(self.work_dir.join(relative))
            .unwrap_or_else(|err| panic!("Failed to read {}: {}", relative, err))
    }

    fn write_file(&self, path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, content).expect("Failed to write test file");
    }

    /// Global config with a shared CSV input under `data/input`.
    pub(crate) fn write_sales_fixture(&self) {
        self.write_global(
            r#"
base_input_path = "data/input"
base_output_path = "data/output"

[inputs.orders]
path = "orders.csv"
format = "csv"
"#,
        );
        self.write_data("data/input/orders.csv", "id,amount\n1,10.5\n2,3\n");
        self.write_domain(
            "sales",
            r#"
tags = ["daily"]
pipeline = "copy"
inputs = ["orders"]

[outputs.orders]
path = "orders.json"
format = "json"
"#,
        );
    }
}
