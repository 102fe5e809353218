#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::Command;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Lines that record the three reference sales used across the CLI tests.
pub const SEED_LINES: &str = "\
add 2024-01-01 Widget Acme 2 100 20
add 2024-01-02 Widget Globex 3 200 50
add 2024-02-01 Gadget Acme 1 150 0
";

/// Creates an isolated home directory for one test.
pub fn test_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let home = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    home
}

/// Script-mode CLI command rooted at `home`.
pub fn script_command(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sales_ledger_cli").expect("binary built");
    cmd.env("SALES_LEDGER_CLI_SCRIPT", "1")
        .env("SALES_LEDGER_HOME", home)
        .env_remove("RUST_LOG");
    cmd
}

/// Runs `script` against `home` and returns captured stdout.
pub fn run_script(home: &Path, script: &str) -> String {
    let output = script_command(home)
        .write_stdin(script.to_string())
        .output()
        .expect("run cli");
    assert!(output.status.success(), "cli exited with {:?}", output.status);
    String::from_utf8(output.stdout).expect("utf8 stdout")
}
