use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn sprig() -> Command {
    let mut cmd = Command::cargo_bin("sprig").unwrap();
    // Keep a developer's own config out of the way.
    cmd.env("XDG_CONFIG_HOME", "/nonexistent/xdg")
        .env_remove("SPRIG_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn data_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn empty_config() -> NamedTempFile {
    data_file("")
}

const FOREST: &str = r#"[
  {"id": 1, "text": "A", "children": [
    {"id": 2, "text": "B"},
    {"id": 3, "text": "C", "children": [{"id": 4, "text": "D"}]}
  ]},
  {"id": "x", "text": "X"}
]"#;

#[test]
fn shows_help() {
    sprig()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tree-shaped data"));
}

#[test]
fn shows_version() {
    sprig()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn requires_subcommand() {
    sprig()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn view_subcommand_help() {
    sprig()
        .args(["view", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("interactive viewer"));
}

#[test]
fn print_draws_tree() {
    let config = empty_config();
    let data = data_file(FOREST);
    sprig()
        .arg("--config")
        .arg(config.path())
        .arg("print")
        .arg(data.path())
        .assert()
        .success()
        .stdout("A\n├── B\n└── C\n    └── D\nX\n");
}

#[test]
fn print_with_depth_and_ids() {
    let config = empty_config();
    let data = data_file(FOREST);
    sprig()
        .arg("--config")
        .arg(config.path())
        .args(["print", "--depth", "1", "--ids"])
        .arg(data.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("B [2]"))
        .stdout(predicate::str::contains("D").not());
}

#[test]
fn print_json_fills_depths() {
    let config = empty_config();
    let data = data_file(FOREST);
    sprig()
        .arg("--config")
        .arg(config.path())
        .args(["print", "--json"])
        .arg(data.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""depth": 2"#));
}

#[test]
fn print_missing_file_fails() {
    let config = empty_config();
    sprig()
        .arg("--config")
        .arg(config.path())
        .args(["print", "/nonexistent/tree.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/tree.json"));
}

#[test]
fn print_malformed_data_fails() {
    let config = empty_config();
    let data = data_file("{ not json");
    sprig()
        .arg("--config")
        .arg(config.path())
        .arg("print")
        .arg(data.path())
        .assert()
        .failure();
}

#[test]
fn invalid_config_is_reported() {
    let config = data_file("[tree]\nanimation_ms = 999999\n");
    let data = data_file(FOREST);
    sprig()
        .arg("--config")
        .arg(config.path())
        .arg("print")
        .arg(data.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("animation_ms"));
}

#[test]
fn completions_for_bash() {
    sprig()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sprig"));
}
