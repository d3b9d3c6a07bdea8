use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn kb_help_works() {
    Command::cargo_bin("kb")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("kanban board"));
}

#[test]
fn kb_version_works() {
    Command::cargo_bin("kb")
        .expect("binary")
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("kb"));
}

#[test]
fn missing_explicit_config_fails_with_user_error() {
    Command::cargo_bin("kb")
        .expect("binary")
        .args(["--config", "/nonexistent/kb-config.toml"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Config file not found"));
}
