//! CLI integration tests
//!
//! Network-dependent paths are not exercised here; these cover argument
//! parsing and the preconditions that must fail before any request.

use assert_cmd::Command;
use predicates::prelude::*;

fn pscout() -> Command {
    Command::cargo_bin("pscout").expect("binary builds")
}

#[test]
fn help_lists_all_subcommands() {
    pscout()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("autopilot"))
        .stdout(predicate::str::contains("summarize"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_flag_works() {
    pscout()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pscout"));
}

#[test]
fn empty_url_fails_fetch_before_any_network_call() {
    pscout()
        .args(["fetch", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Enter a URL"));
}

#[test]
fn empty_url_fails_autopilot_before_any_network_call() {
    pscout()
        .args(["autopilot", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Enter a URL"));
}

#[test]
fn unknown_config_key_is_rejected() {
    pscout()
        .args(["config", "get", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn config_set_rejects_invalid_server_url() {
    pscout()
        .args(["config", "set", "server-url", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid URL"));
}
