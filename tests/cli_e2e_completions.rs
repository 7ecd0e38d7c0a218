//! End-to-end tests for the `completions` command.

#[allow(dead_code)]
mod common;
use common::prelude::*;

fn completions(shell: &str) -> assert_cmd::assert::Assert {
    cargo_bin_cmd!("cicd-maker")
        .args(["completions", shell])
        .assert()
        .success()
}

#[test]
fn test_completions_bash() {
    completions("bash")
        .stdout(predicate::str::contains("_cicd-maker()"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_completions_zsh() {
    completions("zsh")
        .stdout(predicate::str::contains("#compdef cicd-maker"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_completions_fish() {
    completions("fish")
        .stdout(predicate::str::contains("function __fish_cicd_maker"))
        .stdout(predicate::str::contains("scan"));
}

#[test]
fn test_completions_powershell_and_elvish() {
    completions("powershell").stdout(predicate::str::contains("Register-ArgumentCompleter"));
    completions("elvish").stdout(predicate::str::contains(
        "edit:completion:arg-completer[cicd-maker]",
    ));
}

#[test]
fn test_completions_invalid_shell() {
    cargo_bin_cmd!("cicd-maker")
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
