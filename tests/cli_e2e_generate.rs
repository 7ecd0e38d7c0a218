//! End-to-end tests for the `generate` command.
//!
//! These tests invoke the actual CLI binary inside a temporary repository and
//! check the files it leaves behind.

mod common;
use common::prelude::*;

const ALL_ARTIFACTS: [&str; 8] = [
    ".github/renovate.json",
    ".github/workflows/checks.yaml",
    ".github/workflows/ci.yaml",
    ".github/workflows/codeql.yaml",
    ".github/workflows/container-registry-ghcr.yaml",
    "Dockerfile",
    ".dockerignore",
    ".golangci.yaml",
];

#[test]
fn test_generate_writes_all_artifacts() {
    let fixture = TestFixture::new()
        .with_go_mod(manifests::SERVICE)
        .with_config(configs::FULL);

    fixture
        .command()
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("[WROTE] .github/renovate.json"));

    for path in ALL_ARTIFACTS {
        fixture.child(path).assert(predicate::path::is_file());
    }
}

#[test]
fn test_generate_renovate_content() {
    let fixture = TestFixture::new()
        .with_go_mod(manifests::SERVICE)
        .with_config(configs::FULL);

    fixture.command().arg("generate").assert().success();

    let renovate = fixture.child(".github/renovate.json");
    renovate.assert(predicate::str::contains(r#""assignees": ["#));
    renovate.assert(predicate::str::contains(r#""octocat""#));
    renovate.assert(predicate::str::contains(r#""1.21.x""#));
    renovate.assert(predicate::str::contains(r#""^github\\.com/example/.*""#));
    renovate.assert(predicate::str::ends_with("}\n"));
}

#[test]
fn test_generate_ci_uses_postgres_from_go_mod() {
    let fixture = TestFixture::new()
        .with_go_mod(manifests::SERVICE)
        .with_config(configs::FULL);

    fixture.command().arg("generate").assert().success();

    let ci = fixture.child(".github/workflows/ci.yaml");
    ci.assert(predicate::str::starts_with("################"));
    ci.assert(predicate::str::contains("name: CI"));
    ci.assert(predicate::str::contains("postgres:"));
    ci.assert(predicate::str::contains("make build/cover.out"));
}

#[test]
fn test_generate_is_idempotent() {
    let fixture = TestFixture::new()
        .with_go_mod(manifests::SERVICE)
        .with_config(configs::FULL);

    fixture.command().arg("generate").assert().success();
    let first: Vec<String> = ALL_ARTIFACTS
        .iter()
        .map(|p| std::fs::read_to_string(fixture.path().join(p)).unwrap())
        .collect();

    fixture.command().arg("generate").assert().success();
    for (path, before) in ALL_ARTIFACTS.iter().zip(first) {
        let after = std::fs::read_to_string(fixture.path().join(path)).unwrap();
        assert_eq!(before, after, "{path} changed on the second run");
    }
}

#[test]
fn test_generate_removes_retired_and_disabled_workflows() {
    let fixture = TestFixture::new()
        .with_go_mod(manifests::LIBRARY)
        .with_config(configs::WORKFLOWS_ONLY)
        .with_file(".github/workflows/license.yaml", "old")
        .with_file(".github/workflows/codeql.yaml", "old")
        .with_file(".github/workflows/handwritten.yaml", "mine");

    fixture
        .command()
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("[REMOVED] .github/workflows/license.yaml"));

    fixture
        .child(".github/workflows/license.yaml")
        .assert(predicate::path::missing());
    fixture
        .child(".github/workflows/codeql.yaml")
        .assert(predicate::path::missing());
    fixture
        .child(".github/workflows/handwritten.yaml")
        .assert("mine");
    fixture
        .child(".github/workflows/ci.yaml")
        .assert(predicate::path::is_file());
}

#[test]
fn test_generate_without_workflows_leaves_workflow_dir_alone() {
    let fixture = TestFixture::new()
        .with_go_mod(manifests::LIBRARY)
        .with_config(configs::RENOVATE_ONLY)
        .with_file(".github/workflows/license.yaml", "old");

    fixture.command().arg("generate").assert().success();

    fixture
        .child(".github/renovate.json")
        .assert(predicate::path::is_file());
    fixture
        .child(".github/workflows/license.yaml")
        .assert("old");
    fixture.child("Dockerfile").assert(predicate::path::missing());
}

#[test]
fn test_generate_dry_run_writes_nothing() {
    let fixture = TestFixture::new()
        .with_go_mod(manifests::SERVICE)
        .with_config(configs::FULL);

    fixture
        .command()
        .args(["generate", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[DRY-RUN]"))
        .stdout(predicate::str::contains("would write  Dockerfile"));

    fixture.child("Dockerfile").assert(predicate::path::missing());
    fixture
        .child(".github")
        .assert(predicate::path::missing());
}

#[test]
fn test_generate_output_directory() {
    let fixture = TestFixture::new()
        .with_go_mod(manifests::LIBRARY)
        .with_config(configs::RENOVATE_ONLY);

    fixture
        .command()
        .args(["generate", "--output", "out"])
        .assert()
        .success();

    fixture
        .child("out/.github/renovate.json")
        .assert(predicate::path::is_file());
    fixture
        .child(".github/renovate.json")
        .assert(predicate::path::missing());
}

#[test]
fn test_generate_config_from_env() {
    let fixture = TestFixture::new()
        .with_go_mod(manifests::LIBRARY)
        .with_file("ci/custom.yaml", configs::RENOVATE_ONLY);

    fixture
        .command()
        .arg("generate")
        .env("CICD_MAKER_CONFIG", "ci/custom.yaml")
        .assert()
        .success();

    fixture
        .child(".github/renovate.json")
        .assert(predicate::path::is_file());
}

#[test]
fn test_generate_missing_config() {
    let fixture = TestFixture::new().with_go_mod(manifests::LIBRARY);

    fixture
        .command()
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read cicd-maker.yaml"))
        .stderr(predicate::str::contains("--config"));
}

#[test]
fn test_generate_missing_go_mod() {
    let fixture = TestFixture::new().with_config(configs::RENOVATE_ONLY);

    fixture
        .command()
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("go.mod"));

    fixture
        .child(".github")
        .assert(predicate::path::missing());
}

#[test]
fn test_generate_rejects_removed_dockerfile_user() {
    let fixture = TestFixture::new()
        .with_go_mod(manifests::SERVICE)
        .with_config(configs::REMOVED_DOCKER_USER);

    fixture
        .command()
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("dockerfile.user"));

    fixture.child("Dockerfile").assert(predicate::path::missing());
}
