//! Integration tests for the forge binary.
//!
//! Scaffolding commands run with `--no-git --no-install` so the tests stay
//! hermetic (no git, no npm, no network).

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn forge() -> Command {
    Command::cargo_bin("forge").unwrap()
}

#[test]
fn help_lists_the_subcommands() {
    forge()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("new")
                .and(predicate::str::contains("add"))
                .and(predicate::str::contains("sfn")),
        );
}

#[test]
fn new_scaffolds_the_project_layout() {
    let dir = TempDir::new().unwrap();

    forge()
        .current_dir(dir.path())
        .args(["new", "demo", "--no-git", "--no-install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created project 'demo'"));

    let root = dir.path().join("demo");
    assert!(root.join("packages").is_dir());
    assert!(root.join("terraform").is_dir());
    assert!(root.join("package.json").is_file());
    assert!(root.join("lerna.json").is_file());
    assert!(root.join(".gitignore").is_file());
    assert!(root.join("forge.toml").is_file());

    let config = fs::read_to_string(root.join("forge.toml")).unwrap();
    assert!(config.contains("us-east-2"));
}

#[test]
fn new_is_idempotent() {
    let dir = TempDir::new().unwrap();

    for _ in 0..2 {
        forge()
            .current_dir(dir.path())
            .args(["new", "demo", "--no-git", "--no-install"])
            .assert()
            .success();
    }
}

#[test]
fn new_rejects_invalid_project_names() {
    let dir = TempDir::new().unwrap();

    forge()
        .current_dir(dir.path())
        .args(["new", "bad name!", "--no-git", "--no-install"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn add_scaffolds_a_lambda_inside_the_project() {
    let dir = TempDir::new().unwrap();
    forge()
        .current_dir(dir.path())
        .args(["new", "demo", "--no-git", "--no-install"])
        .assert()
        .success();

    let root = dir.path().join("demo");
    forge()
        .current_dir(&root)
        .args(["add", "lab", "--no-install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created lambda 'lab'"));

    let lambda = root.join("packages").join("lab");
    assert!(lambda.join("package.json").is_file());
    assert!(lambda.join(".babelrc").is_file());
    assert!(lambda.join("src").join("handlers.js").is_file());
    assert!(lambda.join("test").join("handlers.test.js").is_file());

    let package = fs::read_to_string(lambda.join("package.json")).unwrap();
    assert!(package.contains("@demo/lab"));

    let function = fs::read_to_string(root.join("terraform").join("aws_lambda_function.tf")).unwrap();
    assert!(function.contains(r#"resource "aws_lambda_function" "lab""#));
    assert!(function.contains("../packages/lab/function.zip"));
}

#[test]
fn repeating_add_does_not_duplicate_terraform_resources() {
    let dir = TempDir::new().unwrap();
    forge()
        .current_dir(dir.path())
        .args(["new", "demo", "--no-git", "--no-install"])
        .assert()
        .success();

    let root = dir.path().join("demo");
    for _ in 0..2 {
        forge()
            .current_dir(&root)
            .args(["add", "lab", "--no-install"])
            .assert()
            .success();
    }

    let function = fs::read_to_string(root.join("terraform").join("aws_lambda_function.tf")).unwrap();
    assert_eq!(
        function.matches(r#"resource "aws_lambda_function" "lab""#).count(),
        1
    );
}

#[test]
fn adding_a_second_lambda_appends_its_resource() {
    let dir = TempDir::new().unwrap();
    forge()
        .current_dir(dir.path())
        .args(["new", "demo", "--no-git", "--no-install"])
        .assert()
        .success();

    let root = dir.path().join("demo");
    for lambda in ["lab", "test"] {
        forge()
            .current_dir(&root)
            .args(["add", lambda, "--no-install"])
            .assert()
            .success();
    }

    let function = fs::read_to_string(root.join("terraform").join("aws_lambda_function.tf")).unwrap();
    assert!(function.contains(r#""lab""#));
    assert!(function.contains(r#""test""#));
}

#[test]
fn add_outside_a_project_scaffolds_standalone() {
    let dir = TempDir::new().unwrap();

    forge()
        .current_dir(dir.path())
        .args(["add", "solo", "--no-install"])
        .assert()
        .success();

    assert!(dir.path().join("solo").join("src").join("handlers.js").is_file());
    assert!(dir
        .path()
        .join("terraform")
        .join("aws_lambda_function.tf")
        .is_file());

    // Standalone packages are unscoped.
    let package = fs::read_to_string(dir.path().join("solo").join("package.json")).unwrap();
    assert!(package.contains("\"name\": \"solo\""));
}

#[test]
fn sfn_requires_a_project() {
    let dir = TempDir::new().unwrap();

    forge()
        .current_dir(dir.path())
        .arg("sfn")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not in a forge project"));
}

#[test]
fn sfn_with_no_lambdas_exits_cleanly() {
    let dir = TempDir::new().unwrap();
    forge()
        .current_dir(dir.path())
        .args(["new", "demo", "--no-git", "--no-install"])
        .assert()
        .success();

    forge()
        .current_dir(dir.path().join("demo"))
        .arg("sfn")
        .assert()
        .success()
        .stdout(predicate::str::contains("No lambda packages found"));
}

#[test]
fn json_format_emits_structured_output() {
    let dir = TempDir::new().unwrap();

    let assert = forge()
        .current_dir(dir.path())
        .args(["new", "demo", "--no-git", "--no-install", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(value["project"], "demo");
    assert_eq!(value["region"], "us-east-2");
}
