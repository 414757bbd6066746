//! Lambda package scaffolding
//!
//! Handles `forge add <lambda>`: the package skeleton (handler, test, babel
//! config, npm scripts) plus the Terraform resources that deploy it. Works
//! both inside a project (`packages/<lambda>`) and standalone in the current
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::project::{npm_install, write_if_missing, Project};
use super::templates::{self, TemplateVars};
use super::terraform;
use crate::domain::{camel_to_snake, validate_name};

const RUNTIME_DEPENDENCIES: &[&str] = &["aws-sdk", "@babel/runtime-corejs3"];
const DEV_DEPENDENCIES: &[&str] = &[
    "jest",
    "@babel/cli",
    "cross-env",
    "@babel/core",
    "@babel/preset-env",
    "@babel/plugin-transform-runtime",
    "@babel/register",
    "rimraf",
];

/// Where a lambda package and its Terraform scripts land.
pub struct LambdaTarget {
    pub lambda_dir: PathBuf,
    pub terraform_dir: PathBuf,
    pub package_name: String,
    pub source_directory: String,
}

impl LambdaTarget {
    /// Target inside a project: `packages/<lambda>`, scoped package name.
    pub fn in_project(project: &Project, lambda: &str) -> Self {
        let scope = dashed(
            project
                .root()
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("forge-project"),
        );

        Self {
            lambda_dir: project.packages_dir().join(lambda),
            terraform_dir: project.terraform_dir(),
            package_name: format!("@{}/{}", scope, dashed(lambda)),
            source_directory: "../packages/".to_string(),
        }
    }

    /// Standalone target: the lambda lives directly under `base`.
    pub fn standalone(base: &Path, lambda: &str) -> Self {
        Self {
            lambda_dir: base.join(lambda),
            terraform_dir: base.join("terraform"),
            package_name: dashed(lambda),
            source_directory: "../".to_string(),
        }
    }
}

/// Scaffolds one lambda package at the target.
///
/// Existing files are left alone, so re-running `forge add` with the same
/// name repairs a partial scaffold instead of overwriting edits.
pub fn add(target: &LambdaTarget, lambda: &str, region: &str, install: bool) -> Result<()> {
    validate_name(lambda)?;

    let src_dir = target.lambda_dir.join("src");
    let test_dir = target.lambda_dir.join("test");
    for dir in [&target.lambda_dir, &src_dir, &test_dir] {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }

    write_if_missing(
        &target.lambda_dir.join("package.json"),
        &templates::lambda_package_json(&target.package_name),
    )?;
    write_if_missing(&target.lambda_dir.join(".babelrc"), templates::BABEL_CONFIG)?;
    write_if_missing(&src_dir.join("handlers.js"), &templates::lambda_handler(lambda))?;
    write_if_missing(
        &test_dir.join("handlers.test.js"),
        &templates::lambda_handler_test(lambda),
    )?;

    let vars = TemplateVars::for_lambda(lambda, region, &target.source_directory);
    terraform::write_lambda_scripts(&target.terraform_dir, &vars)?;

    if install {
        npm_install(&target.lambda_dir, RUNTIME_DEPENDENCIES, false)?;
        npm_install(&target.lambda_dir, DEV_DEPENDENCIES, true)?;
    }

    Ok(())
}

/// npm-friendly form of a name: snake boundaries folded to hyphens.
fn dashed(name: &str) -> String {
    camel_to_snake(name).replace('_', "-")
}
