//! Terraform script management
//!
//! Writes the rendered resource templates under `terraform/`. Scripts are
//! append-only and duplicate-aware: a file that already contains the resource
//! header is left untouched, an existing file without it gets the resource
//! appended, and a missing file is created. Running the same command twice
//! therefore never duplicates a resource block.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::templates::{self, TemplateVars};
use crate::domain::WorkflowDocument;

/// Terraform resources written for every lambda package.
pub const LAMBDA_RESOURCES: &[&str] = &[
    "aws_lambda_function",
    "aws_s3_bucket",
    "aws_s3_bucket_object",
    "aws_iam_role",
    "provider",
    "variables",
    "aws_iam_role_policy_attachment",
    "aws_iam_policy",
    "aws_cloudwatch_log_group",
];

/// IAM scripts written alongside the state machine. Pairs of
/// (file stem, template key): the SFN variants append into the same files
/// the lambda resources use.
const SFN_RESOURCES: &[(&str, &str)] = &[
    ("aws_iam_policy_document", "aws_iam_policy_document"),
    ("aws_iam_policy_document", "aws_iam_policy_document_sfn"),
    ("aws_iam_policy", "aws_iam_policy_sfn"),
    (
        "aws_iam_role_policy_attachment",
        "aws_iam_role_policy_attachment_sfn",
    ),
    ("aws_iam_role", "aws_iam_role_sfn"),
];

const DEFINITION_TOKEN: &str = ":definition";

/// What `ensure_script` did to the target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptOutcome {
    Created,
    Appended,
    Unchanged,
}

/// Writes `contents` into the script at `path` with the duplicate-aware
/// append semantics.
pub fn ensure_script(path: &Path, contents: &str) -> Result<ScriptOutcome> {
    if path.exists() {
        let existing = fs::read_to_string(path)
            .with_context(|| format!("Failed to read terraform script: {}", path.display()))?;

        if contains_resource(&existing, contents) {
            return Ok(ScriptOutcome::Unchanged);
        }

        let appended = format!("{}\n{}", existing, contents);
        fs::write(path, appended)
            .with_context(|| format!("Failed to append terraform script: {}", path.display()))?;
        return Ok(ScriptOutcome::Appended);
    }

    fs::write(path, contents)
        .with_context(|| format!("Failed to write terraform script: {}", path.display()))?;
    Ok(ScriptOutcome::Created)
}

/// A script already holds the resource when it contains the block header,
/// the text up to the first opening brace.
fn contains_resource(existing: &str, contents: &str) -> bool {
    let header = match contents.find('{') {
        Some(index) => contents[..index].trim(),
        None => contents.trim(),
    };

    !header.is_empty() && existing.contains(header)
}

/// Writes the full Terraform resource set for one lambda package.
pub fn write_lambda_scripts(
    terraform_dir: &Path,
    vars: &TemplateVars,
) -> Result<Vec<(PathBuf, ScriptOutcome)>> {
    fs::create_dir_all(terraform_dir).with_context(|| {
        format!(
            "Failed to create terraform directory: {}",
            terraform_dir.display()
        )
    })?;

    let mut outcomes = Vec::new();
    for resource in LAMBDA_RESOURCES {
        // Resource names come from a fixed table; the lookup cannot miss.
        let Some(template) = templates::terraform_template(resource) else {
            continue;
        };

        let path = terraform_dir.join(format!("{}.tf", resource));
        let contents = templates::substitute(template, vars);
        let outcome = ensure_script(&path, &contents)?;
        outcomes.push((path, outcome));
    }

    Ok(outcomes)
}

/// Writes the state-machine resource plus its IAM scripts.
///
/// The rendered document is substituted for the `:definition` token as a
/// `jsonencode(...)` argument, pretty-printed with two-space indentation.
pub fn write_sfn_scripts(
    terraform_dir: &Path,
    document: &WorkflowDocument,
    vars: &TemplateVars,
) -> Result<Vec<(PathBuf, ScriptOutcome)>> {
    fs::create_dir_all(terraform_dir).with_context(|| {
        format!(
            "Failed to create terraform directory: {}",
            terraform_dir.display()
        )
    })?;

    let mut outcomes = Vec::new();

    if let Some(template) = templates::terraform_template("aws_sfn_state_machine") {
        let contents = template.replace(DEFINITION_TOKEN, &definition_block(document));
        let path = terraform_dir.join("aws_sfn_state_machine.tf");
        outcomes.push((path.clone(), ensure_script(&path, &contents)?));
    }

    for (stem, key) in SFN_RESOURCES {
        let Some(template) = templates::terraform_template(key) else {
            continue;
        };

        let path = terraform_dir.join(format!("{}.tf", stem));
        let contents = templates::substitute(template, vars);
        outcomes.push((path.clone(), ensure_script(&path, &contents)?));
    }

    Ok(outcomes)
}

/// Renders the `definition = jsonencode(...)` attribute for the state
/// machine resource.
pub fn definition_block(document: &WorkflowDocument) -> String {
    format!("definition = jsonencode({})", document.to_json_string())
}
