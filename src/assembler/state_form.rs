//! State Assembler
//!
//! Walks the operator through the field set of one state. The question set
//! is a static per-kind table (`StateKind` predicates), never a runtime
//! inspection of earlier answers, so a record can only ever carry the fields
//! its kind allows.

use serde_json::Value;
use thiserror::Error;

use super::choice::{collect_default, collect_rules, END_TARGET};
use super::error_policy::{collect_catchers, collect_retriers};
use super::form::{optional_input, optional_json_object, required_number, required_text};
use super::linker::{link, LinkMode};
use super::prompt::{Prompt, PromptError};
use crate::domain::{
    DocumentError, StateBody, StateKind, StateRecord, TaskFields, Transition, WaitOn,
    WorkflowDocument,
};

#[derive(Debug, Error)]
pub enum AssembleError {
    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("A {kind} state requires at least one nested state in its {part}")]
    EmptyBranch { kind: StateKind, part: &'static str },
}

/// Assembles one state record of the given kind.
///
/// `candidates` is the remaining pool (the chosen name already excluded) and
/// doubles as the target list for `Next` selection and choice rules.
/// Compound-branch members (`inside_branch`) never prompt for `Next`: their
/// ordering is implicit and the chain is terminated on exhaustion.
pub fn assemble(
    prompt: &mut dyn Prompt,
    name: &str,
    kind: StateKind,
    candidates: &[String],
    inside_branch: bool,
) -> Result<StateRecord, AssembleError> {
    let mut record = StateRecord::new(name, StateBody::Succeed);

    if kind.has_common_fields() {
        record.comment = optional_input(prompt, "Comment (optional)")?;
        record.input_path = optional_input(prompt, "InputPath (optional)")?;
        record.output_path = optional_input(prompt, "OutputPath (optional)")?;
    }

    record.body = match kind {
        StateKind::Task => StateBody::Task(collect_task_fields(prompt)?),

        StateKind::Parallel => {
            let fields = collect_task_fields(prompt)?;
            let chain = link(prompt, "Add lambda to Parallel branch", candidates, LinkMode::ParallelBranch)?;
            if chain.is_empty() {
                return Err(AssembleError::EmptyBranch {
                    kind,
                    part: "branches",
                });
            }
            // Each collected state becomes an independent single-state
            // branch document.
            let branches = chain
                .into_iter()
                .map(|state| WorkflowDocument::from_chain(vec![state]))
                .collect::<Result<Vec<_>, _>>()?;
            StateBody::Parallel { fields, branches }
        }

        StateKind::Map => {
            let fields = collect_task_fields(prompt)?;
            let chain = link(prompt, "Add lambda to Map Iterator", candidates, LinkMode::MapIterator)?;
            if chain.is_empty() {
                return Err(AssembleError::EmptyBranch {
                    kind,
                    part: "iterator",
                });
            }
            StateBody::Map {
                fields,
                iterator: WorkflowDocument::from_chain(chain)?,
            }
        }

        StateKind::Pass => StateBody::Pass {
            result: collect_pass_result(prompt)?,
        },

        StateKind::Wait => StateBody::Wait(collect_wait(prompt)?),

        StateKind::Choice => {
            let rules = collect_rules(prompt, candidates)?;
            let default = collect_default(prompt, candidates)?;
            StateBody::Choice { rules, default }
        }

        StateKind::Succeed => StateBody::Succeed,

        StateKind::Fail => StateBody::Fail {
            error: optional_input(prompt, "Error code (optional)")?,
            cause: optional_input(prompt, "Cause (optional)")?,
        },
    };

    if kind.prompts_for_next() && !inside_branch && !candidates.is_empty() {
        record.transition = Some(collect_next(prompt, candidates)?);
    }

    Ok(record)
}

fn collect_task_fields(prompt: &mut dyn Prompt) -> Result<TaskFields, PromptError> {
    let result_path = optional_input(prompt, "ResultPath (optional)")?;
    let parameters = optional_json_object(prompt, "Parameters (optional, JSON)")?.map(Value::Object);
    let result_selector =
        optional_json_object(prompt, "ResultSelector (optional, JSON)")?.map(Value::Object);

    let retry = if prompt.confirm("Do you want to add a retrier?", false)? {
        collect_retriers(prompt)?
    } else {
        Vec::new()
    };

    let catch = if prompt.confirm("Do you want to add a catcher?", false)? {
        collect_catchers(prompt)?
    } else {
        Vec::new()
    };

    Ok(TaskFields {
        result_path,
        parameters,
        result_selector,
        retry,
        catch,
    })
}

/// A Pass result is any JSON value; input that does not parse as JSON is
/// kept as a string literal.
fn collect_pass_result(prompt: &mut dyn Prompt) -> Result<Option<Value>, PromptError> {
    Ok(optional_input(prompt, "Result (optional)")?.map(|raw| {
        serde_json::from_str::<Value>(&raw).unwrap_or(Value::String(raw))
    }))
}

/// Folds the wait-field selector and its value into a single typed field;
/// the selector itself never reaches the document.
fn collect_wait(prompt: &mut dyn Prompt) -> Result<WaitOn, PromptError> {
    let forms = vec![
        "Seconds".to_string(),
        "Timestamp".to_string(),
        "SecondsPath".to_string(),
        "TimestampPath".to_string(),
    ];

    let form = prompt.select("Wait on", &forms)?;
    Ok(match form {
        0 => WaitOn::Seconds(required_number(prompt, "Seconds")?),
        1 => WaitOn::Timestamp(required_text(prompt, "Timestamp (ISO-8601)")?),
        2 => WaitOn::SecondsPath(required_text(prompt, "SecondsPath")?),
        _ => WaitOn::TimestampPath(required_text(prompt, "TimestampPath")?),
    })
}

fn collect_next(
    prompt: &mut dyn Prompt,
    candidates: &[String],
) -> Result<Transition, PromptError> {
    let mut targets: Vec<String> = candidates.to_vec();
    targets.push(END_TARGET.to_string());

    let choice = prompt.select("What is your next state?", &targets)?;
    if targets[choice] == END_TARGET {
        Ok(Transition::End)
    } else {
        Ok(Transition::Next(targets[choice].clone()))
    }
}
