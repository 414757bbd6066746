//! Workflow document assembly and rendering
//!
//! The document builder folds an ordered chain of [`StateRecord`]s into a
//! [`WorkflowDocument`] and renders it as Amazon States Language JSON. The
//! same builder serves the root document, every Parallel branch and every
//! Map iterator.
//!
//! Rendering is pure: no I/O, no prompting. Given the same chain it produces
//! byte-identical output (`serde_json` runs with `preserve_order`, so the
//! `States` map serializes in authoring order).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::name::{camel_to_snake, uc_first};
use super::state::{StateBody, StateRecord, TaskFields, Transition};

#[derive(Debug, Error, PartialEq)]
pub enum DocumentError {
    #[error("A workflow document requires at least one state")]
    EmptyChain,

    #[error("Duplicate state name '{0}' within one document")]
    DuplicateName(String),

    #[error("State '{state}' transitions to '{target}', which is not a state of this document")]
    DanglingTarget { state: String, target: String },
}

/// A complete named-state graph with one declared start state.
///
/// Immutable once built. Embedded as data inside a parent record for
/// Parallel/Map states, or returned as the final artifact at the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDocument {
    start: String,
    states: Vec<StateRecord>,
}

impl WorkflowDocument {
    /// Folds an ordered chain into a document.
    ///
    /// The first record becomes the start state. The last record is forced
    /// terminal if the flow linker left its transition unset. Name
    /// uniqueness and transition-target resolution are re-checked here even
    /// though the linker establishes both by construction.
    pub fn from_chain(mut chain: Vec<StateRecord>) -> Result<Self, DocumentError> {
        if chain.is_empty() {
            return Err(DocumentError::EmptyChain);
        }

        if let Some(last) = chain.last_mut() {
            if last.transition.is_none() {
                last.terminate();
            }
        }

        let keys: Vec<String> = chain.iter().map(|s| uc_first(&s.name)).collect();
        for (i, key) in keys.iter().enumerate() {
            if keys[..i].contains(key) {
                return Err(DocumentError::DuplicateName(key.clone()));
            }
        }

        for record in &chain {
            if let Some(Transition::Next(target)) = &record.transition {
                let target_key = uc_first(target);
                if !keys.contains(&target_key) {
                    return Err(DocumentError::DanglingTarget {
                        state: uc_first(&record.name),
                        target: target_key,
                    });
                }
            }
        }

        Ok(Self {
            start: keys[0].clone(),
            states: chain,
        })
    }

    /// The normalized name of the first state.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// The authored states, in chain order.
    pub fn states(&self) -> &[StateRecord] {
        &self.states
    }

    /// Normalized state keys, in chain order.
    pub fn state_names(&self) -> Vec<String> {
        self.states.iter().map(|s| uc_first(&s.name)).collect()
    }

    /// Renders the document as ASL JSON: `{"StartAt": ..., "States": {...}}`.
    pub fn render(&self) -> Value {
        let mut states = Map::new();
        for record in &self.states {
            states.insert(uc_first(&record.name), render_state(record));
        }

        let mut doc = Map::new();
        doc.insert("StartAt".into(), Value::from(self.start.clone()));
        doc.insert("States".into(), Value::Object(states));
        Value::Object(doc)
    }

    /// Renders as pretty-printed JSON, the form substituted into the
    /// Terraform template.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&self.render()).unwrap_or_default()
    }
}

/// Derives the Terraform resource reference for a Task state from its name:
/// camel-case boundaries become underscores, hyphens are folded in too so the
/// result is a valid Terraform label.
fn task_resource(name: &str) -> String {
    format!(
        "${{aws_lambda_function.{}.arn}}",
        camel_to_snake(name).replace('-', "_")
    )
}

fn render_state(record: &StateRecord) -> Value {
    let mut map = Map::new();
    map.insert("Type".into(), Value::from(record.kind().as_str()));

    if let Some(comment) = &record.comment {
        map.insert("Comment".into(), Value::from(comment.clone()));
    }
    if let Some(path) = &record.input_path {
        map.insert("InputPath".into(), Value::from(path.clone()));
    }
    if let Some(path) = &record.output_path {
        map.insert("OutputPath".into(), Value::from(path.clone()));
    }

    match &record.body {
        StateBody::Task(fields) => {
            map.insert("Resource".into(), Value::from(task_resource(&record.name)));
            render_task_fields(&mut map, fields);
        }
        StateBody::Parallel { fields, branches } => {
            map.insert(
                "Branches".into(),
                Value::from(branches.iter().map(|b| b.render()).collect::<Vec<_>>()),
            );
            render_task_fields(&mut map, fields);
        }
        StateBody::Map { fields, iterator } => {
            map.insert("Iterator".into(), iterator.render());
            render_task_fields(&mut map, fields);
        }
        StateBody::Pass { result } => {
            if let Some(result) = result {
                map.insert("Result".into(), result.clone());
            }
        }
        StateBody::Wait(wait) => {
            map.insert(wait.field().into(), wait.value());
        }
        StateBody::Choice { rules, default } => {
            map.insert(
                "Choices".into(),
                Value::from(rules.iter().map(|r| r.render()).collect::<Vec<_>>()),
            );
            if let Some(default) = default {
                map.insert("Default".into(), Value::from(uc_first(default)));
            }
        }
        StateBody::Succeed => {}
        StateBody::Fail { error, cause } => {
            if let Some(error) = error {
                map.insert("Error".into(), Value::from(error.clone()));
            }
            if let Some(cause) = cause {
                map.insert("Cause".into(), Value::from(cause.clone()));
            }
        }
    }

    match &record.transition {
        Some(Transition::Next(target)) => {
            map.insert("Next".into(), Value::from(uc_first(target)));
        }
        Some(Transition::End) => {
            map.insert("End".into(), Value::Bool(true));
        }
        None => {}
    }

    Value::Object(map)
}

fn render_task_fields(map: &mut Map<String, Value>, fields: &TaskFields) {
    if let Some(path) = &fields.result_path {
        map.insert("ResultPath".into(), Value::from(path.clone()));
    }
    if let Some(params) = &fields.parameters {
        map.insert("Parameters".into(), params.clone());
    }
    if let Some(selector) = &fields.result_selector {
        map.insert("ResultSelector".into(), selector.clone());
    }
    if !fields.retry.is_empty() {
        map.insert(
            "Retry".into(),
            Value::from(fields.retry.iter().map(|r| r.render()).collect::<Vec<_>>()),
        );
    }
    if !fields.catch.is_empty() {
        map.insert(
            "Catch".into(),
            Value::from(fields.catch.iter().map(|c| c.render()).collect::<Vec<_>>()),
        );
    }
}
