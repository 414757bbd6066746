//! State record domain model
//!
//! A [`StateRecord`] is one authored node of a workflow document. Fields that
//! only exist for some kinds live inside the [`StateBody`] variants, so a
//! record can never mix fields from incompatible kinds.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::WorkflowDocument;
use super::policy::{CatchPolicy, ChoiceRule, RetryPolicy};

/// The fixed enumeration of state kinds offered to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateKind {
    Task,
    Parallel,
    Map,
    Pass,
    Wait,
    Choice,
    Succeed,
    Fail,
}

impl StateKind {
    /// All kinds, in the order they are presented to the operator.
    pub const ALL: [StateKind; 8] = [
        StateKind::Task,
        StateKind::Parallel,
        StateKind::Map,
        StateKind::Pass,
        StateKind::Wait,
        StateKind::Choice,
        StateKind::Succeed,
        StateKind::Fail,
    ];

    /// The ASL `Type` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            StateKind::Task => "Task",
            StateKind::Parallel => "Parallel",
            StateKind::Map => "Map",
            StateKind::Pass => "Pass",
            StateKind::Wait => "Wait",
            StateKind::Choice => "Choice",
            StateKind::Succeed => "Succeed",
            StateKind::Fail => "Fail",
        }
    }

    /// Returns true if this kind names an existing deployable unit and is
    /// therefore selected from the candidate pool rather than typed freeform.
    pub fn selects_from_pool(&self) -> bool {
        matches!(self, StateKind::Task)
    }

    /// Returns true if states of this kind never carry a transition.
    ///
    /// Succeed and Fail are terminal by definition: no `Next`, no `End`.
    pub fn is_always_terminal(&self) -> bool {
        matches!(self, StateKind::Succeed | StateKind::Fail)
    }

    /// Returns true if this kind is routed through a `Next` prompt when
    /// authored at the top level of a pool.
    pub fn prompts_for_next(&self) -> bool {
        !matches!(self, StateKind::Choice | StateKind::Succeed | StateKind::Fail)
    }

    /// Returns true if this kind carries retry/catch policies and the
    /// result-path/parameters/result-selector field set.
    pub fn supports_error_policies(&self) -> bool {
        matches!(self, StateKind::Task | StateKind::Parallel | StateKind::Map)
    }

    /// Returns true if this kind asks for the common comment/input/output
    /// fields at all.
    pub fn has_common_fields(&self) -> bool {
        !self.is_always_terminal()
    }
}

impl std::fmt::Display for StateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outgoing transition of a state: either a named target or the end of the
/// chain. Succeed/Fail states carry neither (`StateRecord.transition` is
/// `None` for them).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Next(String),
    End,
}

/// Field set shared by Task, Parallel and Map states.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_selector: Option<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub retry: Vec<RetryPolicy>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub catch: Vec<CatchPolicy>,
}

/// The single wait condition of a Wait state.
///
/// Exactly one of the four forms is present; the prompt-time selector is
/// folded away during assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WaitOn {
    Seconds(u64),
    Timestamp(String),
    SecondsPath(String),
    TimestampPath(String),
}

impl WaitOn {
    /// The ASL field name this wait form renders under.
    pub fn field(&self) -> &'static str {
        match self {
            WaitOn::Seconds(_) => "Seconds",
            WaitOn::Timestamp(_) => "Timestamp",
            WaitOn::SecondsPath(_) => "SecondsPath",
            WaitOn::TimestampPath(_) => "TimestampPath",
        }
    }

    /// The rendered field value.
    pub fn value(&self) -> Value {
        match self {
            WaitOn::Seconds(secs) => Value::from(*secs),
            WaitOn::Timestamp(ts) => Value::from(ts.clone()),
            WaitOn::SecondsPath(path) => Value::from(path.clone()),
            WaitOn::TimestampPath(path) => Value::from(path.clone()),
        }
    }
}

/// Kind-specific payload of a state record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StateBody {
    Task(TaskFields),

    Parallel {
        fields: TaskFields,
        /// Independent single-state-chain documents.
        branches: Vec<WorkflowDocument>,
    },

    Map {
        fields: TaskFields,
        /// The nested document executed per input element.
        iterator: WorkflowDocument,
    },

    Pass {
        /// Optional literal result injected into the execution.
        result: Option<Value>,
    },

    Wait(WaitOn),

    Choice {
        /// At least one rule; the assembler never constructs a Choice with
        /// zero rules.
        rules: Vec<ChoiceRule>,
        /// Optional fallback target when no rule matches.
        default: Option<String>,
    },

    Succeed,

    Fail {
        error: Option<String>,
        cause: Option<String>,
    },
}

impl StateBody {
    pub fn kind(&self) -> StateKind {
        match self {
            StateBody::Task(_) => StateKind::Task,
            StateBody::Parallel { .. } => StateKind::Parallel,
            StateBody::Map { .. } => StateKind::Map,
            StateBody::Pass { .. } => StateKind::Pass,
            StateBody::Wait(_) => StateKind::Wait,
            StateBody::Choice { .. } => StateKind::Choice,
            StateBody::Succeed => StateKind::Succeed,
            StateBody::Fail { .. } => StateKind::Fail,
        }
    }
}

/// One authored state: frozen once the assembler returns it, except for the
/// flow linker forcing the final transition of a chain to [`Transition::End`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    /// Unique within the enclosing pool, in operator-supplied casing.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,

    pub body: StateBody,

    /// `None` for Succeed/Fail and for compound-branch members whose
    /// termination is implicit until the document builder runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
}

impl StateRecord {
    /// Creates a record with no common fields and no transition.
    pub fn new(name: impl Into<String>, body: StateBody) -> Self {
        Self {
            name: name.into(),
            comment: None,
            input_path: None,
            output_path: None,
            body,
            transition: None,
        }
    }

    pub fn kind(&self) -> StateKind {
        self.body.kind()
    }

    /// Forces this record to end its chain, discarding any authored `Next`.
    ///
    /// Only kinds routed through a `Next` prompt get `End: true`. Succeed and
    /// Fail are terminal by definition, and a Choice routes exclusively
    /// through its rules and default, so none of them carry a transition.
    pub fn terminate(&mut self) {
        if self.kind().prompts_for_next() {
            self.transition = Some(Transition::End);
        } else {
            self.transition = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_predicates() {
        assert!(StateKind::Task.selects_from_pool());
        assert!(!StateKind::Pass.selects_from_pool());

        assert!(StateKind::Succeed.is_always_terminal());
        assert!(StateKind::Fail.is_always_terminal());
        assert!(!StateKind::Wait.is_always_terminal());

        assert!(StateKind::Task.prompts_for_next());
        assert!(StateKind::Wait.prompts_for_next());
        assert!(!StateKind::Choice.prompts_for_next());
        assert!(!StateKind::Succeed.prompts_for_next());

        assert!(StateKind::Map.supports_error_policies());
        assert!(!StateKind::Pass.supports_error_policies());
    }

    #[test]
    fn terminate_overrides_next() {
        let mut record = StateRecord::new("lab", StateBody::Task(TaskFields::default()));
        record.transition = Some(Transition::Next("test".into()));

        record.terminate();
        assert_eq!(record.transition, Some(Transition::End));
    }

    #[test]
    fn terminate_leaves_succeed_without_transition() {
        let mut record = StateRecord::new("done", StateBody::Succeed);
        record.terminate();
        assert_eq!(record.transition, None);
    }

    #[test]
    fn terminate_leaves_choice_without_transition() {
        let mut record = StateRecord::new(
            "route",
            StateBody::Choice {
                rules: vec![],
                default: None,
            },
        );
        record.terminate();
        assert_eq!(record.transition, None);
    }

    #[test]
    fn wait_on_field_names() {
        assert_eq!(WaitOn::Seconds(5).field(), "Seconds");
        assert_eq!(
            WaitOn::Timestamp("2026-01-01T00:00:00Z".into()).field(),
            "Timestamp"
        );
        assert_eq!(WaitOn::SecondsPath("$.delay".into()).field(), "SecondsPath");
        assert_eq!(
            WaitOn::TimestampPath("$.until".into()).field(),
            "TimestampPath"
        );
    }
}
