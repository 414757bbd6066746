//! Failure-handling policies and choice rules
//!
//! Retriers, catchers and choice rules are declarative metadata attached to a
//! state while it is being assembled. They are authored here, never executed:
//! the Step Functions service interprets them after deployment.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::name::uc_first;

/// The catch-all error matcher applied when the operator leaves the field at
/// its default.
pub const MATCH_ALL_ERRORS: &str = "States.ALL";

/// A retry policy for a Task, Parallel or Map state.
///
/// Every numeric field is optional; an omitted field is simply absent from
/// the rendered document rather than serialized as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Error identifiers this retrier matches. Never empty: defaults to
    /// `["States.ALL"]`.
    pub error_equals: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_seconds: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backoff_rate: Option<f64>,
}

impl RetryPolicy {
    /// Creates a catch-all retrier with no tuning fields.
    pub fn match_all() -> Self {
        Self {
            error_equals: vec![MATCH_ALL_ERRORS.to_string()],
            interval_seconds: None,
            max_attempts: None,
            backoff_rate: None,
        }
    }

    /// Renders this retrier as an ASL `Retry` entry.
    pub fn render(&self) -> Value {
        let mut map = Map::new();
        map.insert("ErrorEquals".into(), Value::from(self.error_equals.clone()));
        if let Some(secs) = self.interval_seconds {
            map.insert("IntervalSeconds".into(), Value::from(secs));
        }
        if let Some(attempts) = self.max_attempts {
            map.insert("MaxAttempts".into(), Value::from(attempts));
        }
        if let Some(rate) = self.backoff_rate {
            map.insert("BackoffRate".into(), Value::from(rate));
        }
        Value::Object(map)
    }
}

/// A catch policy routing matched errors to another state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchPolicy {
    /// Error identifiers this catcher matches. Never empty.
    pub error_equals: Vec<String>,

    /// Target state receiving control when the catcher fires.
    pub next: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_path: Option<String>,
}

impl CatchPolicy {
    /// Renders this catcher as an ASL `Catch` entry.
    pub fn render(&self) -> Value {
        let mut map = Map::new();
        map.insert("ErrorEquals".into(), Value::from(self.error_equals.clone()));
        map.insert("Next".into(), Value::from(uc_first(&self.next)));
        if let Some(path) = &self.result_path {
            map.insert("ResultPath".into(), Value::from(path.clone()));
        }
        Value::Object(map)
    }
}

/// One conditional branch rule of a Choice state.
///
/// The condition is opaque, caller-supplied structured data: the assembler
/// only guarantees it decoded to a JSON mapping at the prompt boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceRule {
    /// The condition expression, e.g. `{"Variable": "$.ok", "BooleanEquals": true}`.
    pub condition: Map<String, Value>,

    /// Target state when the condition holds. May be the literal `End`.
    pub next: String,
}

impl ChoiceRule {
    /// Renders this rule as an ASL `Choices` entry: the condition mapping
    /// with the normalized target spliced in as `Next`.
    pub fn render(&self) -> Value {
        let mut map = self.condition.clone();
        map.insert("Next".into(), Value::from(uc_first(&self.next)));
        Value::Object(map)
    }
}
