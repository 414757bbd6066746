//! Domain models for Forge CLI
//!
//! The workflow-document data model and its pure assembly logic, without any
//! I/O or prompting concerns.

mod document;
mod name;
mod policy;
mod state;

pub use document::{DocumentError, WorkflowDocument};
pub use name::{camel_to_snake, uc_first, validate_name, NameError};
pub use policy::{CatchPolicy, ChoiceRule, RetryPolicy, MATCH_ALL_ERRORS};
pub use state::{StateBody, StateKind, StateRecord, TaskFields, Transition, WaitOn};
