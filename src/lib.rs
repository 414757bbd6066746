//! forge - Scaffold AWS Lambda packages and assemble Step Functions
//!
//! forge generates Node.js lambda packages with the Terraform scripts that
//! deploy them, and interactively assembles AWS Step Functions state-machine
//! definitions (Amazon States Language) from the lambdas of a project.

pub mod assembler;
pub mod cli;
pub mod domain;
pub mod scaffold;

pub use domain::{StateKind, StateRecord, Transition, WorkflowDocument};
