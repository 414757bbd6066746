//! # Interactive workflow assembler
//!
//! Walks an operator through building a Step Functions state machine, one
//! prompt at a time, and hands back an internally consistent
//! [`WorkflowDocument`](crate::domain::WorkflowDocument).
//!
//! ## Layering
//!
//! | Component | Role |
//! |-----------|------|
//! | [`prompt`] | Terminal/scripted answer boundary |
//! | [`form`] | Validated single-field inputs (re-prompt on rejection) |
//! | [`error_policy`] | Retrier/catcher collection loops |
//! | [`choice`] | Choice-rule collection loop + default target |
//! | [`state_form`] | One state's full field set, per-kind question table |
//! | [`linker`] | The session loop over a candidate pool |
//!
//! The whole assembler is single-threaded and cooperative: nested sessions
//! (Parallel branches, Map iterators) block their parent until they return.
//! Aborting the terminal session aborts the whole build; no partial document
//! is ever committed.

mod choice;
mod error_policy;
mod form;
mod linker;
mod prompt;
mod state_form;

pub use linker::{link, LinkMode, DONE_SENTINEL};
pub use prompt::{no, pick, text, yes, Answer, Prompt, PromptError, ScriptedPrompt, TermPrompt};
pub use state_form::{assemble, AssembleError};
