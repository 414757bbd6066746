//! Prompt boundary for the interactive assembler
//!
//! All operator interaction goes through the [`Prompt`] trait so the
//! assembler can run against a real terminal ([`TermPrompt`], backed by
//! dialoguer) or a canned answer script ([`ScriptedPrompt`]) in tests.
//!
//! Validation lives above this trait: composers loop on rejected answers with
//! a corrective note, so a bad answer never advances the session and never
//! escapes as an error.

use std::collections::VecDeque;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Prompt failed: {0}")]
    Terminal(#[from] dialoguer::Error),

    #[error("Scripted session ran out of answers at prompt '{0}'")]
    ScriptExhausted(String),

    #[error("Scripted answer '{answer}' does not fit prompt '{prompt}'")]
    ScriptMismatch { prompt: String, answer: String },
}

/// One suspend-and-resume point: ask, wait for the operator, return.
///
/// No two prompts are ever outstanding at once; nested sessions block their
/// parent until they return.
pub trait Prompt {
    /// Free-text input. An empty reply is allowed and returned as-is.
    fn input(&mut self, message: &str, initial: Option<&str>) -> Result<String, PromptError>;

    /// Selection from a fixed list; returns the chosen index.
    fn select(&mut self, message: &str, items: &[String]) -> Result<usize, PromptError>;

    /// Yes/no confirmation.
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError>;

    /// Corrective message shown before a re-prompt. Not a question.
    fn note(&mut self, message: &str);
}

/// Terminal-backed prompt using dialoguer.
#[derive(Debug, Default)]
pub struct TermPrompt;

impl TermPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Prompt for TermPrompt {
    fn input(&mut self, message: &str, initial: Option<&str>) -> Result<String, PromptError> {
        let mut prompt = dialoguer::Input::<String>::new()
            .with_prompt(message)
            .allow_empty(true);
        if let Some(initial) = initial {
            prompt = prompt.with_initial_text(initial);
        }
        Ok(prompt.interact_text()?)
    }

    fn select(&mut self, message: &str, items: &[String]) -> Result<usize, PromptError> {
        Ok(dialoguer::Select::new()
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact()?)
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError> {
        Ok(dialoguer::Confirm::new()
            .with_prompt(message)
            .default(default)
            .interact()?)
    }

    fn note(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

/// One canned operator answer for a [`ScriptedPrompt`] session.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Reply to an `input` prompt.
    Text(String),
    /// Reply to a `select` prompt, matched against the item list.
    Pick(String),
    /// Reply to a `confirm` prompt.
    Yes(bool),
}

impl Answer {
    fn describe(&self) -> String {
        match self {
            Answer::Text(t) => t.clone(),
            Answer::Pick(p) => p.clone(),
            Answer::Yes(y) => y.to_string(),
        }
    }
}

/// Deterministic prompt fed from a queue of canned answers.
///
/// Identical scripts produce identical sessions, which is what makes the
/// idempotence and scenario tests possible without a terminal.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Answer>,
    notes: Vec<String>,
    prompts_issued: usize,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            notes: Vec::new(),
            prompts_issued: 0,
        }
    }

    /// Corrective notes emitted so far (rejected answers leave a trace here).
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Number of prompts issued over the session's lifetime.
    pub fn prompts_issued(&self) -> usize {
        self.prompts_issued
    }

    /// True if every scripted answer was consumed.
    pub fn is_drained(&self) -> bool {
        self.answers.is_empty()
    }

    fn next(&mut self, prompt: &str) -> Result<Answer, PromptError> {
        self.prompts_issued += 1;
        self.answers
            .pop_front()
            .ok_or_else(|| PromptError::ScriptExhausted(prompt.to_string()))
    }
}

impl Prompt for ScriptedPrompt {
    fn input(&mut self, message: &str, initial: Option<&str>) -> Result<String, PromptError> {
        match self.next(message)? {
            Answer::Text(text) if text.is_empty() => {
                // An empty scripted reply accepts the pre-filled value, like
                // pressing enter on a terminal input.
                Ok(initial.unwrap_or_default().to_string())
            }
            Answer::Text(text) => Ok(text),
            other => Err(PromptError::ScriptMismatch {
                prompt: message.to_string(),
                answer: other.describe(),
            }),
        }
    }

    fn select(&mut self, message: &str, items: &[String]) -> Result<usize, PromptError> {
        match self.next(message)? {
            Answer::Pick(pick) => {
                items
                    .iter()
                    .position(|item| item == &pick)
                    .ok_or(PromptError::ScriptMismatch {
                        prompt: message.to_string(),
                        answer: pick,
                    })
            }
            other => Err(PromptError::ScriptMismatch {
                prompt: message.to_string(),
                answer: other.describe(),
            }),
        }
    }

    fn confirm(&mut self, message: &str, _default: bool) -> Result<bool, PromptError> {
        match self.next(message)? {
            Answer::Yes(answer) => Ok(answer),
            other => Err(PromptError::ScriptMismatch {
                prompt: message.to_string(),
                answer: other.describe(),
            }),
        }
    }

    fn note(&mut self, message: &str) {
        self.notes.push(message.to_string());
    }
}

/// Shorthand constructors for test scripts.
pub fn text(s: &str) -> Answer {
    Answer::Text(s.to_string())
}

pub fn pick(s: &str) -> Answer {
    Answer::Pick(s.to_string())
}

pub fn yes() -> Answer {
    Answer::Yes(true)
}

pub fn no() -> Answer {
    Answer::Yes(false)
}
