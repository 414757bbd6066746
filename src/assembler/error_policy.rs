//! Error-Policy Composer
//!
//! Collects retriers and catchers for Task, Parallel and Map states. Each
//! round gathers one policy, drops the fields left blank, and asks whether
//! to add another. The calling state form gates the first round behind its
//! own "do you want to add a retrier/catcher?" confirmation.

use super::form::{error_matchers, optional_input, optional_number, required_name};
use super::prompt::{Prompt, PromptError};
use crate::domain::{CatchPolicy, RetryPolicy, MATCH_ALL_ERRORS};

/// Collects one or more retry policies.
pub fn collect_retriers(prompt: &mut dyn Prompt) -> Result<Vec<RetryPolicy>, PromptError> {
    let mut policies = Vec::new();

    loop {
        let error_equals = error_matchers(prompt, "Retry ErrorEquals", MATCH_ALL_ERRORS)?;
        let interval_seconds = optional_number(prompt, "IntervalSeconds (optional)")?;
        let max_attempts = optional_number(prompt, "MaxAttempts (optional)")?;
        let backoff_rate = optional_number(prompt, "BackoffRate (optional)")?;

        policies.push(RetryPolicy {
            error_equals,
            interval_seconds,
            max_attempts,
            backoff_rate,
        });

        if !prompt.confirm("Do you want to add another Retry?", false)? {
            break;
        }
    }

    Ok(policies)
}

/// Collects one or more catch policies.
pub fn collect_catchers(prompt: &mut dyn Prompt) -> Result<Vec<CatchPolicy>, PromptError> {
    let mut policies = Vec::new();

    loop {
        let error_equals = error_matchers(prompt, "Catch ErrorEquals", MATCH_ALL_ERRORS)?;
        let next = required_name(prompt, "Catch Next state")?;
        let result_path = optional_input(prompt, "Catch ResultPath (optional)")?;

        policies.push(CatchPolicy {
            error_equals,
            next,
            result_path,
        });

        if !prompt.confirm("Do you want to add another Catch?", false)? {
            break;
        }
    }

    Ok(policies)
}
