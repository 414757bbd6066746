//! Validated form inputs shared by the composers
//!
//! Every helper here implements the recover-by-reprompting contract: a
//! malformed answer gets a corrective note and the question is asked again.
//! The session only advances on an accepted answer.

use serde_json::{Map, Value};

use super::prompt::{Prompt, PromptError};
use crate::domain::validate_name;

/// Sentinel the reference tool used for skippable fields; treated the same
/// as an empty reply.
const OPTIONAL_SENTINEL: &str = "optional";

/// Asks for an optional free-text field. Empty (or the literal `optional`)
/// means "omit from the document".
pub fn optional_input(
    prompt: &mut dyn Prompt,
    message: &str,
) -> Result<Option<String>, PromptError> {
    let answer = prompt.input(message, None)?;
    let answer = answer.trim();
    if answer.is_empty() || answer.eq_ignore_ascii_case(OPTIONAL_SENTINEL) {
        Ok(None)
    } else {
        Ok(Some(answer.to_string()))
    }
}

/// Asks for a required state/lambda name, re-prompting until it passes the
/// charset validation.
pub fn required_name(prompt: &mut dyn Prompt, message: &str) -> Result<String, PromptError> {
    loop {
        let answer = prompt.input(message, None)?;
        match validate_name(&answer) {
            Ok(()) => return Ok(answer.trim().to_string()),
            Err(err) => prompt.note(&err.to_string()),
        }
    }
}

/// Asks for a required free-text field, re-prompting while left empty.
pub fn required_text(prompt: &mut dyn Prompt, message: &str) -> Result<String, PromptError> {
    loop {
        if let Some(answer) = optional_input(prompt, message)? {
            return Ok(answer);
        }
        prompt.note("This field is required");
    }
}

/// Asks for an optional JSON mapping (ASL `Parameters`, `ResultSelector`,
/// choice conditions). Empty means omit; anything present must decode to an
/// object, otherwise the question repeats.
pub fn optional_json_object(
    prompt: &mut dyn Prompt,
    message: &str,
) -> Result<Option<Map<String, Value>>, PromptError> {
    loop {
        match optional_input(prompt, message)? {
            None => return Ok(None),
            Some(raw) => match serde_json::from_str::<Value>(&raw) {
                Ok(Value::Object(map)) => return Ok(Some(map)),
                Ok(_) => prompt.note("Value must be a JSON object, e.g. {\"key\": \"value\"}"),
                Err(_) => prompt.note("Value is not well-formed JSON"),
            },
        }
    }
}

/// Asks for a required JSON mapping, re-prompting until one parses.
pub fn required_json_object(
    prompt: &mut dyn Prompt,
    message: &str,
) -> Result<Map<String, Value>, PromptError> {
    loop {
        if let Some(map) = optional_json_object(prompt, message)? {
            return Ok(map);
        }
        prompt.note("This field is required");
    }
}

/// Asks for an optional number, re-prompting on unparseable input.
pub fn optional_number<T: std::str::FromStr>(
    prompt: &mut dyn Prompt,
    message: &str,
) -> Result<Option<T>, PromptError> {
    loop {
        match optional_input(prompt, message)? {
            None => return Ok(None),
            Some(raw) => match raw.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => prompt.note("Value must be a number"),
            },
        }
    }
}

/// Asks for a required number.
pub fn required_number<T: std::str::FromStr>(
    prompt: &mut dyn Prompt,
    message: &str,
) -> Result<T, PromptError> {
    loop {
        if let Some(value) = optional_number(prompt, message)? {
            return Ok(value);
        }
        prompt.note("This field is required");
    }
}

/// Splits a comma-separated error-matcher answer into identifiers, falling
/// back to the given default when left blank.
pub fn error_matchers(
    prompt: &mut dyn Prompt,
    message: &str,
    default: &str,
) -> Result<Vec<String>, PromptError> {
    let answer = prompt.input(message, Some(default))?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(vec![default.to_string()]);
    }

    Ok(answer
        .split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect())
}
