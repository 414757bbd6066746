//! State and package name handling
//!
//! Authored names arrive in whatever case the lambda directories use
//! (`processOrder`, `process-order`). State machine keys are upper-cased on
//! the first character (`ProcessOrder`), while Terraform resource labels are
//! snake_case (`process_order`). Both normalizations are deterministic so two
//! runs over the same answers produce identical documents.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum NameError {
    #[error("Name may only include letters, numbers, underscores and hyphens, got '{0}'")]
    InvalidChars(String),

    #[error("Name must not be empty")]
    Empty,
}

/// Upper-cases the first character, leaving the rest untouched.
///
/// This is the normalization applied to `StartAt`, state keys and every
/// transition target before the document is rendered.
pub fn uc_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-cases the first character, leaving the rest untouched.
fn lc_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts a camel-case name to snake_case for Terraform resource labels.
///
/// Splits on upper-case boundaries, lower-cases, joins with underscores:
/// `processOrder` -> `process_order`, `ProcessOrder` -> `process_order`.
/// Hyphens are preserved; callers targeting Terraform labels replace them.
pub fn camel_to_snake(name: &str) -> String {
    let name = lc_first(name);
    let mut result = String::with_capacity(name.len() + 4);

    for c in name.chars() {
        if c.is_uppercase() {
            result.push('_');
            for lower in c.to_lowercase() {
                result.push(lower);
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Validates a state or lambda name at the prompt boundary.
///
/// Accepts letters, numbers, underscores and hyphens. Rejection here always
/// leads to a re-prompt, never to a document-level error.
pub fn validate_name(input: &str) -> Result<(), NameError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(NameError::Empty);
    }

    if input
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        Ok(())
    } else {
        Err(NameError::InvalidChars(input.to_string()))
    }
}
