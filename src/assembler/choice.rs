//! Choice-Rule Composer
//!
//! Collects the conditional branch rules of a Choice state. Every round
//! requires a condition that decodes to a JSON mapping and a target chosen
//! from the candidate pool (or the literal chain end). The loop shape
//! guarantees a Choice state is never built with zero rules.

use super::form::required_json_object;
use super::prompt::{Prompt, PromptError};
use crate::domain::ChoiceRule;

/// Sentinel offered alongside candidate targets.
pub const END_TARGET: &str = "End";

/// Sentinel offered when asking for the optional default target.
const NO_DEFAULT: &str = "None";

/// Collects at least one choice rule over the given candidate targets.
pub fn collect_rules(
    prompt: &mut dyn Prompt,
    candidates: &[String],
) -> Result<Vec<ChoiceRule>, PromptError> {
    let mut targets: Vec<String> = candidates.to_vec();
    targets.push(END_TARGET.to_string());

    let mut rules = Vec::new();
    loop {
        let condition = required_json_object(prompt, "Choice rule condition (JSON)")?;
        let target = prompt.select("Select next state", &targets)?;

        rules.push(ChoiceRule {
            condition,
            next: targets[target].clone(),
        });

        if !prompt.confirm("Do you want to add another rule?", false)? {
            break;
        }
    }

    Ok(rules)
}

/// Asks for the optional default target taken when no rule matches.
pub fn collect_default(
    prompt: &mut dyn Prompt,
    candidates: &[String],
) -> Result<Option<String>, PromptError> {
    let mut targets: Vec<String> = vec![NO_DEFAULT.to_string()];
    targets.extend(candidates.iter().cloned());

    let choice = prompt.select("Default state (when no rule matches)", &targets)?;
    if choice == 0 {
        Ok(None)
    } else {
        Ok(Some(targets[choice].clone()))
    }
}
