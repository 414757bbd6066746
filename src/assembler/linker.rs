//! Flow Linker
//!
//! Drives the interactive session: one loop iteration per authored state,
//! with an accumulator instead of the unbounded recursion an operator-driven
//! flow invites. The loop owns the candidate pool for its session; nested
//! sessions (Parallel branches, Map iterators) get their own disjoint copy
//! and never mutate this one.
//!
//! Chain termination always wins: whenever a session ends (operator declines
//! to continue, pool exhausted, or a single-state iterator completes), the
//! final record is forced terminal even if the operator had picked a `Next`
//! target for it.

use super::prompt::{Prompt, PromptError};
use super::state_form::{assemble, AssembleError};
use crate::domain::{uc_first, StateKind, StateRecord, Transition};

/// Sentinel entry offered alongside the candidate pool; selecting it ends
/// the session without producing a record.
pub const DONE_SENTINEL: &str = "Done";

/// What kind of pool a linker session runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMode {
    /// The top-level state machine.
    Root,
    /// Members of a Parallel state; each becomes its own branch document.
    ParallelBranch,
    /// The single state of a Map iterator.
    MapIterator,
}

impl LinkMode {
    /// Branch members never prompt for `Next`; their ordering is implicit.
    fn inside_branch(&self) -> bool {
        !matches!(self, LinkMode::Root)
    }

    /// The continue question for this session, or `None` for Map iterators,
    /// which hold exactly one state and end without asking.
    fn continue_message(&self) -> Option<&'static str> {
        match self {
            LinkMode::Root => Some("Do you want to add another state?"),
            LinkMode::ParallelBranch => Some("Add another lambda to the Parallel branch?"),
            LinkMode::MapIterator => None,
        }
    }
}

/// Runs one interactive session over `pool`, returning the ordered chain.
///
/// An empty pool returns an empty chain without issuing a single prompt.
/// When a state declares `Next(target)` and the session continues, the next
/// round is pinned to `target`, so an authored transition can never dangle.
pub fn link(
    prompt: &mut dyn Prompt,
    label: &str,
    pool: &[String],
    mode: LinkMode,
) -> Result<Vec<StateRecord>, AssembleError> {
    let mut pool: Vec<String> = pool.to_vec();
    if pool.is_empty() {
        return Ok(Vec::new());
    }

    let mut used: Vec<String> = Vec::new();
    let mut chain: Vec<StateRecord> = Vec::new();
    let mut pinned: Option<String> = None;

    loop {
        let kind = select_kind(prompt)?;

        let name = match pinned.take() {
            // The previous record's Next target decides this round's name.
            Some(target) => target,
            None => match select_name(prompt, kind, label, &pool, &used)? {
                Some(name) => name,
                None => break,
            },
        };

        pool.retain(|candidate| uc_first(candidate) != uc_first(&name));
        used.push(uc_first(&name));

        let record = assemble(prompt, &name, kind, &pool, mode.inside_branch())?;
        pinned = match &record.transition {
            Some(Transition::Next(target)) => Some(target.clone()),
            _ => None,
        };
        chain.push(record);

        let message = match mode.continue_message() {
            Some(message) if !pool.is_empty() => message,
            _ => {
                terminate_chain(&mut chain);
                break;
            }
        };

        if !prompt.confirm(message, true)? {
            terminate_chain(&mut chain);
            break;
        }
    }

    Ok(chain)
}

/// Forces the final record of the chain terminal, discarding any authored
/// `Next`. Chain termination always wins over an explicit continuation.
fn terminate_chain(chain: &mut [StateRecord]) {
    if let Some(last) = chain.last_mut() {
        last.terminate();
    }
}

fn select_kind(prompt: &mut dyn Prompt) -> Result<StateKind, PromptError> {
    let kinds: Vec<String> = StateKind::ALL.iter().map(|k| k.to_string()).collect();
    let choice = prompt.select("Choose a state type", &kinds)?;
    Ok(StateKind::ALL[choice])
}

/// Task-like kinds pick an existing deployable from the pool (plus the Done
/// sentinel); every other kind takes a validated freeform name unique within
/// this session.
fn select_name(
    prompt: &mut dyn Prompt,
    kind: StateKind,
    label: &str,
    pool: &[String],
    used: &[String],
) -> Result<Option<String>, PromptError> {
    if kind.selects_from_pool() {
        let mut items: Vec<String> = pool.to_vec();
        items.push(DONE_SENTINEL.to_string());

        let choice = prompt.select(label, &items)?;
        if items[choice] == DONE_SENTINEL {
            return Ok(None);
        }
        return Ok(Some(items[choice].clone()));
    }

    loop {
        let name = super::form::required_name(prompt, "State name (e.g. Pending)")?;
        let key = uc_first(&name);
        let collides =
            used.contains(&key) || pool.iter().any(|candidate| uc_first(candidate) == key);
        if collides {
            prompt.note("That name is already taken in this state machine");
        } else {
            return Ok(Some(name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::prompt::{no, pick, text, yes, Answer, ScriptedPrompt};
    use crate::domain::StateBody;

    /// Answers for the Task field block: three common fields, three
    /// task fields, retrier/catcher declined.
    fn task_fields() -> Vec<Answer> {
        vec![
            text(""),
            text(""),
            text(""),
            text(""),
            text(""),
            text(""),
            no(),
            no(),
        ]
    }

    #[test]
    fn empty_pool_returns_empty_chain_without_prompting() {
        let mut prompt = ScriptedPrompt::new([]);
        let chain = link(&mut prompt, "Add lambda", &[], LinkMode::Root).unwrap();

        assert!(chain.is_empty());
        assert_eq!(prompt.prompts_issued(), 0);
    }

    #[test]
    fn done_sentinel_ends_the_session_with_no_record() {
        let pool = vec!["lab".to_string()];
        let mut prompt = ScriptedPrompt::new([pick("Task"), pick("Done")]);

        let chain = link(&mut prompt, "Add lambda", &pool, LinkMode::Root).unwrap();
        assert!(chain.is_empty());
        assert!(prompt.is_drained());
    }

    #[test]
    fn two_sequential_tasks_link_and_terminate() {
        let pool = vec!["lab".to_string(), "test".to_string()];
        let mut script = vec![pick("Task"), pick("lab")];
        script.extend(task_fields());
        script.push(pick("test")); // Next target
        script.push(yes()); // continue
        script.push(pick("Task")); // kind for the pinned round; no name prompt
        script.extend(task_fields());
        // Pool is exhausted after the pinned round: no Next prompt, no
        // continue prompt, forced End.

        let mut prompt = ScriptedPrompt::new(script);
        let chain = link(&mut prompt, "Add lambda", &pool, LinkMode::Root).unwrap();

        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].name, "lab");
        assert_eq!(chain[0].transition, Some(Transition::Next("test".into())));
        assert_eq!(chain[1].name, "test");
        assert_eq!(chain[1].transition, Some(Transition::End));
        assert!(prompt.is_drained());
    }

    #[test]
    fn declining_continue_forces_terminal_over_authored_next() {
        let pool = vec!["lab".to_string(), "test".to_string()];
        let mut script = vec![pick("Task"), pick("lab")];
        script.extend(task_fields());
        script.push(pick("test")); // operator picks a continuation target
        script.push(no()); // but then ends the session

        let mut prompt = ScriptedPrompt::new(script);
        let chain = link(&mut prompt, "Add lambda", &pool, LinkMode::Root).unwrap();

        assert_eq!(chain.len(), 1);
        // Chain termination wins over the explicit Next.
        assert_eq!(chain[0].transition, Some(Transition::End));
    }

    #[test]
    fn freeform_names_must_be_unique_within_the_session() {
        let pool = vec!["lab".to_string()];
        let mut prompt = ScriptedPrompt::new([
            pick("Pass"),
            text("lab"),     // collides with the pool
            text("pending"), // accepted
            text(""),        // Comment
            text(""),        // InputPath
            text(""),        // OutputPath
            text(""),        // Result
            pick("End"),     // Next
            no(),            // stop
        ]);

        let chain = link(&mut prompt, "Add lambda", &pool, LinkMode::Root).unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].name, "pending");
        assert_eq!(prompt.notes().len(), 1);
    }

    #[test]
    fn map_iterator_collects_exactly_one_state() {
        let pool = vec!["worker".to_string(), "other".to_string()];
        let mut script = vec![pick("Task"), pick("worker")];
        script.extend(task_fields());
        // No Next prompt (inside branch), no continue prompt (single state).

        let mut prompt = ScriptedPrompt::new(script);
        let chain = link(&mut prompt, "Add lambda to Map Iterator", &pool, LinkMode::MapIterator)
            .unwrap();

        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].transition, Some(Transition::End));
        assert!(prompt.is_drained());
    }

    #[test]
    fn parallel_branch_members_carry_no_next() {
        let pool = vec!["alpha".to_string(), "beta".to_string()];
        let mut script = vec![pick("Task"), pick("alpha")];
        script.extend(task_fields());
        script.push(yes()); // add another branch member
        script.push(pick("Task"));
        script.push(pick("beta"));
        script.extend(task_fields());
        // Pool exhausted: session ends, last record forced terminal.

        let mut prompt = ScriptedPrompt::new(script);
        let chain =
            link(&mut prompt, "Add lambda to Parallel branch", &pool, LinkMode::ParallelBranch)
                .unwrap();

        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].transition, None);
        assert_eq!(chain[1].transition, Some(Transition::End));
    }

    #[test]
    fn succeed_state_ends_chain_without_transition() {
        let pool = vec!["lab".to_string()];
        let mut prompt = ScriptedPrompt::new([
            pick("Succeed"),
            text("done"),
            no(), // stop after one state
        ]);

        let chain = link(&mut prompt, "Add lambda", &pool, LinkMode::Root).unwrap();
        assert_eq!(chain.len(), 1);
        assert!(matches!(chain[0].body, StateBody::Succeed));
        assert_eq!(chain[0].transition, None);
    }
}
