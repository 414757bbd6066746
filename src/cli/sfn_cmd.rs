//! `forge sfn` — interactive state-machine assembly
//!
//! Enumerates the project's lambda packages as candidate Task states, runs
//! the interactive linker over them, and writes the resulting definition
//! into the `aws_sfn_state_machine` Terraform resource.

use anyhow::Result;

use super::output::Output;
use crate::assembler::{link, LinkMode, TermPrompt};
use crate::domain::WorkflowDocument;
use crate::scaffold::templates::TemplateVars;
use crate::scaffold::{terraform, Project};

pub fn run(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let pool = project.lambda_names()?;

    output.verbose_ctx("sfn", &format!("Candidate lambdas: {:?}", pool));

    if pool.is_empty() {
        output.success("No lambda packages found under packages/. Run 'forge add <lambda>' first.");
        return Ok(());
    }

    let mut prompt = TermPrompt::new();
    let chain = link(
        &mut prompt,
        "What lambda would you like to add to the state machine?",
        &pool,
        LinkMode::Root,
    )?;

    if chain.is_empty() {
        output.success("No states selected, nothing written.");
        return Ok(());
    }

    let document = WorkflowDocument::from_chain(chain)?;
    let vars = TemplateVars::for_lambda("sfn", &project.config().region, "../packages/");
    terraform::write_sfn_scripts(&project.terraform_dir(), &document, &vars)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "start_at": document.start(),
            "states": document.state_names(),
            "terraform": project.terraform_dir().display().to_string(),
        }));
    } else {
        output.success(&format!(
            "State machine with {} state(s) written to {}",
            document.states().len(),
            project.terraform_dir().join("aws_sfn_state_machine.tf").display()
        ));
    }

    Ok(())
}
