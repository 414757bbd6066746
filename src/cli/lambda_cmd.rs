//! `forge add` — lambda scaffolding command
//!
//! Inside a project the package lands under `packages/` with a scoped npm
//! name; outside one it is scaffolded standalone in the current directory.

use anyhow::Result;

use super::output::Output;
use crate::scaffold::config::ForgeConfig;
use crate::scaffold::lambda::{self, LambdaTarget};
use crate::scaffold::Project;

pub fn run(output: &Output, name: &str, install: bool) -> Result<()> {
    let (target, region) = match Project::open_current() {
        Ok(project) => {
            output.verbose_ctx(
                "add",
                &format!("Adding to project at: {}", project.root().display()),
            );
            let region = project.config().region.clone();
            (LambdaTarget::in_project(&project, name), region)
        }
        Err(_) => {
            let cwd = std::env::current_dir()?;
            output.verbose_ctx("add", "No project found, scaffolding standalone");
            let region = ForgeConfig::load(&cwd)?.region;
            (LambdaTarget::standalone(&cwd, name), region)
        }
    };

    lambda::add(&target, name, &region, install)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "lambda": name,
            "package": target.package_name,
            "path": target.lambda_dir.display().to_string(),
        }));
    } else {
        output.success(&format!(
            "Created lambda '{}' at {}",
            name,
            target.lambda_dir.display()
        ));
        output.success(&format!(
            "Terraform scripts written to {}",
            target.terraform_dir.display()
        ));
    }

    Ok(())
}
