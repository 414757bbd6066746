//! `forge new` — project scaffolding command

use anyhow::Result;

use super::output::Output;
use crate::domain::validate_name;
use crate::scaffold::{Project, ScaffoldFlags};

pub fn run(output: &Output, name: &str, flags: ScaffoldFlags) -> Result<()> {
    validate_name(name)?;

    let root = std::env::current_dir()?.join(name);
    output.verbose_ctx("new", &format!("Scaffolding project at: {}", root.display()));

    let project = Project::init(root, flags)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "project": name,
            "root": project.root().display().to_string(),
            "region": project.config().region,
        }));
    } else {
        output.success(&format!(
            "Created project '{}' at {}",
            name,
            project.root().display()
        ));
        output.success("Run 'forge add <lambda>' inside it to scaffold a lambda package.");
    }

    Ok(())
}
