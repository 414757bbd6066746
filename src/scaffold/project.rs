//! Project scaffolding
//!
//! Handles `forge new` and locates the project root for the other commands.
//! A directory counts as a project root when it has a `packages/` directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use thiserror::Error;

use super::config::ForgeConfig;
use super::templates;
use crate::domain::camel_to_snake;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a forge project. Run 'forge new <project>' first.")]
    NotInProject,

    #[error("Failed to initialize git in {0}")]
    GitInitFailed(PathBuf),

    #[error("Failed to install dependencies in {0}")]
    InstallFailed(PathBuf),
}

/// Side effects `forge new` / `forge add` may skip, for CI and tests.
#[derive(Debug, Clone, Copy)]
pub struct ScaffoldFlags {
    pub git: bool,
    pub install: bool,
}

impl Default for ScaffoldFlags {
    fn default() -> Self {
        Self {
            git: true,
            install: true,
        }
    }
}

/// A forge project on disk.
pub struct Project {
    root: PathBuf,
    config: ForgeConfig,
}

impl Project {
    /// Opens an existing project at the given root.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.join("packages").is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = ForgeConfig::load(&root)?;
        Ok(Self { root, config })
    }

    /// Opens the project at the current directory or one of its parents.
    pub fn open_current() -> Result<Self> {
        let root = Self::find_project_root().ok_or(ProjectError::NotInProject)?;
        Self::open(root)
    }

    /// Walks upward looking for a `packages/` directory.
    pub fn find_project_root() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            if current.join("packages").is_dir() {
                return Some(current);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Scaffolds a new project under `root`.
    ///
    /// Creates `packages/` and `terraform/`, the project `package.json` and
    /// `lerna.json`, a `.gitignore` and `forge.toml`, then optionally runs
    /// `git init` and installs the workspace tooling. Idempotent: existing
    /// files are left alone.
    pub fn init(root: impl Into<PathBuf>, flags: ScaffoldFlags) -> Result<Self> {
        let root = root.into();

        for dir in ["packages", "terraform"] {
            let path = root.join(dir);
            fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }

        let package_name = project_package_name(&root);
        write_if_missing(
            &root.join("package.json"),
            &templates::project_package_json(&package_name),
        )?;
        write_if_missing(&root.join("lerna.json"), templates::LERNA_JSON)?;
        write_if_missing(&root.join(".gitignore"), templates::GITIGNORE)?;

        if !root.join("forge.toml").exists() {
            ForgeConfig::default().save(&root)?;
        }

        if flags.git && !root.join(".git").is_dir() {
            init_git(&root)?;
        }
        if flags.install {
            install_workspace_tooling(&root)?;
        }

        Self::open(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    pub fn packages_dir(&self) -> PathBuf {
        self.root.join(&self.config.package_directory)
    }

    pub fn terraform_dir(&self) -> PathBuf {
        self.root.join("terraform")
    }

    /// Names of the lambda packages: subdirectories of `packages/` that hold
    /// a `package.json`. These are the candidate states for `forge sfn`.
    pub fn lambda_names(&self) -> Result<Vec<String>> {
        let packages_dir = self.packages_dir();
        let entries = fs::read_dir(&packages_dir).with_context(|| {
            format!(
                "Failed to read packages directory: {}",
                packages_dir.display()
            )
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            if !entry.path().join("package.json").is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}

/// Derives the npm package name from the project directory: snake boundaries
/// folded to hyphens.
fn project_package_name(root: &Path) -> String {
    let dir_name = root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("forge-project");

    camel_to_snake(dir_name).replace('_', "-")
}

pub(crate) fn write_if_missing(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    fs::write(path, contents).with_context(|| format!("Failed to write: {}", path.display()))
}

fn init_git(root: &Path) -> Result<()> {
    let status = Command::new("git")
        .arg("init")
        .current_dir(root)
        .status()
        .with_context(|| format!("Failed to run git init in {}", root.display()))?;

    if !status.success() {
        return Err(ProjectError::GitInitFailed(root.to_path_buf()).into());
    }
    Ok(())
}

fn install_workspace_tooling(root: &Path) -> Result<()> {
    let status = Command::new("npm")
        .args(["install", "lerna"])
        .current_dir(root)
        .status()
        .with_context(|| format!("Failed to run npm install in {}", root.display()))?;

    if !status.success() {
        return Err(ProjectError::InstallFailed(root.to_path_buf()).into());
    }
    Ok(())
}

/// Runs `npm install` for a package, used by the lambda scaffolder.
pub fn npm_install(dir: &Path, packages: &[&str], dev: bool) -> Result<()> {
    let mut args = vec!["install"];
    args.extend(packages);
    if dev {
        args.push("-D");
    }

    let status = Command::new("npm")
        .args(&args)
        .current_dir(dir)
        .status()
        .with_context(|| format!("Failed to run npm install in {}", dir.display()))?;

    if !status.success() {
        return Err(ProjectError::InstallFailed(dir.to_path_buf()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_side_effects() -> ScaffoldFlags {
        ScaffoldFlags {
            git: false,
            install: false,
        }
    }

    #[test]
    fn init_creates_structure() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path(), no_side_effects()).unwrap();

        assert!(project.packages_dir().is_dir());
        assert!(project.terraform_dir().is_dir());
        assert!(project.root().join("package.json").is_file());
        assert!(project.root().join("lerna.json").is_file());
        assert!(project.root().join(".gitignore").is_file());
        assert!(project.root().join("forge.toml").is_file());
    }

    #[test]
    fn init_is_idempotent() {
        let dir = TempDir::new().unwrap();
        Project::init(dir.path(), no_side_effects()).unwrap();

        let marker = dir.path().join("package.json");
        fs::write(&marker, "{\"name\": \"edited\"}").unwrap();

        Project::init(dir.path(), no_side_effects()).unwrap();
        assert!(fs::read_to_string(&marker).unwrap().contains("edited"));
    }

    #[test]
    fn open_requires_packages_dir() {
        let dir = TempDir::new().unwrap();
        assert!(Project::open(dir.path()).is_err());

        fs::create_dir(dir.path().join("packages")).unwrap();
        assert!(Project::open(dir.path()).is_ok());
    }

    #[test]
    fn lambda_names_skip_non_packages() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path(), no_side_effects()).unwrap();

        let packages = project.packages_dir();
        fs::create_dir(packages.join("lab")).unwrap();
        fs::write(packages.join("lab").join("package.json"), "{}").unwrap();
        fs::create_dir(packages.join("test")).unwrap();
        fs::write(packages.join("test").join("package.json"), "{}").unwrap();
        // No package.json, not a candidate.
        fs::create_dir(packages.join("scratch")).unwrap();
        // Plain file, not a candidate.
        fs::write(packages.join("README.md"), "docs").unwrap();

        assert_eq!(
            project.lambda_names().unwrap(),
            vec!["lab".to_string(), "test".to_string()]
        );
    }

    #[test]
    fn package_name_derives_from_directory() {
        assert_eq!(
            project_package_name(Path::new("/tmp/orderFlow")),
            "order-flow"
        );
        assert_eq!(project_package_name(Path::new("/tmp/demo")), "demo");
    }
}
