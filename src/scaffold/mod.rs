//! Project and lambda scaffolding
//!
//! Everything `forge new` and `forge add` put on disk: directory layout,
//! package templates, and the Terraform scripts under `terraform/`.

pub mod config;
pub mod lambda;
pub mod project;
pub mod templates;
pub mod terraform;

pub use config::ForgeConfig;
pub use project::{Project, ScaffoldFlags};
