//! Command-line interface

mod app;
mod lambda_cmd;
mod output;
mod project_cmd;
mod sfn_cmd;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
