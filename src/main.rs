//! forge - Scaffold AWS Lambda packages and assemble Step Functions

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = forge_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
