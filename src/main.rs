//! pagepatch - idempotent snippet injection for static HTML pages

use std::process::ExitCode;

fn main() -> ExitCode {
    match pagepatch::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
