//! Binary entrypoint for the `kinspect` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // `.env` may provide KINSPECT_ROOT; a missing file is fine.
    let _ = dotenvy::dotenv();
    // Recording is handled in commands::dispatch via KINSPECT_RECORD=<file>.
    match kinspect::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
