mod cli;
mod ui;

use anyhow::Result;
use artifetch_lib::logging::initialize_logging;
use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let traceback = cli.traceback;
    if traceback {
        // SAFETY: no other thread exists yet; the runtime is built below.
        unsafe { std::env::set_var("RUST_LIB_BACKTRACE", "1") };
    }

    initialize_logging(cli.verbose);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match runtime.block_on(cli.run()) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // Returning the error prints the full report with its backtrace.
        Err(e) if traceback => Err(e),
        Err(e) => {
            ui::error(&format!("{e:#}"));
            Ok(ExitCode::FAILURE)
        }
    }
}
