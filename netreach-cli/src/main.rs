//! CLI entry point for netreach.
//!
//! Parses arguments, installs logging (widened to debug output when the
//! command asks for it), computes the integration summary, prints it to
//! stdout, and maps failures to a non-zero exit code after logging their
//! stable error codes.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use netreach_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LogSettings, LoggingError},
};
use tracing::{error, field};

fn try_main(cli: Cli) -> Result<()> {
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match LogSettings::from_env(cli.debug_requested()) {
        Ok(settings) => {
            logging::init_logging(&settings);
        }
        Err(err) => {
            report_logging_init_error(&err);
            return ExitCode::FAILURE;
        }
    }

    if let Err(err) = try_main(cli) {
        let (code, graph_source_code) = err
            .downcast_ref::<CliError>()
            .and_then(|cli_error| match cli_error {
                CliError::Core(core) => Some((Some(core.code()), core.graph_source_code())),
                _ => None,
            })
            .unwrap_or((None, None));

        let code_field = code.map(|code| field::display(code.as_str()));
        let graph_source_code_field = graph_source_code.map(|code| field::display(code.as_str()));

        error!(
            error = %err,
            code = code_field,
            graph_source_code = graph_source_code_field,
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
