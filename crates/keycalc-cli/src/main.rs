//! keycalc: keypad calculator for the terminal
//!
//! ## Usage
//!
//! ```bash
//! keycalc run 1 2 + 3 =            # 15, then the log line 12 + 3 = 15
//! keycalc run --script "2+3*4="    # left to right: 20
//! keycalc -o json run 5 / 0 =      # final display, state and log as JSON
//! keycalc keys 7 Enter Escape      # keyboard key names
//! keycalc tui                      # interactive keypad
//! ```

use clap::Parser;
use keycalc_cli::{logging, runner, Cli, CliConfig, CliResult, Commands, Verbosity};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);

    match cli.command {
        Commands::Run(args) => {
            logging::init(&config)?;
            runner::run_tokens(&config, &args)
        }
        Commands::Keys(args) => {
            logging::init(&config)?;
            runner::run_keys(&config, &args)
        }
        // Log lines on stderr would tear the alternate screen
        Commands::Tui => runner::run_tui(&config),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.into())
        .with_output(cli.output.into())
        .with_log_format(cli.log_format.into())
}
