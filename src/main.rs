mod cli;
mod commands;
mod config;
mod engine;
mod error;
mod page_range;
mod pdf;
mod workspace;

use clap::Parser;
use cli::Cli;
use config::RunConfig;
use engine::LopdfEngine;
use error::RunError;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match RunConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => return report(err, false),
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    match commands::run(&config, &LopdfEngine, &cli.inputs, &mut input, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(err, config.stack_trace),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "pdfpick=warn",
        1 => "pdfpick=info",
        _ => "pdfpick=debug",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn report(err: RunError, stack_trace: bool) -> ExitCode {
    ExitCode::from(report_to(&mut io::stderr().lock(), err, stack_trace))
}

/// Write a fatal error in long or short form and return the exit code.
fn report_to(w: &mut dyn Write, err: RunError, stack_trace: bool) -> u8 {
    let code = err.exit_code();
    let err = anyhow::Error::from(err);
    // stderr is all we have left; nothing to do if it fails
    let _ = if stack_trace {
        writeln!(w, "Fatal: {:?}", err)
    } else {
        writeln!(w, "{:#}", err)
    };
    code
}
