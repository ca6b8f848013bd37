pub mod merge;
pub mod pick;

#[cfg(test)]
pub(crate) mod fake;

use crate::config::RunConfig;
use crate::engine::DocumentEngine;
use crate::error::RunError;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// One run: several inputs are merged as given, a single input goes
/// through split, pick, merge.
pub fn run(
    config: &RunConfig,
    engine: &dyn DocumentEngine,
    inputs: &[PathBuf],
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<(), RunError> {
    match inputs {
        [] => return Err(RunError::Config("no input files given".to_string())),
        [single] => pick::run(config, engine, single, input, out)?,
        _ => merge::run(config, engine, inputs, out)?,
    }

    writeln!(out, "Done")?;

    if config.pause_on_exit {
        out.flush()?;
        let mut line = String::new();
        input.read_line(&mut line).map_err(RunError::Prompt)?;
    }

    Ok(())
}

fn print_file_list(out: &mut dyn Write, files: &[PathBuf]) -> io::Result<()> {
    let names: Vec<_> = files.iter().map(|p| p.display().to_string()).collect();
    writeln!(out, "[{}]", names.join(" "))
}

fn print_merge_lines(config: &RunConfig, out: &mut dyn Write, lines: &[String]) -> io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
