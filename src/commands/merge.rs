use crate::config::RunConfig;
use crate::engine::DocumentEngine;
use crate::error::RunError;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Merge the given files straight into the configured output.
pub fn run(
    config: &RunConfig,
    engine: &dyn DocumentEngine,
    inputs: &[PathBuf],
    out: &mut dyn Write,
) -> Result<(), RunError> {
    super::print_file_list(out, inputs)?;

    info!(
        inputs = inputs.len(),
        output = %config.output.display(),
        "merging files"
    );

    let lines = engine
        .merge(inputs, &config.output, config)
        .map_err(|source| RunError::Merge {
            output: config.output.clone(),
            source,
        })?;

    super::print_merge_lines(config, out, &lines)?;
    Ok(())
}
