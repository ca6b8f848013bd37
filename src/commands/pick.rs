use crate::config::RunConfig;
use crate::engine::DocumentEngine;
use crate::error::RunError;
use crate::page_range::{expand_tokens, first_page_beyond, parse_tokens, PageToken};
use crate::workspace::Workspace;
use std::fs::File;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const PROMPT: &str = "Pages to keep (space separated, N or S-E): ";

/// Split `input_path` into the workspace, ask which pages to keep and
/// merge those into the configured output.
///
/// The workspace is removed on every exit path unless merging fails and
/// `keep_workspace_on_error` is set.
pub fn run(
    config: &RunConfig,
    engine: &dyn DocumentEngine,
    input_path: &Path,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<(), RunError> {
    let input_path = if config.check_extension {
        ensure_pdf_extension(input_path)
    } else {
        input_path.to_path_buf()
    };

    let mut workspace = Workspace::prepare(&config.workspace_dir, &config.page_base_name)
        .map_err(RunError::Workspace)?;

    let page_count = split_into(config, engine, &input_path, &workspace)?;

    let tokens = prompt_selection(input, out)?;

    // Pages past the end have no file in the workspace; report them the
    // way the merge would, without expanding a possibly huge range first.
    let selection = match first_page_beyond(&tokens, page_count) {
        Some(page) => Err(anyhow::anyhow!(
            "Page file not found: {}",
            workspace.page_path(page).display()
        )),
        None => expand_tokens(&tokens).map_err(anyhow::Error::from),
    };
    let selection = match selection {
        Ok(selection) => selection,
        Err(source) => return Err(merge_failed(config, &mut workspace, source)),
    };
    info!(pages = selection.len(), "selection parsed");

    let files: Vec<PathBuf> = selection.iter().map(|&p| workspace.page_path(p)).collect();
    super::print_file_list(out, &files)?;

    let lines = engine
        .merge(&files, &config.output, config)
        .map_err(|source| merge_failed(config, &mut workspace, source))?;

    super::print_merge_lines(config, out, &lines)?;
    Ok(())
}

fn merge_failed(config: &RunConfig, workspace: &mut Workspace, source: anyhow::Error) -> RunError {
    if config.keep_workspace_on_error {
        workspace.keep();
    }
    RunError::Merge {
        output: config.output.clone(),
        source,
    }
}

/// Returns the number of pages written to the workspace.
fn split_into(
    config: &RunConfig,
    engine: &dyn DocumentEngine,
    input_path: &Path,
    workspace: &Workspace,
) -> Result<u32, RunError> {
    // Closed when it goes out of scope, on success or error
    let mut file = File::open(input_path).map_err(|source| RunError::InputOpen {
        path: input_path.to_path_buf(),
        source,
    })?;

    let pages = engine
        .split(
            &mut file,
            workspace.path(),
            workspace.base_name(),
            1,
            config,
        )
        .map_err(|source| RunError::Split {
            path: input_path.to_path_buf(),
            source,
        })?;

    info!(
        input = %input_path.display(),
        pages = pages.len(),
        workspace = %workspace.path().display(),
        "split done"
    );

    match workspace.page_files() {
        Ok(files) if files.len() != pages.len() => warn!(
            expected = pages.len(),
            found = files.len(),
            "workspace holds unexpected files"
        ),
        Ok(_) => {}
        Err(e) => warn!(error = %e, "could not list workspace"),
    }

    Ok(pages.len() as u32)
}

/// Ask until the operator gives a parseable range expression.
fn prompt_selection(
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<Vec<PageToken>, RunError> {
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let mut line = String::new();
        let read = input.read_line(&mut line).map_err(RunError::Prompt)?;
        if read == 0 {
            return Err(RunError::NoSelection);
        }

        writeln!(out, "The input was: {}", line.trim_end_matches(['\r', '\n']))?;

        match parse_tokens(&line) {
            Ok(tokens) => return Ok(tokens),
            Err(e) => {
                warn!(error = %e, "rejected page selection");
                writeln!(out, "{}, try again", e)?;
            }
        }
    }
}

/// Append `.pdf` unless the path already ends in it (any case).
pub fn ensure_pdf_extension(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => path.to_path_buf(),
        _ => {
            let mut with_ext = path.as_os_str().to_os_string();
            with_ext.push(".pdf");
            let fixed = PathBuf::from(with_ext);
            warn!(
                given = %path.display(),
                using = %fixed.display(),
                "input has no .pdf extension"
            );
            fixed
        }
    }
}
