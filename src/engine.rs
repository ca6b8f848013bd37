use crate::config::RunConfig;
use crate::pdf::{merge_files, PdfDocument};
use anyhow::Result;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The component that actually reads and writes PDF files.
pub trait DocumentEngine {
    /// Write each page of `source` to `<out_dir>/<base_name>_<n>.pdf`, where
    /// the first page gets `n = start_index`. Returns the paths in page order.
    fn split(
        &self,
        source: &mut dyn Read,
        out_dir: &Path,
        base_name: &str,
        start_index: u32,
        config: &RunConfig,
    ) -> Result<Vec<PathBuf>>;

    /// Concatenate `inputs` into `output`. Returns human-readable status lines.
    fn merge(&self, inputs: &[PathBuf], output: &Path, config: &RunConfig) -> Result<Vec<String>>;
}

pub struct LopdfEngine;

impl DocumentEngine for LopdfEngine {
    fn split(
        &self,
        source: &mut dyn Read,
        out_dir: &Path,
        base_name: &str,
        start_index: u32,
        config: &RunConfig,
    ) -> Result<Vec<PathBuf>> {
        let doc = PdfDocument::load_from(source, base_name, config.password.as_deref())?;
        let total_pages = doc.page_count();
        if total_pages == 0 {
            anyhow::bail!("PDF has no pages");
        }

        let mut written = Vec::with_capacity(total_pages as usize);
        for page_num in 1..=total_pages {
            let output_path =
                out_dir.join(format!("{}_{}.pdf", base_name, start_index + page_num - 1));

            let mut new_doc = doc.extract_pages(&[page_num])?;
            PdfDocument::save(&mut new_doc, &output_path)?;
            debug!(page = page_num, path = %output_path.display(), "wrote page");
            written.push(output_path);
        }

        Ok(written)
    }

    fn merge(&self, inputs: &[PathBuf], output: &Path, config: &RunConfig) -> Result<Vec<String>> {
        let mut lines: Vec<String> = inputs
            .iter()
            .map(|input| format!("merging {}", input.display()))
            .collect();

        let mut merged = merge_files(inputs, config.password.as_deref())?;
        let total_pages = merged.get_pages().len();
        PdfDocument::save(&mut merged, output)?;

        lines.push(format!(
            "wrote {} page(s) to {}",
            total_pages,
            output.display()
        ));
        Ok(lines)
    }
}
