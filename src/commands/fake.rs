use crate::config::RunConfig;
use crate::engine::DocumentEngine;
use anyhow::{Context, Result};
use std::cell::RefCell;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Writes "page N" text files instead of PDFs and records every call.
pub struct FakeEngine {
    pages: u32,
    splits: RefCell<u32>,
    merges: RefCell<Vec<Vec<PathBuf>>>,
}

impl FakeEngine {
    pub fn new(pages: u32) -> Self {
        FakeEngine {
            pages,
            splits: RefCell::new(0),
            merges: RefCell::new(Vec::new()),
        }
    }

    pub fn splits(&self) -> u32 {
        *self.splits.borrow()
    }

    pub fn merges(&self) -> Vec<Vec<PathBuf>> {
        self.merges.borrow().clone()
    }
}

impl DocumentEngine for FakeEngine {
    fn split(
        &self,
        source: &mut dyn Read,
        out_dir: &Path,
        base_name: &str,
        start_index: u32,
        _config: &RunConfig,
    ) -> Result<Vec<PathBuf>> {
        *self.splits.borrow_mut() += 1;

        let mut contents = Vec::new();
        source.read_to_end(&mut contents)?;

        let mut written = Vec::new();
        for page in 0..self.pages {
            let path = out_dir.join(format!("{}_{}.pdf", base_name, start_index + page));
            std::fs::write(&path, format!("page {}\n", page + 1))?;
            written.push(path);
        }
        Ok(written)
    }

    fn merge(&self, inputs: &[PathBuf], output: &Path, _config: &RunConfig) -> Result<Vec<String>> {
        self.merges.borrow_mut().push(inputs.to_vec());

        if inputs.is_empty() {
            anyhow::bail!("No input files specified");
        }

        let mut merged = String::new();
        for input in inputs {
            let text = std::fs::read_to_string(input)
                .with_context(|| format!("Failed to load PDF: {}", input.display()))?;
            merged.push_str(&text);
        }
        std::fs::write(output, merged)?;

        Ok(vec![format!("merged {} file(s)", inputs.len())])
    }
}
