use anyhow::{Context, Result};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Remove anything at `path` and create it again, empty.
///
/// Whatever was in the directory before is lost.
pub fn prepare<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    match std::fs::remove_dir_all(path) {
        Ok(()) => debug!(path = %path.display(), "removed stale workspace"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to clear workspace: {}", path.display()))
        }
    }

    std::fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))?;

    Ok(())
}

/// Best-effort removal of the workspace tree. A missing directory is fine.
pub fn cleanup<P: AsRef<Path>>(path: P) {
    let path = path.as_ref();
    match std::fs::remove_dir_all(path) {
        Ok(()) => debug!(path = %path.display(), "removed workspace"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "failed to remove workspace"),
    }
}

/// A freshly prepared directory of per-page files, removed when dropped.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    base_name: String,
    keep: bool,
}

impl Workspace {
    pub fn prepare<P: AsRef<Path>>(root: P, base_name: &str) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        prepare(&root)?;
        Ok(Workspace {
            root,
            base_name: base_name.to_string(),
            keep: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// `<root>/<base>_<page>.pdf`
    pub fn page_path(&self, page: u32) -> PathBuf {
        self.root.join(format!("{}_{}.pdf", self.base_name, page))
    }

    /// Files currently in the workspace, sorted by name
    pub fn page_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry
                .with_context(|| format!("Failed to list workspace: {}", self.root.display()))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    /// Leave the directory on disk when this guard is dropped.
    pub fn keep(&mut self) {
        self.keep = true;
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if self.keep {
            warn!(path = %self.root.display(), "leaving workspace on disk");
        } else {
            cleanup(&self.root);
        }
    }
}
