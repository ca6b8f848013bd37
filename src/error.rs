use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can end a run early.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to open input: {}", .path.display())]
    InputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to split {}", .path.display())]
    Split {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to prepare workspace")]
    Workspace(#[source] anyhow::Error),

    #[error("Failed to read page selection")]
    Prompt(#[source] io::Error),

    #[error("No page selection given")]
    NoSelection,

    #[error("Failed to merge into {}", .output.display())]
    Merge {
        output: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to write to stdout")]
    Output(#[from] io::Error),
}

impl RunError {
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Config(_) => 2,
            _ => 1,
        }
    }
}
