use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfpick")]
#[command(about = "Split a PDF into pages, pick the ones you want, and merge them back")]
#[command(version)]
pub struct Cli {
    /// One PDF to split and pick pages from, or several PDFs to merge as-is
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output file
    #[arg(short, long, default_value = "out.pdf")]
    pub output: PathBuf,

    /// Scratch directory for per-page files (recreated on every run)
    #[arg(long, default_value = "out_temp")]
    pub workspace: PathBuf,

    /// File name prefix for per-page files
    #[arg(long, default_value = "out")]
    pub base_name: String,

    /// Accept input files without a .pdf extension as given
    #[arg(long)]
    pub no_check_extension: bool,

    /// Don't print merge results
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the full error chain on failure
    #[arg(long)]
    pub stack_trace: bool,

    /// Leave the scratch directory on disk if merging fails
    #[arg(long)]
    pub keep_workspace_on_error: bool,

    /// Wait for Enter before exiting
    #[arg(long)]
    pub pause: bool,

    /// Password for encrypted input
    #[arg(long)]
    pub password: Option<String>,

    /// More log output (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
