use crate::cli::Cli;
use crate::error::RunError;
use std::path::{Component, Path, PathBuf};

/// Settings for one run, resolved once at startup.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub output: PathBuf,
    pub workspace_dir: PathBuf,
    pub page_base_name: String,
    pub check_extension: bool,
    pub quiet: bool,
    pub stack_trace: bool,
    pub keep_workspace_on_error: bool,
    pub pause_on_exit: bool,
    pub password: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            output: PathBuf::from("out.pdf"),
            workspace_dir: PathBuf::from("out_temp"),
            page_base_name: "out".to_string(),
            check_extension: true,
            quiet: false,
            stack_trace: false,
            keep_workspace_on_error: false,
            pause_on_exit: false,
            password: None,
        }
    }
}

impl RunConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, RunError> {
        let config = RunConfig {
            output: cli.output.clone(),
            workspace_dir: cli.workspace.clone(),
            page_base_name: cli.base_name.clone(),
            check_extension: !cli.no_check_extension,
            quiet: cli.quiet,
            stack_trace: cli.stack_trace,
            keep_workspace_on_error: cli.keep_workspace_on_error,
            pause_on_exit: cli.pause,
            password: cli.password.clone(),
        };
        config.validate()?;
        Ok(config)
    }

    /// The workspace gets wiped on every run, so refuse anything that
    /// could point at a directory the operator cares about.
    pub fn validate(&self) -> Result<(), RunError> {
        let ws = &self.workspace_dir;

        if ws.as_os_str().is_empty() {
            return Err(RunError::Config("workspace path is empty".to_string()));
        }

        let only_dots_or_root = ws.components().all(|c| {
            matches!(
                c,
                Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if only_dots_or_root {
            return Err(RunError::Config(format!(
                "refusing to use {} as a scratch directory",
                ws.display()
            )));
        }

        if same_path(ws, &self.output) {
            return Err(RunError::Config(format!(
                "workspace and output are the same path: {}",
                ws.display()
            )));
        }

        if self.page_base_name.is_empty()
            || self.page_base_name.contains(['/', '\\'])
        {
            return Err(RunError::Config(format!(
                "invalid page file prefix: {:?}",
                self.page_base_name
            )));
        }

        Ok(())
    }
}

fn same_path(a: &Path, b: &Path) -> bool {
    fn significant(p: &Path) -> Vec<Component<'_>> {
        p.components().filter(|c| *c != Component::CurDir).collect()
    }
    significant(a) == significant(b)
}
