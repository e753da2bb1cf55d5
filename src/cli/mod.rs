pub mod init;
pub mod list;
pub mod output_format;
pub mod output_types;
pub mod run;

use crate::error::{Error, Result};
use crate::project::Project;
use clap::Args;
use std::path::PathBuf;

/// Flags accepted by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Run as if started in DIR instead of the current directory
    #[arg(short = 'C', long = "project-dir", value_name = "DIR", global = true)]
    pub project_dir: Option<PathBuf>,

    /// Increase diagnostic output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress command echo and summary lines
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl GlobalArgs {
    /// Directory project discovery starts from
    pub fn start_dir(&self) -> Result<PathBuf> {
        match &self.project_dir {
            Some(dir) if dir.is_dir() => Ok(dir.clone()),
            Some(dir) => Err(Error::Config(format!(
                "Project directory not found: {}",
                dir.display()
            ))),
            None => Ok(std::env::current_dir()?),
        }
    }

    /// Find the project and load its configuration
    pub fn project(&self) -> Result<Project> {
        Project::discover(&self.start_dir()?)
    }
}
