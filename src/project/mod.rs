pub mod config;
pub mod root;
pub mod user_config;

// Re-export main types
pub use config::Config;

use crate::error::Result;
use crate::task::ToolPrograms;
use std::path::{Path, PathBuf};

/// The project the tasks run against, with its layered configuration.
#[derive(Debug)]
pub struct Project {
    /// Directory the external tools run in
    pub root: PathBuf,
    /// Marker that identified the root (None if the start directory was used as-is)
    pub marker: Option<String>,
    /// Configuration loaded from tannhauser-tasks.toml (None if no config file)
    pub config: Option<Config>,
    /// Machine-specific configuration (None if no user config file)
    pub user_config: Option<Config>,
}

impl Project {
    /// Discover the project by walking up from `start_dir`.
    ///
    /// Unlike a missing config, a missing marker is not an error: the start
    /// directory itself becomes the root, the way `make` runs wherever it is invoked.
    pub fn discover(start_dir: &Path) -> Result<Project> {
        let (root, marker) = match root::find_project_root(start_dir)? {
            Some(found) => (found.path, Some(found.marker)),
            None => (start_dir.to_path_buf(), None),
        };

        tracing::debug!(root = %root.display(), marker = ?marker, "project root");

        let config = config::load_config(&root)?;
        let user_config = user_config::load_user_config()?;

        Ok(Project {
            root,
            marker,
            config,
            user_config,
        })
    }

    /// Resolve the command for each tool: built-in default < user config < project config.
    pub fn tool_programs(&self) -> ToolPrograms {
        let mut programs = ToolPrograms::default();
        if let Some(user) = &self.user_config {
            programs.apply(&user.tools);
        }
        if let Some(project) = &self.config {
            programs.apply(&project.tools);
        }
        programs
    }
}
