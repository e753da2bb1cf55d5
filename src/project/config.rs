//! tannhauser-tasks.toml configuration file parsing
//!
//! Handles loading and parsing project configuration from `tannhauser-tasks.toml`.
//! All fields are optional, so an empty or missing config file works and the
//! built-in tool commands are used.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Name of the project configuration file
pub const CONFIG_FILE: &str = "tannhauser-tasks.toml";

/// Project configuration loaded from tannhauser-tasks.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// External tool overrides
    pub tools: ToolsSection,
}

/// Which external command implements each tool.
///
/// Unset entries fall through to the next configuration layer and finally to
/// the built-in default.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsSection {
    /// Type checker command (default: `mypy`)
    pub type_checker: Option<ToolCommand>,
    /// Package manager install command (default: `pipenv install`)
    pub package_manager: Option<ToolCommand>,
    /// Test runner command (default: `pytest`)
    pub test_runner: Option<ToolCommand>,
}

/// An external command: the program plus any leading arguments.
///
/// Supports two formats in TOML:
/// - String: split on whitespace, e.g. `package_manager = "pipenv install"`
/// - Array: taken verbatim, e.g. `package_manager = ["uv", "pip", "install"]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawToolCommand")]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    /// Create a command with no leading arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec![],
        }
    }

    /// Add a leading argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawToolCommand {
    Line(String),
    Argv(Vec<String>),
}

impl TryFrom<RawToolCommand> for ToolCommand {
    type Error = String;

    fn try_from(raw: RawToolCommand) -> std::result::Result<Self, Self::Error> {
        let mut parts: Vec<String> = match raw {
            RawToolCommand::Line(line) => line.split_whitespace().map(String::from).collect(),
            RawToolCommand::Argv(argv) => argv,
        };

        if parts.is_empty() || parts[0].trim().is_empty() {
            return Err("tool command must not be empty".to_string());
        }

        let program = parts.remove(0);
        Ok(ToolCommand {
            program,
            args: parts,
        })
    }
}

/// Load configuration from tannhauser-tasks.toml in the project root.
///
/// Returns `None` if the config file doesn't exist.
pub fn load_config(project_root: &Path) -> Result<Option<Config>> {
    let config_path = project_root.join(CONFIG_FILE);

    if !config_path.exists() {
        return Ok(None);
    }

    load_config_file(&config_path).map(Some)
}

/// Parse a config file at an explicit path.
///
/// Shared by the project config and the user config, which use the same schema.
pub fn load_config_file(config_path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(config_path).map_err(|e| {
        Error::Config(format!("Failed to read {}: {}", config_path.display(), e))
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse {}: {}",
            config_path.display(),
            format_toml_error(&e)
        ))
    })
}

/// Format TOML parse error with position information
fn format_toml_error(err: &toml::de::Error) -> String {
    if let Some(span) = err.span() {
        format!("at position {}-{}: {}", span.start, span.end, err.message())
    } else {
        err.message().to_string()
    }
}

/// Generate a commented template for tannhauser-tasks.toml
pub fn generate_config_template() -> &'static str {
    r#"# tannhauser-tasks project configuration
#
# Each entry selects the external command for a tool. Task arguments
# (e.g. `src/tannhauser`, `-r requirements.txt`) are appended after it.

[tools]
# type_checker = "mypy"
# package_manager = "pipenv install"
# test_runner = "pytest"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_none() {
        let temp = TempDir::new().unwrap();
        assert!(load_config(temp.path()).unwrap().is_none());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "").unwrap();

        let config = load_config(temp.path()).unwrap().unwrap();
        assert_eq!(config.tools, ToolsSection::default());
    }

    #[test]
    fn test_tool_command_string_form() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "[tools]\npackage_manager = \"pipenv  install\"\n",
        )
        .unwrap();

        let config = load_config(temp.path()).unwrap().unwrap();
        let pm = config.tools.package_manager.unwrap();
        assert_eq!(pm.program, "pipenv");
        assert_eq!(pm.args, vec!["install"]);
    }

    #[test]
    fn test_tool_command_array_form_keeps_spaces() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "[tools]\ntype_checker = [\"/opt/my tools/mypy\", \"--strict\"]\n",
        )
        .unwrap();

        let config = load_config(temp.path()).unwrap().unwrap();
        let tc = config.tools.type_checker.unwrap();
        assert_eq!(tc.program, "/opt/my tools/mypy");
        assert_eq!(tc.args, vec!["--strict"]);
        assert!(config.tools.test_runner.is_none());
    }

    #[test]
    fn test_empty_tool_command_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "[tools]\ntest_runner = \"  \"\n").unwrap();

        let err = load_config(temp.path()).unwrap_err().to_string();
        assert!(err.contains("must not be empty"), "got: {}", err);
    }

    #[test]
    fn test_invalid_toml_names_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "this is not valid toml {{{").unwrap();

        let err = load_config(temp.path()).unwrap_err().to_string();
        assert!(err.contains(CONFIG_FILE), "got: {}", err);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "[tools]\nlinter = \"ruff\"\n").unwrap();

        assert!(load_config(temp.path()).is_err());
    }

    #[test]
    fn test_template_parses() {
        let config: Config = toml::from_str(generate_config_template()).unwrap();
        assert_eq!(config.tools, ToolsSection::default());
    }

    #[test]
    fn test_tool_command_display() {
        let cmd = ToolCommand::new("pipenv").arg("install");
        assert_eq!(cmd.to_string(), "pipenv install");
    }
}
