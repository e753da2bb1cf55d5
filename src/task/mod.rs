//! Task registry
//!
//! The fixed set of tasks the `tannhauser-tasks run` command knows about. Each
//! task is a list of steps, and each step invokes one external tool with a
//! literal argument list.

pub mod executor;

use crate::error::{Error, Result};
use crate::project::config::{ToolCommand, ToolsSection};
use std::collections::BTreeMap;
use std::fmt;

/// An external tool a task step delegates to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    TypeChecker,
    PackageManager,
    TestRunner,
}

impl Tool {
    /// Get the display name for this tool
    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::TypeChecker => "type checker",
            Tool::PackageManager => "package manager",
            Tool::TestRunner => "test runner",
        }
    }

    /// Built-in command used when no configuration overrides it
    pub fn default_command(&self) -> ToolCommand {
        match self {
            Tool::TypeChecker => ToolCommand::new("mypy"),
            Tool::PackageManager => ToolCommand::new("pipenv").arg("install"),
            Tool::TestRunner => ToolCommand::new("pytest"),
        }
    }
}

/// One external invocation inside a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub tool: Tool,
    pub args: Vec<String>,
}

impl Step {
    fn new(tool: Tool, args: &[&str]) -> Self {
        Self {
            tool,
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// A named, statically defined list of steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: &'static str,
    pub description: &'static str,
    pub steps: Vec<Step>,
}

impl Task {
    /// Resolve every step into the concrete command that will be spawned
    pub fn commands(&self, programs: &ToolPrograms) -> Vec<CommandSpec> {
        self.steps
            .iter()
            .map(|step| CommandSpec::from_step(programs.get(step.tool), step))
            .collect()
    }
}

/// A fully resolved external invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Tool command first, then the step's literal arguments
    fn from_step(tool: &ToolCommand, step: &Step) -> Self {
        let mut args = tool.args.clone();
        args.extend(step.args.iter().cloned());
        Self {
            program: tool.program.clone(),
            args,
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_word(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_word(arg))?;
        }
        Ok(())
    }
}

/// Quote a word for echoing if it would not survive a shell round trip as-is
fn shell_word(word: &str) -> std::borrow::Cow<'_, str> {
    if word.is_empty() || word.contains(char::is_whitespace) {
        format!("'{}'", word).into()
    } else {
        word.into()
    }
}

/// The command chosen for each tool after configuration layering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPrograms {
    type_checker: ToolCommand,
    package_manager: ToolCommand,
    test_runner: ToolCommand,
}

impl Default for ToolPrograms {
    fn default() -> Self {
        Self {
            type_checker: Tool::TypeChecker.default_command(),
            package_manager: Tool::PackageManager.default_command(),
            test_runner: Tool::TestRunner.default_command(),
        }
    }
}

impl ToolPrograms {
    /// Get the command for a tool
    pub fn get(&self, tool: Tool) -> &ToolCommand {
        match tool {
            Tool::TypeChecker => &self.type_checker,
            Tool::PackageManager => &self.package_manager,
            Tool::TestRunner => &self.test_runner,
        }
    }

    /// Overlay a configuration layer; unset entries keep their current value
    pub fn apply(&mut self, tools: &ToolsSection) {
        if let Some(cmd) = &tools.type_checker {
            self.type_checker = cmd.clone();
        }
        if let Some(cmd) = &tools.package_manager {
            self.package_manager = cmd.clone();
        }
        if let Some(cmd) = &tools.test_runner {
            self.test_runner = cmd.clone();
        }
    }
}

/// The set of recognized tasks
#[derive(Debug)]
pub struct TaskRegistry {
    tasks: BTreeMap<&'static str, Task>,
}

impl TaskRegistry {
    /// The tannhauser project's tasks
    pub fn builtin() -> Self {
        Self::from_tasks(vec![
            Task {
                name: "mypy",
                description: "Type-check the tannhauser package",
                steps: vec![Step::new(Tool::TypeChecker, &["src/tannhauser"])],
            },
            Task {
                name: "sync-requirements",
                description: "Install runtime and dev requirements",
                steps: vec![
                    Step::new(Tool::PackageManager, &["-r", "requirements.txt"]),
                    Step::new(
                        Tool::PackageManager,
                        &["--dev", "-r", "requirements-dev.txt"],
                    ),
                ],
            },
            Task {
                name: "test",
                description: "Run the test suite with coverage",
                steps: vec![Step::new(Tool::TestRunner, &["--cov=tannhauser", "tests/"])],
            },
        ])
    }

    fn from_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: tasks.into_iter().map(|t| (t.name, t)).collect(),
        }
    }

    /// Check if a task exists
    pub fn has_task(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Get a task by name
    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    /// Get a task by name, or an `UnknownTask` error carrying suggestions
    pub fn require(&self, name: &str) -> Result<&Task> {
        self.get(name).ok_or_else(|| Error::UnknownTask {
            name: name.to_string(),
            suggestions: self
                .find_similar(name)
                .into_iter()
                .map(String::from)
                .collect(),
        })
    }

    /// List all tasks, sorted by name
    pub fn list_tasks(&self) -> Vec<&Task> {
        self.tasks.values().collect()
    }

    /// Get the number of tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Find similar task names for "did you mean" suggestions
    pub fn find_similar(&self, name: &str) -> Vec<&'static str> {
        let name_lower = name.to_lowercase();
        let first_char: String = name_lower.chars().take(1).collect();
        let mut similar: Vec<_> = self
            .tasks
            .keys()
            .copied()
            .filter(|k| {
                let k_lower = k.to_lowercase();
                (!first_char.is_empty() && k_lower.starts_with(&first_char))
                    || (!name_lower.is_empty() && k_lower.contains(&name_lower))
                    || name_lower.contains(&k_lower)
                    || levenshtein_distance(&k_lower, &name_lower) <= 2
            })
            .collect();
        similar.sort();
        similar.truncate(3);
        similar
    }
}

/// Simple Levenshtein distance implementation
#[allow(clippy::needless_range_loop)]
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(cmd: &CommandSpec) -> Vec<&str> {
        std::iter::once(cmd.program.as_str())
            .chain(cmd.args.iter().map(String::as_str))
            .collect()
    }

    #[test]
    fn test_builtin_has_three_tasks() {
        let registry = TaskRegistry::builtin();
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
        assert!(registry.has_task("mypy"));
        assert!(registry.has_task("sync-requirements"));
        assert!(registry.has_task("test"));
        assert!(!registry.has_task("tests"));
    }

    #[test]
    fn test_require_unknown_task_has_suggestions() {
        let registry = TaskRegistry::builtin();
        assert_eq!(registry.require("mypy").unwrap().name, "mypy");

        match registry.require("tests").unwrap_err() {
            Error::UnknownTask { name, suggestions } => {
                assert_eq!(name, "tests");
                assert_eq!(suggestions, vec!["test".to_string()]);
            }
            other => panic!("Expected UnknownTask, got {:?}", other),
        }
    }

    #[test]
    fn test_list_tasks_sorted() {
        let registry = TaskRegistry::builtin();
        let names: Vec<_> = registry.list_tasks().iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["mypy", "sync-requirements", "test"]);
    }

    #[test]
    fn test_mypy_commands() {
        let registry = TaskRegistry::builtin();
        let commands = registry.get("mypy").unwrap().commands(&ToolPrograms::default());
        assert_eq!(commands.len(), 1);
        assert_eq!(argv(&commands[0]), vec!["mypy", "src/tannhauser"]);
    }

    #[test]
    fn test_sync_requirements_commands_in_order() {
        let registry = TaskRegistry::builtin();
        let commands = registry
            .get("sync-requirements")
            .unwrap()
            .commands(&ToolPrograms::default());
        assert_eq!(commands.len(), 2);
        assert_eq!(
            argv(&commands[0]),
            vec!["pipenv", "install", "-r", "requirements.txt"]
        );
        assert_eq!(
            argv(&commands[1]),
            vec!["pipenv", "install", "--dev", "-r", "requirements-dev.txt"]
        );
    }

    #[test]
    fn test_test_commands() {
        let registry = TaskRegistry::builtin();
        let commands = registry.get("test").unwrap().commands(&ToolPrograms::default());
        assert_eq!(commands.len(), 1);
        assert_eq!(argv(&commands[0]), vec!["pytest", "--cov=tannhauser", "tests/"]);
    }

    #[test]
    fn test_configured_tool_keeps_literal_args() {
        let mut programs = ToolPrograms::default();
        programs.apply(&ToolsSection {
            test_runner: Some(ToolCommand::new("python").arg("-m").arg("pytest")),
            ..Default::default()
        });

        let registry = TaskRegistry::builtin();
        let commands = registry.get("test").unwrap().commands(&programs);
        assert_eq!(
            argv(&commands[0]),
            vec!["python", "-m", "pytest", "--cov=tannhauser", "tests/"]
        );
    }

    #[test]
    fn test_find_similar_suggests_test_for_tests() {
        let registry = TaskRegistry::builtin();
        assert_eq!(registry.find_similar("tests"), vec!["test"]);
    }

    #[test]
    fn test_find_similar_typo() {
        let registry = TaskRegistry::builtin();
        assert!(registry.find_similar("mpy").contains(&"mypy"));
        assert!(registry.find_similar("sync").contains(&"sync-requirements"));
    }

    #[test]
    fn test_find_similar_nothing_close() {
        let registry = TaskRegistry::builtin();
        assert!(registry.find_similar("deploy").is_empty());
    }

    #[test]
    fn test_find_similar_empty_query() {
        let registry = TaskRegistry::builtin();
        assert!(registry.find_similar("").is_empty());
    }

    #[test]
    fn test_command_display_quotes_spaces() {
        let cmd = CommandSpec::new("/opt/my tools/mypy", vec!["src/tannhauser".to_string()]);
        assert_eq!(cmd.to_string(), "'/opt/my tools/mypy' src/tannhauser");

        let cmd = CommandSpec::new("echo", vec!["a b".to_string(), "".to_string()]);
        assert_eq!(cmd.to_string(), "echo 'a b' ''");
    }

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("test", "tests"), 1);
        assert_eq!(levenshtein_distance("mypy", "mpy"), 1);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }
}
