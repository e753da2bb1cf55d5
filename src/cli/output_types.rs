//! Output types for CLI commands
//!
//! These types keep JSON output consistent across commands. Each command
//! builds its output struct and serializes it through `CommandOutput`.

use crate::task::executor::{StepResult, TaskResult};
use crate::task::{CommandSpec, Task, ToolPrograms};
use serde::Serialize;
use std::path::PathBuf;

/// Trait for command outputs that can be serialized to JSON
pub trait CommandOutput: Serialize {
    /// Get the command name
    fn command_name(&self) -> &'static str;

    /// Serialize to pretty-printed JSON string
    fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Print the JSON form on stdout
    fn print_json(&self) {
        tracing::debug!(command = self.command_name(), "writing json output");
        println!("{}", self.to_json());
    }
}

// =============================================================================
// CommandLine
// =============================================================================

/// A resolved command, both split and as a printable line
#[derive(Debug, Serialize)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
    pub command_line: String,
}

impl From<&CommandSpec> for CommandLine {
    fn from(cmd: &CommandSpec) -> Self {
        Self {
            program: cmd.program.clone(),
            args: cmd.args.clone(),
            command_line: cmd.to_string(),
        }
    }
}

// =============================================================================
// TaskOutput
// =============================================================================

/// Output for `tannhauser-tasks run`
#[derive(Debug, Serialize)]
pub struct TaskOutput {
    /// Name of the task
    pub task_name: String,
    /// Whether all steps succeeded
    pub success: bool,
    /// Exit code (0=success)
    pub exit_code: i32,
    /// Total execution time in seconds
    pub duration_secs: f64,
    /// Number of steps that ran
    pub step_count: usize,
    /// Number of steps skipped after a failure
    pub skipped_count: usize,
    /// Individual step results
    pub steps: Vec<StepOutput>,
}

/// A single step within a task run
#[derive(Debug, Serialize)]
pub struct StepOutput {
    pub command: CommandLine,
    pub success: bool,
    pub exit_code: i32,
    pub duration_secs: f64,
}

impl From<&StepResult> for StepOutput {
    fn from(step: &StepResult) -> Self {
        Self {
            command: CommandLine::from(&step.command),
            success: step.success,
            exit_code: step.exit_code,
            duration_secs: step.duration.as_secs_f64(),
        }
    }
}

impl From<&TaskResult> for TaskOutput {
    fn from(result: &TaskResult) -> Self {
        Self {
            task_name: result.name.clone(),
            success: result.success,
            exit_code: result.exit_code,
            duration_secs: result.duration.as_secs_f64(),
            step_count: result.step_results.len(),
            skipped_count: result.skipped.len(),
            steps: result.step_results.iter().map(StepOutput::from).collect(),
        }
    }
}

impl TaskOutput {
    /// Output for a task that failed before anything ran
    pub fn not_run(task_name: &str, exit_code: i32) -> Self {
        Self {
            task_name: task_name.to_string(),
            success: false,
            exit_code,
            duration_secs: 0.0,
            step_count: 0,
            skipped_count: 0,
            steps: vec![],
        }
    }
}

impl CommandOutput for TaskOutput {
    fn command_name(&self) -> &'static str {
        "run"
    }
}

// =============================================================================
// PlanOutput
// =============================================================================

/// Output for `tannhauser-tasks run --dry-run`
#[derive(Debug, Serialize)]
pub struct PlanOutput {
    pub task_name: String,
    pub working_dir: PathBuf,
    pub commands: Vec<CommandLine>,
}

impl CommandOutput for PlanOutput {
    fn command_name(&self) -> &'static str {
        "run-dry-run"
    }
}

// =============================================================================
// TaskListOutput
// =============================================================================

/// Output for `tannhauser-tasks list`
#[derive(Debug, Serialize)]
pub struct TaskListOutput {
    /// Number of tasks defined
    pub task_count: usize,
    /// List of task info
    pub tasks: Vec<TaskInfo>,
}

/// Information about a single task
#[derive(Debug, Serialize)]
pub struct TaskInfo {
    pub name: String,
    pub description: String,
    pub steps: Vec<StepInfo>,
}

/// A step as it would run with the current configuration
#[derive(Debug, Serialize)]
pub struct StepInfo {
    pub tool: String,
    pub command: CommandLine,
}

impl TaskInfo {
    pub fn new(task: &Task, programs: &ToolPrograms) -> Self {
        Self {
            name: task.name.to_string(),
            description: task.description.to_string(),
            steps: task
                .steps
                .iter()
                .zip(task.commands(programs))
                .map(|(step, cmd)| StepInfo {
                    tool: step.tool.as_str().to_string(),
                    command: CommandLine::from(&cmd),
                })
                .collect(),
        }
    }
}

impl CommandOutput for TaskListOutput {
    fn command_name(&self) -> &'static str {
        "list"
    }
}

// =============================================================================
// InitOutput
// =============================================================================

/// Output for `tannhauser-tasks init`
#[derive(Debug, Serialize)]
pub struct InitOutput {
    pub status: String,
    pub config_path: PathBuf,
}

impl CommandOutput for InitOutput {
    fn command_name(&self) -> &'static str {
        "init"
    }
}
