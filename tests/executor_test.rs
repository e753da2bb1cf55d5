//! Integration tests for the task executor against real child processes
//!
//! Tests the full execution pipeline:
//! - Resolve the task's commands
//! - Spawn each one in the project root
//! - Return the correct exit code
#![cfg(unix)]

use std::fs;
use std::path::Path;
use tannhauser_tasks::error::Error;
use tannhauser_tasks::executor::runner::{run_command, RunOptions};
use tannhauser_tasks::executor::ProcessRunner;
use tannhauser_tasks::project::config::{ToolCommand, ToolsSection};
use tannhauser_tasks::task::executor::TaskExecutor;
use tannhauser_tasks::task::{CommandSpec, TaskRegistry, ToolPrograms};
use tempfile::TempDir;

fn sh(script: &str) -> CommandSpec {
    CommandSpec::new("sh", vec!["-c".to_string(), script.to_string()])
}

/// Programs whose every tool is `sh -c <script>`; task arguments land in $0, $1, ...
fn programs(type_checker: &str, package_manager: &str, test_runner: &str) -> ToolPrograms {
    let mut programs = ToolPrograms::default();
    programs.apply(&ToolsSection {
        type_checker: Some(ToolCommand::new("sh").arg("-c").arg(type_checker)),
        package_manager: Some(ToolCommand::new("sh").arg("-c").arg(package_manager)),
        test_runner: Some(ToolCommand::new("sh").arg("-c").arg(test_runner)),
    });
    programs
}

#[test]
fn test_success_and_failure_codes() {
    for code in [0, 1, 2, 42, 255] {
        let result = run_command(&sh(&format!("exit {}", code)), RunOptions::new()).unwrap();
        assert_eq!(result.exit_code, code);
        assert!(result.completed);
    }
}

#[test]
fn test_sigterm_maps_to_143() {
    let result = run_command(&sh("kill -TERM $$"), RunOptions::new()).unwrap();
    assert_eq!(result.exit_code, 143, "SIGTERM exit code");
    assert!(!result.completed);
}

#[test]
fn test_sigkill_maps_to_137() {
    let result = run_command(&sh("kill -KILL $$"), RunOptions::new()).unwrap();
    assert_eq!(result.exit_code, 137, "SIGKILL exit code");
}

#[test]
fn test_sigint_maps_to_130() {
    let result = run_command(&sh("kill -INT $$"), RunOptions::new()).unwrap();
    assert_eq!(result.exit_code, 130, "SIGINT exit code");
}

#[test]
fn test_task_receives_literal_arguments() {
    let temp = TempDir::new().unwrap();
    // With `sh -c script`, the first task argument becomes $0
    let programs = programs(
        "printf '%s|' \"$0\" \"$@\" > mypy.args",
        "printf '%s|' \"$0\" \"$@\" >> pm.args",
        "printf '%s|' \"$0\" \"$@\" > test.args",
    );
    let registry = TaskRegistry::builtin();
    let executor = TaskExecutor::new(&registry, ProcessRunner::new(), &programs, temp.path());

    assert_eq!(executor.execute("mypy").unwrap().exit_code, 0);
    assert_eq!(executor.execute("sync-requirements").unwrap().exit_code, 0);
    assert_eq!(executor.execute("test").unwrap().exit_code, 0);

    let read = |name: &str| fs::read_to_string(temp.path().join(name)).unwrap();
    assert_eq!(read("mypy.args"), "src/tannhauser|");
    assert_eq!(
        read("pm.args"),
        "-r|requirements.txt|--dev|-r|requirements-dev.txt|"
    );
    assert_eq!(read("test.args"), "--cov=tannhauser|tests/|");
}

#[test]
fn test_failing_first_step_skips_second() {
    let temp = TempDir::new().unwrap();
    let programs = programs("exit 0", "echo ran >> pm.log; exit 6", "exit 0");
    let registry = TaskRegistry::builtin();
    let executor = TaskExecutor::new(&registry, ProcessRunner::new(), &programs, temp.path());

    let result = executor.execute("sync-requirements").unwrap();
    assert_eq!(result.exit_code, 6);
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(
        fs::read_to_string(temp.path().join("pm.log")).unwrap(),
        "ran\n"
    );
}

#[test]
fn test_missing_tool_is_launch_error() {
    let mut programs = ToolPrograms::default();
    programs.apply(&ToolsSection {
        test_runner: Some(ToolCommand::new("/nonexistent/pytest")),
        ..Default::default()
    });
    let registry = TaskRegistry::builtin();
    let executor = TaskExecutor::new(&registry, ProcessRunner::new(), &programs, Path::new("."));

    let err = executor.execute("test").unwrap_err();
    assert!(matches!(err, Error::Launch { .. }));
    assert_eq!(err.exit_code(), 127);
}
