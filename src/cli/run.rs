//! CLI implementation for `tannhauser-tasks run`
//!
//! Runs one of the built-in tasks and exits with the external tool's exit code.

use crate::cli::output_format::OutputFormat;
use crate::cli::output_types::{CommandLine, CommandOutput, PlanOutput, TaskOutput};
use crate::cli::GlobalArgs;
use crate::error::{Error, Result};
use crate::executor::runner::RunResult;
use crate::executor::{CommandRunner, ProcessRunner};
use crate::task::executor::{TaskExecutor, TaskResult};
use crate::task::{CommandSpec, TaskRegistry};
use crate::utils::output::{print_command, print_detail, print_fail, print_pass};
use clap::Args;
use std::path::Path;

#[derive(Args)]
#[command(after_help = "\
Examples:
  tannhauser-tasks run mypy                    Type-check src/tannhauser
  tannhauser-tasks run sync-requirements       Install requirements.txt and requirements-dev.txt
  tannhauser-tasks run test                    Run pytest with coverage
  tannhauser-tasks run test --dry-run          Show the command without running it")]
pub struct RunArgs {
    /// Task name to run
    #[arg(value_name = "TASK")]
    pub task: String,

    /// Print the commands that would run, without running them
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Output format: human (default) or json
    #[arg(long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

/// Echoes each command before delegating, like make's recipe echo
struct EchoRunner<R> {
    inner: R,
}

impl<R: CommandRunner> CommandRunner for EchoRunner<R> {
    fn run(&self, command: &CommandSpec, working_dir: &Path) -> Result<RunResult> {
        print_command(command);
        self.inner.run(command, working_dir)
    }
}

/// Returns the exit code the process should end with
pub fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<i32> {
    let format = args.format;
    let registry = TaskRegistry::builtin();

    // Unknown names fail before any config file is read
    if let Err(e) = registry.require(&args.task) {
        return fail(args, e);
    }

    let project = global.project()?;
    let programs = project.tool_programs();

    // Child stdout goes to stderr in JSON mode so stdout stays parseable
    let runner = match format {
        OutputFormat::Json => ProcessRunner::with_stdout_to_stderr(),
        OutputFormat::Human => ProcessRunner::new(),
    };
    let executor = TaskExecutor::new(&registry, runner, &programs, &project.root);
    let commands = executor.plan(&args.task)?;

    if args.dry_run {
        match format {
            OutputFormat::Json => PlanOutput {
                task_name: args.task.clone(),
                working_dir: project.root.clone(),
                commands: commands.iter().map(CommandLine::from).collect(),
            }
            .print_json(),
            OutputFormat::Human => {
                for command in &commands {
                    println!("{}", command);
                }
            }
        }
        return Ok(0);
    }

    let echo = format == OutputFormat::Human && !global.quiet;
    let outcome = if echo {
        let runner = EchoRunner { inner: runner };
        TaskExecutor::new(&registry, runner, &programs, &project.root).execute(&args.task)
    } else {
        executor.execute(&args.task)
    };
    let result = match outcome {
        Ok(result) => result,
        Err(e) => return fail(args, e),
    };

    match format {
        OutputFormat::Json => TaskOutput::from(&result).print_json(),
        OutputFormat::Human => {
            if !global.quiet {
                print_summary(&result);
            }
        }
    }

    Ok(result.exit_code)
}

/// Report a task that could not run.
///
/// In JSON mode an unknown task or a tool that failed to launch still
/// produces a task object on stdout; everything else propagates.
fn fail(args: &RunArgs, e: Error) -> Result<i32> {
    match e {
        Error::UnknownTask { .. } | Error::Launch { .. } if args.format.is_machine_readable() => {
            let code = e.exit_code();
            TaskOutput::not_run(&args.task, code).print_json();
            eprintln!("Error: {}", e);
            Ok(code)
        }
        e => Err(e),
    }
}

fn print_summary(result: &TaskResult) {
    let secs = result.duration.as_secs_f64();

    if result.success {
        print_pass(&format!("Task '{}'  ({:.2}s)", result.name, secs));
        return;
    }

    print_fail(&format!(
        "Task '{}'  ({:.2}s, exit code {})",
        result.name, secs, result.exit_code
    ));
    if let Some(failed) = result.first_failure() {
        if failed.completed {
            print_detail(&format!("failed: {}", failed.command));
        } else {
            print_detail(&format!(
                "terminated by signal {}: {}",
                failed.exit_code - 128,
                failed.command
            ));
        }
    }
    for skipped in &result.skipped {
        print_detail(&format!("skipped: {}", skipped));
    }
}
