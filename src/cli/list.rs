//! CLI implementation for `tannhauser-tasks list`

use crate::cli::output_format::OutputFormat;
use crate::cli::output_types::{CommandOutput, TaskInfo, TaskListOutput};
use crate::cli::GlobalArgs;
use crate::error::Result;
use crate::task::TaskRegistry;
use clap::Args;
use colored::Colorize;

#[derive(Args)]
pub struct ListArgs {
    /// Output format: human (default) or json
    #[arg(long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

pub fn execute(args: &ListArgs, global: &GlobalArgs) -> Result<i32> {
    let registry = TaskRegistry::builtin();
    let project = global.project()?;
    let programs = project.tool_programs();
    let tasks = registry.list_tasks();

    match args.format {
        OutputFormat::Json => TaskListOutput {
            task_count: tasks.len(),
            tasks: tasks.iter().map(|t| TaskInfo::new(t, &programs)).collect(),
        }
        .print_json(),
        OutputFormat::Human => {
            println!("Available tasks:");
            println!();
            for task in &tasks {
                println!("  {:<20} {}", task.name, task.description);
                if global.verbose > 0 {
                    for command in task.commands(&programs) {
                        println!("  {:<20} {}", "", format!("$ {}", command).dimmed());
                    }
                }
            }
        }
    }

    Ok(0)
}
