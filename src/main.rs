use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Parser, Subcommand};
use std::process;
use tannhauser_tasks::cli;
use tannhauser_tasks::utils::logging;

#[derive(Parser)]
#[command(name = "tannhauser-tasks")]
#[command(version)]
#[command(about = "Type checking, requirement syncing and tests for the tannhauser project")]
#[command(after_help = "\
Tasks:
  mypy                 mypy src/tannhauser
  sync-requirements    pipenv install -r requirements.txt
                       pipenv install --dev -r requirements-dev.txt
  test                 pytest --cov=tannhauser tests/

Examples:
  tannhauser-tasks run test      Run the test suite
  tannhauser-tasks list          List tasks and what they run")]
struct Cli {
    #[command(flatten)]
    global: cli::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a task and exit with its exit code
    #[command(display_order = 1)]
    Run(cli::run::RunArgs),
    /// List available tasks
    #[command(display_order = 2)]
    List(cli::list::ListArgs),
    /// Create a tannhauser-tasks.toml with commented defaults
    #[command(display_order = 3)]
    Init(cli::init::InitArgs),
}

/// Handle clap parse errors with suggestions for make-style invocations
fn handle_parse_error(mut err: clap::Error) -> ! {
    if err.kind() == ErrorKind::InvalidSubcommand {
        if let Some(ContextValue::String(cmd)) = err.get(ContextKind::InvalidSubcommand) {
            // `tannhauser-tasks test` instead of `tannhauser-tasks run test`
            let suggestion = match cmd.as_str() {
                "mypy" | "sync-requirements" | "test" | "tests" => Some(format!(
                    "tasks run through 'run': tannhauser-tasks run {}",
                    if cmd == "tests" { "test" } else { cmd.as_str() }
                )),
                _ => None,
            };
            if let Some(suggestion) = suggestion {
                err.insert(
                    ContextKind::Suggested,
                    ContextValue::StyledStrs(vec![suggestion.into()]),
                );
            }
        }
    }
    err.exit()
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => handle_parse_error(e),
    };

    logging::init(cli.global.verbose, cli.global.quiet);

    let result = match &cli.command {
        Commands::Run(args) => cli::run::execute(args, &cli.global),
        Commands::List(args) => cli::list::execute(args, &cli.global),
        Commands::Init(args) => cli::init::execute(args, &cli.global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}
