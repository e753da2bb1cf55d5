//! `tannhauser-tasks init` command implementation
//!
//! Writes a commented `tannhauser-tasks.toml` so tool commands can be
//! overridden per project.

use crate::cli::output_format::OutputFormat;
use crate::cli::output_types::{CommandOutput, InitOutput};
use crate::cli::GlobalArgs;
use crate::error::{Error, Result};
use crate::project::config::{generate_config_template, CONFIG_FILE};
use crate::utils::output::print_pass;
use clap::Args;

#[derive(Args)]
#[command(after_help = "\
Examples:
  tannhauser-tasks init                        Create tannhauser-tasks.toml here
  tannhauser-tasks -C ../tannhauser init       Create it in another checkout")]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,

    /// Output format: human (default) or json
    #[arg(long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

pub fn execute(args: &InitArgs, global: &GlobalArgs) -> Result<i32> {
    let dir = global.start_dir()?;
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !args.force {
        return Err(Error::Config(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )));
    }

    std::fs::write(&config_path, generate_config_template())?;
    tracing::info!(path = %config_path.display(), "wrote config template");

    match args.format {
        OutputFormat::Json => InitOutput {
            status: "success".to_string(),
            config_path,
        }
        .print_json(),
        OutputFormat::Human => {
            if !global.quiet {
                print_pass(&format!("Created {}", config_path.display()));
            }
        }
    }

    Ok(0)
}
