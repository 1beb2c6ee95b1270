//! Command dispatch, kept out of the binary so it can be tested.

use super::args::{Cli, Commands};
use super::handlers::{handle_init, handle_render, handle_scan, load_config};
use crate::exit::BpmnScopeExit;
use anyhow::Result;

/// Executes the parsed command line. Without a subcommand, scans `.`.
///
/// # Errors
/// Returns error if config loading or the command handler fails.
pub fn execute(cli: Cli) -> Result<BpmnScopeExit> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Some(Commands::Init { force }) => handle_init(config_path, force),
        Some(Commands::Render { file, output }) => {
            let config = load_config(config_path)?;
            handle_render(config, &file, output.as_deref())
        }
        Some(Commands::Scan {
            paths,
            format,
            fail_on,
        }) => {
            let config = load_config(config_path)?;
            handle_scan(config, &paths, format, fail_on)
        }
        None => {
            let config = load_config(config_path)?;
            handle_scan(
                config,
                &[std::path::PathBuf::from(".")],
                super::args::OutputFormat::Terminal,
                None,
            )
        }
    }
}
