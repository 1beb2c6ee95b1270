use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::types::Severity;

#[derive(Parser, Debug)]
#[command(
    name = "bpmnscope",
    version,
    about = "Structural and security analysis for BPMN 2.0 diagrams"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Config file (default: ./bpmnscope.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// More log output (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(long, short, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze BPMN files or directories
    Scan {
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Terminal)]
        format: OutputFormat,
        /// Exit with code 3 when any document reaches this risk level
        #[arg(long, value_name = "SEVERITY", value_parser = parse_severity)]
        fail_on: Option<Severity>,
    },
    /// Render one diagram as SVG
    Render {
        file: PathBuf,
        /// Output path (default: stdout)
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Write a default bpmnscope.toml
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

fn parse_severity(s: &str) -> Result<Severity, String> {
    Severity::from_label(s)
        .ok_or_else(|| format!("unknown severity '{s}' (expected low, medium, high or critical)"))
}
