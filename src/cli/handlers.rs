// src/cli/handlers.rs
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use colored::Colorize;
use tracing::debug;

use crate::analysis::{Document, Engine};
use crate::cli::args::OutputFormat;
use crate::config::{self, Config};
use crate::discovery;
use crate::exit::BpmnScopeExit;
use crate::reporting;
use crate::types::{BatchReport, Severity};
use crate::visual::render_svg;

/// Loads the explicit config file, or `./bpmnscope.toml` when present.
///
/// # Errors
/// Returns error if the file cannot be read, parsed or validated.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(p) => Config::load_from(p)?,
        None => Config::load()?,
    };
    Ok(config)
}

/// Handles the scan command.
///
/// # Errors
/// Returns error if discovery, reading or report serialization fails.
pub fn handle_scan(
    config: Config,
    paths: &[PathBuf],
    format: OutputFormat,
    fail_on: Option<Severity>,
) -> Result<BpmnScopeExit> {
    let files = discovery::discover(paths)?;
    if files.is_empty() {
        eprintln!("{} no BPMN documents found", "warning:".yellow().bold());
        return Ok(BpmnScopeExit::Success);
    }

    let documents = read_documents(&files)?;
    let engine = Engine::new(config)?;
    let report = engine.analyze_batch(&documents);

    match format {
        OutputFormat::Terminal => reporting::print_report(&report),
        OutputFormat::Json => println!("{}", reporting::to_json(&report)?),
    }

    Ok(scan_exit(&report, fail_on))
}

fn read_documents(files: &[PathBuf]) -> Result<Vec<Document>> {
    files
        .iter()
        .map(|path| {
            let bytes =
                fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
            debug!(path = %path.display(), bytes = bytes.len(), "read document");
            Ok(Document::new(path.display().to_string(), bytes))
        })
        .collect()
}

/// Parse failures outrank the risk threshold.
#[must_use]
pub fn scan_exit(report: &BatchReport, fail_on: Option<Severity>) -> BpmnScopeExit {
    if report.failed_count() > 0 {
        return BpmnScopeExit::ParseFailure;
    }
    match fail_on {
        Some(threshold) if report.analyzed_count() > 0 && report.worst_risk() >= threshold => {
            BpmnScopeExit::RiskThreshold
        }
        _ => BpmnScopeExit::Success,
    }
}

/// Handles the render command.
///
/// # Errors
/// Returns error if the input cannot be read or the SVG cannot be written.
pub fn handle_render(config: Config, file: &Path, output: Option<&Path>) -> Result<BpmnScopeExit> {
    let bytes = fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let engine = Engine::new(config)?;
    let analysis = match engine.analyze_bytes(&bytes) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{} {}: {e}", "error:".red().bold(), file.display());
            return Ok(BpmnScopeExit::ParseFailure);
        }
    };

    let svg = render_svg(&analysis.visualization);
    match output {
        Some(path) => {
            fs::write(path, &svg).with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "{} {} ({} nodes, {} edges)",
                "Rendered".green().bold(),
                path.display(),
                analysis.visualization.metrics.node_count,
                analysis.visualization.metrics.edge_count
            );
        }
        None => std::io::stdout().write_all(svg.as_bytes())?,
    }
    Ok(BpmnScopeExit::Success)
}

/// Handles the init command.
///
/// # Errors
/// Returns error if the file exists (without `force`) or cannot be written.
pub fn handle_init(path: Option<&Path>, force: bool) -> Result<BpmnScopeExit> {
    let target = path.map_or_else(config::io::default_path, Path::to_path_buf);
    if target.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", target.display());
    }
    Config::default().save(&target)?;
    println!("{} {}", "Created".green().bold(), target.display());
    Ok(BpmnScopeExit::Success)
}
