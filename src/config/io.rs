// src/config/io.rs
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::{BpmnScopeToml, Config};
use crate::error::{BpmnError, Result};

pub const CONFIG_FILE: &str = "bpmnscope.toml";

/// Parses TOML text into `config`, keeping defaults for absent fields.
pub fn parse_toml(config: &mut Config, content: &str, origin: &Path) -> Result<()> {
    let parsed: BpmnScopeToml = toml::from_str(content).map_err(|source| BpmnError::Config {
        path: origin.to_path_buf(),
        source,
    })?;
    apply(config, parsed);
    Ok(())
}

/// Loads `path` if it exists. A missing file leaves the defaults in place.
pub fn load_toml_config(config: &mut Config, path: &Path) -> Result<()> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(());
    }
    let content = fs::read_to_string(path).map_err(|source| BpmnError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    parse_toml(config, &content, path)?;
    debug!(path = %path.display(), "loaded config");
    Ok(())
}

pub fn save_to_file(config: &Config, path: &Path) -> Result<()> {
    let content = to_toml(config)?;
    fs::write(path, content).map_err(|source| BpmnError::Io {
        source,
        path: path.to_path_buf(),
    })
}

pub fn to_toml(config: &Config) -> Result<String> {
    let file = BpmnScopeToml {
        complexity: config.complexity.clone(),
        scoring: config.scoring.clone(),
        rules: config.rules.clone(),
        layout: config.layout.clone(),
    };
    Ok(toml::to_string_pretty(&file)?)
}

#[must_use]
pub fn default_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE)
}

fn apply(config: &mut Config, parsed: BpmnScopeToml) {
    config.complexity = parsed.complexity;
    config.scoring = parsed.scoring;
    config.rules = parsed.rules;
    config.layout = parsed.layout;
}
