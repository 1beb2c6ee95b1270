// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::io::CONFIG_FILE;
pub use self::types::{
    BpmnScopeToml, ComplexityConfig, Config, LayoutConfig, RuleConfig, ScoringConfig,
};

use crate::error::{BpmnError, Result};
use std::path::Path;

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config and loads `bpmnscope.toml` from the working directory.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = Self::new();
        io::load_toml_config(&mut config, &io::default_path())?;
        config.validate()?;
        Ok(config)
    }

    /// Loads an explicit config file. Unlike [`Config::load`], the file must exist.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| BpmnError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        let mut config = Self::new();
        io::parse_toml(&mut config, &content, path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses TOML text over the defaults.
    ///
    /// # Errors
    /// Returns an error if the text is not valid config TOML.
    pub fn parse_toml(&mut self, content: &str) -> Result<()> {
        io::parse_toml(self, content, Path::new("<inline>"))?;
        self.validate()
    }

    /// Validates configuration.
    ///
    /// # Errors
    /// Returns an error when thresholds are inverted or the layout has no columns.
    pub fn validate(&self) -> Result<()> {
        let c = &self.complexity;
        if c.low_below > c.medium_below {
            return Err(BpmnError::Other(format!(
                "complexity.low_below ({}) must not exceed complexity.medium_below ({})",
                c.low_below, c.medium_below
            )));
        }
        if self.layout.columns == 0 {
            return Err(BpmnError::Other("layout.columns must be at least 1".into()));
        }
        Ok(())
    }

    /// Saves the current configuration as TOML.
    ///
    /// # Errors
    /// Returns error if serialization or the file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        io::save_to_file(self, path)
    }
}
