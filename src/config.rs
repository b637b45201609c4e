// File: src/config.rs
use crate::error::{BeygjaError, Result};
use crate::store::ParadigmFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings shared by the import and analysis commands.
///
/// Every field has a default, so a config file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Reject recorded cells holding variants the prediction does not explain.
    pub strict: bool,
    /// Ignore forms graded above this.
    pub max_grade: Option<u8>,
    /// Ignore forms carrying any of these registers.
    pub excluded_registers: Vec<String>,
    /// File listing mixed verb endings, one per line.
    pub mixed_verbs: Option<PathBuf>,
    pub progress_interval_secs: u64,
    /// Stem syllable count assumed for verbs without one.
    pub default_syllables: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict: false,
            max_grade: None,
            excluded_registers: Vec::new(),
            mixed_verbs: None,
            progress_interval_secs: 5,
            default_syllables: 1,
        }
    }
}

impl Config {
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| BeygjaError::io(path, e))?;
        let config = Self::parse(&contents)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    pub fn validate(&self) -> Result<()> {
        if self.progress_interval_secs == 0 {
            return Err(BeygjaError::Config(
                "progress_interval_secs must be positive".into(),
            ));
        }
        if self.default_syllables == 0 {
            return Err(BeygjaError::Config(
                "default_syllables must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_secs(self.progress_interval_secs)
    }

    pub fn paradigm_filter(&self) -> ParadigmFilter {
        ParadigmFilter {
            max_grade: self.max_grade,
            excluded_registers: self.excluded_registers.iter().cloned().collect(),
        }
    }
}
