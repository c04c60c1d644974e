//! Simulator configuration with documented constants
//!
//! All tunable values are collected here with explanations of their purpose.
//! SP growth rules themselves live in job data (`SpRules`), not here: this
//! struct only carries the host-side bounds and paths.

use crate::core::error::{Result, SimError};
use std::path::{Path, PathBuf};

/// Configuration for the simulator host (CLI and tools)
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Lowest character level accepted from input
    ///
    /// The engine assumes levels are pre-clamped (see the validator docs),
    /// so every input path clamps against this before touching a build.
    pub min_level: u32,

    /// Highest character level accepted from input
    ///
    /// MapleLand caps characters at 250. Raising this is safe for tier 4
    /// (its cap grows without bound) but pointless below it.
    pub max_level: u32,

    /// Level a fresh build starts at
    ///
    /// 30 puts a new build right at the 2nd-job unlock for the standard
    /// rule set, which is where most build planning starts.
    pub default_level: u32,

    /// Directory scanned for `index.json` and per-job data files
    pub jobs_dir: PathBuf,

    /// File the `save`/`load` REPL commands read and write
    pub session_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            min_level: 1,
            max_level: 250,
            default_level: 30,
            jobs_dir: PathBuf::from("data/jobs"),
            session_path: PathBuf::from("mapleland-session.json"),
        }
    }
}

impl SimConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp an input level into the supported range
    pub fn clamp_level(&self, level: u32) -> u32 {
        level.clamp(self.min_level, self.max_level)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.min_level == 0 {
            return Err(SimError::InvalidConfig(
                "min_level must be at least 1".into(),
            ));
        }
        if self.min_level > self.max_level {
            return Err(SimError::InvalidConfig(format!(
                "min_level ({}) must be <= max_level ({})",
                self.min_level, self.max_level
            )));
        }
        if self.default_level < self.min_level || self.default_level > self.max_level {
            return Err(SimError::InvalidConfig(format!(
                "default_level ({}) must lie within {}..={}",
                self.default_level, self.min_level, self.max_level
            )));
        }
        Ok(())
    }

    /// Overlay values from a TOML config file onto the defaults
    ///
    /// Missing keys keep their defaults; the file only needs to name what
    /// it changes. Returns the overlaid config after validation.
    pub fn load_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::default();

        let toml: toml::Value = content
            .parse()
            .map_err(|e| SimError::InvalidConfig(format!("{}: {}", path.display(), e)))?;

        if let Some(n) = toml.get("min_level").and_then(|v| v.as_integer()) {
            config.min_level = n.max(0) as u32;
        }
        if let Some(n) = toml.get("max_level").and_then(|v| v.as_integer()) {
            config.max_level = n.max(0) as u32;
        }
        if let Some(n) = toml.get("default_level").and_then(|v| v.as_integer()) {
            config.default_level = n.max(0) as u32;
        }
        if let Some(dir) = toml.get("jobs_dir").and_then(|v| v.as_str()) {
            config.jobs_dir = PathBuf::from(dir);
        }
        if let Some(file) = toml.get("session_path").and_then(|v| v.as_str()) {
            config.session_path = PathBuf::from(file);
        }

        config.validate()?;
        Ok(config)
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<SimConfig> = OnceLock::new();

/// Get the global simulator config (initializes with defaults if not set)
pub fn config() -> &'static SimConfig {
    CONFIG.get_or_init(SimConfig::default)
}

/// Set the global simulator config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: SimConfig) -> std::result::Result<(), SimConfig> {
    CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_clamp_level() {
        let config = SimConfig::default();
        assert_eq!(config.clamp_level(0), 1);
        assert_eq!(config.clamp_level(30), 30);
        assert_eq!(config.clamp_level(9999), 250);
        // Anything a CLI flag can parse must come back in range, well
        // clear of overflowing the tier-4 cap arithmetic.
        assert_eq!(config.clamp_level(2_000_000_000), 250);
        assert_eq!(config.clamp_level(u32::MAX), 250);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let config = SimConfig {
            min_level: 100,
            max_level: 50,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_level_outside_bounds_rejected() {
        let config = SimConfig {
            default_level: 0,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_overlay() {
        use std::io::Write;

        let dir = std::env::temp_dir().join("mapleland-sim-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sim.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            "default_level = 70\njobs_dir = \"custom/jobs\"\n"
        )
        .unwrap();

        let config = SimConfig::load_toml(&path).unwrap();
        assert_eq!(config.default_level, 70);
        assert_eq!(config.jobs_dir, PathBuf::from("custom/jobs"));
        // Untouched keys keep defaults
        assert_eq!(config.max_level, 250);

        std::fs::remove_file(&path).ok();
    }
}
