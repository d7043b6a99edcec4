//! Run settings loaded from TOML files
//!
//! Settings file is selected via:
//! 1. --config <path> command line argument
//! 2. Default: config/dev.toml
//!
//! Every key has a default. A missing or malformed file falls back to the
//! defaults with a warning.

use anyhow::{ensure, Context};
use clap::ValueEnum;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::services::engine::DEFAULT_OPERATING_HOURS_PER_DAY;
use crate::services::shopping::DEFAULT_PICK_COOLDOWN_MINUTES;

/// Log output format, shared by the config file and the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Fixed seed; drawn from OS entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_operating_hours_per_day")]
    pub operating_hours_per_day: u32,
    /// Minutes a shopper spends between two picks
    #[serde(default = "default_pick_cooldown_minutes")]
    pub pick_cooldown_minutes: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            operating_hours_per_day: default_operating_hours_per_day(),
            pick_cooldown_minutes: default_pick_cooldown_minutes(),
        }
    }
}

fn default_operating_hours_per_day() -> u32 {
    DEFAULT_OPERATING_HOURS_PER_DAY
}

fn default_pick_cooldown_minutes() -> u32 {
    DEFAULT_PICK_COOLDOWN_MINUTES
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_input_file")]
    pub file: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { file: default_input_file() }
    }
}

fn default_input_file() -> String {
    "testdata/input.json".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_file")]
    pub file: String,
    /// Indent the result JSON
    #[serde(default)]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { file: default_output_file(), pretty: false }
    }
}

fn default_output_file() -> String {
    "testdata/output.json".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_log_format() -> LogFormat {
    LogFormat::Text
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Run settings used by the binaries
#[derive(Debug, Clone)]
pub struct Config {
    seed: Option<u64>,
    operating_hours_per_day: u32,
    pick_cooldown_minutes: u32,
    input_file: String,
    output_file: String,
    pretty: bool,
    log_format: LogFormat,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default(), "default".to_string())
    }
}

impl Config {
    fn from_toml(toml_config: TomlConfig, config_file: String) -> Self {
        Self {
            seed: toml_config.simulation.seed,
            operating_hours_per_day: toml_config.simulation.operating_hours_per_day,
            pick_cooldown_minutes: toml_config.simulation.pick_cooldown_minutes,
            input_file: toml_config.input.file,
            output_file: toml_config.output.file,
            pretty: toml_config.output.pretty,
            log_format: toml_config.logging.format,
            config_file,
        }
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        let hours = toml_config.simulation.operating_hours_per_day;
        ensure!(
            (1..=24).contains(&hours),
            "operating_hours_per_day must be within 1..=24, got {} in {}",
            hours,
            path.display()
        );

        Ok(Self::from_toml(toml_config, path.display().to_string()))
    }

    /// Load settings - tries the TOML file first, falls back to defaults
    ///
    /// Runs before logging is installed, so the warning goes to stderr directly.
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {:#}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Override the seed (e.g. from `--seed`)
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    pub fn with_input_file(mut self, file: Option<String>) -> Self {
        if let Some(file) = file {
            self.input_file = file;
        }
        self
    }

    pub fn with_output_file(mut self, file: Option<String>) -> Self {
        if let Some(file) = file {
            self.output_file = file;
        }
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty |= pretty;
        self
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn operating_hours_per_day(&self) -> u32 {
        self.operating_hours_per_day
    }

    pub fn pick_cooldown_minutes(&self) -> u32 {
        self.pick_cooldown_minutes
    }

    pub fn input_file(&self) -> &str {
        &self.input_file
    }

    pub fn output_file(&self) -> &str {
        &self.output_file
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }

    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.seed(), None);
        assert_eq!(config.operating_hours_per_day(), 8);
        assert_eq!(config.pick_cooldown_minutes(), 3);
        assert_eq!(config.input_file(), "testdata/input.json");
        assert_eq!(config.output_file(), "testdata/output.json");
        assert!(!config.pretty());
        assert_eq!(config.log_format(), LogFormat::Text);
        assert_eq!(config.config_file(), "default");
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let toml_config: TomlConfig = toml::from_str(
            r#"
[simulation]
seed = 99

[output]
pretty = true
"#,
        )
        .unwrap();
        let config = Config::from_toml(toml_config, "inline".to_string());

        assert_eq!(config.seed(), Some(99));
        assert_eq!(config.operating_hours_per_day(), 8);
        assert!(config.pretty());
        assert_eq!(config.output_file(), "testdata/output.json");
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::default()
            .with_seed(Some(7))
            .with_input_file(Some("store.json".to_string()))
            .with_output_file(None)
            .with_pretty(true);

        assert_eq!(config.seed(), Some(7));
        assert_eq!(config.input_file(), "store.json");
        assert_eq!(config.output_file(), "testdata/output.json");
        assert!(config.pretty());

        assert_eq!(config.with_seed(None).seed(), Some(7));
    }

    #[test]
    fn test_log_format_names() {
        let logging: LoggingConfig = toml::from_str(r#"format = "json""#).unwrap();
        assert_eq!(logging.format, LogFormat::Json);
        assert_eq!(logging.format.as_str(), "json");
    }

    #[test]
    fn test_log_format_command_line_names_match_config() {
        for format in LogFormat::value_variants() {
            let name = format.to_possible_value().unwrap();
            assert_eq!(name.get_name(), format.as_str());
            assert_eq!(LogFormat::from_str(format.as_str(), false), Ok(*format));
        }
        assert!(LogFormat::from_str("yaml", false).is_err());
    }
}
