//! Configuration management for quotewise.
//!
//! Configuration is merged from several sources, later ones winning:
//! - Built-in defaults (owned by the chunking and compare crates)
//! - Config file (`.quotewise/config.yaml` or `QUOTEWISE_CONFIG`)
//! - Environment variables
//! - Command-line flags
//!
//! The settings structs here only carry overrides. Each pipeline crate turns
//! them into its own options type, so defaults live next to the code that
//! uses them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory searched for `.quotewise/config.yaml`
    pub workspace: PathBuf,

    /// Optional explicit config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Log format name ("pretty" or "json")
    pub log_format: String,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Chunking pipeline overrides
    pub chunking: ChunkingSettings,

    /// Comparison engine overrides
    pub comparison: ComparisonSettings,
}

/// Chunking overrides from config.yaml or the environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkingSettings {
    /// Target chunk size in estimated tokens
    pub target_tokens: Option<usize>,

    /// Overlap carried between consecutive text chunks, in estimated tokens
    pub overlap_tokens: Option<usize>,

    /// Column names listed in a table summary before "and K more columns"
    pub summary_max_columns: Option<usize>,
}

/// Comparison overrides from config.yaml or the environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSettings {
    /// Fraction below the highest limit that counts as a limit conflict
    pub limit_variance_threshold: Option<f64>,

    /// Fraction above the lowest deductible that counts as a deductible conflict
    pub deductible_variance_threshold: Option<f64>,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    chunking: Option<ChunkingSettings>,
    comparison: Option<ComparisonSettings>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
    format: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            log_level: None,
            log_format: "pretty".to_string(),
            verbose: false,
            no_color: false,
            chunking: ChunkingSettings::default(),
            comparison: ComparisonSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// Environment variables:
    /// - `QUOTEWISE_WORKSPACE`: Directory containing `.quotewise/`
    /// - `QUOTEWISE_CONFIG`: Path to config file
    /// - `QUOTEWISE_TARGET_TOKENS`: Chunk target size in tokens
    /// - `QUOTEWISE_OVERLAP_TOKENS`: Chunk overlap in tokens
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use quotewise_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Chunking: {:?}", config.chunking);
    /// ```
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(workspace) = std::env::var("QUOTEWISE_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Ok(config_file) = std::env::var("QUOTEWISE_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = config.config_path();
        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file not found: {:?}",
                config_path
            )));
        }

        // Environment variables override YAML config
        if let Some(tokens) = env_usize("QUOTEWISE_TARGET_TOKENS")? {
            config.chunking.target_tokens = Some(tokens);
        }

        if let Some(tokens) = env_usize("QUOTEWISE_OVERLAP_TOKENS")? {
            config.chunking.overlap_tokens = Some(tokens);
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Path of the config file that `load` reads.
    pub fn config_path(&self) -> PathBuf {
        self.config_file
            .clone()
            .unwrap_or_else(|| self.quotewise_dir().join("config.yaml"))
    }

    /// Get the path to the .quotewise directory.
    pub fn quotewise_dir(&self) -> PathBuf {
        self.workspace.join(".quotewise")
    }

    /// Merge a YAML configuration file into this config.
    pub fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
            if let Some(format) = logging.format {
                result.log_format = format;
            }
        }

        if let Some(chunking) = config_file.chunking {
            result.chunking = ChunkingSettings {
                target_tokens: chunking.target_tokens.or(result.chunking.target_tokens),
                overlap_tokens: chunking.overlap_tokens.or(result.chunking.overlap_tokens),
                summary_max_columns: chunking
                    .summary_max_columns
                    .or(result.chunking.summary_max_columns),
            };
        }

        if let Some(comparison) = config_file.comparison {
            result.comparison = ComparisonSettings {
                limit_variance_threshold: comparison
                    .limit_variance_threshold
                    .or(result.comparison.limit_variance_threshold),
                deductible_variance_threshold: comparison
                    .deductible_variance_threshold
                    .or(result.comparison.deductible_variance_threshold),
            };
        }

        tracing::debug!("Merged config file {:?}", path);
        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Flags take precedence over both the environment and the config file.
    pub fn with_overrides(
        mut self,
        config_file: Option<PathBuf>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate the override values that can be checked without defaults.
    pub fn validate(&self) -> AppResult<()> {
        if self.chunking.target_tokens == Some(0) {
            return Err(AppError::Config(
                "chunking.targetTokens must be greater than zero".to_string(),
            ));
        }

        if let (Some(target), Some(overlap)) =
            (self.chunking.target_tokens, self.chunking.overlap_tokens)
        {
            if overlap >= target {
                return Err(AppError::Config(format!(
                    "chunking.overlapTokens ({}) must be smaller than targetTokens ({})",
                    overlap, target
                )));
            }
        }

        if let Some(threshold) = self.comparison.limit_variance_threshold {
            if !(0.0..1.0).contains(&threshold) {
                return Err(AppError::Config(format!(
                    "comparison.limitVarianceThreshold must be in [0, 1): {}",
                    threshold
                )));
            }
        }

        if let Some(threshold) = self.comparison.deductible_variance_threshold {
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(AppError::Config(format!(
                    "comparison.deductibleVarianceThreshold must be non-negative: {}",
                    threshold
                )));
            }
        }

        Ok(())
    }
}

/// Read an optional unsigned integer from the environment.
fn env_usize(name: &str) -> AppResult<Option<usize>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|e| AppError::Config(format!("Invalid {}={:?}: {}", name, raw, e))),
        Err(_) => Ok(None),
    }
}
