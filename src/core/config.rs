//! Configuration module for `chatviz`

use crate::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory inside string values.
const DIR_VARIABLE: &str = "$CHAT_VIZ";

/// Fallback for `render.max_file_depth` when the file omits it.
const DEFAULT_MAX_FILE_DEPTH: usize = 3;

const fn default_max_file_depth() -> usize {
    DEFAULT_MAX_FILE_DEPTH
}

const fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Visualization rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Maximum number of chained `type="file"` directives followed
    #[serde(default = "default_max_file_depth")]
    pub max_file_depth: usize,
    /// Whether `type="file"` directives may read from disk at all
    #[serde(default = "default_true")]
    pub allow_file_directives: bool,
    /// Directory that relative file directive paths resolve against (empty = cwd)
    #[serde(default)]
    pub file_root: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_file_depth: DEFAULT_MAX_FILE_DEPTH,
            allow_file_directives: true,
            file_root: String::new(),
        }
    }
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for rendered report files
    #[serde(default)]
    pub reports_dir: String,
}

/// Model configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Display name of the model used for token cost estimates
    #[serde(default)]
    pub name: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Rendering settings
    #[serde(default)]
    pub render: RenderConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Model settings
    #[serde(default)]
    pub model: ModelConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override maximum file directive depth
    pub max_file_depth: Option<usize>,
    /// Override the root directory for file directives
    pub file_root: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
    /// Override the pricing model
    pub model: Option<String>,
}

impl Config {
    /// Get the `$CHAT_VIZ` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/chatviz`
    /// - macOS: `~/Library/Application Support/chatviz`
    /// - Windows: `%APPDATA%\chatviz`
    #[must_use]
    pub fn get_chatviz_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("chatviz")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in the defaults are
    /// updated; numeric and boolean fields already carry serde defaults.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.render.file_root.is_empty() && !defaults.render.file_root.is_empty() {
            self.render.file_root.clone_from(&defaults.render.file_root);
            changed = true;
        }

        if self.paths.reports_dir.is_empty() && !defaults.paths.reports_dir.is_empty() {
            self.paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir);
            changed = true;
        }

        if self.model.name.is_empty() && !defaults.model.name.is_empty() {
            self.model.name.clone_from(&defaults.model.name);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides affect the current run only; the config file is untouched.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::load();
    /// let overrides = ConfigOverrides {
    ///     max_file_depth: Some(1),
    ///     ..Default::default()
    /// };
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(depth) = overrides.max_file_depth {
            self.render.max_file_depth = depth;
        }
        if let Some(root) = &overrides.file_root {
            self.render.file_root.clone_from(root);
        }

        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }

        if let Some(model) = &overrides.model {
            self.model.name.clone_from(model);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// the directory returned by [`get_chatviz_dir`].
    ///
    /// [`get_chatviz_dir`]: Self::get_chatviz_dir
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_chatviz_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$CHAT_VIZ` in a string to the config directory path
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_chatviz_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults; `$CHAT_VIZ` is expanded in all
    /// path-like values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.render.file_root = Self::expand_variables(&config.render.file_root);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The defaults
    /// are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: loads it, merges missing fields from defaults
    ///   and saves the result when anything was added.
    /// - On first run: creates the config directory and writes the defaults.
    ///
    /// Falls back to defaults, with a warning, if the file cannot be read or
    /// parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            if let Err(e) = defaults.save() {
                warn!("Could not write default config to {}: {e}", config_file.display());
            }
            return defaults;
        }

        let content = match fs::read_to_string(&config_file) {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not read {}: {e}; using defaults", config_file.display());
                return defaults;
            }
        };

        match Self::from_toml(&content) {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) {
                    if let Err(e) = config.save() {
                        warn!("Could not update {}: {e}", config_file.display());
                    }
                }
                config
            }
            Err(e) => {
                warn!("Invalid config in {}: {e}; using defaults", config_file.display());
                defaults
            }
        }
    }

    /// Copy of this config with CLI overrides applied
    ///
    /// The receiver keeps the stored values, so it stays safe to save.
    #[must_use]
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Self {
        let mut config = self.clone();
        config.apply_overrides(overrides);
        config
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `max_file_depth`,
    /// `allow_file_directives`, `file_root`, `reports_dir`, `model`.
    /// Dashed spellings (`max-file-depth`) are accepted too.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "max_file_depth" | "max-file-depth" => Some(self.render.max_file_depth.to_string()),
            "allow_file_directives" | "allow-file-directives" => {
                Some(self.render.allow_file_directives.to_string())
            }
            "file_root" | "file-root" => Some(self.render.file_root.clone()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            "model" => Some(self.model.name.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config. Call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be
    /// parsed for that key (e.g. "maybe" for a boolean).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "max_file_depth" | "max-file-depth" => {
                self.render.max_file_depth = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid depth for 'max_file_depth': '{value}'"))?;
            }
            "allow_file_directives" | "allow-file-directives" => {
                self.render.allow_file_directives = value.parse::<bool>().map_err(|_| {
                    format!("Invalid boolean value for 'allow_file_directives': '{value}'")
                })?;
            }
            "file_root" | "file-root" => self.render.file_root = value.to_string(),
            "reports_dir" | "reports-dir" => self.paths.reports_dir = value.to_string(),
            "model" => self.model.name = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "max_file_depth" | "max-file-depth" => {
                self.render.max_file_depth = defaults.render.max_file_depth;
            }
            "allow_file_directives" | "allow-file-directives" => {
                self.render.allow_file_directives = defaults.render.allow_file_directives;
            }
            "file_root" | "file-root" => self.render.file_root.clone_from(&defaults.render.file_root),
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "model" => self.model.name.clone_from(&defaults.model.name),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds when there is no file.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[render]")?;
        writeln!(f, "  max_file_depth = {}", self.render.max_file_depth)?;
        writeln!(
            f,
            "  allow_file_directives = {}",
            self.render.allow_file_directives
        )?;
        writeln!(f, "  file_root = \"{}\"", self.render.file_root)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        writeln!(f, "\n[model]")?;
        writeln!(f, "  name = \"{}\"", self.model.name)?;

        Ok(())
    }
}
