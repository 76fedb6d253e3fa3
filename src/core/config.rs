//! Configuration module for `CijferMeester`

use crate::core::models::Defaults;
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

/// Variable expanded to the configuration directory in path values
const DIR_VARIABLE: &str = "$CIJFERMEESTER";

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

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the module store
    #[serde(default)]
    pub data_dir: String,
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
}

/// Values used for newly created modules and courses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Name of a new module
    #[serde(default)]
    pub module_name: String,
    /// Name of a new course
    #[serde(default)]
    pub course_name: String,
    /// Minimum passing average of a new module
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_average: Option<f64>,
    /// Minimum grade of a new course
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_grade: Option<f64>,
    /// Weight of a new course
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_weight: Option<f64>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Defaults for new modules and courses
    #[serde(default)]
    pub defaults: DefaultsConfig,
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
    /// Override module store directory
    pub data_dir: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
}

fn merge_string(field: &mut String, default: &str) -> bool {
    if field.is_empty() && !default.is_empty() {
        default.clone_into(field);
        true
    } else {
        false
    }
}

fn merge_number(field: &mut Option<f64>, default: Option<f64>) -> bool {
    if field.is_none() && default.is_some() {
        *field = default;
        true
    } else {
        false
    }
}

fn parse_number(key: &str, value: &str) -> Result<f64, String> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid number for '{key}': '{value}'"))
}

fn display_number(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| v.to_string())
}

impl Config {
    /// Get the `$CIJFERMEESTER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/cijfermeester`
    /// - macOS: `~/Library/Application Support/cijfermeester`
    /// - Windows: `%APPDATA%\cijfermeester`
    #[must_use]
    pub fn get_cijfermeester_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cijfermeester")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty (or absent, for numbers) in the current
    /// config and set in `defaults` are updated, so upgrades pick up new
    /// settings without touching user choices.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let merged = [
            merge_string(&mut self.logging.level, &defaults.logging.level),
            merge_string(&mut self.logging.file, &defaults.logging.file),
            merge_string(&mut self.paths.data_dir, &defaults.paths.data_dir),
            merge_string(&mut self.paths.reports_dir, &defaults.paths.reports_dir),
            merge_string(
                &mut self.defaults.module_name,
                &defaults.defaults.module_name,
            ),
            merge_string(
                &mut self.defaults.course_name,
                &defaults.defaults.course_name,
            ),
            merge_number(&mut self.defaults.min_average, defaults.defaults.min_average),
            merge_number(&mut self.defaults.min_grade, defaults.defaults.min_grade),
            merge_number(
                &mut self.defaults.course_weight,
                defaults.defaults.course_weight,
            ),
        ];
        merged.contains(&true)
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides only affect this run; nothing is written to the config file.
    /// Only non-`None` values replace config values.
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
        if let Some(data_dir) = &overrides.data_dir {
            self.paths.data_dir.clone_from(data_dir);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, in
    /// the directory returned by [`get_cijfermeester_dir`].
    ///
    /// [`get_cijfermeester_dir`]: Self::get_cijfermeester_dir
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_cijfermeester_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$CIJFERMEESTER` to the configuration directory
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_cijfermeester_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults; `$CIJFERMEESTER` is expanded
    /// in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let config = Config::from_toml(r#"
    /// [logging]
    /// level = "info"
    /// file = "$CIJFERMEESTER/app.log"
    /// "#)?;
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.data_dir = Self::expand_variables(&config.paths.data_dir);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create it from defaults if not found
    ///
    /// - File exists: load it, merge missing fields from defaults, resave if anything was added
    /// - First run: create the config directory and write the defaults
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            let _ = defaults.save();
            return defaults;
        }

        match fs::read_to_string(&config_file)
            .map_err(|e| e.to_string())
            .and_then(|content| Self::from_toml(&content).map_err(|e| e.to_string()))
        {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save();
                }
                config
            }
            Err(e) => {
                crate::warn!(
                    "Ignoring unreadable config {}: {e}",
                    config_file.display()
                );
                defaults
            }
        }
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized, the directory
    /// cannot be created or the file cannot be written.
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
    /// Supported keys: `level`, `file`, `verbose`, `data_dir`, `reports_dir`,
    /// `module_name`, `course_name`, `min_average`, `min_grade`,
    /// `course_weight`. Dashes may be used instead of underscores.
    ///
    /// # Returns
    /// - `Some(String)`: The configuration value as a string
    /// - `None`: If the key is not recognized
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key.replace('-', "_").as_str() {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "data_dir" => Some(self.paths.data_dir.clone()),
            "reports_dir" => Some(self.paths.reports_dir.clone()),
            "module_name" => Some(self.defaults.module_name.clone()),
            "course_name" => Some(self.defaults.course_name.clone()),
            "min_average" => Some(display_number(self.defaults.min_average)),
            "min_grade" => Some(display_number(self.defaults.min_grade)),
            "course_weight" => Some(display_number(self.defaults.course_weight)),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be
    /// parsed (e.g., "maybe" for `verbose`, "abc" for `min_grade`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "data_dir" => self.paths.data_dir = value.to_string(),
            "reports_dir" => self.paths.reports_dir = value.to_string(),
            "module_name" => self.defaults.module_name = value.to_string(),
            "course_name" => self.defaults.course_name = value.to_string(),
            "min_average" => self.defaults.min_average = Some(parse_number(key, value)?),
            "min_grade" => self.defaults.min_grade = Some(parse_number(key, value)?),
            "course_weight" => self.defaults.course_weight = Some(parse_number(key, value)?),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// Updates the in-memory config only. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "data_dir" => self.paths.data_dir.clone_from(&defaults.paths.data_dir),
            "reports_dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "module_name" => self
                .defaults
                .module_name
                .clone_from(&defaults.defaults.module_name),
            "course_name" => self
                .defaults
                .course_name
                .clone_from(&defaults.defaults.course_name),
            "min_average" => self.defaults.min_average = defaults.defaults.min_average,
            "min_grade" => self.defaults.min_grade = defaults.defaults.min_grade,
            "course_weight" => self.defaults.course_weight = defaults.defaults.course_weight,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds without doing anything if there is no file.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Values for new modules and courses, falling back to built-in defaults
    #[must_use]
    pub fn model_defaults(&self) -> Defaults {
        let builtin = Defaults::default();
        let name_or = |value: &str, fallback: String| {
            if value.is_empty() {
                fallback
            } else {
                value.to_string()
            }
        };
        Defaults {
            module_name: name_or(&self.defaults.module_name, builtin.module_name),
            course_name: name_or(&self.defaults.course_name, builtin.course_name),
            min_average: self.defaults.min_average.unwrap_or(builtin.min_average),
            min_grade: self.defaults.min_grade.unwrap_or(builtin.min_grade),
            course_weight: self.defaults.course_weight.unwrap_or(builtin.course_weight),
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  data_dir = \"{}\"", self.paths.data_dir)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        writeln!(f, "\n[defaults]")?;
        writeln!(f, "  module_name = \"{}\"", self.defaults.module_name)?;
        writeln!(f, "  course_name = \"{}\"", self.defaults.course_name)?;
        writeln!(f, "  min_average = {}", display_number(self.defaults.min_average))?;
        writeln!(f, "  min_grade = {}", display_number(self.defaults.min_grade))?;
        writeln!(
            f,
            "  course_weight = {}",
            display_number(self.defaults.course_weight)
        )?;

        Ok(())
    }
}
