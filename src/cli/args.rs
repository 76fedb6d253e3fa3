//! CLI argument definitions for `CijferMeester`

use clap::{builder::BoolishValueParser, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use cijfermeester::config::ConfigOverrides;
use cijfermeester::logger::Level;
use cijfermeester::store::DEFAULT_STORE_KEY;

/// Parse a grade, weight or average, refusing NaN and infinities
fn finite_number(value: &str) -> Result<f64, String> {
    let number: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(format!("'{value}' is not a finite number"))
    }
}

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Level::from(*self).fmt(f)
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `data_dir`, `min_average`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum ModuleSubcommand {
    /// List all modules with their current average.
    List,
    /// Add a module (starts with one empty course).
    Add {
        /// Module name (defaults to config `module_name`)
        #[arg(long)]
        name: Option<String>,
        /// Minimum passing average (defaults to config `min_average`)
        #[arg(long, value_name = "GRADE", allow_negative_numbers = true, value_parser = finite_number)]
        min_average: Option<f64>,
        /// Personal target average
        #[arg(long, value_name = "GRADE", allow_negative_numbers = true, value_parser = finite_number)]
        target: Option<f64>,
    },
    /// Remove a module. The last remaining module cannot be removed.
    Remove {
        /// Module id, position (1-based) or name
        #[arg(value_name = "MODULE")]
        module: String,
    },
    /// Rename a module.
    Rename {
        /// Module id, position (1-based) or name
        #[arg(value_name = "MODULE")]
        module: String,
        /// New name
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Change the minimum passing average of a module.
    SetMin {
        /// Module id, position (1-based) or name
        #[arg(value_name = "MODULE")]
        module: String,
        /// New minimum average
        #[arg(value_name = "GRADE", allow_negative_numbers = true, value_parser = finite_number)]
        value: f64,
    },
    /// Set the personal target of a module; omit the value to clear it.
    SetTarget {
        /// Module id, position (1-based) or name
        #[arg(value_name = "MODULE")]
        module: String,
        /// New target average
        #[arg(value_name = "GRADE", allow_negative_numbers = true, value_parser = finite_number)]
        value: Option<f64>,
    },
}

/// Course fields shared by `course add` and `course set`
#[derive(Debug, Args, Default)]
pub struct CourseFields {
    /// Course name
    #[arg(long)]
    pub name: Option<String>,
    /// Relative weight
    #[arg(long, allow_negative_numbers = true, value_parser = finite_number)]
    pub weight: Option<f64>,
    /// Minimum grade for this course
    #[arg(long, value_name = "GRADE", allow_negative_numbers = true, value_parser = finite_number)]
    pub min_grade: Option<f64>,
    /// Obtained grade
    #[arg(long, allow_negative_numbers = true, value_parser = finite_number)]
    pub grade: Option<f64>,
}

#[derive(Debug, Subcommand)]
pub enum CourseSubcommand {
    /// List the courses of a module.
    List {
        /// Module id, position (1-based) or name
        #[arg(value_name = "MODULE")]
        module: String,
    },
    /// Add a course to a module.
    Add {
        /// Module id, position (1-based) or name
        #[arg(value_name = "MODULE")]
        module: String,
        #[command(flatten)]
        fields: CourseFields,
    },
    /// Remove a course from a module.
    Remove {
        /// Module id, position (1-based) or name
        #[arg(value_name = "MODULE")]
        module: String,
        /// Course id, position (1-based) or name
        #[arg(value_name = "COURSE")]
        course: String,
    },
    /// Change fields of a course.
    Set {
        /// Module id, position (1-based) or name
        #[arg(value_name = "MODULE")]
        module: String,
        /// Course id, position (1-based) or name
        #[arg(value_name = "COURSE")]
        course: String,
        #[command(flatten)]
        fields: CourseFields,
        /// Mark the course as not yet taken
        #[arg(long, conflicts_with = "grade")]
        clear_grade: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Manage modules.
    Module {
        #[command(subcommand)]
        subcommand: ModuleSubcommand,
    },
    /// Manage the courses of a module.
    Course {
        #[command(subcommand)]
        subcommand: CourseSubcommand,
    },
    /// Show the current average, required grades and feasible range of a module.
    Stats {
        /// Module id, position (1-based) or name
        #[arg(value_name = "MODULE", default_value = "1")]
        module: String,

        /// Print the figures as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write a results report for a module.
    Report {
        /// Module id, position (1-based) or name
        #[arg(value_name = "MODULE", default_value = "1")]
        module: String,

        /// Output file path (optional; defaults to config `reports_dir`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "html")]
        format: String,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "cijfermeester",
    about = "Track weighted module averages on the 1-10 grading scale",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Key the module book is stored under
    #[arg(long, value_name = "KEY", default_value = DEFAULT_STORE_KEY)]
    pub store_key: String,

    // --- Config overrides ---
    /// Override config logging level (this run only)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the module store directory
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the reports directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` means no override. Overrides apply to this run only.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            data_dir: self
                .data_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            reports_dir: self
                .reports_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let cli = Cli::parse_from(["cijfermeester", "stats"]);

        let overrides = cli.to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.data_dir.is_none());
        assert!(overrides.reports_dir.is_none());
        assert_eq!(cli.store_key, DEFAULT_STORE_KEY);
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli::parse_from([
            "cijfermeester",
            "--config-level",
            "debug",
            "--config-verbose",
            "yes",
            "--data-dir",
            "/tmp/grades",
            "--reports-dir",
            "/tmp/reports",
            "--log-file",
            "/tmp/cm.log",
            "stats",
            "Blok 1",
        ]);

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level.as_deref(), Some("debug"));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.data_dir.as_deref(), Some("/tmp/grades"));
        assert_eq!(overrides.reports_dir.as_deref(), Some("/tmp/reports"));
        assert_eq!(overrides.file.as_deref(), Some("/tmp/cm.log"));
    }

    #[test]
    fn test_course_set_parses_grade() {
        let cli = Cli::parse_from([
            "cijfermeester",
            "course",
            "set",
            "1",
            "Statistiek",
            "--grade",
            "7.5",
            "--weight",
            "2",
        ]);

        match cli.command {
            Command::Course {
                subcommand:
                    CourseSubcommand::Set {
                        module,
                        course,
                        fields,
                        clear_grade,
                    },
            } => {
                assert_eq!(module, "1");
                assert_eq!(course, "Statistiek");
                assert_eq!(fields.grade, Some(7.5));
                assert_eq!(fields.weight, Some(2.0));
                assert!(!clear_grade);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_clear_grade_conflicts_with_grade() {
        let result = Cli::try_parse_from([
            "cijfermeester",
            "course",
            "set",
            "1",
            "1",
            "--grade",
            "7",
            "--clear-grade",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_set_target_without_value_clears() {
        let cli = Cli::parse_from(["cijfermeester", "module", "set-target", "1"]);
        assert!(matches!(
            cli.command,
            Command::Module {
                subcommand: ModuleSubcommand::SetTarget { value: None, .. }
            }
        ));
    }

    #[test]
    fn test_non_finite_numbers_rejected() {
        for value in ["inf", "-infinity", "NaN"] {
            let result = Cli::try_parse_from([
                "cijfermeester",
                "course",
                "set",
                "1",
                "1",
                "--weight",
                value,
            ]);
            assert!(result.is_err(), "accepted {value}");
        }
        assert!(Cli::try_parse_from(["cijfermeester", "module", "set-min", "1", "nan"]).is_err());
        assert_eq!(finite_number("-2.5"), Ok(-2.5));
    }

    #[test]
    fn test_stats_json_flag() {
        let cli = Cli::parse_from(["cijfermeester", "stats", "2", "--json"]);
        assert!(matches!(cli.command, Command::Stats { json: true, .. }));
    }
}
