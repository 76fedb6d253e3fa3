//! Integration tests for configuration management

use cijfermeester::config::{Config, ConfigOverrides};
use cijfermeester::models::Defaults;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.paths.data_dir.is_empty(),
        "Default data_dir should not be empty"
    );
    assert!(
        !config.paths.reports_dir.is_empty(),
        "Default reports_dir should not be empty"
    );
    assert_eq!(config.defaults.min_average, Some(5.8));
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[paths]
data_dir = "./data"
reports_dir = "./reports"

[defaults]
module_name = "Blok"
course_name = "Vak"
min_average = 5.5
min_grade = 4.0
course_weight = 2.0
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.data_dir, "./data");
    assert_eq!(config.paths.reports_dir, "./reports");
    assert_eq!(config.defaults.module_name, "Blok");
    assert_eq!(config.defaults.min_grade, Some(4.0));
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.paths.data_dir, "");
    assert!(config.defaults.min_average.is_none());
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$CIJFERMEESTER/test.log"

[paths]
data_dir = "$CIJFERMEESTER/data"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("cijfermeester"));
    assert!(!config.logging.file.contains("$CIJFERMEESTER"));
    assert!(config.paths.data_dir.ends_with("data"));
    assert!(!config.paths.data_dir.contains("$CIJFERMEESTER"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").as_deref(), Some("debug"));

    config
        .set("verbose", "true")
        .expect("Failed to set verbose");
    assert_eq!(config.get("verbose").as_deref(), Some("true"));
    assert!(config.logging.verbose);

    config
        .set("course_weight", "3")
        .expect("Failed to set course weight");
    assert_eq!(config.defaults.course_weight, Some(3.0));

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
    assert!(config.set("min_grade", "zes").is_err());
    assert!(config.set("verbose", "maybe").is_err());
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "debug").expect("Failed to set level");
    config.set("min_average", "6.5").expect("Failed to set min");

    config
        .unset("level", &defaults)
        .expect("Failed to unset level");
    config
        .unset("min-average", &defaults)
        .expect("Failed to unset min average");

    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.defaults.min_average, defaults.defaults.min_average);
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config
        .set("module_name", "Blok 3")
        .expect("Failed to set module name");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded.logging.level, "info");
    assert_eq!(loaded.defaults.module_name, "Blok 3");
    assert_eq!(loaded.defaults.min_average, config.defaults.min_average);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        data_dir: Some("./custom_data".to_string()),
        reports_dir: Some("./custom_reports".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.data_dir, "./custom_data");
    assert_eq!(config.paths.reports_dir, "./custom_reports");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let data_dir = config.paths.data_dir.clone();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.data_dir, data_dir);
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display_str = format!("{config}");

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("[defaults]"));

    assert!(display_str.contains("level"));
    assert!(display_str.contains("data_dir"));
    assert!(display_str.contains("min_average = 5.8"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[paths]
data_dir = ""
reports_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    let changed = config.merge_defaults(&defaults);

    assert!(
        changed,
        "merge_defaults should return true when fields are added"
    );
    assert_eq!(config.paths.data_dir, defaults.paths.data_dir);
    assert_eq!(config.defaults.course_weight, defaults.defaults.course_weight);
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"
verbose = false

[defaults]
min_average = 6.0
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    config.merge_defaults(&defaults);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.defaults.min_average, Some(6.0));
}

#[test]
fn test_merge_defaults_is_stable() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();
    assert!(!config.merge_defaults(&defaults));
}

#[test]
fn test_model_defaults_from_config() {
    let mut config = Config::from_defaults();
    config.set("course_name", "Vak").expect("set course name");
    config.set("min_grade", "5.5").expect("set min grade");

    let defaults = config.model_defaults();
    let course = defaults.empty_course();

    assert_eq!(course.name, "Vak");
    assert!((course.min_grade - 5.5).abs() < f64::EPSILON);
    assert_eq!(defaults.module_name, Defaults::default().module_name);
}

#[test]
fn test_get_cijfermeester_dir() {
    let dir = Config::get_cijfermeester_dir();

    assert!(dir.to_string_lossy().contains("cijfermeester"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
