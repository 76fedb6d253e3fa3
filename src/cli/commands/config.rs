//! Config command handler

use super::fail;
use crate::args::ConfigSubcommand;
use cijfermeester::config::Config;
use cijfermeester::info;
use std::io::{self, Write};

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand {
        None => handle_config_get(config, None),
        Some(ConfigSubcommand::Get { key }) => handle_config_get(config, key),
        Some(ConfigSubcommand::Set { key, value }) => handle_config_set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => handle_config_unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => handle_config_reset(),
    }
}

/// Print one value, or the whole configuration
pub fn handle_config_get(config: &Config, key: Option<String>) {
    match key {
        Some(k) => match config.get(&k) {
            Some(value) => println!("{value}"),
            None => fail(&format!("Unknown config key: '{k}'")),
        },
        None => {
            println!("\n=== Configuration ===\n");
            print!("{config}");
            println!("\nConfig file: {}", Config::get_config_file_path().display());
        }
    }
}

/// Set a value and persist it
pub fn handle_config_set(config: &mut Config, key: &str, value: &str) {
    if let Err(e) = config.set(key, value) {
        fail(&e);
    }
    persist(config);
    info!("Config key '{key}' set to '{value}'");
    println!("✓ Set {key} = {value}");
}

/// Restore one value to its default and persist it
pub fn handle_config_unset(config: &mut Config, defaults: &Config, key: &str) {
    if let Err(e) = config.unset(key, defaults) {
        fail(&e);
    }
    persist(config);
    info!("Config key '{key}' reset to default");
    println!("✓ Reset {key} to default");
}

/// Delete the config file after confirmation
pub fn handle_config_reset() {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    if !confirm("Are you sure you want to reset config to defaults?") {
        println!("✗ Reset cancelled");
        return;
    }

    if let Err(e) = Config::reset() {
        fail(&format!("Failed to remove config file: {e}"));
    }
    println!("✓ Config reset to defaults");
}

fn persist(config: &Config) {
    if let Err(e) = config.save() {
        fail(&format!("Failed to save config: {e}"));
    }
}

/// Ask a y/n question on stdin
fn confirm(question: &str) -> bool {
    print!("{question} (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    if io::stdin().read_line(&mut response).is_err() {
        return false;
    }
    matches!(response.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
