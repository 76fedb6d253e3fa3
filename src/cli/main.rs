//! Command-line interface entry point for `CijferMeester`

mod args;
mod commands;

use args::{Cli, Command};
use cijfermeester::config::Config;
use cijfermeester::info;
use cijfermeester::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use clap::Parser;
use commands::Workspace;

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag wins over config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| std::path::PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let workspace = Workspace::from_config(&config, &args.store_key);

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Module { subcommand } => commands::module::run(subcommand, &workspace),
        Command::Course { subcommand } => commands::course::run(subcommand, &workspace),
        Command::Stats { module, json } => commands::stats::run(&module, json, &workspace),
        Command::Report {
            module,
            output,
            format,
        } => {
            commands::report::run(&module, output.as_deref(), &format, &workspace, &config);
        }
    }
}
