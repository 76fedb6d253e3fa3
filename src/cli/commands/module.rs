//! Module command handler

use super::Workspace;
use crate::args::ModuleSubcommand;
use cijfermeester::book::ModuleBook;
use cijfermeester::info;
use cijfermeester::models::Module;
use cijfermeester::stats::compute_stats;

/// Dispatch module subcommands
pub fn run(subcommand: ModuleSubcommand, workspace: &Workspace) {
    match subcommand {
        ModuleSubcommand::List => print_modules(&workspace.load()),
        ModuleSubcommand::Add {
            name,
            min_average,
            target,
        } => add(workspace, name, min_average, target),
        ModuleSubcommand::Remove { module } => {
            let removed = workspace.edit(|book| book.remove_module(&module));
            info!("Removed module {} ({})", removed.name, removed.id);
            println!("✓ Removed module '{}'", removed.name);
        }
        ModuleSubcommand::Rename { module, name } => {
            workspace.edit(|book| book.rename_module(&module, name.clone()));
            println!("✓ Renamed module to '{name}'");
        }
        ModuleSubcommand::SetMin { module, value } => {
            workspace.edit(|book| book.set_min_average(&module, value));
            println!("✓ Minimum average set to {value}");
        }
        ModuleSubcommand::SetTarget { module, value } => {
            workspace.edit(|book| book.set_target_average(&module, value));
            match value {
                Some(v) => println!("✓ Target set to {v}"),
                None => println!("✓ Target cleared; the minimum average is the target"),
            }
        }
    }
}

fn add(workspace: &Workspace, name: Option<String>, min_average: Option<f64>, target: Option<f64>) {
    let mut module = workspace.defaults().empty_module();
    if let Some(name) = name {
        module.name = name;
    }
    if let Some(min_average) = min_average {
        module.min_average = min_average;
    }
    module.target_average = target;

    let added = workspace.edit(|book| book.add_module(module).cloned());
    info!("Added module {} ({})", added.name, added.id);
    println!("✓ Added module '{}' ({})", added.name, added.id);
}

/// One line per module: position, name, average, graded weight
pub fn print_modules(book: &ModuleBook) {
    println!("\n=== Modules ===\n");
    for (i, module) in book.modules.iter().enumerate() {
        println!("{:>3}. {}", i + 1, summary_line(module));
    }
}

fn summary_line(module: &Module) -> String {
    let stats = compute_stats(module);
    format!(
        "{}  avg {} (min {})  graded {}/{}  [{}]",
        module.name,
        stats.current_average,
        module.min_average,
        stats.total_weight_accumulated,
        stats.total_weight_possible,
        stats.verdict()
    )
}
