//! Stats command handler

use super::{fail, Workspace};
use cijfermeester::logger::is_verbose_enabled;
use cijfermeester::models::Module;
use cijfermeester::stats::{compute_stats, CalculationResult, Verdict};
use cijfermeester::{debug, verbose};
use serde::Serialize;

/// Machine-readable form of `stats --json`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsOutput<'a> {
    module_id: &'a str,
    module_name: &'a str,
    #[serde(flatten)]
    stats: &'a CalculationResult,
    verdict: Verdict,
    verdict_message: &'static str,
}

/// Compute and print the statistics of one module
pub fn run(module: &str, json: bool, workspace: &Workspace) {
    let book = workspace.load();
    let module = match book.get(module) {
        Ok(found) => found,
        Err(e) => fail(&e.to_string()),
    };

    let stats = compute_stats(module);
    debug!("Stats for {} ({}): {stats:?}", module.name, module.id);

    if json {
        print_json(module, &stats);
        return;
    }
    print_stats(module, &stats);

    if is_verbose_enabled() {
        super::course::print_courses(module);
    }
}

fn print_json(module: &Module, stats: &CalculationResult) {
    let verdict = stats.verdict();
    let output = StatsOutput {
        module_id: &module.id,
        module_name: &module.name,
        stats,
        verdict,
        verdict_message: verdict.message(),
    };
    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{text}"),
        Err(e) => fail(&format!("Failed to serialize stats: {e}")),
    }
}

/// Human-readable results block
pub fn print_stats(module: &Module, stats: &CalculationResult) {
    let verdict = stats.verdict();

    println!("\n=== {} ===\n", module.name);
    println!("  Minimum average:   {}", module.min_average);
    if let Some(target) = module.target_average {
        println!("  Target:            {target}");
    }
    println!("  Current average:   {}", stats.current_average);
    println!(
        "  Graded weight:     {} of {}",
        stats.total_weight_accumulated, stats.total_weight_possible
    );

    if let Some(required) = stats.required_average_for_remaining {
        let marker = if stats.is_impossible { "  (above 10)" } else { "" };
        println!("  Required on rest:  {required}{marker}");
    }
    if let Some(projected) = stats.projected_average_with_5 {
        println!("  With 5.0 on rest:  {projected}");
    }
    println!(
        "  Reachable range:   {} - {}",
        stats.min_possible_average, stats.max_possible_average
    );

    println!("\n  Status: {verdict}");
    println!("  {}", verdict.message());
    verbose!(
        "passed={} has_failed_course={} is_impossible={}",
        stats.passed,
        stats.has_failed_course,
        stats.is_impossible
    );
}
