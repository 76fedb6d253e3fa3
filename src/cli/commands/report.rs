//! Report command handler
//!
//! Writes a module's results to a Markdown or HTML file.

use super::Workspace;
use cijfermeester::config::Config;
use cijfermeester::models::Module;
use cijfermeester::report::{
    report_file_name, HtmlReporter, MarkdownReporter, ReportContext, ReportFormat,
    ReportGenerator,
};
use cijfermeester::stats::{compute_stats, CalculationResult};
use cijfermeester::{error, info};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Run the report command.
///
/// # Arguments
/// * `module` - Module selector (id, position or name)
/// * `output_file` - Optional output path
/// * `format_str` - Report format (markdown, html)
/// * `workspace` - Where the modules are stored
/// * `config` - Configuration containing the default reports directory
pub fn run(
    module: &str,
    output_file: Option<&Path>,
    format_str: &str,
    workspace: &Workspace,
    config: &Config,
) {
    if let Err(err) = generate_report(module, output_file, format_str, workspace, config) {
        error!("Report generation failed for module '{module}': {err}");
        eprintln!("✗ {err}");
        std::process::exit(1);
    }
}

fn generate_report(
    selector: &str,
    output_file: Option<&Path>,
    format_str: &str,
    workspace: &Workspace,
    config: &Config,
) -> Result<(), String> {
    let format =
        ReportFormat::from_str(format_str).map_err(|e| format!("{e}. Use: markdown or html"))?;

    let book = workspace.load();
    let module = book.get(selector).map_err(|e| e.to_string())?;
    let stats = compute_stats(module);

    let output_path = match output_file {
        Some(path) => path.to_path_buf(),
        None => {
            let reports_dir = PathBuf::from(&config.paths.reports_dir);
            std::fs::create_dir_all(&reports_dir).map_err(|e| {
                format!(
                    "Failed to create reports directory {}: {e}",
                    reports_dir.display()
                )
            })?;
            reports_dir.join(report_file_name(module, format))
        }
    };

    write_report(module, &stats, format, &output_path)?;

    println!("✓ Report generated: {}", output_path.display());
    info!("Report exported to: {}", output_path.display());
    print_summary(module, &stats);

    Ok(())
}

/// Write the report to a file in the specified format
fn write_report(
    module: &Module,
    stats: &CalculationResult,
    format: ReportFormat,
    output_path: &Path,
) -> Result<(), String> {
    let ctx = ReportContext::new(module, stats);

    let reporter: Box<dyn ReportGenerator> = match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
    };
    reporter
        .generate(&ctx, output_path)
        .map_err(|e| format!("Failed to generate {format} report: {e}"))
}

fn print_summary(module: &Module, stats: &CalculationResult) {
    println!("\n=== Summary ===");
    println!("Module: {}", module.name);
    println!("Courses: {}", module.courses.len());
    println!("Current average: {}", stats.current_average);
    println!("Status: {}", stats.verdict());
}
