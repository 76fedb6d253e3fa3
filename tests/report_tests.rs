//! Integration tests for report generation

use cijfermeester::models::{Course, Module};
use cijfermeester::report::{
    report_file_name, HtmlReporter, MarkdownReporter, ReportContext, ReportFormat,
    ReportGenerator,
};
use cijfermeester::stats::compute_stats;
use std::fs;
use tempfile::TempDir;

fn sample_module() -> Module {
    let mut module = Module::new("Blok 2 Economie".to_string(), 5.8);
    module.courses = vec![
        Course::new("Marketing".to_string(), 2.0, 5.0).with_grade(7.0),
        Course::new("Recht".to_string(), 1.0, 5.0),
    ];
    module
}

#[test]
fn markdown_report_written_to_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let module = sample_module();
    let stats = compute_stats(&module);
    let ctx = ReportContext::new(&module, &stats);

    let path = temp_dir
        .path()
        .join(report_file_name(&module, ReportFormat::Markdown));
    MarkdownReporter::new()
        .generate(&ctx, &path)
        .expect("generate markdown");

    assert!(path.ends_with("Blok-2-Economie_report.md"));
    let content = fs::read_to_string(&path).expect("read report");
    assert!(content.contains("Blok 2 Economie"));
    assert!(content.contains("| Recht | 1 | 5 | - | pending |"));
    assert!(content.contains(&ctx.generated_on));
}

#[test]
fn html_report_written_to_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let module = sample_module();
    let stats = compute_stats(&module);
    let ctx = ReportContext::dated(&module, &stats, "2026-02-01".to_string());

    let path = temp_dir
        .path()
        .join(report_file_name(&module, ReportFormat::Html));
    HtmlReporter::new()
        .generate(&ctx, &path)
        .expect("generate html");

    let content = fs::read_to_string(&path).expect("read report");
    assert!(content.starts_with("<!DOCTYPE html>"));
    assert!(content.contains("2026-02-01"));
    assert!(!content.contains("{{"));
}

#[test]
fn generate_fails_for_missing_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let module = sample_module();
    let stats = compute_stats(&module);
    let ctx = ReportContext::new(&module, &stats);

    let path = temp_dir.path().join("missing").join("report.md");
    assert!(MarkdownReporter::new().generate(&ctx, &path).is_err());
}
