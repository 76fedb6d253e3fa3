//! Markdown report generator
//!
//! Generates module reports in Markdown. These render well in GitHub,
//! GitLab and most note-taking tools.

use crate::core::report::{course_status, fill_template, ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let stats = ctx.stats;
        let verdict = ctx.verdict();
        let values = [
            ("module_name", escape_cell(&ctx.module.name)),
            ("generated_on", ctx.generated_on.clone()),
            ("min_average", ctx.module.min_average.to_string()),
            ("target", ctx.effective_target().to_string()),
            ("total_weight", stats.total_weight_possible.to_string()),
            ("weight_accumulated", stats.total_weight_accumulated.to_string()),
            ("course_table", Self::generate_course_table(ctx)),
            ("verdict", verdict.to_string()),
            ("verdict_message", verdict.message().to_string()),
            ("current_average", stats.current_average.to_string()),
            ("result_details", Self::generate_result_details(ctx)),
            ("min_possible", stats.min_possible_average.to_string()),
            ("max_possible", stats.max_possible_average.to_string()),
        ];

        fill_template(MARKDOWN_TEMPLATE, &values)
    }

    /// Generate the course table
    fn generate_course_table(ctx: &ReportContext) -> String {
        if ctx.module.courses.is_empty() {
            return "_No courses yet._\n".to_string();
        }

        let mut table = String::new();
        table.push_str("| Course | Weight | Minimum | Grade | Status |\n");
        table.push_str("|---|---|---|---|---|\n");

        for course in &ctx.module.courses {
            let grade = course.grade.map_or_else(|| "-".to_string(), |g| g.to_string());
            let _ = writeln!(
                table,
                "| {} | {} | {} | {grade} | {} |",
                escape_cell(&course.name),
                course.weight,
                course.min_grade,
                course_status(course)
            );
        }

        table
    }

    /// Generate the optional lines of the result block
    fn generate_result_details(ctx: &ReportContext) -> String {
        let stats = ctx.stats;
        let mut lines = String::new();

        if let Some(required) = stats.required_average_for_remaining {
            let _ = writeln!(
                lines,
                "- Required average on the remaining {} course(s): **{required}**",
                ctx.ungraded_count()
            );
        }
        if let Some(projected) = stats.projected_average_with_5 {
            let _ = writeln!(lines, "- Final average with a 5.0 on everything left: **{projected}**");
        }
        if stats.has_failed_course {
            lines.push_str("- At least one course is below its minimum grade\n");
        }

        lines
    }
}

/// Escape characters that would break a Markdown table cell
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Course, Module};
    use crate::core::stats::compute_stats;

    fn module() -> Module {
        let mut module = Module::new("Blok 2".to_string(), 5.8);
        module
            .courses
            .push(Course::new("Marketing".to_string(), 2.0, 5.0).with_grade(6.5));
        module
            .courses
            .push(Course::new("Recht | Ethiek".to_string(), 1.0, 5.0));
        module
    }

    #[test]
    fn test_render_contains_figures() {
        let module = module();
        let stats = compute_stats(&module);
        let ctx = ReportContext::dated(&module, &stats, "2026-01-15".to_string());

        let report = MarkdownReporter::new().render(&ctx).expect("render");

        assert!(report.contains("# CijferMeester Report: Blok 2"));
        assert!(report.contains("_Generated on 2026-01-15_"));
        assert!(report.contains("| Marketing | 2 | 5 | 6.5 | passed |"));
        assert!(report.contains("Recht \\| Ethiek"));
        assert!(report.contains("Required average on the remaining 1 course(s)"));
        assert!(!report.contains("{{"));
    }

    #[test]
    fn test_placeholder_text_in_names_stays_literal() {
        let mut module = Module::new("{{min_average}}".to_string(), 5.8);
        module
            .courses
            .push(Course::new("{{module_name}}".to_string(), 1.0, 5.0));
        let stats = compute_stats(&module);
        let ctx = ReportContext::dated(&module, &stats, "2026-01-15".to_string());

        let report = MarkdownReporter::new().render(&ctx).expect("render");

        assert!(report.contains("# CijferMeester Report: {{min_average}}"));
        assert!(report.contains("| {{module_name}} | 1 | 5 | - | pending |"));
        assert!(!report.contains("# CijferMeester Report: 5.8"));
    }

    #[test]
    fn test_render_empty_module() {
        let module = Module::new("Leeg".to_string(), 5.8);
        let stats = compute_stats(&module);
        let ctx = ReportContext::dated(&module, &stats, "2026-01-15".to_string());

        let report = MarkdownReporter::new().render(&ctx).expect("render");
        assert!(report.contains("_No courses yet._"));
        assert!(report.contains("Lowest reachable: **1**"));
        assert!(report.contains("Highest reachable: **10**"));
    }
}
