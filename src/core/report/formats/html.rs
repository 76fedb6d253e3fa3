//! HTML report generator
//!
//! Generates a self-contained HTML page (embedded CSS, no scripts) with the
//! course table, the verdict and a feasibility bar on the 1-10 scale.

use crate::core::report::{course_status, fill_template, ReportContext, ReportGenerator};
use crate::core::stats::{scale_position, Verdict};
use std::error::Error;
use std::fmt::Write;

/// Embedded HTML report template
const HTML_TEMPLATE: &str = include_str!("../templates/report.html");

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let stats = ctx.stats;
        let verdict = ctx.verdict();
        let target = ctx.effective_target();
        let left = scale_position(stats.min_possible_average);
        let width = scale_position(stats.max_possible_average) - left;

        let values = [
            ("module_name", escape_html(&ctx.module.name)),
            ("generated_on", escape_html(&ctx.generated_on)),
            ("min_average", ctx.module.min_average.to_string()),
            ("target", target.to_string()),
            ("total_weight", stats.total_weight_possible.to_string()),
            ("course_rows", Self::generate_course_rows(ctx)),
            ("verdict_class", verdict_class(verdict).to_string()),
            ("verdict", verdict.to_string()),
            ("verdict_message", verdict.message().to_string()),
            ("current_average", stats.current_average.to_string()),
            ("result_figures", Self::generate_result_figures(ctx)),
            // Feasibility bar
            ("range_left", format!("{left:.1}")),
            ("range_width", format!("{width:.1}")),
            ("target_position", format!("{:.1}", scale_position(target))),
            ("current_marker", Self::generate_current_marker(ctx)),
            ("min_possible", stats.min_possible_average.to_string()),
            ("max_possible", stats.max_possible_average.to_string()),
        ];

        fill_template(HTML_TEMPLATE, &values)
    }

    /// Generate one table row per course
    fn generate_course_rows(ctx: &ReportContext) -> String {
        let mut rows = String::new();

        for course in &ctx.module.courses {
            let grade = course.grade.map_or_else(|| "-".to_string(), |g| g.to_string());
            let _ = writeln!(
                rows,
                "    <tr><td class=\"name\">{}</td><td>{}</td><td>{}</td><td class=\"{}\">{grade}</td></tr>",
                escape_html(&course.name),
                course.weight,
                course.min_grade,
                course_status(course)
            );
        }

        if rows.is_empty() {
            rows.push_str("    <tr><td colspan=\"4\" class=\"pending\">No courses yet.</td></tr>\n");
        }

        rows
    }

    /// Required average and 5.0 projection, when available
    fn generate_result_figures(ctx: &ReportContext) -> String {
        let stats = ctx.stats;
        let mut html = String::new();

        if let Some(required) = stats.required_average_for_remaining {
            let color = if stats.is_impossible { "#dc2626" } else { "#4f46e5" };
            let _ = writeln!(
                html,
                "    <div><p class=\"muted\">Required on remaining {} course(s)</p><p class=\"big\" style=\"color: {color};\">{required}</p></div>",
                ctx.ungraded_count()
            );
        }
        if let Some(projected) = stats.projected_average_with_5 {
            let _ = writeln!(
                html,
                "    <div><p class=\"muted\">With a 5.0 on everything left</p><p class=\"big\">{projected}</p></div>"
            );
        }

        html
    }

    /// Marker for the current average, only once something is graded
    fn generate_current_marker(ctx: &ReportContext) -> String {
        if ctx.stats.total_weight_accumulated > 0.0 {
            format!(
                "    <div class=\"marker current\" style=\"left: {:.1}%;\"></div>",
                scale_position(ctx.stats.current_average)
            )
        } else {
            String::new()
        }
    }
}

const fn verdict_class(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Passed | Verdict::Comfortable => "ok",
        Verdict::FailedCourse | Verdict::Impossible | Verdict::AtRisk => "bad",
        Verdict::AverageTooLow | Verdict::Demanding | Verdict::OnTrack => "",
    }
}

/// Escape text for use in HTML element content and attribute values
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
