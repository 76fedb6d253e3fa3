//! Report generation for module results
//!
//! Renders a module together with its [`CalculationResult`] as a Markdown or
//! HTML document. Both inputs are read-only snapshots.

pub mod formats;

use crate::core::models::{Course, Module};
use crate::core::stats::{CalculationResult, Verdict};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Data context for report generation
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Module being reported
    pub module: &'a Module,
    /// Statistics computed for the module
    pub stats: &'a CalculationResult,
    /// Date shown in the report header
    pub generated_on: String,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context dated today
    #[must_use]
    pub fn new(module: &'a Module, stats: &'a CalculationResult) -> Self {
        Self::dated(
            module,
            stats,
            chrono::Local::now().format("%Y-%m-%d").to_string(),
        )
    }

    /// Create a new report context with an explicit date
    #[must_use]
    pub const fn dated(
        module: &'a Module,
        stats: &'a CalculationResult,
        generated_on: String,
    ) -> Self {
        Self {
            module,
            stats,
            generated_on,
        }
    }

    /// The target the projections aim for
    #[must_use]
    pub fn effective_target(&self) -> f64 {
        self.module.effective_target()
    }

    /// Number of courses without a grade
    #[must_use]
    pub fn ungraded_count(&self) -> usize {
        self.module.ungraded_courses().count()
    }

    /// Overall status
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        self.stats.verdict()
    }
}

/// Status of a single course row
#[must_use]
pub fn course_status(course: &Course) -> &'static str {
    match course.grade {
        None => "pending",
        Some(_) if course.is_failed() => "failed",
        Some(_) => "passed",
    }
}

/// Default file name for a module report, e.g. `Blok-2_report.html`
#[must_use]
pub fn report_file_name(module: &Module, format: ReportFormat) -> String {
    let stem = module.name.split_whitespace().collect::<Vec<_>>().join("-");
    let stem = if stem.is_empty() { "module" } else { &stem };
    format!("{stem}_report.{}", format.extension())
}

/// Substitute `{{key}}` placeholders in one pass over the template
///
/// Inserted values are never scanned again, so user text that looks like a
/// placeholder comes out literally. Unknown keys are left as written.
#[must_use]
pub fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            rest = &rest[start..];
            break;
        };
        let key = &after[..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => output.push_str(value),
            None => output.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    output.push_str(rest);
    output
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_file_name() {
        let mut module = Module::new("Blok 2  Economie".to_string(), 5.5);
        assert_eq!(
            report_file_name(&module, ReportFormat::Html),
            "Blok-2-Economie_report.html"
        );

        module.name = "   ".to_string();
        assert_eq!(
            report_file_name(&module, ReportFormat::Markdown),
            "module_report.md"
        );
    }

    #[test]
    fn test_fill_template_single_pass() {
        let values = [
            ("name", "{{count}}".to_string()),
            ("count", "3".to_string()),
        ];
        assert_eq!(
            fill_template("{{name}} has {{count}} items", &values),
            "{{count}} has 3 items"
        );
        assert_eq!(fill_template("{{unknown}} {{count", &values), "{{unknown}} {{count");
        assert_eq!(fill_template("no placeholders", &values), "no placeholders");
    }

    #[test]
    fn test_course_status() {
        let course = Course::new("A".to_string(), 1.0, 5.5);
        assert_eq!(course_status(&course), "pending");
        assert_eq!(course_status(&course.clone().with_grade(5.4)), "failed");
        assert_eq!(course_status(&course.with_grade(5.5)), "passed");
    }
}
