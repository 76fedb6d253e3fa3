//! Course model

use serde::{Deserialize, Serialize};

use super::generate_id;

/// A single weighted, gradable unit within a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Stable identifier
    pub id: String,

    /// Display name (e.g., "Statistiek 1")
    pub name: String,

    /// Relative contribution to the module average
    pub weight: f64,

    /// Lowest grade that still counts as passed for this course
    pub min_grade: f64,

    /// Final grade, `None` while the course has not been taken
    pub grade: Option<f64>,
}

impl Course {
    /// Create a new ungraded course with a fresh id
    ///
    /// # Arguments
    /// * `name` - Display name
    /// * `weight` - Relative weight (not validated)
    /// * `min_grade` - Per-course passing threshold
    #[must_use]
    pub fn new(name: String, weight: f64, min_grade: f64) -> Self {
        Self {
            id: generate_id(),
            name,
            weight,
            min_grade,
            grade: None,
        }
    }

    /// Builder-style helper that records a grade
    #[must_use]
    pub fn with_grade(mut self, grade: f64) -> Self {
        self.grade = Some(grade);
        self
    }

    /// Whether a grade has been recorded
    #[must_use]
    pub const fn is_graded(&self) -> bool {
        self.grade.is_some()
    }

    /// Whether the course is graded below its own minimum
    ///
    /// A failed course blocks passing the module regardless of the average.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.grade.is_some_and(|grade| grade < self.min_grade)
    }

    /// First numeric field holding NaN or an infinity, if any
    #[must_use]
    pub fn non_finite_field(&self) -> Option<&'static str> {
        if !self.weight.is_finite() {
            Some("weight")
        } else if !self.min_grade.is_finite() {
            Some("min_grade")
        } else if self.grade.is_some_and(|g| !g.is_finite()) {
            Some("grade")
        } else {
            None
        }
    }
}
