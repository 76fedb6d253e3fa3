//! Module model

use serde::{Deserialize, Serialize};

use super::{generate_id, Course};

/// A named group of courses with its own passing and target average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Stable identifier
    pub id: String,

    /// Display name (e.g., "Propedeuse Blok 2")
    pub name: String,

    /// Average required to pass the module
    pub min_average: f64,

    /// Personal goal; `min_average` is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_average: Option<f64>,

    /// Courses in display order
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl Module {
    /// Create a new module without courses
    #[must_use]
    pub fn new(name: String, min_average: f64) -> Self {
        Self {
            id: generate_id(),
            name,
            min_average,
            target_average: None,
            courses: Vec::new(),
        }
    }

    /// The average all "required grade" projections aim for
    #[must_use]
    pub fn effective_target(&self) -> f64 {
        self.target_average.unwrap_or(self.min_average)
    }

    /// Courses that have no grade yet
    pub fn ungraded_courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter().filter(|c| !c.is_graded())
    }

    /// Position of the course matching `selector` in `courses`
    ///
    /// The selector is tried as an id, then as a 1-based position, then as a
    /// case-insensitive name.
    #[must_use]
    pub fn course_index(&self, selector: &str) -> Option<usize> {
        if let Some(idx) = self.courses.iter().position(|c| c.id == selector) {
            return Some(idx);
        }
        if let Ok(pos) = selector.parse::<usize>() {
            if (1..=self.courses.len()).contains(&pos) {
                return Some(pos - 1);
            }
        }
        self.courses
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(selector))
    }

    /// Find a course by id, 1-based position or name
    #[must_use]
    pub fn find_course(&self, selector: &str) -> Option<&Course> {
        self.course_index(selector).map(|idx| &self.courses[idx])
    }

    /// First numeric field of the module or its courses holding NaN or an
    /// infinity, if any
    #[must_use]
    pub fn non_finite_field(&self) -> Option<&'static str> {
        if !self.min_average.is_finite() {
            return Some("min_average");
        }
        if self.target_average.is_some_and(|t| !t.is_finite()) {
            return Some("target_average");
        }
        self.courses.iter().find_map(Course::non_finite_field)
    }

    /// Find a course by id, 1-based position or name (mutable)
    pub fn find_course_mut(&mut self, selector: &str) -> Option<&mut Course> {
        let idx = self.course_index(selector)?;
        self.courses.get_mut(idx)
    }
}
