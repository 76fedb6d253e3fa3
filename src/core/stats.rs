//! Module statistics: current standing and forward projections
//!
//! [`compute_stats`] is the whole engine. It is a pure function of a
//! [`Module`]; results are never cached and carry no identity of their own.

use crate::core::models::Module;
use serde::Serialize;
use std::fmt;

/// Lowest grade on the Dutch scale
pub const MIN_GRADE: f64 = 1.0;

/// Highest grade on the Dutch scale
pub const MAX_GRADE: f64 = 10.0;

/// Grade used for the "what if I just pass" projection
pub const PASS_MARK: f64 = 5.0;

/// Required averages above this are reported as demanding
const DEMANDING_THRESHOLD: f64 = 8.0;

/// Snapshot of a module's standing, recomputed on every query
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Weighted mean of graded courses (2 decimals), 0 when nothing is graded
    pub current_average: f64,
    /// Sum of weights of graded courses
    pub total_weight_accumulated: f64,
    /// Sum of weights of all courses
    pub total_weight_possible: f64,
    /// Average meets the module minimum and no course is below its own minimum
    pub passed: bool,
    /// Average needed over the ungraded courses to reach the effective target
    pub required_average_for_remaining: Option<f64>,
    /// The required average exceeds the top of the scale
    pub is_impossible: bool,
    /// At least one graded course is below its own minimum
    pub has_failed_course: bool,
    /// Final average if every remaining course scores exactly 5.0
    pub projected_average_with_5: Option<f64>,
    /// Final average if every remaining course scores 1.0
    pub min_possible_average: f64,
    /// Final average if every remaining course scores 10.0
    pub max_possible_average: f64,
    /// Number of courses without a grade
    pub ungraded_count: usize,
}

/// Round to two decimals, half away from zero
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Position of a grade on the 1-10 scale as a percentage in `[0, 100]`
#[must_use]
pub fn scale_position(value: f64) -> f64 {
    ((value - MIN_GRADE) / (MAX_GRADE - MIN_GRADE) * 100.0).clamp(0.0, 100.0)
}

/// Compute the statistics of a module.
///
/// Total for every input: empty modules, zero or negative weights and
/// targets outside 1-10 are all accepted without validation. Internal
/// arithmetic runs at full precision; only the returned averages are
/// rounded to two decimals. Both the pass check and the impossibility
/// check use unrounded values.
///
/// Products and sums are evaluated separately, never fused.
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn compute_stats(module: &Module) -> CalculationResult {
    let mut weighted_sum = 0.0;
    let mut weight_taken = 0.0;
    let mut weight_all = 0.0;
    let mut has_failed_course = false;
    let mut ungraded_count = 0;

    for course in &module.courses {
        weight_all += course.weight;
        if let Some(grade) = course.grade {
            weighted_sum += grade * course.weight;
            weight_taken += course.weight;
            if grade < course.min_grade {
                has_failed_course = true;
            }
        } else {
            ungraded_count += 1;
        }
    }

    let current_average = if weight_taken > 0.0 {
        weighted_sum / weight_taken
    } else {
        0.0
    };

    let target = module.effective_target();
    let remaining_weight = weight_all - weight_taken;

    // Worst and best case over the full weight; an empty module spans the whole scale
    let (min_possible_average, max_possible_average) = if weight_all > 0.0 {
        (
            round2((weighted_sum + MIN_GRADE * remaining_weight) / weight_all),
            round2((weighted_sum + MAX_GRADE * remaining_weight) / weight_all),
        )
    } else {
        (MIN_GRADE, MAX_GRADE)
    };

    let mut required_average_for_remaining = None;
    let mut is_impossible = false;
    let mut projected_average_with_5 = None;

    if remaining_weight > 0.0 {
        // target * total = sum + required * remaining
        let required = (target * weight_all - weighted_sum) / remaining_weight;
        is_impossible = required > MAX_GRADE;
        if required < PASS_MARK {
            projected_average_with_5 = Some(round2(
                (weighted_sum + PASS_MARK * remaining_weight) / weight_all,
            ));
        }
        required_average_for_remaining = Some(round2(required));
    }

    CalculationResult {
        current_average: round2(current_average),
        total_weight_accumulated: weight_taken,
        total_weight_possible: weight_all,
        passed: current_average >= module.min_average && !has_failed_course,
        required_average_for_remaining,
        is_impossible,
        has_failed_course,
        projected_average_with_5,
        min_possible_average,
        max_possible_average,
        ungraded_count,
    }
}

/// Overall status of a module, as shown next to the figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// All courses graded, module passed
    Passed,
    /// All courses graded, at least one course below its minimum
    FailedCourse,
    /// All courses graded, average below the module minimum
    AverageTooLow,
    /// The remaining courses would need more than a 10
    Impossible,
    /// A course already failed; the module cannot be passed as things stand
    AtRisk,
    /// The remaining courses need a high average
    Demanding,
    /// Scoring a 5.0 on everything left still reaches the target
    Comfortable,
    /// Still reachable with ordinary results
    OnTrack,
}

impl Verdict {
    /// Short human-readable explanation
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Passed => "Module passed. All goals reached.",
            Self::FailedCourse => "Module not passed: one or more courses are below their minimum grade.",
            Self::AverageTooLow => "Module not passed: the average is too low.",
            Self::Impossible => {
                "Target cannot be reached: the remaining courses would need more than a 10."
            }
            Self::AtRisk => {
                "A course is below its minimum grade; the module is currently not passed."
            }
            Self::Demanding => "Target is reachable but needs high grades on the remaining courses.",
            Self::Comfortable => "Even a 5.0 on every remaining course reaches the target.",
            Self::OnTrack => "Target is reachable.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Passed => "passed",
            Self::FailedCourse => "failed course",
            Self::AverageTooLow => "average too low",
            Self::Impossible => "impossible",
            Self::AtRisk => "at risk",
            Self::Demanding => "demanding",
            Self::Comfortable => "comfortable",
            Self::OnTrack => "on track",
        };
        write!(f, "{label}")
    }
}

impl CalculationResult {
    /// Weight of courses that have no grade yet
    #[must_use]
    pub fn remaining_weight(&self) -> f64 {
        self.total_weight_possible - self.total_weight_accumulated
    }

    /// Whether every course has a grade
    ///
    /// Counted per course, so an ungraded course of weight 0 still keeps the
    /// module in progress.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.ungraded_count == 0
    }

    /// Classify the result
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        if self.is_complete() {
            return if self.passed {
                Verdict::Passed
            } else if self.has_failed_course {
                Verdict::FailedCourse
            } else {
                Verdict::AverageTooLow
            };
        }

        if self.is_impossible {
            Verdict::Impossible
        } else if self.has_failed_course {
            Verdict::AtRisk
        } else if self
            .required_average_for_remaining
            .is_some_and(|r| r > DEMANDING_THRESHOLD)
        {
            Verdict::Demanding
        } else if self.projected_average_with_5.is_some() {
            Verdict::Comfortable
        } else {
            Verdict::OnTrack
        }
    }
}
