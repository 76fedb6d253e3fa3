//! Integration tests for the statistics engine on realistic modules

use cijfermeester::models::{Course, Module};
use cijfermeester::stats::{compute_stats, Verdict};

fn course(weight: f64, min_grade: f64, grade: Option<f64>) -> Course {
    let mut course = Course::new("Vak".to_string(), weight, min_grade);
    course.grade = grade;
    course
}

fn module(min_average: f64, courses: Vec<Course>) -> Module {
    let mut module = Module::new("Blok".to_string(), min_average);
    module.courses = courses;
    module
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn empty_module_spans_whole_scale() {
    for min_average in [1.0, 5.8, 10.0] {
        let stats = compute_stats(&module(min_average, Vec::new()));
        assert!(approx(stats.current_average, 0.0));
        assert_eq!(stats.required_average_for_remaining, None);
        assert!(approx(stats.min_possible_average, 1.0));
        assert!(approx(stats.max_possible_average, 10.0));
    }
}

#[test]
fn fully_graded_module_has_no_projections() {
    let graded = module(
        5.5,
        vec![
            course(2.0, 5.0, Some(6.0)),
            course(1.0, 5.0, Some(3.0)),
            course(3.0, 4.0, Some(7.5)),
        ],
    );
    let stats = compute_stats(&graded);

    assert_eq!(stats.required_average_for_remaining, None);
    assert_eq!(stats.projected_average_with_5, None);
    assert!(approx(stats.min_possible_average, stats.max_possible_average));
    assert!(stats.has_failed_course);
    assert_eq!(stats.verdict(), Verdict::FailedCourse);
}

#[test]
fn repeated_computation_is_identical() {
    let m = module(
        6.0,
        vec![course(1.5, 5.0, Some(6.3)), course(2.5, 5.5, None)],
    );
    let first = compute_stats(&m);
    let second = compute_stats(&m);
    assert_eq!(first, second);
    assert_eq!(
        first.current_average.to_bits(),
        second.current_average.to_bits()
    );
}

#[test]
fn raising_a_grade_never_lowers_the_average() {
    let mut previous = f64::MIN;
    let mut grade = 1.0;
    while grade <= 10.0 {
        let m = module(
            5.8,
            vec![
                course(2.0, 5.0, Some(6.5)),
                course(1.0, 5.0, Some(grade)),
                course(1.0, 5.0, None),
            ],
        );
        let current = compute_stats(&m).current_average;
        assert!(current >= previous, "average dropped at grade {grade}");
        previous = current;
        grade += 0.5;
    }
}

#[test]
fn exactly_ten_required_is_not_impossible() {
    // (9 * 2 - 8) / 1 = 10
    let m = module(9.0, vec![course(1.0, 5.0, Some(8.0)), course(1.0, 5.0, None)]);
    let stats = compute_stats(&m);
    assert_eq!(stats.required_average_for_remaining, Some(10.0));
    assert!(!stats.is_impossible);
}

#[test]
fn failed_course_blocks_pass_despite_high_average() {
    let m = module(
        5.5,
        vec![course(3.0, 5.0, Some(9.0)), course(1.0, 5.5, Some(5.0))],
    );
    let stats = compute_stats(&m);
    assert!(stats.current_average > 5.5);
    assert!(stats.has_failed_course);
    assert!(!stats.passed);
}

#[test]
fn scenario_single_course_passed() {
    let stats = compute_stats(&module(5.8, vec![course(1.0, 5.0, Some(8.0))]));
    assert!(approx(stats.current_average, 8.0));
    assert!(stats.passed);
    assert_eq!(stats.required_average_for_remaining, None);
    assert_eq!(stats.verdict(), Verdict::Passed);
}

#[test]
fn scenario_reachable_but_above_pass_mark() {
    let stats = compute_stats(&module(
        7.0,
        vec![course(1.0, 5.0, Some(6.0)), course(1.0, 5.0, None)],
    ));
    assert!(approx(stats.current_average, 6.0));
    assert!(approx(stats.remaining_weight(), 1.0));
    assert_eq!(stats.required_average_for_remaining, Some(8.0));
    assert!(!stats.is_impossible);
    assert_eq!(stats.projected_average_with_5, None);
    assert_eq!(stats.verdict(), Verdict::OnTrack);
}

#[test]
fn scenario_target_out_of_reach() {
    let stats = compute_stats(&module(
        9.0,
        vec![course(1.0, 5.0, Some(6.0)), course(1.0, 5.0, None)],
    ));
    assert_eq!(stats.required_average_for_remaining, Some(12.0));
    assert!(stats.is_impossible);
    assert_eq!(stats.verdict(), Verdict::Impossible);
}

#[test]
fn scenario_failed_course_near_threshold() {
    let stats = compute_stats(&module(
        5.8,
        vec![course(2.0, 5.0, Some(4.0)), course(1.0, 5.0, Some(9.0))],
    ));
    assert!(approx(stats.current_average, 5.67));
    assert!(stats.has_failed_course);
    assert!(!stats.passed);
}

#[test]
fn personal_target_drives_required_average() {
    let mut m = module(5.5, vec![course(1.0, 5.0, Some(7.0)), course(1.0, 5.0, None)]);
    m.target_average = Some(8.0);
    let stats = compute_stats(&m);

    // (8 * 2 - 7) / 1 = 9
    assert_eq!(stats.required_average_for_remaining, Some(9.0));
    assert_eq!(stats.verdict(), Verdict::Demanding);
    // Passing still compares against the module minimum
    assert!(stats.passed);
}

#[test]
fn results_serialize_with_camel_case_keys() {
    let stats = compute_stats(&module(5.8, vec![course(1.0, 5.0, None)]));
    let json = serde_json::to_value(stats).expect("serialize stats");

    assert_eq!(json["currentAverage"], 0.0);
    assert_eq!(json["requiredAverageForRemaining"], 5.8);
    assert_eq!(json["isImpossible"], false);
    assert!(json.get("projectedAverageWith5").is_some());
}
