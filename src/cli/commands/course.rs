//! Course command handler

use super::{fail, Workspace};
use crate::args::{CourseFields, CourseSubcommand};
use cijfermeester::book::{CourseUpdate, GradeChange};
use cijfermeester::models::{Course, Module};
use cijfermeester::{debug, info};

/// Dispatch course subcommands
pub fn run(subcommand: CourseSubcommand, workspace: &Workspace) {
    match subcommand {
        CourseSubcommand::List { module } => {
            let book = workspace.load();
            match book.get(&module) {
                Ok(found) => print_courses(found),
                Err(e) => fail(&e.to_string()),
            }
        }
        CourseSubcommand::Add { module, fields } => add(workspace, &module, fields),
        CourseSubcommand::Remove { module, course } => {
            let removed = workspace.edit(|book| book.remove_course(&module, &course));
            info!("Removed course {} ({}) from '{module}'", removed.name, removed.id);
            println!("✓ Removed course '{}'", removed.name);
        }
        CourseSubcommand::Set {
            module,
            course,
            fields,
            clear_grade,
        } => {
            let update = to_update(fields, clear_grade);
            debug!("Updating course '{course}' in '{module}': {update:?}");
            let updated =
                workspace.edit(|book| book.update_course(&module, &course, update).cloned());
            println!("✓ Updated course: {}", describe(&updated));
        }
    }
}

fn add(workspace: &Workspace, module: &str, fields: CourseFields) {
    let defaults = workspace.defaults();
    let mut course = Course::new(
        fields.name.unwrap_or_else(|| defaults.course_name.clone()),
        fields.weight.unwrap_or(defaults.course_weight),
        fields.min_grade.unwrap_or(defaults.min_grade),
    );
    course.grade = fields.grade;

    let added = workspace.edit(|book| book.add_course(module, course).cloned());
    info!("Added course {} ({}) to '{module}'", added.name, added.id);
    println!("✓ Added course: {}", describe(&added));
}

fn to_update(fields: CourseFields, clear_grade: bool) -> CourseUpdate {
    let grade = match (fields.grade, clear_grade) {
        (_, true) => GradeChange::Clear,
        (Some(g), false) => GradeChange::Set(g),
        (None, false) => GradeChange::Keep,
    };
    CourseUpdate {
        name: fields.name,
        weight: fields.weight,
        min_grade: fields.min_grade,
        grade,
    }
}

fn describe(course: &Course) -> String {
    let grade = course.grade.map_or_else(|| "-".to_string(), |g| g.to_string());
    format!(
        "{} (weight {}, min {}, grade {grade})",
        course.name, course.weight, course.min_grade
    )
}

/// Table of the courses in a module
pub fn print_courses(module: &Module) {
    println!("\n=== {} ===\n", module.name);
    if module.courses.is_empty() {
        println!("  No courses yet.");
        return;
    }

    println!(
        "  {:>3}  {:<28} {:>7} {:>7} {:>7}",
        "#", "Course", "Weight", "Min", "Grade"
    );
    for (i, course) in module.courses.iter().enumerate() {
        let grade = course.grade.map_or_else(|| "-".to_string(), |g| g.to_string());
        let flag = if course.is_failed() { "  below minimum" } else { "" };
        println!(
            "  {:>3}  {:<28} {:>7} {:>7} {:>7}{flag}",
            i + 1,
            course.name,
            course.weight,
            course.min_grade,
            grade
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_update_grade_handling() {
        let set = to_update(
            CourseFields {
                grade: Some(6.5),
                ..CourseFields::default()
            },
            false,
        );
        assert_eq!(set.grade, GradeChange::Set(6.5));

        let cleared = to_update(CourseFields::default(), true);
        assert_eq!(cleared.grade, GradeChange::Clear);

        let kept = to_update(
            CourseFields {
                weight: Some(3.0),
                ..CourseFields::default()
            },
            false,
        );
        assert_eq!(kept.grade, GradeChange::Keep);
        assert_eq!(kept.weight, Some(3.0));
    }

    #[test]
    fn test_describe_ungraded() {
        let course = Course::new("Recht".to_string(), 2.0, 5.5);
        assert_eq!(describe(&course), "Recht (weight 2, min 5.5, grade -)");
    }
}
