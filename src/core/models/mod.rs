//! Data models for `CijferMeester`

pub mod course;
pub mod module;

pub use course::Course;
pub use module::Module;

use rand::Rng;

/// Length of generated identifiers
const ID_LEN: usize = 9;

/// Alphabet used for generated identifiers (lowercase base 36)
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a short random identifier for a course or module.
///
/// Identifiers are 9 lowercase base-36 characters. They only need to be
/// unique within one user's module book.
#[must_use]
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
        .collect()
}

/// Values used when creating new courses and modules
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    /// Name given to a freshly added module
    pub module_name: String,
    /// Name given to a freshly added course
    pub course_name: String,
    /// Minimum passing average of a new module
    pub min_average: f64,
    /// Minimum grade of a new course
    pub min_grade: f64,
    /// Weight of a new course
    pub course_weight: f64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            module_name: "Nieuwe Module".to_string(),
            course_name: "Nieuw Vak".to_string(),
            min_average: 5.8,
            min_grade: 5.0,
            course_weight: 1.0,
        }
    }
}

impl Defaults {
    /// Create an ungraded course with the default name, weight and minimum
    #[must_use]
    pub fn empty_course(&self) -> Course {
        Course::new(self.course_name.clone(), self.course_weight, self.min_grade)
    }

    /// Create a module with the default name and minimum holding one empty course
    #[must_use]
    pub fn empty_module(&self) -> Module {
        let mut module = Module::new(self.module_name.clone(), self.min_average);
        module.courses.push(self.empty_course());
        module
    }
}
