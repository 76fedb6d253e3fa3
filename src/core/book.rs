//! Editing layer: the user's collection of modules
//!
//! Every user-facing mutation (adding, removing and renaming modules and
//! courses, changing weights, minimums and grades) goes through
//! [`ModuleBook`]. Ranges are not validated; the statistics engine accepts
//! any number. NaN and infinities are refused because they cannot be stored.

use crate::core::models::{Course, Defaults, Module};
use thiserror::Error;

/// Errors raised by editing operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    /// No module matches the selector
    #[error("module '{0}' not found")]
    ModuleNotFound(String),
    /// No course in the module matches the selector
    #[error("course '{course}' not found in module '{module}'")]
    CourseNotFound {
        /// Module the lookup ran in
        module: String,
        /// Course selector that failed
        course: String,
    },
    /// Removing the only module is refused
    #[error("at least one module must remain")]
    LastModule,
    /// A grade, weight or average is NaN or infinite
    #[error("{0} must be a finite number")]
    NonFinite(&'static str),
}

fn ensure_finite(field: &'static str, value: f64) -> Result<(), EditError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EditError::NonFinite(field))
    }
}

/// How a course edit treats the grade
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum GradeChange {
    /// Leave the grade as it is
    #[default]
    Keep,
    /// Record a grade
    Set(f64),
    /// Mark the course as not yet taken
    Clear,
}

/// Partial update of a course; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseUpdate {
    /// New display name
    pub name: Option<String>,
    /// New weight
    pub weight: Option<f64>,
    /// New minimum grade
    pub min_grade: Option<f64>,
    /// Grade change
    pub grade: GradeChange,
}

impl CourseUpdate {
    fn validate(&self) -> Result<(), EditError> {
        if let Some(weight) = self.weight {
            ensure_finite("weight", weight)?;
        }
        if let Some(min_grade) = self.min_grade {
            ensure_finite("min_grade", min_grade)?;
        }
        if let GradeChange::Set(grade) = self.grade {
            ensure_finite("grade", grade)?;
        }
        Ok(())
    }

    fn apply(self, course: &mut Course) {
        if let Some(name) = self.name {
            course.name = name;
        }
        if let Some(weight) = self.weight {
            course.weight = weight;
        }
        if let Some(min_grade) = self.min_grade {
            course.min_grade = min_grade;
        }
        match self.grade {
            GradeChange::Keep => {}
            GradeChange::Set(grade) => course.grade = Some(grade),
            GradeChange::Clear => course.grade = None,
        }
    }
}

/// Ordered collection of a user's modules
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleBook {
    /// Modules in display order
    pub modules: Vec<Module>,
}

impl ModuleBook {
    /// Wrap an existing list of modules
    #[must_use]
    pub const fn new(modules: Vec<Module>) -> Self {
        Self { modules }
    }

    /// A book holding one fresh default module
    #[must_use]
    pub fn with_default(defaults: &Defaults) -> Self {
        Self::new(vec![defaults.empty_module()])
    }

    /// Number of modules
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the book has no modules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Position of the module matching `selector`
    ///
    /// Tried as an id, then a 1-based position, then a case-insensitive name.
    #[must_use]
    pub fn index_of(&self, selector: &str) -> Option<usize> {
        if let Some(idx) = self.modules.iter().position(|m| m.id == selector) {
            return Some(idx);
        }
        if let Ok(pos) = selector.parse::<usize>() {
            if (1..=self.modules.len()).contains(&pos) {
                return Some(pos - 1);
            }
        }
        self.modules
            .iter()
            .position(|m| m.name.eq_ignore_ascii_case(selector))
    }

    /// Find a module by id, position or name
    #[must_use]
    pub fn find(&self, selector: &str) -> Option<&Module> {
        self.index_of(selector).map(|idx| &self.modules[idx])
    }

    /// Find a module by id, position or name (mutable)
    pub fn find_mut(&mut self, selector: &str) -> Option<&mut Module> {
        let idx = self.index_of(selector)?;
        self.modules.get_mut(idx)
    }

    /// Find a module or report which selector failed
    ///
    /// # Errors
    /// Returns [`EditError::ModuleNotFound`] when nothing matches.
    pub fn get(&self, selector: &str) -> Result<&Module, EditError> {
        self.find(selector)
            .ok_or_else(|| EditError::ModuleNotFound(selector.to_string()))
    }

    fn get_mut(&mut self, selector: &str) -> Result<&mut Module, EditError> {
        self.find_mut(selector)
            .ok_or_else(|| EditError::ModuleNotFound(selector.to_string()))
    }

    /// Append a module and return a reference to it
    ///
    /// # Errors
    /// Returns [`EditError::NonFinite`] when the module holds NaN or an infinity.
    pub fn add_module(&mut self, module: Module) -> Result<&Module, EditError> {
        if let Some(field) = module.non_finite_field() {
            return Err(EditError::NonFinite(field));
        }
        self.modules.push(module);
        Ok(&self.modules[self.modules.len() - 1])
    }

    /// Remove a module
    ///
    /// # Errors
    /// Fails when the module does not exist or is the only one left.
    pub fn remove_module(&mut self, selector: &str) -> Result<Module, EditError> {
        let idx = self
            .index_of(selector)
            .ok_or_else(|| EditError::ModuleNotFound(selector.to_string()))?;
        if self.modules.len() <= 1 {
            return Err(EditError::LastModule);
        }
        Ok(self.modules.remove(idx))
    }

    /// Rename a module
    ///
    /// # Errors
    /// Returns [`EditError::ModuleNotFound`] when nothing matches.
    pub fn rename_module(&mut self, selector: &str, name: String) -> Result<(), EditError> {
        self.get_mut(selector)?.name = name;
        Ok(())
    }

    /// Change the minimum passing average of a module
    ///
    /// # Errors
    /// Returns [`EditError::ModuleNotFound`] when nothing matches and
    /// [`EditError::NonFinite`] for NaN or an infinity.
    pub fn set_min_average(&mut self, selector: &str, min_average: f64) -> Result<(), EditError> {
        ensure_finite("min_average", min_average)?;
        self.get_mut(selector)?.min_average = min_average;
        Ok(())
    }

    /// Set or clear the personal target of a module
    ///
    /// # Errors
    /// Returns [`EditError::ModuleNotFound`] when nothing matches and
    /// [`EditError::NonFinite`] for NaN or an infinity.
    pub fn set_target_average(
        &mut self,
        selector: &str,
        target: Option<f64>,
    ) -> Result<(), EditError> {
        if let Some(target) = target {
            ensure_finite("target_average", target)?;
        }
        self.get_mut(selector)?.target_average = target;
        Ok(())
    }

    /// Append a course to a module and return a reference to it
    ///
    /// # Errors
    /// Returns [`EditError::ModuleNotFound`] when nothing matches and
    /// [`EditError::NonFinite`] when the course holds NaN or an infinity.
    pub fn add_course(&mut self, selector: &str, course: Course) -> Result<&Course, EditError> {
        if let Some(field) = course.non_finite_field() {
            return Err(EditError::NonFinite(field));
        }
        let module = self.get_mut(selector)?;
        module.courses.push(course);
        let last = module.courses.len() - 1;
        Ok(&module.courses[last])
    }

    /// Remove a course from a module
    ///
    /// # Errors
    /// Fails when either the module or the course does not exist.
    pub fn remove_course(
        &mut self,
        module_selector: &str,
        course_selector: &str,
    ) -> Result<Course, EditError> {
        let module = self.get_mut(module_selector)?;
        let idx = module
            .course_index(course_selector)
            .ok_or_else(|| EditError::CourseNotFound {
                module: module.name.clone(),
                course: course_selector.to_string(),
            })?;
        Ok(module.courses.remove(idx))
    }

    /// Apply a partial update to a course
    ///
    /// # Errors
    /// Fails when either the module or the course does not exist, or when
    /// the update carries NaN or an infinity. The course is untouched then.
    pub fn update_course(
        &mut self,
        module_selector: &str,
        course_selector: &str,
        update: CourseUpdate,
    ) -> Result<&Course, EditError> {
        update.validate()?;
        let module = self.get_mut(module_selector)?;
        let idx = module
            .course_index(course_selector)
            .ok_or_else(|| EditError::CourseNotFound {
                module: module.name.clone(),
                course: course_selector.to_string(),
            })?;
        let course = &mut module.courses[idx];
        update.apply(course);
        Ok(&*course)
    }
}
