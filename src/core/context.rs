//! Roster operations bound to an explicitly constructed logger.
//!
//! The free functions in [`crate::core::roster`] and
//! [`crate::core::persistence`] log through whatever `tracing` dispatcher is
//! current. `RosterContext` carries its own [`Dispatch`] and makes it the
//! scoped default for the duration of each call, so no process-wide logger
//! has to be installed.

use std::io::Write;
use std::path::Path;
use tracing::Dispatch;

use crate::core::{persistence, roster};
use crate::domain::model::{Roster, Student};
use crate::utils::error::Result;

#[derive(Clone, Default)]
pub struct RosterContext {
    dispatch: Option<Dispatch>,
}

impl RosterContext {
    pub fn new(dispatch: Dispatch) -> Self {
        Self {
            dispatch: Some(dispatch),
        }
    }

    fn scoped<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }

    pub fn add_student<'a>(
        &self,
        students: &'a mut Roster,
        name: impl Into<String>,
        group_number: impl Into<String>,
        performance: Vec<i32>,
    ) -> &'a mut Roster {
        self.scoped(move || roster::add_student(students, name, group_number, performance))
    }

    pub fn list_students(&self, students: &[Student]) -> Result<()> {
        self.scoped(|| roster::list_students(students))
    }

    pub fn write_students<W: Write>(&self, out: &mut W, students: &[Student]) -> Result<()> {
        self.scoped(|| roster::write_students(out, students))
    }

    pub fn find(&self, students: &[Student]) -> Vec<Student> {
        self.scoped(|| roster::find(students))
    }

    pub fn find_with_grade(&self, students: &[Student], grade: i32) -> Vec<Student> {
        self.scoped(|| roster::find_with_grade(students, grade))
    }

    pub fn save(&self, path: impl AsRef<Path>, students: &[Student]) -> Result<()> {
        self.scoped(|| persistence::save(path, students))
    }

    pub fn load_students(&self, path: impl AsRef<Path>) -> Result<Roster> {
        self.scoped(|| persistence::load_students(path))
    }
}

impl std::fmt::Debug for RosterContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RosterContext")
            .field("injected_logger", &self.dispatch.is_some())
            .finish()
    }
}
