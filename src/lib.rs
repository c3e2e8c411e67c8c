pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod formats;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::LocalStorage;
pub use config::RosterConfig;
pub use crate::core::context::RosterContext;
pub use crate::core::persistence::{load_students, load_with, save, save_with};
pub use crate::core::roster::{add_student, find, find_with_grade, list_students, write_students};
pub use domain::model::{Roster, Student};
pub use utils::error::{Result, RosterError};
