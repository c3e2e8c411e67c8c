pub mod context;
pub mod persistence;
pub mod roster;

pub use crate::domain::model::{Roster, Student};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
