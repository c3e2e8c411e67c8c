use crate::utils::error::{Result, RosterError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(RosterError::config(format!("{}: path cannot be empty", field_name)));
    }

    if path.contains('\0') {
        return Err(RosterError::config(format!(
            "{}: path contains null bytes",
            field_name
        )));
    }

    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.iter().any(|a| a.eq_ignore_ascii_case(value)) {
        return Ok(());
    }
    Err(RosterError::config(format!(
        "{}: unsupported value '{}'. Allowed values: {}",
        field_name,
        value,
        allowed.join(", ")
    )))
}
