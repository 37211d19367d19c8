//! Input validation helpers

use crate::error::{Result, ZestError};

/// Minimum title length accepted by the task form
pub const MIN_TITLE_LEN: usize = 2;

/// Validate that a required string field is not empty
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ZestError::InvalidInput(format!("{} cannot be empty", field_name)));
    }
    Ok(())
}

/// Validate string length constraints (in characters)
pub fn validate_string_length(value: &str, field_name: &str, min: usize, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ZestError::InvalidInput(format!(
            "{} must be between {} and {} characters",
            field_name, min, max
        )));
    }
    Ok(())
}

/// Validate a task title
pub fn validate_title(title: &str) -> Result<()> {
    if title.chars().count() < MIN_TITLE_LEN {
        return Err(ZestError::InvalidInput(format!(
            "Title must be at least {} characters",
            MIN_TITLE_LEN
        )));
    }
    Ok(())
}

/// Split a comma-separated tag list, trimming whitespace and dropping blanks
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
