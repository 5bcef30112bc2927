//! Eager construction-time checks for generator options.

use std::fmt::Display;

use crate::errors::GenerationError;

pub(crate) fn bounds_ordered<T: PartialOrd + Display>(
    ctx: &'static str,
    min: T,
    max: T,
) -> Result<(), GenerationError> {
    if min > max {
        return Err(GenerationError::InvalidOptions(format!(
            "{ctx}: min {min} must be <= max {max}"
        )));
    }
    Ok(())
}

pub(crate) fn positive(
    ctx: &'static str,
    name: &'static str,
    value: usize,
) -> Result<(), GenerationError> {
    if value == 0 {
        return Err(GenerationError::InvalidOptions(format!(
            "{ctx}: {name} must be > 0"
        )));
    }
    Ok(())
}

pub(crate) fn non_empty<T>(
    ctx: &'static str,
    name: &'static str,
    values: &[T],
) -> Result<(), GenerationError> {
    if values.is_empty() {
        return Err(GenerationError::InvalidOptions(format!(
            "{ctx}: {name} must not be empty"
        )));
    }
    Ok(())
}
