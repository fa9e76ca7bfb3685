//! Field rules shared by entity validation.

use crate::error::AppError;
use regex::Regex;
use std::sync::OnceLock;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
    })
}

pub fn non_blank(col: &str, v: &str) -> Result<(), AppError> {
    if v.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", col)));
    }
    Ok(())
}

pub fn max_length(col: &str, v: &str, max: usize) -> Result<(), AppError> {
    if v.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            col, max
        )));
    }
    Ok(())
}

pub fn optional_email(col: &str, v: Option<&str>) -> Result<(), AppError> {
    let Some(s) = v else { return Ok(()) };
    max_length(col, s, 255)?;
    if !email_regex().is_match(s) {
        return Err(AppError::Validation(format!("{} must be a valid email", col)));
    }
    Ok(())
}

pub fn non_negative(col: &str, v: f64) -> Result<(), AppError> {
    if !v.is_finite() {
        return Err(AppError::Validation(format!("{} must be a finite number", col)));
    }
    if v < 0.0 {
        return Err(AppError::Validation(format!("{} must be at least 0", col)));
    }
    Ok(())
}
