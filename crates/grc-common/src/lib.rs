//! OpenGRC Common - Shared types for the risk management platform
//!
//! This crate provides the vocabulary shared by the engine crates:
//! - Entity id aliases
//! - The 1-5 scoring scale bounds and validators
//! - Error handling

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

pub use error::*;

use uuid::Uuid;

/// Risk category id
pub type CategoryId = Uuid;

/// Risk id
pub type RiskId = Uuid;

/// Risk assessment id
pub type AssessmentId = Uuid;

/// Risk control id
pub type ControlId = Uuid;

/// Action plan id
pub type PlanId = Uuid;

/// Lower bound of the 1-5 scoring scale
pub const SCALE_MIN: u8 = 1;

/// Upper bound of the 1-5 scoring scale
pub const SCALE_MAX: u8 = 5;

/// Upper bound of action plan progress
pub const PROGRESS_MAX: u8 = 100;

/// Validate a value on the shared 1-5 scale.
///
/// Probability, consequence, consequence-criteria levels and control
/// effectiveness all ride this scale.
pub fn validate_scale(field: &str, value: u8) -> GrcResult<u8> {
    if !(SCALE_MIN..=SCALE_MAX).contains(&value) {
        return Err(GrcError::Validation(format!(
            "{} must be between {} and {}, got {}",
            field, SCALE_MIN, SCALE_MAX, value
        )));
    }
    Ok(value)
}

/// Validate action plan progress (0-100)
pub fn validate_progress(value: u8) -> GrcResult<u8> {
    if value > PROGRESS_MAX {
        return Err(GrcError::Validation(format!(
            "progress must be between 0 and {}, got {}",
            PROGRESS_MAX, value
        )));
    }
    Ok(value)
}

/// Validate that a required free-text field is non-blank
pub fn validate_text(field: &str, value: &str) -> GrcResult<()> {
    if value.trim().is_empty() {
        return Err(GrcError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_bounds() {
        assert!(validate_scale("probability", 0).is_err());
        assert_eq!(validate_scale("probability", 1).unwrap(), 1);
        assert_eq!(validate_scale("consequence", 5).unwrap(), 5);
        assert!(validate_scale("effectiveness", 6).is_err());
    }

    #[test]
    fn test_progress_bounds() {
        assert_eq!(validate_progress(0).unwrap(), 0);
        assert_eq!(validate_progress(100).unwrap(), 100);
        assert!(validate_progress(101).is_err());
    }

    #[test]
    fn test_text_required() {
        assert!(validate_text("description", "").is_err());
        assert!(validate_text("description", "   ").is_err());
        assert!(validate_text("description", "uncontrolled spill").is_ok());
    }
}
