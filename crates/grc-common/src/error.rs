//! Error types for OpenGRC

use thiserror::Error;
use uuid::Uuid;

/// OpenGRC error type
#[derive(Error, Debug)]
pub enum GrcError {
    /// Malformed or out-of-range input
    #[error("validation failed: {0}")]
    Validation(String),

    /// Unknown category code or id
    #[error("category not found: {0}")]
    CategoryNotFound(String),

    /// Unknown risk id
    #[error("risk not found: {0}")]
    RiskNotFound(Uuid),

    /// Unknown assessment id
    #[error("assessment not found: {0}")]
    AssessmentNotFound(Uuid),

    /// Unknown control id
    #[error("control not found: {0}")]
    ControlNotFound(Uuid),

    /// Unknown action plan id
    #[error("action plan not found: {0}")]
    PlanNotFound(Uuid),

    /// Risk still referenced by assessments
    #[error("risk {0} has assessments and cannot be deleted")]
    RiskInUse(Uuid),

    /// Category still referenced by risks
    #[error("category {0} has risks and cannot be deleted")]
    CategoryInUse(Uuid),

    /// Mutation lock contention on an assessment
    #[error("conflicting mutation on assessment {0}, retry the operation")]
    Conflict(Uuid),
}

impl GrcError {
    /// Input was malformed or out of range
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// A referenced entity does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CategoryNotFound(_)
                | Self::RiskNotFound(_)
                | Self::AssessmentNotFound(_)
                | Self::ControlNotFound(_)
                | Self::PlanNotFound(_)
        )
    }

    /// The operation clashed with current state; retrying or releasing the
    /// referencing entities may succeed
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::Conflict(_) | Self::RiskInUse(_) | Self::CategoryInUse(_)
        )
    }
}

/// Result type for OpenGRC
pub type GrcResult<T> = Result<T, GrcError>;
