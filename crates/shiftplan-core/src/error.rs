//! Error types for shiftplan

use thiserror::Error;

/// Main error type for shiftplan operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShiftPlanError {
    /// Shift bounds, horizon or demand are inconsistent; no solve is attempted
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// No assignment can cover the demand
    #[error("Infeasible: {0}")]
    Infeasible(String),
}

impl ShiftPlanError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ShiftPlanError::InvalidConfiguration(message.into())
    }

    /// Returns true for configuration errors.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, ShiftPlanError::InvalidConfiguration(_))
    }

    /// Returns true when the demand cannot be covered.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, ShiftPlanError::Infeasible(_))
    }
}

/// Result type alias for shiftplan operations
pub type Result<T> = std::result::Result<T, ShiftPlanError>;
