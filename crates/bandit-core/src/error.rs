//! Error types for Bandit Lab

use thiserror::Error;

/// Main error type for bandit simulations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BanditError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Arm {arm} out of range for {n_arms} arms")]
    ArmOutOfRange { arm: usize, n_arms: usize },

    #[error("Numeric instability: {0}")]
    NumericInstability(String),
}

impl BanditError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub(crate) fn numeric(msg: impl Into<String>) -> Self {
        Self::NumericInstability(msg.into())
    }
}

/// Result type alias for bandit operations
pub type Result<T> = std::result::Result<T, BanditError>;
