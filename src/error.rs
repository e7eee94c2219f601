//! Error types for the evolutionary engine.
//!
//! Every precondition violation is reported at the call that detects it.
//! Nothing is retried or silently corrected.

use thiserror::Error;

/// Errors raised by configuration checks and by the individual EA stages.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EaError {
    /// A size, rate, length, or strategy parameter is outside its domain.
    ///
    /// Covers non-positive sizes, mutation rates outside `[0, 1]`,
    /// chromosomes too short for a crossover kind, and empty or
    /// misaligned selection inputs.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A fitness-proportionate strategy received fitness values that do not
    /// form a probability distribution (total or mean not strictly positive).
    #[error("degenerate distribution: {0}")]
    DegenerateDistribution(String),
}

impl EaError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        EaError::InvalidArgument(msg.into())
    }

    pub(crate) fn degenerate(msg: impl Into<String>) -> Self {
        EaError::DegenerateDistribution(msg.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EaError>;
