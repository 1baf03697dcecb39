/// Convenience result type used across the engine.
pub type MotionResult<T> = Result<T, MotionError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Evaluation itself never fails: every error is raised while a composition is being declared,
/// loaded, or handed to a host.
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// Invalid primitive parameter or value type.
    #[error("validation error: {0}")]
    Validation(String),

    /// Inconsistent composition declaration (phase tables, element references, overlaps).
    #[error("declaration error: {0}")]
    Declaration(String),

    /// Errors raised while driving evaluation (thread pools, hosts, lookups).
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MotionError::Declaration`] value.
    pub fn declaration(msg: impl Into<String>) -> Self {
        Self::Declaration(msg.into())
    }

    /// Build a [`MotionError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`MotionError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
