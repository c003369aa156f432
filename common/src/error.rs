use thiserror::Error;

/// Errors surfaced by the recipe core to its callers.
///
/// Every failure is a single value: validation stops at the first violation
/// and nothing is retried or aggregated.
#[derive(Debug, Error)]
pub enum RecipeError {
    /// Caller input violates an invariant of the creation request.
    #[error("{0}")]
    Validation(String),

    /// The dispatcher was wired without a handler for the requested type pair,
    /// or a handler was registered twice.
    #[error("{0}")]
    Configuration(String),

    /// The repository failed. The underlying cause is kept as the source.
    #[error("storage error: {0}")]
    Storage(#[source] anyhow::Error),

    /// The caller's cancellation token fired before the operation completed.
    #[error("operation cancelled")]
    Cancelled,
}

impl RecipeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        RecipeError::Validation(msg.into())
    }

    pub fn storage(err: impl Into<anyhow::Error>) -> Self {
        RecipeError::Storage(err.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, RecipeError::Validation(_))
    }
}

pub type Result<T, E = RecipeError> = std::result::Result<T, E>;
