use courtboard_core::{BoardAssertionError, CommandValidationError, DomainError};

/// Errors surfaced by the board and mutation services.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    /// UI input did not form a valid command.
    #[error(transparent)]
    Validation(#[from] CommandValidationError),

    /// The command is well formed but not feasible on the current board.
    #[error("{command} rejected: {}", .errors.join("; "))]
    Preflight {
        command: &'static str,
        errors: Vec<String>,
    },

    /// The normalized board failed strict domain validation.
    #[error(transparent)]
    InvalidBoard(#[from] BoardAssertionError),

    /// A normalized transport or backend failure.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ServiceError {
    /// Text suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Preflight { errors, .. } => errors.join("\n"),
            Self::Domain(err) => err.message.clone(),
            other => other.to_string(),
        }
    }
}
