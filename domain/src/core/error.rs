//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    #[error("Request cannot be empty")]
    EmptyRequest,

    #[error("Invalid learning style: {0}")]
    InvalidLearningStyle(String),
}

impl DomainError {
    /// Check if this error was caused by an agent name outside the known set
    pub fn is_unknown_agent(&self) -> bool {
        matches!(self, DomainError::UnknownAgent(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_agent_display() {
        let error = DomainError::UnknownAgent("TUTOR".to_string());
        assert_eq!(error.to_string(), "Unknown agent: TUTOR");
    }

    #[test]
    fn test_is_unknown_agent_check() {
        assert!(DomainError::UnknownAgent("X".to_string()).is_unknown_agent());
        assert!(!DomainError::EmptyRequest.is_unknown_agent());
    }
}
