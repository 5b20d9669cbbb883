use thiserror::Error;

/// A named domain rule violation, raised by deciders and routed by application services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name}: {message}")]
pub struct DomainError {
    pub name: String,
    pub message: String,
}

impl DomainError {
    pub fn named(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}
