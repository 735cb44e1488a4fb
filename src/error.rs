//! Error handling for the diagram editor
//!
//! This module defines custom error types and a Result alias for use
//! throughout the application.

use thiserror::Error;

/// Main error type for diagram and GPIO operations
#[derive(Error, Debug)]
pub enum DiagramError {
    /// A referenced node, point or connector does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A caller supplied an unusable value (bad color key, empty name, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Errors reported by a GPIO backend
    #[error("GPIO error: {0}")]
    Gpio(String),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to channel communication or shared state locks
    #[error("Channel error: {0}")]
    Channel(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DiagramError>,
    },
}

impl DiagramError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DiagramError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Build a `NotFound` error for a named entity
    pub fn not_found(what: &str, name: &str) -> Self {
        DiagramError::NotFound(format!("{} '{}'", what, name))
    }

    /// Check whether this error (or the error it wraps) is a `NotFound`
    pub fn is_not_found(&self) -> bool {
        match self {
            DiagramError::NotFound(_) => true,
            DiagramError::WithContext { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for DiagramError {
    fn from(err: serde_json::Error) -> Self {
        DiagramError::Serialization(err.to_string())
    }
}

/// Result type alias for diagram operations
pub type Result<T> = std::result::Result<T, DiagramError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DiagramError::InvalidArgument("color 'green'".to_string());
        assert_eq!(err.to_string(), "Invalid argument: color 'green'");
    }

    #[test]
    fn test_not_found_helper() {
        let err = DiagramError::not_found("node", "r9");
        assert_eq!(err.to_string(), "Not found: node 'r9'");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_error_with_context() {
        let err = DiagramError::not_found("point", "p1");
        let with_ctx = err.with_context("Failed to connect");
        assert!(with_ctx.to_string().contains("Failed to connect"));
        assert!(with_ctx.is_not_found());
    }

    #[test]
    fn test_result_ext_context() {
        let result: Result<()> = Err(DiagramError::Gpio("pin busy".to_string()));
        let err = result.context("Setting up pin 4").unwrap_err();
        assert_eq!(err.to_string(), "Setting up pin 4: GPIO error: pin busy");
        assert!(!err.is_not_found());
    }
}
