// Error types for campus-assist
//
// Every fallible operation in the library returns [`AssistError`].
// Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Main error type for campus-assist operations
#[derive(Error, Debug)]
pub enum AssistError {
    /// I/O errors (log files, map image, config)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parse error (config or knowledge base file)
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Two places share the same canonical key
    #[error("Duplicate knowledge base key: {0}")]
    DuplicateKey(String),

    /// Knowledge base content is unusable
    #[error("Invalid knowledge base: {0}")]
    InvalidKnowledgeBase(String),

    /// Calculator input could not be read as a number
    #[error("Not a number: {0}")]
    NotANumber(String),

    /// Calculator input is a number but outside the formula's domain
    #[error("Out of domain: {0}")]
    OutOfDomain(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for campus-assist operations
pub type Result<T> = std::result::Result<T, AssistError>;

impl AssistError {
    /// Convert to a message fit for printing straight to the terminal
    pub fn user_message(&self) -> String {
        match self {
            AssistError::Io(e) => {
                format!("File system error. Check paths and permissions. Details: {}", e)
            }
            AssistError::Serialization(e) => format!("Data format error: {}", e),
            AssistError::Toml(e) => format!("Could not parse TOML file: {}", e),
            AssistError::DuplicateKey(key) => {
                format!("The place '{}' is defined more than once", key)
            }
            AssistError::InvalidKnowledgeBase(msg) => {
                format!("Knowledge base problem: {}", msg)
            }
            AssistError::NotANumber(raw) => {
                format!("Invalid input: '{}' is not a number", raw)
            }
            AssistError::OutOfDomain(reason) => format!("Invalid input: {}", reason),
            AssistError::Config(msg) => format!("Configuration issue: {}", msg),
            AssistError::Generic(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = AssistError::NotANumber("abc".to_string());
        assert!(err.user_message().contains("abc"));
        assert!(err.user_message().starts_with("Invalid input"));

        let err = AssistError::OutOfDomain("radius must be positive".to_string());
        assert!(err.user_message().contains("radius"));
    }

    #[test]
    fn test_error_display() {
        let err = AssistError::DuplicateKey("central library".to_string());
        let display = format!("{}", err);
        assert!(display.contains("Duplicate"));
        assert!(display.contains("central library"));
    }

    #[test]
    fn test_io_error_converts() {
        fn open() -> Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/here.txt")?)
        }
        assert!(matches!(open(), Err(AssistError::Io(_))));
    }
}
