use thiserror::Error;

/// Error type for the infrastructure around the form: config files, hidden
/// field encoding and the final submission hand-off.
///
/// User input problems are not errors at this level; they travel as
/// [`crate::wizard::ValidationReport`] and [`crate::domain::TagError`] values.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Submission failed: {0}")]
    Submission(String),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}
