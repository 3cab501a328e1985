//! Error types for spritetags

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for spritetags
#[derive(Debug, Error)]
pub enum SpriteTagsError {
    #[error("Invalid query: one of name or added must be given")]
    InvalidQuery,

    #[error("Invalid registration argument: {0}")]
    InvalidRegistrationArgument(String),

    #[error("Empty request: the first token must be the image tag name")]
    EmptyRequest,

    #[error("Rule file not found: {0}")]
    RuleFileNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Error raised by a registered callback, passed through untouched.
    #[error(transparent)]
    Callback(#[from] anyhow::Error),
}

impl SpriteTagsError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SpriteTagsError::RuleFileNotFound(_) => 2,
            SpriteTagsError::InvalidRegistrationArgument(_) => 3,
            SpriteTagsError::EmptyRequest | SpriteTagsError::InvalidQuery => 4,
            SpriteTagsError::Callback(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            SpriteTagsError::RuleFileNotFound(path) => {
                format!(
                    "Rule file not found: {}\n\n\
                    Suggestions:\n\
                    • Pass a rule file explicitly with --rules <PATH>\n\
                    • Create a spritetags.toml in this directory or a parent\n\
                    • Set SPRITETAGS_RULES environment variable to your rule file",
                    path.display()
                )
            }
            SpriteTagsError::InvalidRegistrationArgument(msg) => {
                format!(
                    "Invalid registration argument: {}\n\n\
                    Each rule needs exactly one of:\n\
                    • name = \"eileen\"\n\
                    • function = \"eileen_adjust_attributes\" (suffix is stripped)",
                    msg
                )
            }
            SpriteTagsError::EmptyRequest => {
                format!(
                    "{}\n\n\
                    Example:\n\
                    spritetags adjust eileen happy -sad",
                    self
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using SpriteTagsError
pub type Result<T> = std::result::Result<T, SpriteTagsError>;
