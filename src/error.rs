//! Structured error types for the layout core.
//!
//! Sparse content is never an error here — missing activities are skipped and
//! partial word placement degrades to a shorter "find these words" list. The
//! variants below cover the cases that genuinely cannot proceed: malformed
//! input JSON and invalid shapes such as a zero-size maze.

use thiserror::Error;

/// The unified error type returned by all public API functions.
#[derive(Debug, Error)]
pub enum FolhaError {
    /// JSON input failed to parse as activity or storybook content.
    #[error("failed to parse content: {source}{}", hint_suffix(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },

    /// A puzzle generator was asked for a shape that has no meaning.
    #[error("invalid puzzle dimensions: {0}")]
    InvalidDimensions(String),
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  hint: {hint}")
    }
}

impl From<serde_json::Error> for FolhaError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "check for trailing commas, missing quotes, or unescaped characters".to_string()
            }
            serde_json::error::Category::Data => {
                "the JSON is valid but does not match the content schema; check field names and types"
                    .to_string()
            }
            serde_json::error::Category::Eof => {
                "unexpected end of input — is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        FolhaError::Parse { source: e, hint }
    }
}
