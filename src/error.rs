use thiserror::Error;

/// Errors raised by page lookups and focus operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// Lookup or highlight at an index outside the link list
    #[error("link index {index} out of range for {len} links")]
    OutOfRange { index: usize, len: usize },

    /// A pagination or tab anchor is not present on the current page
    #[error("no {0} anchor on this page")]
    MissingTarget(String),

    /// The snapshot's link is no longer attached to the live page
    #[error("link {index} is no longer attached to the page")]
    Detached { index: usize },
}

/// Errors raised while building a plugin from configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unknown action '{0}' in shortcut table")]
    UnknownAction(String),

    #[error("invalid key chord '{chord}': {reason}")]
    InvalidChord { chord: String, reason: String },

    #[error("selector '{0}' could not be parsed")]
    InvalidSelector(String),

    #[error("invalid page URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
