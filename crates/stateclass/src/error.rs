//! Error types for stateclass

use thiserror::Error;

use crate::dom::NodeId;

/// Main error type for stateclass operations.
///
/// Lookup failures inside an activation are not errors; they are recorded
/// in the activation report instead. These variants cover misuse of the
/// API and bad input at the edges (markup, config, I/O).
#[derive(Error, Debug)]
pub enum StateclassError {
    /// Markup could not be parsed
    #[error("HTML parse error: {0}")]
    HtmlParse(String),

    /// A class or attribute operation was applied to a non-element node
    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),

    /// The node was not bound as a trigger
    #[error("Node {0} is not a bound trigger")]
    NotATrigger(NodeId),

    /// A trigger reference did not resolve to a bound trigger
    #[error("Unknown trigger: {0}")]
    UnknownTrigger(String),

    /// A behavior entry was not one of `toggle`, `add`, `remove`
    #[error("Invalid behavior: {0:?} (expected toggle, add or remove)")]
    InvalidBehavior(String),

    /// Configuration failed validation
    #[error("Config error: {0}")]
    Config(String),

    /// Reading a file failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A config file was not valid TOML
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for stateclass operations
pub type Result<T> = std::result::Result<T, StateclassError>;
