//! Toggler configuration
//!
//! Names the four trigger attributes and the two reserved keywords. Every
//! key is optional in a config file; anything missing takes its default.
//!
//! ```toml
//! separator = ","
//!
//! [attributes]
//! class = "data-class"
//! target = "data-class-target"
//! scope = "data-class-scope"
//! behavior = "data-class-behavior"
//!
//! [keywords]
//! unscoped = "false"
//! trigger = "self"
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::error::{Result, StateclassError};

/// Attribute names read from trigger elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeNames {
    /// Comma-separated class names to apply
    pub class: String,

    /// Comma-separated target identifiers
    pub target: String,

    /// Optional comma-separated scope identifiers
    pub scope: String,

    /// Optional comma-separated behaviors
    pub behavior: String,
}

impl Default for AttributeNames {
    fn default() -> Self {
        Self {
            class: "data-class".to_string(),
            target: "data-class-target".to_string(),
            scope: "data-class-scope".to_string(),
            behavior: "data-class-behavior".to_string(),
        }
    }
}

/// Reserved identifier values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keywords {
    /// Scope entry meaning "search from the root"
    pub unscoped: String,

    /// Target entry meaning "the trigger element itself"
    pub trigger: String,
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            unscoped: "false".to_string(),
            trigger: "self".to_string(),
        }
    }
}

/// Configuration for a [`Toggler`](crate::Toggler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateclassConfig {
    /// Trigger attribute names
    pub attributes: AttributeNames,

    /// Reserved keywords
    pub keywords: Keywords,

    /// List separator inside attribute values
    pub separator: String,
}

impl Default for StateclassConfig {
    fn default() -> Self {
        Self {
            attributes: AttributeNames::default(),
            keywords: Keywords::default(),
            separator: ",".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Representation
// ─────────────────────────────────────────────────────────────────────────────

/// Attribute names as loaded from a config file
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileAttributeNames {
    /// See [`AttributeNames::class`]
    pub class: Option<String>,
    /// See [`AttributeNames::target`]
    pub target: Option<String>,
    /// See [`AttributeNames::scope`]
    pub scope: Option<String>,
    /// See [`AttributeNames::behavior`]
    pub behavior: Option<String>,
}

/// Keywords as loaded from a config file
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileKeywords {
    /// See [`Keywords::unscoped`]
    pub unscoped: Option<String>,
    /// See [`Keywords::trigger`]
    pub trigger: Option<String>,
}

/// Whole config file
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// `[attributes]` table
    pub attributes: Option<FileAttributeNames>,
    /// `[keywords]` table
    pub keywords: Option<FileKeywords>,
    /// Top-level `separator`
    pub separator: Option<String>,
}

impl StateclassConfig {
    /// Create a config with the default attribute names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with custom attribute names.
    pub fn with_attributes(attributes: AttributeNames) -> Self {
        Self {
            attributes,
            ..Default::default()
        }
    }

    /// Merge a parsed file over the defaults.
    pub fn from_file(file: FileConfig) -> Self {
        let defaults = Self::default();
        let attrs = file.attributes.unwrap_or_default();
        let keywords = file.keywords.unwrap_or_default();

        Self {
            attributes: AttributeNames {
                class: attrs.class.unwrap_or(defaults.attributes.class),
                target: attrs.target.unwrap_or(defaults.attributes.target),
                scope: attrs.scope.unwrap_or(defaults.attributes.scope),
                behavior: attrs.behavior.unwrap_or(defaults.attributes.behavior),
            },
            keywords: Keywords {
                unscoped: keywords.unscoped.unwrap_or(defaults.keywords.unscoped),
                trigger: keywords.trigger.unwrap_or(defaults.keywords.trigger),
            },
            separator: file.separator.unwrap_or(defaults.separator),
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: FileConfig = toml::from_str(contents)?;
        let config = Self::from_file(file);
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "Loading config");
        Self::from_toml_str(&contents)
    }

    /// Check that attribute names are usable and distinct.
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("class", &self.attributes.class),
            ("target", &self.attributes.target),
            ("scope", &self.attributes.scope),
            ("behavior", &self.attributes.behavior),
        ];

        for (key, name) in names {
            if name.trim().is_empty() {
                return Err(StateclassError::Config(format!(
                    "attributes.{} must not be empty",
                    key
                )));
            }
            if name.chars().any(|c| c.is_ascii_whitespace() || c.is_ascii_uppercase()) {
                return Err(StateclassError::Config(format!(
                    "attributes.{} must be a lowercase attribute name, got {:?}",
                    key, name
                )));
            }
        }

        for (i, (key_a, a)) in names.iter().enumerate() {
            for (key_b, b) in &names[i + 1..] {
                if a == b {
                    return Err(StateclassError::Config(format!(
                        "attributes.{} and attributes.{} are both {:?}",
                        key_a, key_b, a
                    )));
                }
            }
        }

        if self.separator.is_empty() {
            return Err(StateclassError::Config(
                "separator must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
