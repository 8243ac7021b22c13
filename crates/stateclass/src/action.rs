//! Toggle actions parsed from trigger attributes
//!
//! A trigger carries up to four comma-separated lists. Position `i` across
//! the lists is one action. Rather than keeping four parallel vectors, the
//! lists are zipped into a single `Vec<ToggleAction>` once per activation.
//!
//! Length policy: the action count is the length of the shorter of the
//! class and target lists. Scope and behavior lists are optional per index;
//! a missing entry means "unscoped" and "toggle" respectively. An index with
//! an empty class or target, a class containing whitespace, or an unknown
//! behavior is skipped and the remaining indices still apply.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::config::StateclassConfig;
use crate::dom::Element;
use crate::error::StateclassError;

/// Mutation applied to a target's class set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    /// Flip membership
    #[default]
    Toggle,
    /// Insert if absent
    Add,
    /// Delete if present
    Remove,
}

impl FromStr for Behavior {
    type Err = StateclassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "toggle" => Ok(Behavior::Toggle),
            "add" => Ok(Behavior::Add),
            "remove" => Ok(Behavior::Remove),
            other => Err(StateclassError::InvalidBehavior(other.to_string())),
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Behavior::Toggle => "toggle",
            Behavior::Add => "add",
            Behavior::Remove => "remove",
        })
    }
}

/// What an action's target identifier refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "name")]
pub enum TargetRef {
    /// Every element carrying this class
    Class(String),
    /// The trigger element itself
    Trigger,
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetRef::Class(name) => write!(f, ".{}", name),
            TargetRef::Trigger => f.write_str("self"),
        }
    }
}

/// One complete (class, target, scope, behavior) tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleAction {
    /// Class to apply
    pub class: String,

    /// Element(s) to modify
    pub target: TargetRef,

    /// Ancestor identifier bounding the search, `None` for the whole root
    pub scope: Option<String>,

    /// Mutation to apply
    pub behavior: Behavior,
}

impl ToggleAction {
    /// Unscoped toggle of `class` on every element with class `target`.
    pub fn toggle(class: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            target: TargetRef::Class(target.into()),
            scope: None,
            behavior: Behavior::Toggle,
        }
    }

    /// Restrict this action to an ancestor matching `scope`.
    pub fn within(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Change this action's behavior.
    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }
}

impl fmt::Display for ToggleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .{} on {}", self.behavior, self.class, self.target)?;
        if let Some(scope) = &self.scope {
            write!(f, " within {}", scope)?;
        }
        Ok(())
    }
}

/// An index that was dropped while parsing, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    /// Position in the attribute lists
    pub index: usize,

    /// Human-readable reason
    pub reason: String,
}

/// Result of parsing a trigger's attribute lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedActions {
    /// Actions in list order, paired with their original index
    pub actions: Vec<(usize, ToggleAction)>,

    /// Indices that were dropped
    pub skipped: Vec<SkippedEntry>,
}

fn split<'a>(value: Option<&'a str>, separator: &'a str) -> Vec<&'a str> {
    match value {
        Some(v) => v.split(separator).map(str::trim).collect(),
        None => Vec::new(),
    }
}

/// Parse a trigger element's attributes into actions.
///
/// Returns an empty result when either required attribute is absent.
pub fn parse_actions(element: &Element, config: &StateclassConfig) -> ParsedActions {
    let names = &config.attributes;
    let sep = config.separator.as_str();

    let (Some(classes), Some(targets)) = (element.attr(&names.class), element.attr(&names.target))
    else {
        return ParsedActions::default();
    };

    let classes = split(Some(classes), sep);
    let targets = split(Some(targets), sep);
    let scopes = split(element.attr(&names.scope), sep);
    let behaviors = split(element.attr(&names.behavior), sep);

    let count = classes.len().min(targets.len());
    if classes.len() != targets.len() {
        tracing::warn!(
            classes = classes.len(),
            targets = targets.len(),
            "Class and target lists differ in length, ignoring indices past {}",
            count
        );
    }

    let mut parsed = ParsedActions::default();
    for index in 0..count {
        match build_action(
            classes[index],
            targets[index],
            scopes.get(index).copied(),
            behaviors.get(index).copied(),
            config,
        ) {
            Ok(action) => parsed.actions.push((index, action)),
            Err(reason) => {
                tracing::warn!(index, %reason, "Skipping malformed toggle entry");
                parsed.skipped.push(SkippedEntry { index, reason });
            }
        }
    }
    parsed
}

fn build_action(
    class: &str,
    target: &str,
    scope: Option<&str>,
    behavior: Option<&str>,
    config: &StateclassConfig,
) -> Result<ToggleAction, String> {
    if class.is_empty() {
        return Err("empty class entry".to_string());
    }
    if class.chars().any(char::is_whitespace) {
        return Err(format!("class entry {:?} contains whitespace", class));
    }
    if target.is_empty() {
        return Err("empty target entry".to_string());
    }

    let target = if target == config.keywords.trigger {
        TargetRef::Trigger
    } else {
        TargetRef::Class(target.to_string())
    };

    let scope = scope
        .filter(|s| !s.is_empty() && *s != config.keywords.unscoped)
        .map(str::to_string);

    let behavior = match behavior {
        None | Some("") => Behavior::default(),
        Some(b) => b.parse::<Behavior>().map_err(|e| e.to_string())?,
    };

    Ok(ToggleAction {
        class: class.to_string(),
        target,
        scope,
        behavior,
    })
}
