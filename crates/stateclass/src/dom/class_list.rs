//! Class-set operations on elements
//!
//! The class set lives in the element's `class` attribute as a
//! whitespace-separated token list. Mutations rewrite the attribute with
//! single spaces and no duplicate tokens, keeping the order of first
//! appearance.

use super::{Document, NodeId};
use crate::error::{Result, StateclassError};

/// Split a `class` attribute value into tokens.
pub fn tokens(value: Option<&str>) -> impl Iterator<Item = &str> {
    value.unwrap_or("").split_ascii_whitespace()
}

fn dedup(value: Option<&str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for token in tokens(value) {
        if !out.iter().any(|t| t == token) {
            out.push(token.to_string());
        }
    }
    out
}

impl Document {
    /// The element's classes, in attribute order without duplicates.
    pub fn classes(&self, id: NodeId) -> Result<Vec<String>> {
        let element = self.element(id).ok_or(StateclassError::NotAnElement(id))?;
        Ok(dedup(element.attr("class")))
    }

    /// Whether the node is an element whose class set contains `class_name`.
    pub fn has_class(&self, id: NodeId, class_name: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class_name))
    }

    /// Insert `class_name` if absent. Returns whether the set changed.
    pub fn add_class(&mut self, id: NodeId, class_name: &str) -> Result<bool> {
        let mut classes = self.classes(id)?;
        if classes.iter().any(|c| c == class_name) {
            return Ok(false);
        }
        classes.push(class_name.to_string());
        self.set_attribute(id, "class", classes.join(" "))?;
        Ok(true)
    }

    /// Delete `class_name` if present. Returns whether the set changed.
    pub fn remove_class(&mut self, id: NodeId, class_name: &str) -> Result<bool> {
        let mut classes = self.classes(id)?;
        let before = classes.len();
        classes.retain(|c| c != class_name);
        if classes.len() == before {
            return Ok(false);
        }
        self.set_attribute(id, "class", classes.join(" "))?;
        Ok(true)
    }

    /// Flip membership of `class_name`. Returns whether it is now present.
    pub fn toggle_class(&mut self, id: NodeId, class_name: &str) -> Result<bool> {
        if self.has_class(id, class_name) {
            self.remove_class(id, class_name)?;
            Ok(false)
        } else {
            self.add_class(id, class_name)?;
            Ok(true)
        }
    }
}
