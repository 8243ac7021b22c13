//! Activation events

use crate::dom::NodeId;

/// A user activation (click) on a trigger element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationEvent {
    target: NodeId,
    default_prevented: bool,
}

impl ActivationEvent {
    /// Create an event dispatched at `target`.
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            default_prevented: false,
        }
    }

    /// The element the event was dispatched at.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Suppress the element's default action (link navigation, form submit).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether [`prevent_default`](Self::prevent_default) was called.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
