//! # stateclass
//!
//! Declarative stateful-class toggling over an in-memory HTML document.
//!
//! Page authors mark trigger elements with attributes naming a class, the
//! element(s) to apply it to, an optional ancestor scope, and a behavior:
//!
//! ```html
//! <button data-class="is-open,is-active"
//!         data-class-target="js-panel,self"
//!         data-class-scope="js-card,false"
//!         data-class-behavior="toggle,add">
//! ```
//!
//! Activating the trigger resolves each (class, target, scope, behavior)
//! tuple against the live document and mutates class sets accordingly.
//!
//! ## Architecture
//!
//! - **Document**: arena DOM with parser and serializer ([`dom`])
//! - **Actions**: attribute lists zipped into [`ToggleAction`] records ([`action`])
//! - **Resolution**: bounded ancestor-scope walk and target collection ([`resolve`])
//! - **Toggler**: trigger binding and activation ([`toggler`])

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod action;
pub mod config;
pub mod dom;
pub mod error;
pub mod event;
pub mod resolve;
pub mod toggler;

// Re-export main types
pub use action::{parse_actions, Behavior, ParsedActions, SkippedEntry, TargetRef, ToggleAction};
pub use config::{AttributeNames, Keywords, StateclassConfig};
pub use dom::{Attributes, Document, Element, NodeId, NodeKind};
pub use error::{Result, StateclassError};
pub use event::ActivationEvent;
pub use resolve::{find_scope, resolve, Resolution};
pub use toggler::{ActionOutcome, ActionStatus, Activation, Mutation, Toggler};

/// stateclass version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
