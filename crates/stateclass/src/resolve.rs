//! Scope and target resolution
//!
//! Resolution is read-only: it maps an action to the set of element ids it
//! would touch, in document order, given the current state of the tree.

use crate::action::{TargetRef, ToggleAction};
use crate::dom::{Document, NodeId};

/// Outcome of resolving one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Elements to mutate, possibly empty
    Targets(Vec<NodeId>),
    /// A scope was named but no ancestor matched it
    ScopeNotFound,
}

/// Whether `id` is an element matching a scope identifier: its class set
/// contains it, or its tag name equals it (ASCII case-insensitive).
pub fn matches_scope(doc: &Document, id: NodeId, scope: &str) -> bool {
    doc.element(id)
        .is_some_and(|e| e.has_class(scope) || e.tag_name.eq_ignore_ascii_case(scope))
}

/// Nearest element matching `scope`, testing `from` itself first and then
/// its ancestors.
///
/// The walk is a plain loop up the parent chain and ends at the document
/// root, so it terminates on any tree.
pub fn find_scope(doc: &Document, from: NodeId, scope: &str) -> Option<NodeId> {
    std::iter::once(from)
        .chain(doc.ancestors(from))
        .find(|id| matches_scope(doc, *id, scope))
}

/// Elements under `within` (inclusive) carrying `class_name`, in document
/// order. `within` comes first when it matches, and appears exactly once.
pub fn collect_class(doc: &Document, within: NodeId, class_name: &str) -> Vec<NodeId> {
    std::iter::once(within)
        .chain(doc.descendants(within))
        .filter(|id| doc.has_class(*id, class_name))
        .collect()
}

/// Resolve an action fired from `trigger`.
///
/// `root` is the node unscoped searches run under; passing the document
/// root gives the whole-document behavior.
pub fn resolve(
    doc: &Document,
    root: NodeId,
    trigger: NodeId,
    action: &ToggleAction,
) -> Resolution {
    let class_name = match &action.target {
        TargetRef::Trigger => return Resolution::Targets(vec![trigger]),
        TargetRef::Class(name) => name.as_str(),
    };

    match action.scope.as_deref() {
        Some(scope) => match find_scope(doc, trigger, scope) {
            Some(ancestor) => {
                tracing::debug!(%trigger, %ancestor, scope, "Scope resolved");
                Resolution::Targets(collect_class(doc, ancestor, class_name))
            }
            None => {
                tracing::debug!(%trigger, scope, "No ancestor matches scope");
                Resolution::ScopeNotFound
            }
        },
        None => Resolution::Targets(collect_class(doc, root, class_name)),
    }
}
