//! Attribute-driven class toggler
//!
//! Binding scans a subtree for trigger elements (elements carrying both the
//! class and target attributes). Activating a trigger suppresses its default
//! action, re-reads its attributes, and applies each action in list order:
//!
//! ```text
//! trigger attrs → [parse_actions] → ToggleAction* → [resolve] → NodeId* → class mutation
//! ```
//!
//! Nothing is cached between activations besides the trigger list, and no
//! lookup failure escapes `activate`: an unmatched scope or an empty target
//! set is recorded in the [`Activation`] report and the next action runs.
//! Actions are applied independently, without deduplicating targets across
//! indices, so later actions see the effects of earlier ones.
//!
//! # Example
//!
//! ```
//! use stateclass::{Document, StateclassConfig, Toggler};
//!
//! let mut doc = Document::parse(
//!     r#"<a id="t" data-class="open" data-class-target="menu">menu</a>
//!        <ul class="menu"></ul>"#,
//! )
//! .unwrap();
//! let toggler = Toggler::bind(StateclassConfig::default(), &doc, doc.root());
//! let trigger = doc.element_by_id("t").unwrap();
//!
//! let report = toggler.activate(&mut doc, trigger).unwrap();
//! assert!(report.default_prevented);
//! assert_eq!(report.mutation_count(), 1);
//! assert!(doc.to_html().contains(r#"<ul class="menu open">"#));
//! ```

use serde::Serialize;

use crate::action::{parse_actions, Behavior, ParsedActions, SkippedEntry, ToggleAction};
use crate::config::StateclassConfig;
use crate::dom::{Document, NodeId};
use crate::error::{Result, StateclassError};
use crate::event::ActivationEvent;
use crate::resolve::{resolve, Resolution};

/// One class mutation on one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mutation {
    /// Mutated element
    pub node: NodeId,

    /// Class that was applied
    pub class: String,

    /// Behavior that was applied
    pub behavior: Behavior,

    /// Membership of `class` after the mutation
    pub present: bool,

    /// Whether the class set actually changed
    pub changed: bool,
}

/// How an action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    /// Targets were found and mutated
    Applied,
    /// A scope was named but no ancestor matched
    ScopeNotFound,
    /// The target identifier matched nothing
    NoTargets,
}

/// Report for one action of an activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    /// Position in the trigger's attribute lists
    pub index: usize,

    /// The parsed action
    pub action: ToggleAction,

    /// How it ended
    pub status: ActionStatus,

    /// Mutations in application order
    pub mutations: Vec<Mutation>,
}

/// Report for one activation of a trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activation {
    /// The activated trigger
    pub trigger: NodeId,

    /// Whether the default action was suppressed
    pub default_prevented: bool,

    /// Outcomes in list order
    pub actions: Vec<ActionOutcome>,

    /// Malformed indices that were not applied
    pub skipped: Vec<SkippedEntry>,
}

impl Activation {
    /// Total mutations across all actions.
    pub fn mutation_count(&self) -> usize {
        self.actions.iter().map(|a| a.mutations.len()).sum()
    }

    /// All mutations in application order.
    pub fn mutations(&self) -> impl Iterator<Item = &Mutation> {
        self.actions.iter().flat_map(|a| a.mutations.iter())
    }
}

/// Binds trigger elements and applies their actions on activation.
#[derive(Debug, Clone)]
pub struct Toggler {
    config: StateclassConfig,
    root: NodeId,
    triggers: Vec<NodeId>,
}

impl Toggler {
    /// Scan `root` and its subtree for triggers.
    ///
    /// `root` is also where unscoped target searches run.
    pub fn bind(config: StateclassConfig, doc: &Document, root: NodeId) -> Self {
        let mut toggler = Self {
            config,
            root,
            triggers: Vec::new(),
        };
        toggler.rebind(doc);
        toggler
    }

    /// Rescan for triggers, e.g. after attributes were edited.
    pub fn rebind(&mut self, doc: &Document) {
        let names = &self.config.attributes;
        self.triggers = std::iter::once(self.root)
            .chain(doc.descendants(self.root))
            .filter(|id| {
                doc.has_attribute(*id, &names.class) && doc.has_attribute(*id, &names.target)
            })
            .collect();
        tracing::debug!(root = %self.root, triggers = self.triggers.len(), "Bound triggers");
    }

    /// The configuration in use.
    pub fn config(&self) -> &StateclassConfig {
        &self.config
    }

    /// The node unscoped searches run under.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Bound triggers in document order.
    pub fn triggers(&self) -> &[NodeId] {
        &self.triggers
    }

    /// Whether `id` was bound as a trigger.
    pub fn is_trigger(&self, id: NodeId) -> bool {
        self.triggers.contains(&id)
    }

    /// First bound trigger whose `id` attribute equals `id`.
    pub fn trigger_by_id(&self, doc: &Document, id: &str) -> Option<NodeId> {
        self.triggers
            .iter()
            .copied()
            .find(|t| doc.get_attribute(*t, "id") == Some(id))
    }

    /// Look up a trigger by `#id` or by its position in [`triggers`](Self::triggers).
    pub fn find_trigger(&self, doc: &Document, reference: &str) -> Result<NodeId> {
        let reference = reference.trim();
        let found = match reference.strip_prefix('#') {
            Some(id) => self.trigger_by_id(doc, id),
            None => reference
                .parse::<usize>()
                .ok()
                .and_then(|i| self.triggers.get(i).copied()),
        };
        found.ok_or_else(|| StateclassError::UnknownTrigger(reference.to_string()))
    }

    /// Parse a trigger's current attributes without applying anything.
    pub fn actions_for(&self, doc: &Document, trigger: NodeId) -> Result<ParsedActions> {
        let element = doc
            .element(trigger)
            .ok_or(StateclassError::NotAnElement(trigger))?;
        Ok(parse_actions(element, &self.config))
    }

    /// Activate a bound trigger.
    pub fn activate(&self, doc: &mut Document, trigger: NodeId) -> Result<Activation> {
        if !self.is_trigger(trigger) {
            return Err(StateclassError::NotATrigger(trigger));
        }

        let mut event = ActivationEvent::new(trigger);
        event.prevent_default();

        let parsed = self.actions_for(doc, trigger)?;
        let mut outcomes = Vec::with_capacity(parsed.actions.len());

        for (index, action) in parsed.actions {
            let outcome = match resolve(doc, self.root, event.target(), &action) {
                Resolution::ScopeNotFound => ActionOutcome {
                    index,
                    action,
                    status: ActionStatus::ScopeNotFound,
                    mutations: Vec::new(),
                },
                Resolution::Targets(targets) if targets.is_empty() => {
                    tracing::debug!(index, %action, "No targets");
                    ActionOutcome {
                        index,
                        action,
                        status: ActionStatus::NoTargets,
                        mutations: Vec::new(),
                    }
                }
                Resolution::Targets(targets) => {
                    let mutations = targets
                        .into_iter()
                        .map(|node| apply(doc, node, &action))
                        .collect::<Result<Vec<_>>>()?;
                    ActionOutcome {
                        index,
                        action,
                        status: ActionStatus::Applied,
                        mutations,
                    }
                }
            };
            outcomes.push(outcome);
        }

        let activation = Activation {
            trigger,
            default_prevented: event.default_prevented(),
            actions: outcomes,
            skipped: parsed.skipped,
        };
        tracing::debug!(
            %trigger,
            actions = activation.actions.len(),
            mutations = activation.mutation_count(),
            "Trigger activated"
        );
        Ok(activation)
    }
}

fn apply(doc: &mut Document, node: NodeId, action: &ToggleAction) -> Result<Mutation> {
    let class = action.class.as_str();
    let (present, changed) = match action.behavior {
        Behavior::Toggle => (doc.toggle_class(node, class)?, true),
        Behavior::Add => (true, doc.add_class(node, class)?),
        Behavior::Remove => (false, doc.remove_class(node, class)?),
    };
    tracing::trace!(%node, class, behavior = %action.behavior, present, changed, "Class mutated");
    Ok(Mutation {
        node,
        class: action.class.clone(),
        behavior: action.behavior,
        present,
        changed,
    })
}
