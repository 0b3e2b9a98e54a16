//! The transition table: every known state and its outgoing index.

use std::collections::HashMap;

use crate::core::state::{EventId, StateId, StateNode};
use crate::core::transition::Transition;

/// Registry mapping each known state identity to its transition index.
///
/// States materialize lazily: referencing an unknown identity creates an
/// empty node for it. This is intentional, so a state can be named before
/// any transition into or out of it is declared. Entries are never
/// removed.
///
/// The table is mutable only while owned by the builder; once a machine is
/// built around it, every access is read-only.
pub struct TransitionTable<S: StateId, E: EventId, C> {
    states: HashMap<S, StateNode<S, E, C>>,
}

impl<S: StateId, E: EventId, C> TransitionTable<S, E, C> {
    pub(crate) fn new() -> Self {
        TransitionTable {
            states: HashMap::new(),
        }
    }

    /// Return the node for `id`, materializing an empty one on first
    /// reference.
    pub(crate) fn get_or_create(&mut self, id: &S) -> &mut StateNode<S, E, C> {
        self.states
            .entry(id.clone())
            .or_insert_with(|| StateNode::new(id.clone()))
    }

    /// Read-only lookup; `None` for a state the table has never seen.
    pub fn get(&self, id: &S) -> Option<&StateNode<S, E, C>> {
        self.states.get(id)
    }

    pub(crate) fn transition_mut(
        &mut self,
        source: &S,
        event: &E,
        position: usize,
    ) -> Option<&mut Transition<S, E, C>> {
        self.states
            .get_mut(source)
            .and_then(|node| node.transition_mut(event, position))
    }

    /// Every known state node, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &StateNode<S, E, C>> + '_ {
        self.states.values()
    }

    /// Every transition in the table, across all states and events.
    pub(crate) fn transitions(&self) -> impl Iterator<Item = &Transition<S, E, C>> + '_ {
        self.states.values().flat_map(|node| node.all_transitions())
    }
}
