//! State identities and the per-state transition index.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::builder::DefinitionError;
use crate::core::transition::Transition;

/// Opaque comparable key identifying a state.
///
/// Blanket-implemented: any cloneable, hashable, debuggable, thread-safe
/// type qualifies. Enums, strings, and integers all work; no trait needs
/// to be implemented by hand.
pub trait StateId: Clone + Eq + Hash + Debug + Send + Sync {}

impl<T> StateId for T where T: Clone + Eq + Hash + Debug + Send + Sync {}

/// Opaque comparable key identifying a triggering event.
pub trait EventId: Clone + Eq + Hash + Debug + Send + Sync {}

impl<T> EventId for T where T: Clone + Eq + Hash + Debug + Send + Sync {}

/// A state identity together with its outgoing transitions, indexed by
/// event.
///
/// Candidate lists preserve insertion order; that order is what guard
/// resolution walks at fire time.
pub struct StateNode<S: StateId, E: EventId, C> {
    id: S,
    index: HashMap<E, Vec<Transition<S, E, C>>>,
}

impl<S: StateId, E: EventId, C> StateNode<S, E, C> {
    pub(crate) fn new(id: S) -> Self {
        StateNode {
            id,
            index: HashMap::new(),
        }
    }

    pub fn id(&self) -> &S {
        &self.id
    }

    /// Store a transition under its event, appending to the candidate
    /// list. Rejects a second transition sharing an already-registered
    /// (source, target, event) triple; on success, returns the position of
    /// the new transition within its candidate list.
    pub(crate) fn insert(
        &mut self,
        transition: Transition<S, E, C>,
    ) -> Result<usize, DefinitionError> {
        let candidates = self.index.entry(transition.event().clone()).or_default();
        if candidates.iter().any(|t| t.same_route(&transition)) {
            return Err(DefinitionError::DuplicateTransition(transition.describe()));
        }
        candidates.push(transition);
        Ok(candidates.len() - 1)
    }

    /// Ordered candidate list for `event`; empty if none are declared.
    pub fn transitions_for(&self, event: &E) -> &[Transition<S, E, C>] {
        self.index.get(event).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn transition_mut(
        &mut self,
        event: &E,
        position: usize,
    ) -> Option<&mut Transition<S, E, C>> {
        self.index
            .get_mut(event)
            .and_then(|candidates| candidates.get_mut(position))
    }

    /// Every transition out of this state, across all events.
    pub fn all_transitions(&self) -> impl Iterator<Item = &Transition<S, E, C>> + '_ {
        self.index.values().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transition::TransitionKind;

    fn edge(source: &'static str, target: &'static str, event: &'static str) -> Transition<&'static str, &'static str, ()> {
        Transition::new(source, target, event, TransitionKind::External)
    }

    #[test]
    fn insert_rejects_duplicate_triple() {
        let mut node = StateNode::new("foo");
        node.insert(edge("foo", "bar", "ping")).unwrap();

        let result = node.insert(edge("foo", "bar", "ping"));

        assert!(matches!(
            result,
            Err(DefinitionError::DuplicateTransition(_))
        ));
        assert_eq!(node.transitions_for(&"ping").len(), 1);
    }

    #[test]
    fn same_event_different_targets_are_independent_candidates() {
        let mut node = StateNode::new("foo");
        node.insert(edge("foo", "bar", "ping")).unwrap();
        node.insert(edge("foo", "baz", "ping")).unwrap();

        let candidates = node.transitions_for(&"ping");
        assert_eq!(candidates.len(), 2);
        assert_eq!(*candidates[0].target(), "bar");
        assert_eq!(*candidates[1].target(), "baz");
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut node = StateNode::new("foo");
        for target in ["a", "b", "c"] {
            node.insert(edge("foo", target, "go")).unwrap();
        }

        let targets: Vec<_> = node
            .transitions_for(&"go")
            .iter()
            .map(|t| *t.target())
            .collect();
        assert_eq!(targets, vec!["a", "b", "c"]);
    }

    #[test]
    fn transitions_for_unknown_event_is_empty() {
        let node: StateNode<&str, &str, ()> = StateNode::new("foo");

        assert!(node.transitions_for(&"xxx").is_empty());
    }

    #[test]
    fn all_transitions_spans_events() {
        let mut node = StateNode::new("foo");
        node.insert(edge("foo", "bar", "ping")).unwrap();
        node.insert(edge("foo", "zzz", "sleep")).unwrap();

        assert_eq!(node.all_transitions().count(), 2);
    }

    #[test]
    fn insert_reports_position_within_candidate_list() {
        let mut node = StateNode::new("foo");

        assert_eq!(node.insert(edge("foo", "bar", "ping")).unwrap(), 0);
        assert_eq!(node.insert(edge("foo", "baz", "ping")).unwrap(), 1);
        assert_eq!(node.insert(edge("foo", "zzz", "sleep")).unwrap(), 0);
    }
}
