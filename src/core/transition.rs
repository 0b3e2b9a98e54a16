//! The transition record: one directed, event-labeled edge.

use std::fmt;

use crate::builder::DefinitionError;
use crate::core::guard::{Action, Guard};
use crate::core::state::{EventId, StateId};

/// How a transition relates to its source state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    /// Runs its action without leaving the state; source and target must be
    /// the same state.
    Internal,
    /// Transitions within a composite state without exiting it.
    Local,
    /// Exits the source state for the target.
    External,
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Internal => "INTERNAL",
            Self::Local => "LOCAL",
            Self::External => "EXTERNAL",
        };
        f.write_str(label)
    }
}

/// A directed, event-labeled edge between two states, optionally guarded
/// and optionally carrying a side-effecting action.
pub struct Transition<S: StateId, E: EventId, C> {
    source: S,
    target: S,
    event: E,
    kind: TransitionKind,
    guard: Option<Guard<C>>,
    action: Option<Action<S, E, C>>,
}

impl<S: StateId, E: EventId, C> Transition<S, E, C> {
    pub(crate) fn new(source: S, target: S, event: E, kind: TransitionKind) -> Self {
        Transition {
            source,
            target,
            event,
            kind,
            guard: None,
            action: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn target(&self) -> &S {
        &self.target
    }

    pub fn event(&self) -> &E {
        &self.event
    }

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    pub fn guard(&self) -> Option<&Guard<C>> {
        self.guard.as_ref()
    }

    pub fn action(&self) -> Option<&Action<S, E, C>> {
        self.action.as_ref()
    }

    pub(crate) fn set_guard(&mut self, guard: Guard<C>) {
        self.guard = Some(guard);
    }

    pub(crate) fn set_action(&mut self, action: Action<S, E, C>) {
        self.action = Some(action);
    }

    /// Two transitions describe the same route when their
    /// (source, target, event) triples coincide, regardless of guard,
    /// action, or kind.
    pub(crate) fn same_route(&self, other: &Self) -> bool {
        self.source == other.source && self.target == other.target && self.event == other.event
    }

    /// Internal transitions must keep source and target identical.
    pub(crate) fn validate(&self) -> Result<(), DefinitionError> {
        if self.kind == TransitionKind::Internal && self.source != self.target {
            return Err(DefinitionError::InvalidInternalTransition(self.describe()));
        }
        Ok(())
    }

    /// Route label used in error messages and machine dumps.
    pub fn describe(&self) -> String {
        format!(
            "{:?}-[{:?}+{}]->{:?}",
            self.source, self.event, self.kind, self.target
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_formats_route_label() {
        let transition: Transition<&str, &str, ()> =
            Transition::new("foo", "bar", "ping", TransitionKind::External);

        assert_eq!(transition.describe(), "\"foo\"-[\"ping\"+EXTERNAL]->\"bar\"");
    }

    #[test]
    fn same_route_matches_identical_triples() {
        let first: Transition<u8, u8, ()> = Transition::new(1, 2, 7, TransitionKind::External);
        let second: Transition<u8, u8, ()> = Transition::new(1, 2, 7, TransitionKind::External);

        assert!(first.same_route(&second));
    }

    #[test]
    fn same_route_ignores_guard_and_kind() {
        let mut first: Transition<u8, u8, ()> = Transition::new(1, 2, 7, TransitionKind::External);
        first.set_guard(Guard::new(|_| true));
        let second: Transition<u8, u8, ()> = Transition::new(1, 2, 7, TransitionKind::Local);

        assert!(first.same_route(&second));
    }

    #[test]
    fn same_route_rejects_different_targets() {
        let first: Transition<u8, u8, ()> = Transition::new(1, 2, 7, TransitionKind::External);
        let second: Transition<u8, u8, ()> = Transition::new(1, 3, 7, TransitionKind::External);

        assert!(!first.same_route(&second));
    }

    #[test]
    fn validate_rejects_internal_route_change() {
        let transition: Transition<&str, &str, ()> =
            Transition::new("foo", "bar", "in", TransitionKind::Internal);

        assert!(matches!(
            transition.validate(),
            Err(DefinitionError::InvalidInternalTransition(_))
        ));
    }

    #[test]
    fn validate_accepts_matching_internal() {
        let transition: Transition<&str, &str, ()> =
            Transition::new("foo", "foo", "in", TransitionKind::Internal);

        assert!(transition.validate().is_ok());
    }
}
