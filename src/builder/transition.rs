//! Staged declaration chain for transitions.
//!
//! Each stage is a distinct type, so a declaration can only be written in
//! a valid order: `from`/`from_among`/`within`, then `to`, then `on`, then
//! optionally `when`, then optionally `perform`. The actual registration
//! happens at `on`; `when` and `perform` refine the transitions the call
//! just registered.

use crate::builder::machine::StateMachineBuilder;
use crate::core::{Action, EventId, Guard, StateId, Transition, TransitionKind};

/// Entry stage for a single-source external transition.
pub struct ExternalTransitionBuilder<'a, S: StateId, E: EventId, C> {
    builder: &'a mut StateMachineBuilder<S, E, C>,
}

impl<'a, S: StateId, E: EventId, C> ExternalTransitionBuilder<'a, S, E, C> {
    pub(crate) fn new(builder: &'a mut StateMachineBuilder<S, E, C>) -> Self {
        ExternalTransitionBuilder { builder }
    }

    /// Declare the source state.
    pub fn from(self, source: S) -> TransitionFrom<'a, S, E, C> {
        TransitionFrom {
            builder: self.builder,
            sources: vec![source],
            kind: TransitionKind::External,
        }
    }
}

/// Entry stage for an external transition shared by several sources.
pub struct ExternalTransitionsBuilder<'a, S: StateId, E: EventId, C> {
    builder: &'a mut StateMachineBuilder<S, E, C>,
}

impl<'a, S: StateId, E: EventId, C> ExternalTransitionsBuilder<'a, S, E, C> {
    pub(crate) fn new(builder: &'a mut StateMachineBuilder<S, E, C>) -> Self {
        ExternalTransitionsBuilder { builder }
    }

    /// Declare the source states. The eventual (target, event, guard,
    /// action) combination is registered once per source, producing
    /// independent transition records that share the guard and action
    /// handles.
    pub fn from_among<I>(self, sources: I) -> TransitionFrom<'a, S, E, C>
    where
        I: IntoIterator<Item = S>,
    {
        TransitionFrom {
            builder: self.builder,
            sources: sources.into_iter().collect(),
            kind: TransitionKind::External,
        }
    }
}

/// Entry stage for an internal transition.
pub struct InternalTransitionBuilder<'a, S: StateId, E: EventId, C> {
    builder: &'a mut StateMachineBuilder<S, E, C>,
}

impl<'a, S: StateId, E: EventId, C> InternalTransitionBuilder<'a, S, E, C> {
    pub(crate) fn new(builder: &'a mut StateMachineBuilder<S, E, C>) -> Self {
        InternalTransitionBuilder { builder }
    }

    /// Declare the state the transition stays within; it becomes both
    /// source and target, and the chain proceeds straight to `on`.
    pub fn within(self, state: S) -> TransitionTo<'a, S, E, C> {
        TransitionTo {
            builder: self.builder,
            sources: vec![state.clone()],
            target: state,
            kind: TransitionKind::Internal,
        }
    }
}

/// Sources declared; waiting on the target state.
pub struct TransitionFrom<'a, S: StateId, E: EventId, C> {
    builder: &'a mut StateMachineBuilder<S, E, C>,
    sources: Vec<S>,
    kind: TransitionKind,
}

impl<'a, S: StateId, E: EventId, C> TransitionFrom<'a, S, E, C> {
    /// Declare the target state.
    pub fn to(self, target: S) -> TransitionTo<'a, S, E, C> {
        TransitionTo {
            builder: self.builder,
            sources: self.sources,
            target,
            kind: self.kind,
        }
    }
}

/// Endpoints declared; waiting on the triggering event.
pub struct TransitionTo<'a, S: StateId, E: EventId, C> {
    builder: &'a mut StateMachineBuilder<S, E, C>,
    sources: Vec<S>,
    target: S,
    kind: TransitionKind,
}

impl<'a, S: StateId, E: EventId, C> TransitionTo<'a, S, E, C> {
    /// Register one transition per declared source under `event`.
    ///
    /// A duplicate (source, target, event) triple is recorded on the
    /// builder and fails the eventual `build`; the remaining sources are
    /// still registered.
    pub fn on(self, event: E) -> TransitionOn<'a, S, E, C> {
        let TransitionTo {
            builder,
            sources,
            target,
            kind,
        } = self;
        let mut handles = Vec::with_capacity(sources.len());
        for source in sources {
            let transition = Transition::new(source.clone(), target.clone(), event.clone(), kind);
            match builder.register(transition) {
                Ok(position) => handles.push((source, position)),
                Err(error) => builder.record_error(error),
            }
        }
        TransitionOn {
            builder,
            event,
            handles,
        }
    }
}

/// Event declared; a guard and an action may follow.
pub struct TransitionOn<'a, S: StateId, E: EventId, C> {
    builder: &'a mut StateMachineBuilder<S, E, C>,
    event: E,
    handles: Vec<(S, usize)>,
}

impl<'a, S: StateId, E: EventId, C> TransitionOn<'a, S, E, C> {
    /// Attach a guard predicate, shared by every transition of this
    /// declaration.
    pub fn when<F>(self, predicate: F) -> TransitionWhen<'a, S, E, C>
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        let TransitionOn {
            builder,
            event,
            handles,
        } = self;
        let guard = Guard::new(predicate);
        for (source, position) in &handles {
            if let Some(transition) = builder.transition_mut(source, &event, *position) {
                transition.set_guard(guard.clone());
            }
        }
        TransitionWhen {
            builder,
            event,
            handles,
        }
    }

    /// Attach the side-effecting action and finish the declaration.
    pub fn perform<F>(self, action: F)
    where
        F: Fn(&S, &S, &E, &mut C) + Send + Sync + 'static,
    {
        attach_action(self.builder, &self.event, &self.handles, Action::new(action));
    }
}

/// Guard declared; an action may follow.
pub struct TransitionWhen<'a, S: StateId, E: EventId, C> {
    builder: &'a mut StateMachineBuilder<S, E, C>,
    event: E,
    handles: Vec<(S, usize)>,
}

impl<S: StateId, E: EventId, C> TransitionWhen<'_, S, E, C> {
    /// Attach the side-effecting action and finish the declaration.
    pub fn perform<F>(self, action: F)
    where
        F: Fn(&S, &S, &E, &mut C) + Send + Sync + 'static,
    {
        attach_action(self.builder, &self.event, &self.handles, Action::new(action));
    }
}

fn attach_action<S: StateId, E: EventId, C>(
    builder: &mut StateMachineBuilder<S, E, C>,
    event: &E,
    handles: &[(S, usize)],
    action: Action<S, E, C>,
) {
    for (source, position) in handles {
        if let Some(transition) = builder.transition_mut(source, event, *position) {
            transition.set_action(action.clone());
        }
    }
}
