//! Builder that assembles transition declarations and freezes them into a
//! machine.

use crate::builder::error::DefinitionError;
use crate::builder::transition::{
    ExternalTransitionBuilder, ExternalTransitionsBuilder, InternalTransitionBuilder,
};
use crate::core::{EventId, StateId, Transition, TransitionTable};
use crate::machine::{CurrentStateAccessor, FailCallback, IgnoreFail, StateMachine};

/// Fluent builder for state machines.
///
/// Transitions are declared through the staged chains started by
/// [`external_transition`](Self::external_transition),
/// [`external_transitions`](Self::external_transitions), and
/// [`internal_transition`](Self::internal_transition). Declaration errors
/// (duplicate routes) are recorded as they happen and surface from
/// [`build`](Self::build), which consumes the builder and freezes the
/// table. Building is the only way to obtain a routable machine.
///
/// # Example
///
/// ```rust
/// use switchyard::StateMachineBuilder;
///
/// let mut builder = StateMachineBuilder::new();
/// builder
///     .external_transitions()
///     .from_among(["draft", "review"])
///     .to("archived")
///     .on("archive");
/// builder
///     .internal_transition()
///     .within("draft")
///     .on("edit")
///     .perform(|_, _, _, edits: &mut u32| *edits += 1);
/// let machine = builder.build("documents")?;
///
/// let mut edits = 0;
/// assert_eq!(machine.fire_event(&"draft", &"edit", &mut edits), "draft");
/// assert_eq!(machine.fire_event(&"review", &"archive", &mut edits), "archived");
/// assert_eq!(edits, 1);
/// # Ok::<(), switchyard::DefinitionError>(())
/// ```
pub struct StateMachineBuilder<S: StateId, E: EventId, C> {
    table: TransitionTable<S, E, C>,
    fail_callback: Box<dyn FailCallback<S, E, C>>,
    accessor: Option<CurrentStateAccessor<S, C>>,
    errors: Vec<DefinitionError>,
}

impl<S: StateId, E: EventId, C> StateMachineBuilder<S, E, C> {
    pub fn new() -> Self {
        StateMachineBuilder {
            table: TransitionTable::new(),
            fail_callback: Box::new(IgnoreFail),
            accessor: None,
            errors: Vec::new(),
        }
    }

    /// Start declaring a single-source external transition.
    pub fn external_transition(&mut self) -> ExternalTransitionBuilder<'_, S, E, C> {
        ExternalTransitionBuilder::new(self)
    }

    /// Start declaring the same external transition from several sources.
    pub fn external_transitions(&mut self) -> ExternalTransitionsBuilder<'_, S, E, C> {
        ExternalTransitionsBuilder::new(self)
    }

    /// Start declaring an internal transition, which runs an action
    /// without changing state.
    pub fn internal_transition(&mut self) -> InternalTransitionBuilder<'_, S, E, C> {
        InternalTransitionBuilder::new(self)
    }

    /// Replace the callback invoked when firing an event yields no
    /// applicable transition. Defaults to [`IgnoreFail`].
    pub fn fail_callback<F>(&mut self, callback: F) -> &mut Self
    where
        F: FailCallback<S, E, C> + 'static,
    {
        self.fail_callback = Box::new(callback);
        self
    }

    /// Install the accessor the `*_by_accessor` machine calls use to
    /// derive the current state from context.
    pub fn current_state_accessor<F>(&mut self, accessor: F) -> &mut Self
    where
        F: Fn(&C) -> S + Send + Sync + 'static,
    {
        self.accessor = Some(Box::new(accessor));
        self
    }

    /// Freeze the declared transitions into an immutable [`StateMachine`].
    ///
    /// Fails with the first declaration error recorded during the fluent
    /// chains, or with any transition violating the internal-kind
    /// invariant. No API adds transitions afterwards; changing the
    /// definition means building a fresh machine.
    pub fn build(
        mut self,
        machine_id: impl Into<String>,
    ) -> Result<StateMachine<S, E, C>, DefinitionError> {
        if let Some(error) = self.errors.drain(..).next() {
            return Err(error);
        }
        for transition in self.table.transitions() {
            transition.validate()?;
        }
        Ok(StateMachine::new(
            machine_id.into(),
            self.table,
            self.fail_callback,
            self.accessor,
        ))
    }

    /// Materialize both endpoints and store the transition under its
    /// source, returning the position handle the later stages mutate
    /// through.
    pub(crate) fn register(
        &mut self,
        transition: Transition<S, E, C>,
    ) -> Result<usize, DefinitionError> {
        self.table.get_or_create(transition.target());
        let node = self.table.get_or_create(transition.source());
        node.insert(transition)
    }

    pub(crate) fn record_error(&mut self, error: DefinitionError) {
        self.errors.push(error);
    }

    pub(crate) fn transition_mut(
        &mut self,
        source: &S,
        event: &E,
        position: usize,
    ) -> Option<&mut Transition<S, E, C>> {
        self.table.transition_mut(source, event, position)
    }
}

impl<S: StateId, E: EventId, C> Default for StateMachineBuilder<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}
