//! The frozen state machine engine: event routing over the transition
//! table.

mod fail;

pub use fail::{AbortFail, FailCallback, IgnoreFail};

use tracing::debug;

use crate::core::{EventId, StateId, Transition, TransitionTable};
use crate::visitor::{MachineVisitor, OutlineVisitor};

/// Derives the current state from caller context, enabling the
/// `*_by_accessor` calls on machines whose callers do not track state
/// themselves.
pub type CurrentStateAccessor<S, C> = Box<dyn Fn(&C) -> S + Send + Sync>;

/// An immutable, event-routed state machine.
///
/// Obtained only from [`StateMachineBuilder::build`]; no transition can be
/// added afterwards. All routing data is read-only, so a built machine is
/// safe for unlimited concurrent callers. Each call supplies its own
/// context; the engine never synchronizes access to it.
///
/// [`StateMachineBuilder::build`]: crate::builder::StateMachineBuilder::build
pub struct StateMachine<S: StateId, E: EventId, C> {
    id: String,
    table: TransitionTable<S, E, C>,
    accessor: Option<CurrentStateAccessor<S, C>>,
    fail_callback: Box<dyn FailCallback<S, E, C>>,
}

impl<S: StateId, E: EventId, C> std::fmt::Debug for StateMachine<S, E, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<S: StateId, E: EventId, C> StateMachine<S, E, C> {
    pub(crate) fn new(
        id: String,
        table: TransitionTable<S, E, C>,
        fail_callback: Box<dyn FailCallback<S, E, C>>,
        accessor: Option<CurrentStateAccessor<S, C>>,
    ) -> Self {
        StateMachine {
            id,
            table,
            accessor,
            fail_callback,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// True iff at least one transition is declared for (source, event).
    ///
    /// A structural check only: guards are not evaluated, so `verify` may
    /// return true for an event that [`fire_event`](Self::fire_event)
    /// would currently refuse.
    pub fn verify(&self, source: &S, event: &E) -> bool {
        self.table
            .get(source)
            .is_some_and(|node| !node.transitions_for(event).is_empty())
    }

    /// [`verify`](Self::verify) with the source derived from the
    /// configured current-state accessor.
    ///
    /// # Panics
    ///
    /// If no accessor was configured on the builder; calling this without
    /// one is a wiring mistake, not a runtime condition.
    pub fn verify_by_accessor(&self, event: &E, ctx: &C) -> bool {
        let source = self.current_state(ctx);
        self.verify(&source, event)
    }

    /// Fire `event` against `source` and return the resulting state.
    ///
    /// Candidates declared for (source, event) are resolved in insertion
    /// order: the first whose guard passes wins immediately, and an
    /// unguarded candidate serves as the fallback when every guard
    /// refuses. If nothing applies, the configured failure callback runs
    /// and the state is returned unchanged.
    ///
    /// The selected transition's action (if any) runs synchronously on the
    /// calling thread before the target is returned.
    pub fn fire_event(&self, source: &S, event: &E, ctx: &mut C) -> S {
        let Some(transition) = self.route(source, event, ctx) else {
            debug!(machine = %self.id, source = ?source, event = ?event, "no transition applies");
            self.fail_callback.on_fail(source, event, ctx);
            return source.clone();
        };
        debug!(machine = %self.id, transition = %transition.describe(), "transit");
        if let Some(action) = transition.action() {
            action.call(transition.source(), transition.target(), transition.event(), ctx);
        }
        transition.target().clone()
    }

    /// [`fire_event`](Self::fire_event) with the source derived from the
    /// configured current-state accessor.
    ///
    /// # Panics
    ///
    /// If no accessor was configured on the builder.
    pub fn fire_event_by_accessor(&self, event: &E, ctx: &mut C) -> S {
        let source = self.current_state(ctx);
        self.fire_event(&source, event, ctx)
    }

    fn current_state(&self, ctx: &C) -> S {
        let accessor = self
            .accessor
            .as_ref()
            .expect("no current-state accessor configured for this state machine");
        accessor(ctx)
    }

    /// Walk the candidates for (source, event) in declaration order. The
    /// first candidate whose guard passes is selected immediately; an
    /// unguarded candidate is remembered as the fallback, with the last
    /// declared one winning.
    fn route(&self, source: &S, event: &E, ctx: &C) -> Option<&Transition<S, E, C>> {
        let node = self.table.get(source)?;
        let mut fallback = None;
        for candidate in node.transitions_for(event) {
            match candidate.guard() {
                None => fallback = Some(candidate),
                Some(guard) if guard.check(ctx) => return Some(candidate),
                Some(_) => {}
            }
        }
        fallback
    }

    /// Traverse every state and its transitions with `visitor`, returning
    /// the concatenated dump. Purely informational.
    pub fn accept<V>(&self, visitor: &V) -> String
    where
        V: MachineVisitor<S, E, C>,
    {
        let mut dump = String::new();
        dump.push_str(&visitor.machine_entry(self));
        for node in self.table.nodes() {
            dump.push_str(&visitor.state_entry(node));
            dump.push_str(&visitor.state_exit(node));
        }
        dump.push_str(&visitor.machine_exit(self));
        dump
    }

    /// Dump the machine through the default [`OutlineVisitor`], which also
    /// mirrors every line to the log.
    pub fn show(&self) -> String {
        self.accept(&OutlineVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StateMachineBuilder;

    #[derive(Default)]
    struct Ctx {
        allow_ping: bool,
        misses: u32,
        log: Vec<String>,
    }

    struct CountMisses;

    impl FailCallback<&'static str, &'static str, Ctx> for CountMisses {
        fn on_fail(&self, _source: &&'static str, _event: &&'static str, ctx: &mut Ctx) {
            ctx.misses += 1;
        }
    }

    /// The machine used throughout: foo -ping-> bar (guarded),
    /// {foo,bar} -sleep-> zzz (guarded), bar -hi-> baz (unguarded),
    /// and an internal foo -in-> foo.
    fn sample_machine() -> StateMachine<&'static str, &'static str, Ctx> {
        let mut builder = StateMachineBuilder::new();
        builder
            .external_transition()
            .from("foo")
            .to("bar")
            .on("ping")
            .when(|ctx: &Ctx| ctx.allow_ping)
            .perform(|from, to, event, ctx: &mut Ctx| {
                ctx.log.push(format!("{from}-{event}->{to}"));
            });
        builder
            .external_transitions()
            .from_among(["foo", "bar"])
            .to("zzz")
            .on("sleep")
            .when(|_: &Ctx| true);
        builder
            .external_transition()
            .from("bar")
            .to("baz")
            .on("hi");
        builder
            .internal_transition()
            .within("foo")
            .on("in")
            .perform(|_, _, _, ctx: &mut Ctx| ctx.log.push("in".to_string()));
        builder.fail_callback(CountMisses);
        builder.current_state_accessor(|_: &Ctx| "foo");
        builder.build("sample").unwrap()
    }

    #[test]
    fn routes_event_chain() {
        let machine = sample_machine();
        let mut ctx = Ctx {
            allow_ping: true,
            ..Ctx::default()
        };

        assert_eq!(machine.fire_event(&"foo", &"ping", &mut ctx), "bar");
        assert_eq!(machine.fire_event(&"bar", &"sleep", &mut ctx), "zzz");
        assert_eq!(machine.fire_event(&"foo", &"sleep", &mut ctx), "zzz");
        assert_eq!(machine.fire_event(&"bar", &"hi", &mut ctx), "baz");
        assert_eq!(machine.fire_event(&"foo", &"in", &mut ctx), "foo");
        assert_eq!(ctx.log, vec!["foo-ping->bar".to_string(), "in".to_string()]);
        assert_eq!(ctx.misses, 0);
    }

    #[test]
    fn miss_leaves_state_unchanged_and_invokes_callback_once() {
        let machine = sample_machine();
        let mut ctx = Ctx::default();

        assert_eq!(machine.fire_event(&"foo", &"xxx", &mut ctx), "foo");
        assert_eq!(ctx.misses, 1);
        assert!(ctx.log.is_empty());
    }

    #[test]
    fn refused_guard_without_fallback_is_a_miss() {
        let machine = sample_machine();
        let mut ctx = Ctx::default();

        // allow_ping is false and foo has no unguarded candidate for
        // "ping", so the event misses.
        assert_eq!(machine.fire_event(&"foo", &"ping", &mut ctx), "foo");
        assert_eq!(ctx.misses, 1);
    }

    #[test]
    fn verify_checks_declaration_not_guards() {
        let machine = sample_machine();

        assert!(machine.verify(&"foo", &"ping"));
        assert!(machine.verify(&"bar", &"hi"));
        assert!(!machine.verify(&"foo", &"xxx"));
        assert!(!machine.verify(&"ghost", &"ping"));
    }

    #[test]
    fn accessor_variants_derive_the_source() {
        let machine = sample_machine();
        let mut ctx = Ctx {
            allow_ping: true,
            ..Ctx::default()
        };

        assert!(machine.verify_by_accessor(&"ping", &ctx));
        assert!(!machine.verify_by_accessor(&"xxx", &ctx));
        assert_eq!(machine.fire_event_by_accessor(&"ping", &mut ctx), "bar");
    }

    #[test]
    #[should_panic(expected = "no current-state accessor")]
    fn accessor_call_without_accessor_panics() {
        let mut builder: StateMachineBuilder<&str, &str, ()> = StateMachineBuilder::new();
        builder.external_transition().from("a").to("b").on("x");
        let machine = builder.build("unwired").unwrap();

        machine.fire_event_by_accessor(&"x", &mut ());
    }

    #[test]
    fn guarded_false_falls_back_to_unguarded() {
        let mut builder: StateMachineBuilder<&str, &str, bool> = StateMachineBuilder::new();
        builder
            .external_transition()
            .from("s")
            .to("guarded")
            .on("go")
            .when(|flag: &bool| *flag);
        builder.external_transition().from("s").to("fallback").on("go");
        let machine = builder.build("fallback").unwrap();

        let mut flag = false;
        assert_eq!(machine.fire_event(&"s", &"go", &mut flag), "fallback");
    }

    #[test]
    fn guarded_true_beats_fallback() {
        let mut builder: StateMachineBuilder<&str, &str, bool> = StateMachineBuilder::new();
        // Declared first, so the fallback is tracked before the guard is
        // even reached; the passing guard must still win.
        builder.external_transition().from("s").to("fallback").on("go");
        builder
            .external_transition()
            .from("s")
            .to("guarded")
            .on("go")
            .when(|flag: &bool| *flag);
        let machine = builder.build("preference").unwrap();

        let mut flag = true;
        assert_eq!(machine.fire_event(&"s", &"go", &mut flag), "guarded");
    }

    #[test]
    fn earliest_declared_passing_guard_wins() {
        let mut builder: StateMachineBuilder<&str, &str, ()> = StateMachineBuilder::new();
        builder
            .external_transition()
            .from("s")
            .to("first")
            .on("go")
            .when(|_: &()| true);
        builder
            .external_transition()
            .from("s")
            .to("second")
            .on("go")
            .when(|_: &()| true);
        let machine = builder.build("order").unwrap();

        assert_eq!(machine.fire_event(&"s", &"go", &mut ()), "first");
    }

    #[test]
    fn fire_event_is_repeatable() {
        let machine = sample_machine();
        let mut ctx = Ctx {
            allow_ping: true,
            ..Ctx::default()
        };

        let first = machine.fire_event(&"foo", &"ping", &mut ctx);
        let second = machine.fire_event(&"foo", &"ping", &mut ctx);

        assert_eq!(first, second);
        // The action ran once per fire; no hidden routing state.
        assert_eq!(ctx.log.len(), 2);
    }

    #[test]
    fn machine_is_shareable_across_threads() {
        let machine = sample_machine();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let mut ctx = Ctx {
                        allow_ping: true,
                        ..Ctx::default()
                    };
                    assert_eq!(machine.fire_event(&"foo", &"ping", &mut ctx), "bar");
                });
            }
        });
    }
}
