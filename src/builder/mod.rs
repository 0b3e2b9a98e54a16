//! Staged fluent API for constructing state machines.
//!
//! Construction is the only phase in which the transition table is
//! mutable. The chain types returned at each stage narrow what can be
//! called next, so a declaration reads in order:
//! `from` (or `from_among`, or `within`) → `to` → `on` → `when` →
//! `perform`, with the last two optional.

pub mod error;
pub mod machine;
pub mod transition;

pub use error::DefinitionError;
pub use machine::StateMachineBuilder;
pub use transition::{
    ExternalTransitionBuilder, ExternalTransitionsBuilder, InternalTransitionBuilder,
    TransitionFrom, TransitionOn, TransitionTo, TransitionWhen,
};
