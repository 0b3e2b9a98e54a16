//! Switchyard: a declarative finite state machine engine.
//!
//! Callers register states, events, and transitions (with optional guard
//! conditions and side-effecting actions) through a staged fluent builder,
//! then drive the frozen machine by firing events against a current state
//! to obtain the next state.
//!
//! # Core concepts
//!
//! - **State / event identities**: any `Clone + Eq + Hash + Debug` value,
//!   such as an enum, string, or integer. States materialize the first
//!   time a declaration references them.
//! - **Guards**: predicates over caller-owned context, resolved in
//!   declaration order; an unguarded transition acts as the fallback
//!   branch for its (state, event) pair.
//! - **Actions**: synchronous callbacks receiving (from, to, event,
//!   context) when a transition is taken.
//! - **Immutability**: `build` consumes the builder and freezes the
//!   transition table; a built machine is read-only and safe to share
//!   across threads.
//!
//! # Example
//!
//! ```rust
//! use switchyard::StateMachineBuilder;
//!
//! struct Payment {
//!     confirmed: bool,
//! }
//!
//! let mut builder = StateMachineBuilder::new();
//! builder
//!     .external_transition()
//!     .from("created")
//!     .to("paid")
//!     .on("pay")
//!     .when(|p: &Payment| p.confirmed)
//!     .perform(|from, to, event, _p: &mut Payment| {
//!         println!("{from:?} -[{event:?}]-> {to:?}");
//!     });
//! builder
//!     .external_transition()
//!     .from("created")
//!     .to("cancelled")
//!     .on("cancel");
//! let machine = builder.build("payment-flow")?;
//!
//! let mut payment = Payment { confirmed: true };
//! assert_eq!(machine.fire_event(&"created", &"pay", &mut payment), "paid");
//! assert!(machine.verify(&"created", &"cancel"));
//! # Ok::<(), switchyard::DefinitionError>(())
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod registry;
pub mod visitor;

pub use crate::builder::{DefinitionError, StateMachineBuilder};
pub use crate::core::{Action, EventId, Guard, StateId, Transition, TransitionKind};
pub use crate::machine::{
    AbortFail, CurrentStateAccessor, FailCallback, IgnoreFail, StateMachine,
};
pub use crate::registry::{MachineRegistry, RegistryError};
pub use crate::visitor::{MachineVisitor, OutlineVisitor};
