//! Construction errors for state machine definitions.

use thiserror::Error;

/// Errors that can occur while declaring transitions or building a
/// machine.
///
/// The contained string is the route label of the offending transition,
/// e.g. `"foo"-["ping"+EXTERNAL]->"bar"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// A transition with the same (source, target, event) triple is
    /// already registered.
    #[error("transition {0} is already defined, it cannot be added twice")]
    DuplicateTransition(String),

    /// An internal transition declared with differing source and target.
    #[error("internal transition {0} must keep source and target identical")]
    InvalidInternalTransition(String),
}
