//! Failure callbacks invoked when no transition applies.

use tracing::error;

use crate::core::{EventId, StateId};

/// Policy invoked when firing an event yields no applicable transition.
///
/// The machine stays in its source state either way; the callback only
/// decides what else happens. Implement this trait for custom policies
/// (metrics, retry scheduling); [`IgnoreFail`] and [`AbortFail`] cover the
/// common cases.
pub trait FailCallback<S: StateId, E: EventId, C>: Send + Sync {
    fn on_fail(&self, source: &S, event: &E, ctx: &mut C);
}

/// Silently ignores the miss. The default policy.
pub struct IgnoreFail;

impl<S: StateId, E: EventId, C> FailCallback<S, E, C> for IgnoreFail {
    fn on_fail(&self, _source: &S, _event: &E, _ctx: &mut C) {}
}

/// Treats the miss as a programming error and panics.
pub struct AbortFail;

impl<S: StateId, E: EventId, C> FailCallback<S, E, C> for AbortFail {
    fn on_fail(&self, source: &S, event: &E, _ctx: &mut C) {
        error!(source = ?source, event = ?event, "no transition applies");
        panic!("cannot fire event {event:?} on current state {source:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignore_fail_is_silent() {
        let callback = IgnoreFail;
        let mut ctx = ();

        callback.on_fail(&"foo", &"xxx", &mut ctx);
    }

    #[test]
    #[should_panic(expected = "cannot fire event")]
    fn abort_fail_panics() {
        let callback = AbortFail;
        let mut ctx = ();

        callback.on_fail(&"foo", &"xxx", &mut ctx);
    }
}
