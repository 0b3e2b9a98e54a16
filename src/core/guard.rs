//! Guard predicates and transition actions.
//!
//! Both are cheap, cloneable handles around shared closures, so a single
//! `when`/`perform` in a multi-source declaration attaches the same
//! predicate or callback to every transition it produces.

use std::sync::Arc;

/// Predicate deciding whether a candidate transition is eligible.
///
/// Guards are evaluated against the caller-owned context during event
/// routing. They are expected to be side-effect free, though this is not
/// enforced.
///
/// # Example
///
/// ```rust
/// use switchyard::Guard;
///
/// struct Delivery {
///     attempts: u32,
/// }
///
/// let under_limit = Guard::new(|d: &Delivery| d.attempts < 3);
///
/// assert!(under_limit.check(&Delivery { attempts: 1 }));
/// assert!(!under_limit.check(&Delivery { attempts: 5 }));
/// ```
pub struct Guard<C> {
    predicate: Arc<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> Guard<C> {
    /// Create a guard from a predicate over the caller context.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the predicate against `ctx`.
    pub fn check(&self, ctx: &C) -> bool {
        (self.predicate)(ctx)
    }
}

impl<C> Clone for Guard<C> {
    fn clone(&self) -> Self {
        Guard {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

/// Side-effecting callback invoked when a transition is taken.
///
/// Receives the source state, target state, triggering event, and mutable
/// access to the caller context. Runs synchronously on the firing thread.
pub struct Action<S, E, C> {
    callback: Arc<dyn Fn(&S, &S, &E, &mut C) + Send + Sync>,
}

impl<S, E, C> Action<S, E, C> {
    /// Create an action from a callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&S, &S, &E, &mut C) + Send + Sync + 'static,
    {
        Action {
            callback: Arc::new(callback),
        }
    }

    /// Invoke the callback.
    pub fn call(&self, from: &S, to: &S, event: &E, ctx: &mut C) {
        (self.callback)(from, to, event, ctx)
    }
}

impl<S, E, C> Clone for Action<S, E, C> {
    fn clone(&self) -> Self {
        Action {
            callback: Arc::clone(&self.callback),
        }
    }
}
