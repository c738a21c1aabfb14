//! Asynchronous single-value handles.
//!
//! A [`Deferred`] is the native shape of the `future` witness: a handle that
//! will eventually hold one value, or nothing, or a fault. Settling a
//! deferred **blocks the calling thread** until the underlying future
//! resolves. This is a deliberate trade-off: it keeps the whole dispatch
//! layer synchronous and composable, at the cost of occupying the thread for
//! the duration of the wait. There is no cancellation — a caller wanting
//! cancellation must wrap the composition at a higher level.
//!
//! Settling is memoized: the underlying future runs at most once, and every
//! later (or concurrent) settle observes the cached outcome.

use crate::value::Value;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Mutex;

/// Why a deferred settled without a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredFailure {
    /// The zero of the asynchronous wrapper: settled with no value.
    Empty,
    /// The underlying computation failed.
    Faulted(String),
}

impl fmt::Display for DeferredFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeferredFailure::Empty => f.write_str("empty asynchronous value"),
            DeferredFailure::Faulted(message) => write!(f, "{message}"),
        }
    }
}

enum State {
    Pending(BoxFuture<'static, Result<Value, DeferredFailure>>),
    Settled(Result<Value, DeferredFailure>),
}

/// A future-like handle for exactly one asynchronous value.
pub struct Deferred {
    state: Mutex<State>,
}

impl Deferred {
    /// A deferred already settled with the given outcome.
    pub fn settled(outcome: Result<Value, DeferredFailure>) -> Self {
        Self {
            state: Mutex::new(State::Settled(outcome)),
        }
    }

    /// A deferred already holding a value.
    pub fn ready(v: Value) -> Self {
        Self::settled(Ok(v))
    }

    /// The zero: a deferred settled with no value.
    ///
    /// An incomplete promise would be truer to the asynchronous wrapper's
    /// origin, but a synchronous settle on one would never return; the zero
    /// is a settled absent outcome instead.
    pub fn absent() -> Self {
        Self::settled(Err(DeferredFailure::Empty))
    }

    /// A deferred settled with a fault.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::settled(Err(DeferredFailure::Faulted(message.into())))
    }

    /// A deferred backed by a future that has not run yet.
    pub fn from_future<F>(fut: F) -> Self
    where
        F: Future<Output = Result<Value, DeferredFailure>> + Send + 'static,
    {
        Self {
            state: Mutex::new(State::Pending(Box::pin(fut))),
        }
    }

    /// Whether the outcome is already known.
    pub fn is_settled(&self) -> bool {
        matches!(
            &*self.state.lock().unwrap_or_else(|e| e.into_inner()),
            State::Settled(_)
        )
    }

    /// Block until the outcome is known, then return it.
    ///
    /// Runs the underlying future at most once; the outcome is cached and
    /// shared with every subsequent settle. A concurrent settle blocks on
    /// the internal lock until the first one finishes.
    pub fn settle(&self) -> Result<Value, DeferredFailure> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let prev = std::mem::replace(&mut *state, State::Settled(Err(DeferredFailure::Empty)));
        let outcome = match prev {
            State::Settled(outcome) => outcome,
            State::Pending(fut) => futures::executor::block_on(fut),
        };
        *state = State::Settled(outcome.clone());
        outcome
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_settled() {
            f.write_str("Deferred(settled)")
        } else {
            f.write_str("Deferred(pending)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{scalar, value};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn ready_settles_immediately() {
        let d = Deferred::ready(value(7i64));
        assert!(d.is_settled());
        assert_eq!(scalar::<i64>(&d.settle().unwrap()), Some(7));
    }

    #[test]
    fn pending_future_runs_once() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();
        let d = Deferred::from_future(async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(value(1i64))
        });
        assert!(!d.is_settled());
        d.settle().unwrap();
        d.settle().unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(d.is_settled());
    }

    #[test]
    fn fault_is_preserved_across_settles() {
        let d = Deferred::failed("connection reset");
        assert_eq!(
            d.settle().err(),
            Some(DeferredFailure::Faulted("connection reset".to_string()))
        );
        assert_eq!(
            d.settle().err(),
            Some(DeferredFailure::Faulted("connection reset".to_string()))
        );
    }

    #[test]
    fn absent_is_the_zero() {
        assert_eq!(Deferred::absent().settle().err(), Some(DeferredFailure::Empty));
    }
}
