//! A minimal single-assignment promise.
//!
//! `Promise<T, E>` is a cell that starts pending and is settled exactly once,
//! either resolved with a value or rejected with an error. Callbacks
//! registered while it is pending are queued; callbacks registered after it
//! settled fire immediately.
//!
//! Everything happens synchronously on the caller's stack: `resolve` runs
//! the queued callbacks before it returns. There is no scheduler and no
//! flattening of a promise resolved with another promise.
//!
//! # Examples
//!
//! ```rust
//! use lazy_streams::promise::Promise;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let promise: Promise<i32, String> = Promise::new();
//! let seen = Rc::new(Cell::new(0));
//!
//! let sink = Rc::clone(&seen);
//! promise.then(move |value| sink.set(value), |_error| {});
//! assert_eq!(seen.get(), 0);
//!
//! promise.resolve(42).unwrap();
//! assert_eq!(seen.get(), 42);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::trace;
use smallvec::SmallVec;

use crate::error::{AlreadySettledError, Settlement};

type Callback<T> = Box<dyn FnOnce(T)>;

/// Callbacks queued on a pending promise, in registration order.
struct Waiting<T, E> {
    on_resolved: SmallVec<[Callback<T>; 2]>,
    on_rejected: SmallVec<[Callback<E>; 2]>,
}

enum PromiseState<T, E> {
    Pending(Waiting<T, E>),
    Resolved(T),
    Rejected(E),
}

impl<T, E> PromiseState<T, E> {
    const fn settlement(&self) -> Option<Settlement> {
        match self {
            Self::Pending(_) => None,
            Self::Resolved(_) => Some(Settlement::Resolved),
            Self::Rejected(_) => Some(Settlement::Rejected),
        }
    }
}

/// A single-assignment deferred value.
///
/// A `Promise` is a handle: clones refer to the same cell, so one clone can
/// be handed to consumers while another is kept for settling it.
///
/// # States
///
/// 1. Pending - no value yet; success and failure callbacks are queued
/// 2. Resolved - holds a value; success callbacks receive a clone of it
/// 3. Rejected - holds an error; failure callbacks receive a clone of it
///
/// A promise leaves the pending state at most once. Settling it again
/// returns [`AlreadySettledError`] and leaves the first outcome in place.
///
/// # Thread Safety
///
/// This type is NOT thread-safe.
pub struct Promise<T, E> {
    state: Rc<RefCell<PromiseState<T, E>>>,
}

impl<T, E> Promise<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    /// Creates a pending promise.
    pub fn new() -> Self {
        Self::with_state(PromiseState::Pending(Waiting {
            on_resolved: SmallVec::new(),
            on_rejected: SmallVec::new(),
        }))
    }

    /// Creates a promise that is already resolved with `value`.
    pub fn resolved(value: T) -> Self {
        Self::with_state(PromiseState::Resolved(value))
    }

    /// Creates a promise that is already rejected with `error`.
    pub fn rejected(error: E) -> Self {
        Self::with_state(PromiseState::Rejected(error))
    }

    fn with_state(state: PromiseState<T, E>) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Resolves the promise with `value`.
    ///
    /// Queued success callbacks fire in registration order, each with a
    /// clone of `value`, before this method returns. Queued failure
    /// callbacks are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`AlreadySettledError`] if the promise is not pending.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_streams::promise::Promise;
    ///
    /// let promise: Promise<i32, ()> = Promise::new();
    /// assert!(promise.resolve(1).is_ok());
    /// assert!(promise.resolve(2).is_err());
    /// assert_eq!(promise.peek(), Some(Ok(1)));
    /// ```
    pub fn resolve(&self, value: T) -> Result<(), AlreadySettledError> {
        let waiting = self.settle(PromiseState::Resolved(value.clone()), Settlement::Resolved)?;
        trace!(
            "promise resolved; firing {} callback(s)",
            waiting.on_resolved.len()
        );
        for callback in waiting.on_resolved {
            callback(value.clone());
        }
        Ok(())
    }

    /// Rejects the promise with `error`.
    ///
    /// Queued failure callbacks fire in registration order, each with a
    /// clone of `error`, before this method returns. Queued success
    /// callbacks are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`AlreadySettledError`] if the promise is not pending.
    pub fn reject(&self, error: E) -> Result<(), AlreadySettledError> {
        let waiting = self.settle(PromiseState::Rejected(error.clone()), Settlement::Rejected)?;
        trace!(
            "promise rejected; firing {} callback(s)",
            waiting.on_rejected.len()
        );
        for callback in waiting.on_rejected {
            callback(error.clone());
        }
        Ok(())
    }

    /// Swaps in a terminal state and hands back the queued callbacks.
    ///
    /// The internal borrow is released before any callback runs, so
    /// callbacks may register on or inspect this same promise.
    fn settle(
        &self,
        terminal: PromiseState<T, E>,
        attempted: Settlement,
    ) -> Result<Waiting<T, E>, AlreadySettledError> {
        let mut state = self.state.borrow_mut();
        match std::mem::replace(&mut *state, terminal) {
            PromiseState::Pending(waiting) => Ok(waiting),
            previous => {
                let current = if matches!(previous, PromiseState::Resolved(_)) {
                    Settlement::Resolved
                } else {
                    Settlement::Rejected
                };
                *state = previous;
                Err(AlreadySettledError { attempted, current })
            }
        }
    }

    /// Registers callbacks for the outcome of the promise.
    ///
    /// While the promise is pending, both callbacks are queued. Once it has
    /// settled, the matching callback fires immediately with a clone of the
    /// stored outcome and the other one is dropped. Either way each
    /// registration fires at most once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_streams::promise::Promise;
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    ///
    /// let promise: Promise<(), String> = Promise::rejected(String::from("boom"));
    /// let error = Rc::new(RefCell::new(None));
    ///
    /// let sink = Rc::clone(&error);
    /// promise.then(|()| unreachable!(), move |reason| *sink.borrow_mut() = Some(reason));
    /// assert_eq!(error.borrow().as_deref(), Some("boom"));
    /// ```
    pub fn then<S, F>(&self, on_success: S, on_failure: F)
    where
        S: FnOnce(T) + 'static,
        F: FnOnce(E) + 'static,
    {
        let outcome = match &mut *self.state.borrow_mut() {
            PromiseState::Pending(waiting) => {
                waiting.on_resolved.push(Box::new(on_success));
                waiting.on_rejected.push(Box::new(on_failure));
                return;
            }
            PromiseState::Resolved(value) => Ok(value.clone()),
            PromiseState::Rejected(error) => Err(error.clone()),
        };
        match outcome {
            Ok(value) => on_success(value),
            Err(error) => on_failure(error),
        }
    }

    /// Returns a clone of the outcome, or `None` while pending.
    ///
    /// Unlike [`then`](Self::then), this never registers anything, which
    /// lets drivers walk already-settled chains in a loop.
    pub fn peek(&self) -> Option<Result<T, E>> {
        match &*self.state.borrow() {
            PromiseState::Pending(_) => None,
            PromiseState::Resolved(value) => Some(Ok(value.clone())),
            PromiseState::Rejected(error) => Some(Err(error.clone())),
        }
    }
}

impl<T, E> Promise<T, E> {
    /// Returns the outcome kind, or `None` while pending.
    pub fn settlement(&self) -> Option<Settlement> {
        self.state.borrow().settlement()
    }

    /// Returns whether the promise is still pending.
    pub fn is_pending(&self) -> bool {
        self.settlement().is_none()
    }
}

impl<T, E> Clone for Promise<T, E> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T, E> Default for Promise<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Promise<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.state.borrow() {
            PromiseState::Pending(waiting) => formatter
                .debug_struct("Promise")
                .field("state", &"pending")
                .field("waiting", &waiting.on_resolved.len())
                .finish(),
            PromiseState::Resolved(value) => formatter
                .debug_tuple("Promise")
                .field(&Ok::<&T, &E>(value))
                .finish(),
            PromiseState::Rejected(error) => formatter
                .debug_tuple("Promise")
                .field(&Err::<&T, &E>(error))
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    #[rstest]
    fn test_new_promise_is_pending() {
        let promise: Promise<i32, ()> = Promise::new();
        assert!(promise.is_pending());
        assert_eq!(promise.peek(), None);
    }

    #[rstest]
    fn test_callbacks_fire_in_registration_order() {
        let promise: Promise<i32, ()> = Promise::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for index in 0..3 {
            let order = Rc::clone(&order);
            promise.then(move |value| order.borrow_mut().push((index, value)), |()| {});
        }
        promise.resolve(7).unwrap();
        assert_eq!(*order.borrow(), vec![(0, 7), (1, 7), (2, 7)]);
    }

    #[rstest]
    fn test_reject_delivers_its_own_error() {
        let promise: Promise<i32, String> = Promise::new();
        let received = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&received);
        promise.then(|_| panic!("must not resolve"), move |error| *sink.borrow_mut() = Some(error));
        promise.reject(String::from("failure")).unwrap();
        assert_eq!(received.borrow().as_deref(), Some("failure"));
        assert_eq!(promise.settlement(), Some(Settlement::Rejected));
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn test_second_settlement_fails_and_keeps_first(#[case] second_is_resolve: bool) {
        let promise: Promise<i32, i32> = Promise::new();
        promise.resolve(1).unwrap();
        let result = if second_is_resolve { promise.resolve(2) } else { promise.reject(2) };
        let error = result.unwrap_err();
        assert_eq!(error.current, Settlement::Resolved);
        assert_eq!(promise.peek(), Some(Ok(1)));
    }

    #[rstest]
    fn test_callback_may_register_on_same_promise() {
        let promise: Promise<i32, ()> = Promise::new();
        let inner_value = Rc::new(Cell::new(0));
        let handle = promise.clone();
        let sink = Rc::clone(&inner_value);
        promise.then(
            move |_| handle.then(move |value| sink.set(value * 2), |()| {}),
            |()| {},
        );
        promise.resolve(21).unwrap();
        assert_eq!(inner_value.get(), 42);
    }

    #[rstest]
    fn test_failure_callbacks_dropped_on_resolve() {
        let promise: Promise<i32, i32> = Promise::new();
        let failures = Rc::new(Cell::new(0));
        let counter = Rc::clone(&failures);
        promise.then(|_| {}, move |_| counter.set(counter.get() + 1));
        promise.resolve(0).unwrap();
        let _ = promise.reject(1);
        assert_eq!(failures.get(), 0);
    }

    #[rstest]
    fn test_debug_shows_state() {
        let promise: Promise<i32, &str> = Promise::new();
        assert_eq!(format!("{promise:?}"), "Promise { state: \"pending\", waiting: 0 }");
        promise.resolve(3).unwrap();
        assert_eq!(format!("{promise:?}"), "Promise(Ok(3))");
    }
}
