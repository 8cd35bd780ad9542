//! The continuation-pull stream type.

use std::fmt;
use std::rc::Rc;

/// Handler invoked with the head of a stream and the stream that follows it.
pub type OnValue<'a, A> = Box<dyn FnOnce(A, PullStream<A>) + 'a>;

/// Handler invoked when a stream has no more values.
pub type OnEnd<'a> = Box<dyn FnOnce() + 'a>;

/// The step function behind a [`PullStream`].
type StepFunction<A> = dyn for<'a> Fn(OnValue<'a, A>, OnEnd<'a>);

/// A demand-driven stream in continuation-passing style.
///
/// A `PullStream<A>` is a callable with the contract `step(on_value, on_end)`:
/// each call invokes `on_value(head, rest)` exactly once if the stream has a
/// head, or `on_end()` exactly once otherwise. Never both, never neither.
/// `rest` obeys the same contract. Handlers run synchronously, before
/// `step` returns, so they may borrow the caller's locals.
///
/// A stream holds no mutable state: stepping the same stream twice yields
/// the same head twice. Combinators wrap a stream without changing it.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::pull::{PullStream, from_array_s};
///
/// let stream = from_array_s(vec![1, 2, 3]);
///
/// let mut head = None;
/// stream.step(|value, _rest| head = Some(value), || {});
/// assert_eq!(head, Some(1));
///
/// let mut ended = false;
/// PullStream::<i32>::empty().step(|_, _| {}, || ended = true);
/// assert!(ended);
/// ```
pub struct PullStream<A> {
    step_function: Rc<StepFunction<A>>,
}

impl<A: 'static> PullStream<A> {
    /// Creates a stream from a raw step function.
    ///
    /// The function must honor the single-delivery contract described on
    /// [`PullStream`].
    pub fn new<F>(step: F) -> Self
    where
        F: for<'a> Fn(OnValue<'a, A>, OnEnd<'a>) + 'static,
    {
        Self {
            step_function: Rc::new(step),
        }
    }

    /// Creates a stream that ends immediately.
    pub fn empty() -> Self {
        Self::new(|_on_value, on_end| on_end())
    }

    /// Drives one step of production.
    pub fn step<'a, V, E>(&self, on_value: V, on_end: E)
    where
        V: FnOnce(A, Self) + 'a,
        E: FnOnce() + 'a,
    {
        (self.step_function)(Box::new(on_value), Box::new(on_end));
    }

    /// Drives one step and returns its outcome as data.
    ///
    /// Returns `Some((head, rest))`, or `None` once the stream has ended.
    /// Drivers built on `uncons` run in a loop instead of nesting handler
    /// calls, so they use constant stack space.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_streams::pull::from_array_s;
    ///
    /// let (head, rest) = from_array_s(vec!['a', 'b']).uncons().unwrap();
    /// assert_eq!(head, 'a');
    /// assert_eq!(rest.to_vec(), vec!['b']);
    /// ```
    pub fn uncons(&self) -> Option<(A, Self)> {
        let mut outcome = None;
        self.step(|value, rest| outcome = Some((value, rest)), || {});
        outcome
    }

    /// Drains a finite stream into a vector.
    ///
    /// Never returns for an infinite stream; bound it with
    /// [`take_s`](super::take_s) first.
    pub fn to_vec(&self) -> Vec<A> {
        let mut values = Vec::new();
        let mut current = self.clone();
        while let Some((value, rest)) = current.uncons() {
            values.push(value);
            current = rest;
        }
        values
    }
}

impl<A> Clone for PullStream<A> {
    fn clone(&self) -> Self {
        Self {
            step_function: Rc::clone(&self.step_function),
        }
    }
}

impl<A> fmt::Debug for PullStream<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("PullStream(<step>)")
    }
}
