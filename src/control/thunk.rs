//! Deferred computations.
//!
//! This module provides the `Thunk<T>` type: a zero-argument computation
//! whose evaluation is postponed until it is forced. Thunks are what make
//! self-referential stream definitions possible, since the tail of a stream
//! is only built when somebody asks for it.
//!
//! # Examples
//!
//! ```rust
//! use lazy_streams::control::Thunk;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let calls = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&calls);
//! let thunk = Thunk::new(move || {
//!     counter.set(counter.get() + 1);
//!     42
//! });
//!
//! // Nothing has run yet
//! assert_eq!(calls.get(), 0);
//!
//! // A plain thunk recomputes on every force
//! assert_eq!(thunk.force(), 42);
//! assert_eq!(thunk.force(), 42);
//! assert_eq!(calls.get(), 2);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Evaluation state of a memoized thunk.
enum MemoState<T> {
    /// Not evaluated yet; holds the initializer.
    Uninit(Box<dyn FnOnce() -> T>),
    /// The initializer is running, or panicked while running.
    Evaluating,
    /// Evaluated; holds the cached value.
    Init(T),
}

/// A re-invocable, cloneable deferred computation.
///
/// `Thunk<T>` wraps a `Fn() -> T`. Calling [`Thunk::force`] runs the
/// computation; a plain thunk runs it again on every call, which is what
/// corecursive stream definitions expect. Use [`Thunk::memoized`] when the
/// result should be computed once and shared.
///
/// Cloning a thunk is cheap: clones share the same underlying computation.
///
/// # Thread Safety
///
/// This type is NOT thread-safe.
pub struct Thunk<T> {
    computation: Rc<dyn Fn() -> T>,
}

impl<T: 'static> Thunk<T> {
    /// Creates a thunk that runs `computation` on every force.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_streams::control::Thunk;
    ///
    /// let thunk = Thunk::new(|| "deferred".to_string());
    /// assert_eq!(thunk.force(), "deferred");
    /// ```
    #[inline]
    pub fn new<F>(computation: F) -> Self
    where
        F: Fn() -> T + 'static,
    {
        Self {
            computation: Rc::new(computation),
        }
    }

    /// Creates a thunk that always yields a clone of `value`.
    #[inline]
    pub fn ready(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(move || value.clone())
    }

    /// Creates a thunk that evaluates `initializer` at most once.
    ///
    /// The first force runs the initializer and caches its result; later
    /// forces return clones of the cached value.
    ///
    /// # Panics
    ///
    /// Forcing the thunk from inside its own initializer panics, as does
    /// forcing it after the initializer panicked.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_streams::control::Thunk;
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// let calls = Rc::new(Cell::new(0));
    /// let counter = Rc::clone(&calls);
    /// let thunk = Thunk::memoized(move || {
    ///     counter.set(counter.get() + 1);
    ///     vec![1, 2, 3]
    /// });
    ///
    /// assert_eq!(thunk.force(), vec![1, 2, 3]);
    /// assert_eq!(thunk.clone().force(), vec![1, 2, 3]);
    /// assert_eq!(calls.get(), 1);
    /// ```
    pub fn memoized<F>(initializer: F) -> Self
    where
        F: FnOnce() -> T + 'static,
        T: Clone,
    {
        let state = Rc::new(RefCell::new(MemoState::Uninit(Box::new(initializer))));
        Self::new(move || force_memoized(&state))
    }

    /// Runs the deferred computation.
    #[inline]
    pub fn force(&self) -> T {
        (self.computation)()
    }
}

fn force_memoized<T: Clone>(state: &RefCell<MemoState<T>>) -> T {
    // The borrow is released before the initializer runs so that it may
    // build other thunks freely.
    let previous = std::mem::replace(&mut *state.borrow_mut(), MemoState::Evaluating);
    let initializer = match previous {
        MemoState::Init(value) => {
            let cached = value.clone();
            *state.borrow_mut() = MemoState::Init(value);
            return cached;
        }
        MemoState::Evaluating => {
            panic!("memoized thunk forced during its own evaluation or after a panic")
        }
        MemoState::Uninit(initializer) => initializer,
    };

    let value = initializer();
    *state.borrow_mut() = MemoState::Init(value.clone());
    value
}

impl<T> Clone for Thunk<T> {
    fn clone(&self) -> Self {
        Self {
            computation: Rc::clone(&self.computation),
        }
    }
}

impl<T> fmt::Debug for Thunk<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Thunk").field(&"<deferred>").finish()
    }
}
