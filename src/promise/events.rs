//! Adapter turning externally pushed events into a promise stream.

use std::cell::RefCell;
use std::fmt;

use log::{debug, trace};

use crate::control::Thunk;
use crate::error::AlreadySettledError;

use super::primitive::Promise;
use super::stream::{PromiseStream, StreamCell};

/// A promise stream fed by explicit injections.
///
/// The source owns a single slot: the pending promise for the next event.
/// Each [`inject`](Self::inject) resolves that slot with the event and
/// replaces it with a fresh pending promise, which becomes the `rest` of the
/// injected cell. Consumers drive the stream with `then` as usual; values
/// are demanded lazily but produced whenever the outside world calls
/// `inject`.
///
/// Lifecycle: construct, inject any number of times, then either
/// [`dispose`](Self::dispose) (the stream ends by silence) or
/// [`fail`](Self::fail) (the stream ends with an error).
///
/// # Examples
///
/// ```rust
/// use lazy_streams::promise::{EventSource, take_p};
///
/// let clicks: EventSource<&str, ()> = EventSource::new();
/// let first_two = take_p(2, clicks.stream());
///
/// clicks.inject("left").unwrap();
/// assert!(first_two.is_pending());
/// clicks.inject("right").unwrap();
///
/// assert_eq!(first_two.peek(), Some(Ok(vec!["left", "right"])));
/// ```
pub struct EventSource<A, E> {
    current: RefCell<PromiseStream<A, E>>,
}

impl<A, E> EventSource<A, E>
where
    A: Clone + 'static,
    E: Clone + 'static,
{
    /// Creates a source with no events yet.
    pub fn new() -> Self {
        Self {
            current: RefCell::new(Promise::new()),
        }
    }

    /// Returns the stream of events injected from now on.
    ///
    /// A consumer attached to the returned stream observes every later
    /// injection, in injection order.
    pub fn stream(&self) -> PromiseStream<A, E> {
        self.current.borrow().clone()
    }

    /// Delivers `event` to the stream.
    ///
    /// The `rest` of the delivered cell is the slot created by this very
    /// injection, so a consumer that forces it late still sees the next
    /// event rather than a later one. The slot is swapped before consumers
    /// run, which keeps ordering intact if a consumer injects again from
    /// inside its callback.
    ///
    /// # Errors
    ///
    /// Returns [`AlreadySettledError`] if the current slot was settled by
    /// someone else through a handle obtained from [`stream`](Self::stream).
    pub fn inject(&self, event: A) -> Result<(), AlreadySettledError> {
        let next: PromiseStream<A, E> = Promise::new();
        let previous = self.current.replace(next.clone());
        trace!("injecting event into stream");
        previous.resolve(StreamCell {
            value: event,
            rest: Thunk::ready(next),
        })
    }

    /// Ends the stream with `error`.
    ///
    /// # Errors
    ///
    /// Returns [`AlreadySettledError`] if the current slot was settled by
    /// someone else.
    pub fn fail(self, error: E) -> Result<(), AlreadySettledError> {
        debug!("event source failed; rejecting pending slot");
        self.current.into_inner().reject(error)
    }

    /// Ends the lifecycle of the source.
    ///
    /// The pending slot is never resolved, which consumers observe as the
    /// end of the stream.
    pub fn dispose(self) {
        debug!("event source disposed; stream ends");
    }
}

/// Creates an [`EventSource`].
pub fn events<A, E>() -> EventSource<A, E>
where
    A: Clone + 'static,
    E: Clone + 'static,
{
    EventSource::new()
}

impl<A, E> Default for EventSource<A, E>
where
    A: Clone + 'static,
    E: Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A, E> fmt::Debug for EventSource<A, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("EventSource")
            .field("pending", &self.current.borrow().is_pending())
            .finish()
    }
}
