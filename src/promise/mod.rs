//! Promise-based streams.
//!
//! A stream is a [`Promise`] that eventually resolves to a head value and a
//! thunk returning the promise stream for the rest. This supports both
//! demand-driven consumption (nothing past the head exists until `rest` is
//! forced) and production-driven values (an [`EventSource`] resolves the
//! next promise whenever an event arrives).
//!
//! - [`Promise`]: Single-assignment deferred value with success and failure callbacks
//! - [`StreamCell`], [`PromiseStream`]: The stream representation
//! - [`from_array_p`], [`cons_p`], [`map_p`], [`filter_p`], [`zip_p`], [`tail_p`]: Sources and combinators
//! - [`for_each_p`], [`take_p`]: Consumers
//! - [`fib`], [`project`]: Streams defined with the combinators
//! - [`EventSource`], [`events`]: External push adapter
//!
//! # Examples
//!
//! ```rust
//! use lazy_streams::promise::{events, filter_p, map_p, take_p};
//!
//! let source = events::<i32, String>();
//! let doubled_evens = take_p(
//!     2,
//!     map_p(|value: i32| value * 2, filter_p(|value: &i32| value % 2 == 0, source.stream())),
//! );
//!
//! for event in 1..=4 {
//!     source.inject(event).unwrap();
//! }
//! assert_eq!(doubled_evens.peek(), Some(Ok(vec![4, 8])));
//! ```

mod derived;
mod drive;
mod events;
mod primitive;
mod stream;

pub use derived::{fib, project};
pub use drive::{for_each_p, take_p};
pub use events::{EventSource, events};
pub use primitive::Promise;
pub use stream::{
    PromiseStream, StreamCell, cons_p, filter_p, from_array_p, map_p, tail_p, zip_p,
};

static_assertions::assert_not_impl_any!(Promise<u8, ()>: Send, Sync);
static_assertions::assert_not_impl_any!(EventSource<u8, ()>: Send, Sync);
