//! Continuation-pull streams.
//!
//! A stream is a function that takes a value handler and an end handler and
//! invokes exactly one of them. Calling it drives one step of production, so
//! the consumer decides how much of the stream is ever computed.
//!
//! - [`PullStream`]: The stream type and its step contract
//! - [`from_array_s`], [`map_s`], [`filter_s`], [`zip_s`], [`lift_s`]: Sources and combinators
//! - [`cons_s`], [`tail_s`], [`take_s`], [`do_s`]: Guarded corecursion and draining
//! - [`fib_s`]: A self-referential stream built from the primitives above
//!
//! # Examples
//!
//! ```rust
//! use lazy_streams::pull::{fib_s, filter_s, map_s, take_s};
//!
//! let odd_squares = take_s(
//!     3,
//!     map_s(|value: u64| value * value, filter_s(|value: &u64| value % 2 == 1, fib_s())),
//! );
//! assert_eq!(odd_squares.to_vec(), vec![1, 1, 9]);
//! ```

mod combinators;
mod corecursion;
mod stream;

pub use combinators::{filter_s, from_array_s, lift_s, map_s, zip_s};
pub use corecursion::{cons_s, do_s, fib_s, tail_s, take_s};
pub use stream::{OnEnd, OnValue, PullStream};

static_assertions::assert_not_impl_any!(PullStream<u8>: Send, Sync);
