//! Push/callback streams.
//!
//! A stream is a function that takes a value callback and an end
//! continuation. It pushes every value through the callback in one
//! synchronous pass and then signals the end exactly once. This is the
//! natural shape for wrapping sources that produce values on their own
//! schedule.
//!
//! - [`PushStream`]: The stream type and its run contract
//! - [`from_array`], [`map`], [`filter`]: Sources and per-value transforms
//! - [`zip`], [`lift`]: Element-wise combination with buffering
//!
//! # Examples
//!
//! ```rust
//! use lazy_streams::push::{filter, from_array, map};
//!
//! let stream = map(|value: i32| value * 10, filter(|value: &i32| *value > 1, from_array(vec![1, 2, 3])));
//! assert_eq!(stream.to_vec(), vec![20, 30]);
//! ```

mod combinators;
mod stream;

pub use combinators::{filter, from_array, lift, map, zip};
pub use stream::{OnEnd, OnValue, PushStream};

static_assertions::assert_not_impl_any!(PushStream<u8>: Send, Sync);
