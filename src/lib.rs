//! # lazy-streams
//!
//! Lazy sequences ("streams") encoded purely with closures and
//! continuation-passing.
//!
//! ## Overview
//!
//! The crate builds the same five-operation combinator set (`map`, `filter`,
//! `zip`, `lift`, plus a way to take a finite prefix) on top of three
//! different representations of a stream:
//!
//! - **Continuation-pull streams** ([`pull`]): a stream is a function taking
//!   a value handler and an end handler; each call drives exactly one step.
//! - **Push/callback streams** ([`push`]): a stream pushes every value through
//!   a callback in one synchronous burst, then signals the end once.
//! - **Promise-based streams** ([`promise`]): a stream is a single-assignment
//!   promise of a head/tail cell whose tail is a thunk returning the next
//!   promise. Values can be demanded lazily or injected from outside.
//!
//! The encodings do not depend on each other. All of them are
//! single-threaded and synchronous: "asynchrony" in the promise encoding only
//! means that a promise has not been resolved yet.
//!
//! ## Feature Flags
//!
//! - `control`: Deferred computations ([`control::Thunk`])
//! - `pull`: Continuation-pull streams
//! - `push`: Push/callback streams
//! - `promise`: The promise primitive and promise-based streams
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lazy_streams::prelude::*;
//!
//! let evens = filter_s(|value: &i32| value % 2 == 0, from_array_s(vec![1, 2, 3, 4, 5]));
//! assert_eq!(evens.to_vec(), vec![2, 4]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports every enabled stream encoding together with the error types.
/// The push and promise encodings are re-exported under their module names
/// as well, because their `map`/`filter`/`zip` would otherwise collide.
///
/// # Usage
///
/// ```rust
/// use lazy_streams::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::*;

    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "pull")]
    pub use crate::pull::*;

    #[cfg(feature = "push")]
    pub use crate::push;

    #[cfg(feature = "promise")]
    pub use crate::promise::*;
}

pub mod error;

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "pull")]
pub mod pull;

#[cfg(feature = "push")]
pub mod push;

#[cfg(feature = "promise")]
pub mod promise;
