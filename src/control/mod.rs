//! Control structures for lazy evaluation.
//!
//! - [`Thunk`]: A cloneable deferred computation, optionally memoized
//!
//! # Examples
//!
//! ```rust
//! use lazy_streams::control::Thunk;
//!
//! let thunk = Thunk::new(|| 40 + 2);
//! assert_eq!(thunk.force(), 42);
//! ```

mod thunk;

pub use thunk::Thunk;
