//! Primitives for self-referential (corecursive) pull streams.
//!
//! A stream may refer to itself as long as the reference sits behind a
//! [`Thunk`]: `cons_s(head, tail)` only forces `tail` when the stream is
//! stepped, so building the definition never recurses.

use crate::control::Thunk;
use crate::error::EmptyStreamError;

use super::combinators::lift_s;
use super::stream::PullStream;

/// Creates a stream whose first value is `head`, followed by the stream
/// `tail` produces.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::control::Thunk;
/// use lazy_streams::pull::{cons_s, from_array_s};
///
/// let stream = cons_s(0, Thunk::new(|| from_array_s(vec![1, 2])));
/// assert_eq!(stream.to_vec(), vec![0, 1, 2]);
/// ```
pub fn cons_s<A>(head: A, tail: Thunk<PullStream<A>>) -> PullStream<A>
where
    A: Clone + 'static,
{
    PullStream::new(move |on_value, _on_end| on_value(head.clone(), tail.force()))
}

/// Returns the stream that follows the first element of `stream`.
///
/// # Errors
///
/// Returns [`EmptyStreamError`] when `stream` has no first element.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::pull::{PullStream, from_array_s, tail_s};
///
/// let tail = tail_s(&from_array_s(vec![1, 2, 3])).unwrap();
/// assert_eq!(tail.to_vec(), vec![2, 3]);
///
/// assert!(tail_s(&PullStream::<i32>::empty()).is_err());
/// ```
pub fn tail_s<A>(stream: &PullStream<A>) -> Result<PullStream<A>, EmptyStreamError>
where
    A: 'static,
{
    stream.uncons().map(|(_, rest)| rest).ok_or(EmptyStreamError)
}

/// Bounds `stream` to its first `count` elements.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::pull::{from_array_s, take_s};
///
/// assert_eq!(take_s(2, from_array_s(vec![1, 2, 3])).to_vec(), vec![1, 2]);
/// assert_eq!(take_s(5, from_array_s(vec![1])).to_vec(), vec![1]);
/// ```
pub fn take_s<A>(count: usize, stream: PullStream<A>) -> PullStream<A>
where
    A: 'static,
{
    PullStream::new(move |on_value, on_end| {
        if count == 0 {
            on_end();
        } else {
            stream.step(move |value, rest| on_value(value, take_s(count - 1, rest)), on_end);
        }
    })
}

/// Drains `stream`, calling `function` on every value.
///
/// Never returns for an infinite stream.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::pull::{do_s, from_array_s};
///
/// let mut seen = Vec::new();
/// do_s(|value| seen.push(value), from_array_s(vec![1, 2, 3]));
/// assert_eq!(seen, vec![1, 2, 3]);
/// ```
pub fn do_s<A, F>(mut function: F, stream: PullStream<A>)
where
    A: 'static,
    F: FnMut(A),
{
    let mut current = stream;
    while let Some((value, rest)) = current.uncons() {
        function(value);
        current = rest;
    }
}

/// The Fibonacci numbers, defined in terms of themselves:
/// `0, 1, zip(+, fib, tail(fib))`.
///
/// Every element recomputes the definition from scratch, so the cost grows
/// exponentially with the position; intended for small prefixes.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::pull::{fib_s, take_s};
///
/// assert_eq!(take_s(6, fib_s()).to_vec(), vec![0, 1, 1, 2, 3, 5]);
/// ```
pub fn fib_s() -> PullStream<u64> {
    cons_s(
        0,
        Thunk::new(|| {
            cons_s(
                1,
                Thunk::new(|| match tail_s(&fib_s()) {
                    Ok(tail) => lift_s(|a: u64, b: u64| a + b)(fib_s(), tail),
                    Err(EmptyStreamError) => PullStream::empty(),
                }),
            )
        }),
    )
}
