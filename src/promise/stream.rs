//! Promise-based streams: sources and combinators.
//!
//! A promise stream is a [`Promise`] that eventually resolves to a
//! [`StreamCell`]: the head value plus a thunk producing the promise stream
//! for the rest. A stream with no more values is simply a promise that is
//! never resolved. Failures travel through the rejection channel, and every
//! combinator here forwards an upstream rejection to the promise it returns.

use std::fmt;
use std::rc::Rc;

use log::warn;

use crate::control::Thunk;

use super::primitive::Promise;

/// A promise of the next cell of a stream.
pub type PromiseStream<A, E> = Promise<StreamCell<A, E>, E>;

/// A resolved step of a promise stream.
pub struct StreamCell<A, E> {
    /// The head of the stream.
    pub value: A,
    /// Produces the promise stream that follows `value`.
    ///
    /// Forcing it may drive production, so consumers force it only when
    /// they want the next value.
    pub rest: Thunk<PromiseStream<A, E>>,
}

impl<A: Clone, E> Clone for StreamCell<A, E> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            rest: self.rest.clone(),
        }
    }
}

impl<A: fmt::Debug, E> fmt::Debug for StreamCell<A, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("StreamCell")
            .field("value", &self.value)
            .field("rest", &self.rest)
            .finish()
    }
}

/// Resolves a promise owned by a combinator.
pub(super) fn fulfil<T, E>(promise: &Promise<T, E>, value: T)
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    if let Err(error) = promise.resolve(value) {
        warn!("derived stream promise settled externally: {error}");
    }
}

/// Passes an upstream rejection on to a promise owned by a combinator.
pub(super) fn forward_rejection<T, E>(promise: &Promise<T, E>, error: E)
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    if let Err(settled) = promise.reject(error) {
        warn!("cannot forward rejection: {settled}");
    }
}

/// Creates an already-resolved stream cell from a value and a lazy tail.
///
/// This is the corecursion primitive: `rest` is only forced on demand, so
/// a stream may be defined in terms of itself.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::control::Thunk;
/// use lazy_streams::promise::{PromiseStream, cons_p, from_array_p, take_p};
///
/// let stream: PromiseStream<i32, ()> = cons_p(0, Thunk::new(|| from_array_p(vec![1, 2])));
/// assert_eq!(take_p(3, stream).peek(), Some(Ok(vec![0, 1, 2])));
/// ```
pub fn cons_p<A, E>(value: A, rest: Thunk<PromiseStream<A, E>>) -> PromiseStream<A, E>
where
    A: Clone + 'static,
    E: Clone + 'static,
{
    Promise::resolved(StreamCell { value, rest })
}

/// Creates a stream over `items`.
///
/// The returned promise is resolved at construction; each `rest` builds
/// the promise for the next index. After the last item, `rest` returns a
/// promise that never resolves.
pub fn from_array_p<A, E>(items: impl Into<Rc<[A]>>) -> PromiseStream<A, E>
where
    A: Clone + 'static,
    E: Clone + 'static,
{
    from_index(items.into(), 0)
}

fn from_index<A, E>(items: Rc<[A]>, index: usize) -> PromiseStream<A, E>
where
    A: Clone + 'static,
    E: Clone + 'static,
{
    match items.get(index).cloned() {
        Some(value) => cons_p(value, Thunk::new(move || from_index(Rc::clone(&items), index + 1))),
        None => Promise::new(),
    }
}

/// Applies `function` to every value of `stream`.
///
/// The returned promise resolves when `stream` does.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::promise::{PromiseStream, from_array_p, map_p, take_p};
///
/// let doubled = map_p(|value: i32| value * 2, from_array_p::<i32, ()>(vec![1, 2, 3]));
/// assert_eq!(take_p(3, doubled).peek(), Some(Ok(vec![2, 4, 6])));
/// ```
pub fn map_p<A, B, E, F>(function: F, stream: PromiseStream<A, E>) -> PromiseStream<B, E>
where
    A: Clone + 'static,
    B: Clone + 'static,
    E: Clone + 'static,
    F: Fn(A) -> B + 'static,
{
    map_shared(Rc::new(function), stream)
}

fn map_shared<A, B, E, F>(function: Rc<F>, stream: PromiseStream<A, E>) -> PromiseStream<B, E>
where
    A: Clone + 'static,
    B: Clone + 'static,
    E: Clone + 'static,
    F: Fn(A) -> B + 'static,
{
    let mapped = Promise::new();
    let on_cell = mapped.clone();
    let on_error = mapped.clone();
    stream.then(
        move |cell: StreamCell<A, E>| {
            let StreamCell { value, rest } = cell;
            let value = (*function)(value);
            fulfil(
                &on_cell,
                StreamCell {
                    value,
                    rest: Thunk::new(move || map_shared(Rc::clone(&function), rest.force())),
                },
            );
        },
        move |error| forward_rejection(&on_error, error),
    );
    mapped
}

/// Keeps the values of `stream` that satisfy `predicate`.
///
/// Rejected values are skipped in a loop over cells that have already
/// resolved; a `then` continuation is registered only when the upstream is
/// still pending. Long runs of rejected values therefore use constant stack.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::promise::{from_array_p, filter_p, take_p};
///
/// let evens = filter_p(|value: &i32| value % 2 == 0, from_array_p::<i32, ()>(vec![1, 2, 3, 4, 5]));
/// assert_eq!(take_p(2, evens).peek(), Some(Ok(vec![2, 4])));
/// ```
pub fn filter_p<A, E, P>(predicate: P, stream: PromiseStream<A, E>) -> PromiseStream<A, E>
where
    A: Clone + 'static,
    E: Clone + 'static,
    P: Fn(&A) -> bool + 'static,
{
    filter_shared(Rc::new(predicate), stream)
}

fn filter_shared<A, E, P>(predicate: Rc<P>, stream: PromiseStream<A, E>) -> PromiseStream<A, E>
where
    A: Clone + 'static,
    E: Clone + 'static,
    P: Fn(&A) -> bool + 'static,
{
    let filtered = Promise::new();
    seek(predicate, stream, filtered.clone());
    filtered
}

/// Advances `source` until a value satisfies `predicate`, then resolves
/// `target` with it.
fn seek<A, E, P>(predicate: Rc<P>, source: PromiseStream<A, E>, target: PromiseStream<A, E>)
where
    A: Clone + 'static,
    E: Clone + 'static,
    P: Fn(&A) -> bool + 'static,
{
    let mut source = source;
    loop {
        match source.peek() {
            Some(Ok(cell)) if (*predicate)(&cell.value) => {
                let StreamCell { value, rest } = cell;
                fulfil(
                    &target,
                    StreamCell {
                        value,
                        rest: Thunk::new(move || filter_shared(Rc::clone(&predicate), rest.force())),
                    },
                );
                return;
            }
            Some(Ok(cell)) => source = cell.rest.force(),
            Some(Err(error)) => {
                forward_rejection(&target, error);
                return;
            }
            None => {
                let on_error = target.clone();
                source.then(
                    move |cell| seek(predicate, Promise::resolved(cell), target),
                    move |error| forward_rejection(&on_error, error),
                );
                return;
            }
        }
    }
}

/// Combines `left` and `right` element-wise with `function`.
///
/// The returned promise resolves once both inputs have resolved: it waits
/// for `left` first, then for `right`. A rejection of either input rejects
/// the result.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::promise::{from_array_p, take_p, zip_p};
///
/// let sums = zip_p(
///     |a: i32, b: i32| a + b,
///     from_array_p::<i32, ()>(vec![1, 2, 3]),
///     from_array_p(vec![10, 20, 30]),
/// );
/// assert_eq!(take_p(3, sums).peek(), Some(Ok(vec![11, 22, 33])));
/// ```
pub fn zip_p<A, B, C, E, F>(
    function: F,
    left: PromiseStream<A, E>,
    right: PromiseStream<B, E>,
) -> PromiseStream<C, E>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
    E: Clone + 'static,
    F: Fn(A, B) -> C + 'static,
{
    zip_shared(Rc::new(function), left, right)
}

fn zip_shared<A, B, C, E, F>(
    function: Rc<F>,
    left: PromiseStream<A, E>,
    right: PromiseStream<B, E>,
) -> PromiseStream<C, E>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
    E: Clone + 'static,
    F: Fn(A, B) -> C + 'static,
{
    let zipped = Promise::new();
    let on_cell = zipped.clone();
    let on_left_error = zipped.clone();
    left.then(
        move |left_cell: StreamCell<A, E>| {
            let on_right_error = on_cell.clone();
            right.then(
                move |right_cell: StreamCell<B, E>| {
                    let value = (*function)(left_cell.value, right_cell.value);
                    let (left_rest, right_rest) = (left_cell.rest, right_cell.rest);
                    fulfil(
                        &on_cell,
                        StreamCell {
                            value,
                            rest: Thunk::new(move || {
                                zip_shared(Rc::clone(&function), left_rest.force(), right_rest.force())
                            }),
                        },
                    );
                },
                move |error| forward_rejection(&on_right_error, error),
            );
        },
        move |error| forward_rejection(&on_left_error, error),
    );
    zipped
}

/// Returns the stream that follows the first value of `stream`.
///
/// Chains through `stream` and then through its `rest`; resolves with the
/// second cell.
pub fn tail_p<A, E>(stream: PromiseStream<A, E>) -> PromiseStream<A, E>
where
    A: Clone + 'static,
    E: Clone + 'static,
{
    let tail = Promise::new();
    let on_cell = tail.clone();
    let on_error = tail.clone();
    stream.then(
        move |cell: StreamCell<A, E>| {
            let on_next_error = on_cell.clone();
            cell.rest.force().then(
                move |next| fulfil(&on_cell, next),
                move |error| forward_rejection(&on_next_error, error),
            );
        },
        move |error| forward_rejection(&on_error, error),
    );
    tail
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promise::take_p;
    use rstest::rstest;
    use std::cell::Cell;

    type Stream = PromiseStream<i32, String>;

    #[rstest]
    fn test_from_array_resolves_at_construction() {
        let stream: Stream = from_array_p(vec![5, 6]);
        let cell = stream.peek().unwrap().unwrap();
        assert_eq!(cell.value, 5);
        assert_eq!(cell.rest.force().peek().unwrap().unwrap().value, 6);
    }

    #[rstest]
    fn test_exhausted_array_never_resolves() {
        let stream: Stream = from_array_p(vec![1]);
        let end = stream.peek().unwrap().unwrap().rest.force();
        assert!(end.is_pending());
        assert!(from_array_p::<i32, String>(Vec::new()).is_pending());
    }

    #[rstest]
    fn test_map_waits_for_pending_upstream() {
        let upstream: Stream = Promise::new();
        let mapped = map_p(|value: i32| value + 1, upstream.clone());
        assert!(mapped.is_pending());

        upstream
            .resolve(StreamCell { value: 1, rest: Thunk::new(Promise::new) })
            .unwrap();
        assert_eq!(mapped.peek().unwrap().unwrap().value, 2);
    }

    #[rstest]
    fn test_rejection_propagates_through_every_combinator() {
        let upstream: Stream = Promise::new();
        let derived = tail_p(zip_p(
            |a: i32, b: i32| a * b,
            filter_p(|_: &i32| true, map_p(|value: i32| value, upstream.clone())),
            from_array_p(vec![1, 2, 3]),
        ));
        upstream.reject(String::from("source failed")).unwrap();
        assert_eq!(derived.peek().map(|outcome| outcome.err()), Some(Some(String::from("source failed"))));
    }

    #[rstest]
    fn test_filter_skips_long_rejected_run() {
        let items: Vec<i32> = (0..300_000).collect();
        let last = filter_p(|value: &i32| *value == 299_999, from_array_p::<i32, String>(items));
        assert_eq!(last.peek().unwrap().unwrap().value, 299_999);
    }

    #[rstest]
    fn test_filter_resumes_when_upstream_resolves_later() {
        let upstream: Stream = Promise::new();
        let evens = filter_p(|value: &i32| value % 2 == 0, upstream.clone());

        let second: Stream = Promise::new();
        let next = second.clone();
        upstream
            .resolve(StreamCell { value: 1, rest: Thunk::new(move || next.clone()) })
            .unwrap();
        assert!(evens.is_pending());

        second
            .resolve(StreamCell { value: 2, rest: Thunk::new(Promise::new) })
            .unwrap();
        assert_eq!(evens.peek().unwrap().unwrap().value, 2);
    }

    #[rstest]
    fn test_zip_waits_for_both_sides() {
        let left: Stream = Promise::new();
        let right: Stream = Promise::new();
        let zipped = zip_p(|a: i32, b: i32| a - b, left.clone(), right.clone());

        right.resolve(StreamCell { value: 1, rest: Thunk::new(Promise::new) }).unwrap();
        assert!(zipped.is_pending());
        left.resolve(StreamCell { value: 10, rest: Thunk::new(Promise::new) }).unwrap();
        assert_eq!(zipped.peek().unwrap().unwrap().value, 9);
    }

    #[rstest]
    fn test_tail_skips_first_value() {
        let stream: Stream = from_array_p(vec![1, 2, 3]);
        assert_eq!(take_p(2, tail_p(stream)).peek(), Some(Ok(vec![2, 3])));
    }

    #[rstest]
    fn test_rest_is_not_forced_by_combinators() {
        let forced = Rc::new(Cell::new(0));
        let counter = Rc::clone(&forced);
        let stream: Stream = cons_p(
            1,
            Thunk::new(move || {
                counter.set(counter.get() + 1);
                Promise::new()
            }),
        );
        let _mapped = map_p(|value: i32| value * 3, filter_p(|_: &i32| true, stream));
        assert_eq!(forced.get(), 0);
    }
}
