//! Consumers for promise streams.

use std::cell::RefCell;
use std::rc::Rc;

use super::primitive::Promise;
use super::stream::{PromiseStream, fulfil, forward_rejection};

/// Calls `visit` on the first `count` values of `stream` as they resolve.
///
/// The returned promise resolves once `count` values have been visited, or
/// is rejected with the first upstream error. Cells that are already
/// resolved are walked in a loop, and `rest` is never forced beyond the
/// last value requested.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::promise::{fib, for_each_p};
/// use std::cell::RefCell;
/// use std::convert::Infallible;
/// use std::rc::Rc;
///
/// let lines = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&lines);
/// for_each_p(5, fib::<Infallible>(), move |value| sink.borrow_mut().push(value.to_string()));
/// assert_eq!(*lines.borrow(), vec!["0", "1", "1", "2", "3"]);
/// ```
pub fn for_each_p<A, E, F>(count: usize, stream: PromiseStream<A, E>, visit: F) -> Promise<(), E>
where
    A: Clone + 'static,
    E: Clone + 'static,
    F: FnMut(A) + 'static,
{
    let done = Promise::new();
    if count == 0 {
        fulfil(&done, ());
    } else {
        walk(count, stream, visit, done.clone());
    }
    done
}

fn walk<A, E, F>(remaining: usize, source: PromiseStream<A, E>, mut visit: F, done: Promise<(), E>)
where
    A: Clone + 'static,
    E: Clone + 'static,
    F: FnMut(A) + 'static,
{
    let mut remaining = remaining;
    let mut source = source;
    loop {
        match source.peek() {
            Some(Ok(cell)) => {
                visit(cell.value);
                remaining -= 1;
                if remaining == 0 {
                    fulfil(&done, ());
                    return;
                }
                source = cell.rest.force();
            }
            Some(Err(error)) => {
                forward_rejection(&done, error);
                return;
            }
            None => {
                let on_error = done.clone();
                source.then(
                    move |cell| walk(remaining, Promise::resolved(cell), visit, done),
                    move |error| forward_rejection(&on_error, error),
                );
                return;
            }
        }
    }
}

/// Collects the first `count` values of `stream`.
///
/// The returned promise resolves with all `count` values once the last of
/// them has arrived. If `stream` ends by silence before that, the result
/// stays pending.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::promise::{from_array_p, take_p};
///
/// let first_two = take_p(2, from_array_p::<char, ()>(vec!['a', 'b', 'c']));
/// assert_eq!(first_two.peek(), Some(Ok(vec!['a', 'b'])));
///
/// let too_many = take_p(4, from_array_p::<char, ()>(vec!['a', 'b', 'c']));
/// assert!(too_many.is_pending());
/// ```
pub fn take_p<A, E>(count: usize, stream: PromiseStream<A, E>) -> Promise<Vec<A>, E>
where
    A: Clone + 'static,
    E: Clone + 'static,
{
    let values = Rc::new(RefCell::new(Vec::with_capacity(count)));
    let sink = Rc::clone(&values);
    let visited = for_each_p(count, stream, move |value| sink.borrow_mut().push(value));

    let collected = Promise::new();
    let on_done = collected.clone();
    let on_error = collected.clone();
    visited.then(
        move |()| fulfil(&on_done, values.take()),
        move |error| forward_rejection(&on_error, error),
    );
    collected
}
