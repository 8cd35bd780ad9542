//! Sources and transformations for push/callback streams.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use log::debug;

use super::stream::{OnEnd, PushStream};

/// Creates a stream that pushes every item of `items` in order, then ends.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::push::from_array;
///
/// assert_eq!(from_array(vec!["a", "b"]).to_vec(), vec!["a", "b"]);
/// ```
pub fn from_array<A>(items: impl Into<Rc<[A]>>) -> PushStream<A>
where
    A: Clone + 'static,
{
    let items: Rc<[A]> = items.into();
    PushStream::new(move |mut on_value, on_end| {
        for item in items.iter() {
            on_value(item.clone());
        }
        on_end();
    })
}

/// Applies `function` to every value pushed by `stream`.
pub fn map<A, B, F>(function: F, stream: PushStream<A>) -> PushStream<B>
where
    A: 'static,
    B: 'static,
    F: Fn(A) -> B + 'static,
{
    PushStream::new(move |mut on_value, on_end| {
        stream.run(|value| on_value(function(value)), on_end);
    })
}

/// Forwards only the values of `stream` that satisfy `predicate`.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::push::{filter, from_array};
///
/// let evens = filter(|value: &i32| value % 2 == 0, from_array(vec![1, 2, 3, 4, 5]));
/// assert_eq!(evens.to_vec(), vec![2, 4]);
/// ```
pub fn filter<A, P>(predicate: P, stream: PushStream<A>) -> PushStream<A>
where
    A: 'static,
    P: Fn(&A) -> bool + 'static,
{
    PushStream::new(move |mut on_value, on_end| {
        stream.run(
            |value| {
                if predicate(&value) {
                    on_value(value);
                }
            },
            on_end,
        );
    })
}

/// Counts down end signals and fires the wrapped handler on the last one.
struct Latch<'a> {
    permits: Cell<u8>,
    on_open: Cell<Option<OnEnd<'a>>>,
}

impl<'a> Latch<'a> {
    fn new(permits: u8, on_open: OnEnd<'a>) -> Self {
        Self {
            permits: Cell::new(permits),
            on_open: Cell::new(Some(on_open)),
        }
    }

    fn release(&self) {
        let remaining = self.permits.get().saturating_sub(1);
        self.permits.set(remaining);
        if remaining == 0
            && let Some(on_open) = self.on_open.take()
        {
            on_open();
        }
    }
}

/// Combines `left` and `right` element-wise with `function`.
///
/// Both inputs push on their own schedule, so each side keeps a buffer of
/// values still waiting for a partner. A value arriving from one side pairs
/// with the oldest buffered value of the other side, or is buffered itself.
/// The k-th emitted value therefore always combines the k-th element of
/// each input, whatever the interleaving.
///
/// The end handler fires once, after both inputs have ended. Values left
/// unpaired at that point are dropped, not reported as errors; the number
/// dropped is logged at debug level.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::push::{from_array, zip};
///
/// let sums = zip(
///     |a: i32, b: i32| a + b,
///     from_array(vec![1, 2, 3]),
///     from_array(vec![10, 20, 30, 40]),
/// );
/// assert_eq!(sums.to_vec(), vec![11, 22, 33]);
/// ```
pub fn zip<A, B, C, F>(function: F, left: PushStream<A>, right: PushStream<B>) -> PushStream<C>
where
    A: 'static,
    B: 'static,
    C: 'static,
    F: Fn(A, B) -> C + 'static,
{
    PushStream::new(move |on_value, on_end| {
        let emit = RefCell::new(on_value);
        let left_buffer: RefCell<VecDeque<A>> = RefCell::new(VecDeque::new());
        let right_buffer: RefCell<VecDeque<B>> = RefCell::new(VecDeque::new());
        let latch = Latch::new(
            2,
            Box::new(|| {
                let unmatched = left_buffer.borrow().len() + right_buffer.borrow().len();
                if unmatched > 0 {
                    debug!("zip dropped {unmatched} unmatched value(s) at end of input");
                }
                on_end();
            }),
        );

        left.run(
            |value| {
                let partner = right_buffer.borrow_mut().pop_front();
                match partner {
                    Some(partner) => (*emit.borrow_mut())(function(value, partner)),
                    None => left_buffer.borrow_mut().push_back(value),
                }
            },
            || latch.release(),
        );
        right.run(
            |value| {
                let partner = left_buffer.borrow_mut().pop_front();
                match partner {
                    Some(partner) => (*emit.borrow_mut())(function(partner, value)),
                    None => right_buffer.borrow_mut().push_back(value),
                }
            },
            || latch.release(),
        );
    })
}

/// Lifts a binary operator to operate on corresponding stream elements.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::push::{from_array, lift};
///
/// let concat = lift(|a: &str, b: &str| format!("{a}{b}"));
/// let words = concat(from_array(vec!["foo", "bar"]), from_array(vec!["1", "2"]));
/// assert_eq!(words.to_vec(), vec!["foo1", "bar2"]);
/// ```
pub fn lift<A, B, C, F>(operator: F) -> impl Fn(PushStream<A>, PushStream<B>) -> PushStream<C>
where
    A: 'static,
    B: 'static,
    C: 'static,
    F: Fn(A, B) -> C + 'static,
{
    let operator = Rc::new(operator);
    move |left, right| {
        let operator = Rc::clone(&operator);
        zip(move |a, b| (*operator)(a, b), left, right)
    }
}
