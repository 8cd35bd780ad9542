//! Sources and transformations for continuation-pull streams.

use std::cell::Cell;
use std::rc::Rc;

use super::stream::{OnEnd, PullStream};

/// Creates a finite stream over `items`.
///
/// Each step looks up one index; the stream ends when the index reaches
/// the length of `items`.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::pull::from_array_s;
///
/// assert_eq!(from_array_s(vec![1, 2, 3]).to_vec(), vec![1, 2, 3]);
/// assert!(from_array_s(Vec::<i32>::new()).to_vec().is_empty());
/// ```
pub fn from_array_s<A>(items: impl Into<Rc<[A]>>) -> PullStream<A>
where
    A: Clone + 'static,
{
    from_index(items.into(), 0)
}

fn from_index<A>(items: Rc<[A]>, index: usize) -> PullStream<A>
where
    A: Clone + 'static,
{
    PullStream::new(move |on_value, on_end| match items.get(index) {
        Some(value) => on_value(value.clone(), from_index(Rc::clone(&items), index + 1)),
        None => on_end(),
    })
}

/// Applies `function` to every value of `stream`.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::pull::{from_array_s, map_s};
///
/// let doubled = map_s(|value: i32| value * 2, from_array_s(vec![1, 2, 3]));
/// assert_eq!(doubled.to_vec(), vec![2, 4, 6]);
/// ```
pub fn map_s<A, B, F>(function: F, stream: PullStream<A>) -> PullStream<B>
where
    A: 'static,
    B: 'static,
    F: Fn(A) -> B + 'static,
{
    map_shared(Rc::new(function), stream)
}

fn map_shared<A, B, F>(function: Rc<F>, stream: PullStream<A>) -> PullStream<B>
where
    A: 'static,
    B: 'static,
    F: Fn(A) -> B + 'static,
{
    PullStream::new(move |on_value, on_end| {
        let function = Rc::clone(&function);
        stream.step(
            move |value, rest| on_value((*function)(value), map_shared(function, rest)),
            on_end,
        );
    })
}

/// Keeps the values of `stream` that satisfy `predicate`.
///
/// Rejected values are skipped by a loop rather than by nesting handler
/// calls, so any number of consecutive rejections uses constant stack.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::pull::{filter_s, from_array_s};
///
/// let evens = filter_s(|value: &i32| value % 2 == 0, from_array_s(vec![1, 2, 3, 4, 5]));
/// assert_eq!(evens.to_vec(), vec![2, 4]);
/// ```
pub fn filter_s<A, P>(predicate: P, stream: PullStream<A>) -> PullStream<A>
where
    A: 'static,
    P: Fn(&A) -> bool + 'static,
{
    filter_shared(Rc::new(predicate), stream)
}

fn filter_shared<A, P>(predicate: Rc<P>, stream: PullStream<A>) -> PullStream<A>
where
    A: 'static,
    P: Fn(&A) -> bool + 'static,
{
    PullStream::new(move |on_value, on_end| {
        let mut current = stream.clone();
        loop {
            match current.uncons() {
                Some((value, rest)) if (*predicate)(&value) => {
                    return on_value(value, filter_shared(Rc::clone(&predicate), rest));
                }
                Some((_, rest)) => current = rest,
                None => return on_end(),
            }
        }
    })
}

/// Combines `left` and `right` element-wise with `function`.
///
/// Each step pulls one value from `left`, then one from `right`. The
/// result ends as soon as either input ends; nothing is buffered.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::pull::{from_array_s, zip_s};
///
/// let sums = zip_s(
///     |a: i32, b: i32| a + b,
///     from_array_s(vec![1, 2]),
///     from_array_s(vec![10, 20, 30, 40, 50]),
/// );
/// assert_eq!(sums.to_vec(), vec![11, 22]);
/// ```
pub fn zip_s<A, B, C, F>(function: F, left: PullStream<A>, right: PullStream<B>) -> PullStream<C>
where
    A: 'static,
    B: 'static,
    C: 'static,
    F: Fn(A, B) -> C + 'static,
{
    zip_shared(Rc::new(function), left, right)
}

fn zip_shared<A, B, C, F>(function: Rc<F>, left: PullStream<A>, right: PullStream<B>) -> PullStream<C>
where
    A: 'static,
    B: 'static,
    C: 'static,
    F: Fn(A, B) -> C + 'static,
{
    PullStream::new(move |on_value, on_end| {
        let (left_ended, right_ended) = share_end(on_end);
        let function = Rc::clone(&function);
        let right = right.clone();
        left.step(
            move |left_value, left_rest| {
                right.step(
                    move |right_value, right_rest| {
                        on_value(
                            (*function)(left_value, right_value),
                            zip_shared(function, left_rest, right_rest),
                        );
                    },
                    right_ended,
                );
            },
            left_ended,
        );
    })
}

/// Splits one end handler into two, of which only the first called runs.
fn share_end(on_end: OnEnd<'_>) -> (OnEnd<'_>, OnEnd<'_>) {
    let slot = Rc::new(Cell::new(Some(on_end)));
    let other = Rc::clone(&slot);
    (
        Box::new(move || {
            if let Some(end) = slot.take() {
                end();
            }
        }),
        Box::new(move || {
            if let Some(end) = other.take() {
                end();
            }
        }),
    )
}

/// Lifts a binary operator to operate on corresponding stream elements.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::pull::{from_array_s, lift_s};
///
/// let multiply = lift_s(|a: i32, b: i32| a * b);
/// let products = multiply(from_array_s(vec![1, 2, 3]), from_array_s(vec![4, 5, 6]));
/// assert_eq!(products.to_vec(), vec![4, 10, 18]);
/// ```
pub fn lift_s<A, B, C, F>(operator: F) -> impl Fn(PullStream<A>, PullStream<B>) -> PullStream<C>
where
    A: 'static,
    B: 'static,
    C: 'static,
    F: Fn(A, B) -> C + 'static,
{
    let operator = Rc::new(operator);
    move |left, right| zip_shared(Rc::clone(&operator), left, right)
}
