//! The push/callback stream type.

use std::fmt;
use std::rc::Rc;

/// Callback receiving every value a push stream emits.
pub type OnValue<'a, A> = Box<dyn FnMut(A) + 'a>;

/// Callback invoked once after a push stream has emitted its last value.
pub type OnEnd<'a> = Box<dyn FnOnce() + 'a>;

type RunFunction<A> = dyn for<'a> Fn(OnValue<'a, A>, OnEnd<'a>);

/// A production-driven stream.
///
/// A `PushStream<A>` is a callable with the contract `run(on_value, on_end)`:
/// during a single call, `on_value` is invoked zero or more times in
/// emission order, followed by exactly one call to `on_end`. The whole
/// sequence is produced in that one synchronous burst; there is no way to
/// pause or stop it half way.
///
/// This shape suits sources that are inherently push-based, at the cost of
/// making element-wise combination ([`zip`](super::zip)) need buffering.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::push::from_array;
///
/// let mut seen = Vec::new();
/// let mut ended = false;
/// from_array(vec![1, 2, 3]).run(|value| seen.push(value), || ended = true);
///
/// assert_eq!(seen, vec![1, 2, 3]);
/// assert!(ended);
/// ```
pub struct PushStream<A> {
    run_function: Rc<RunFunction<A>>,
}

impl<A: 'static> PushStream<A> {
    /// Creates a stream from a raw run function.
    ///
    /// The function must call `on_end` exactly once, after its last
    /// `on_value` call.
    pub fn new<F>(run: F) -> Self
    where
        F: for<'a> Fn(OnValue<'a, A>, OnEnd<'a>) + 'static,
    {
        Self {
            run_function: Rc::new(run),
        }
    }

    /// Pushes every value through `on_value`, then calls `on_end`.
    pub fn run<'a, V, E>(&self, on_value: V, on_end: E)
    where
        V: FnMut(A) + 'a,
        E: FnOnce() + 'a,
    {
        (self.run_function)(Box::new(on_value), Box::new(on_end));
    }

    /// Runs the stream and collects everything it emits.
    pub fn to_vec(&self) -> Vec<A> {
        let mut values = Vec::new();
        self.run(|value| values.push(value), || {});
        values
    }
}

impl<A> Clone for PushStream<A> {
    fn clone(&self) -> Self {
        Self {
            run_function: Rc::clone(&self.run_function),
        }
    }
}

impl<A> fmt::Debug for PushStream<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("PushStream(<run>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::RefCell;

    #[rstest]
    fn test_custom_source_delivers_values_then_end() {
        let stream = PushStream::new(|mut on_value, on_end| {
            on_value('x');
            on_value('y');
            on_end();
        });

        let events = RefCell::new(Vec::new());
        stream.run(
            |value| events.borrow_mut().push(value.to_string()),
            || events.borrow_mut().push(String::from("end")),
        );
        assert_eq!(events.into_inner(), vec!["x", "y", "end"]);
    }

    #[rstest]
    fn test_run_is_repeatable() {
        let stream = PushStream::new(|mut on_value, on_end| {
            on_value(1);
            on_end();
        });
        assert_eq!(stream.to_vec(), vec![1]);
        assert_eq!(stream.clone().to_vec(), vec![1]);
    }
}
