//! Streams defined on top of the promise-stream combinators.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::control::Thunk;

use super::stream::{PromiseStream, cons_p, map_p, tail_p, zip_p};

/// The Fibonacci numbers: `0, 1, zip(+, fib, tail(fib))`.
///
/// The definition refers to itself twice; it terminates because each
/// reference sits behind a `rest` thunk that is only forced on demand.
/// Nothing is shared between the references, so the cost of the n-th value
/// grows exponentially with n.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::promise::{fib, take_p};
/// use std::convert::Infallible;
///
/// assert_eq!(take_p(7, fib::<Infallible>()).peek(), Some(Ok(vec![0, 1, 1, 2, 3, 5, 8])));
/// ```
pub fn fib<E>() -> PromiseStream<u64, E>
where
    E: Clone + 'static,
{
    cons_p(
        0,
        Thunk::new(|| {
            cons_p(
                1,
                Thunk::new(|| zip_p(|a: u64, b: u64| a + b, fib::<E>(), tail_p(fib::<E>()))),
            )
        }),
    )
}

/// Narrows every record of `stream` to the entries named by `keys`.
///
/// Keys missing from a record are left out of its projection.
///
/// # Examples
///
/// ```rust
/// use lazy_streams::promise::{from_array_p, project, take_p};
/// use std::collections::BTreeMap;
///
/// let click = BTreeMap::from([("x", 10), ("y", 20), ("button", 1)]);
/// let positions = project(from_array_p::<_, ()>(vec![click]), ["x", "y"]);
///
/// let expected = BTreeMap::from([("x", 10), ("y", 20)]);
/// assert_eq!(take_p(1, positions).peek(), Some(Ok(vec![expected])));
/// ```
pub fn project<K, V, E>(
    stream: PromiseStream<BTreeMap<K, V>, E>,
    keys: impl IntoIterator<Item = K>,
) -> PromiseStream<BTreeMap<K, V>, E>
where
    K: Ord + Clone + 'static,
    V: Clone + 'static,
    E: Clone + 'static,
{
    let keys: Rc<[K]> = keys.into_iter().collect();
    map_p(
        move |mut record: BTreeMap<K, V>| {
            keys.iter()
                .filter_map(|key| record.remove_entry(key))
                .collect::<BTreeMap<K, V>>()
        },
        stream,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promise::{from_array_p, take_p};
    use rstest::rstest;
    use std::convert::Infallible;

    #[rstest]
    #[case(1, vec![0])]
    #[case(2, vec![0, 1])]
    #[case(10, vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34])]
    fn test_fib_prefixes(#[case] count: usize, #[case] expected: Vec<u64>) {
        assert_eq!(take_p(count, fib::<Infallible>()).peek(), Some(Ok(expected)));
    }

    #[rstest]
    fn test_project_omits_missing_keys() {
        let records = vec![
            BTreeMap::from([("name", "ada"), ("role", "admin")]),
            BTreeMap::from([("role", "guest")]),
        ];
        let names = project(from_array_p::<_, ()>(records), ["name"]);
        assert_eq!(
            take_p(2, names).peek(),
            Some(Ok(vec![BTreeMap::from([("name", "ada")]), BTreeMap::new()]))
        );
    }

    #[rstest]
    fn test_project_with_no_keys_yields_empty_records() {
        let records = vec![BTreeMap::from([(1, 'a')])];
        let projected = project(from_array_p::<_, ()>(records), Vec::<i32>::new());
        assert_eq!(take_p(1, projected).peek(), Some(Ok(vec![BTreeMap::new()])));
    }
}
