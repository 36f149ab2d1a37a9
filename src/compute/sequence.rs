//! Sequence primitives shared by the query strategies: linear filtering and
//! list intersection.
//!
//! Both work on slices of `Copy` items (in practice `&City`) and return a new
//! vector holding the same items, never clones of what they point to. Output
//! growth goes through `try_reserve`, so the only failure is allocation.

use crate::error::Result;

/// Keep every item for which `keep` holds, preserving order.
///
/// # Examples
///
/// ```
/// use cityscan::compute::sequence::filter;
///
/// let evens = filter(&[1, 2, 3, 4, 6], |n| n % 2 == 0)?;
/// assert_eq!(evens, vec![2, 4, 6]);
/// # Ok::<(), cityscan::Error>(())
/// ```
pub fn filter<T, F>(items: &[T], mut keep: F) -> Result<Vec<T>>
where
    T: Copy,
    F: FnMut(&T) -> bool,
{
    let mut out = Vec::new();
    for item in items {
        if keep(item) {
            out.try_reserve(1)?;
            out.push(*item);
        }
    }
    Ok(out)
}

/// Items of `a` that match at least one item of `b`, in `a`'s order.
///
/// For each element of `a`, `b` is scanned from its start until `equals`
/// holds; the element of `a` is emitted, never the matching one from `b`.
/// Duplicates in `a` are all emitted. `b` needs no particular order.
/// Runs in O(|a|·|b|).
///
/// # Examples
///
/// ```
/// use cityscan::compute::sequence::intersect;
///
/// let a = [1, 2, 2, 3, 5];
/// let b = [5, 2, 4];
/// assert_eq!(intersect(&a, &b, |x, y| x == y)?, vec![2, 2, 5]);
/// assert!(intersect(&a, &[], |x: &i32, y: &i32| x == y)?.is_empty());
/// # Ok::<(), cityscan::Error>(())
/// ```
pub fn intersect<T, U, F>(a: &[T], b: &[U], mut equals: F) -> Result<Vec<T>>
where
    T: Copy,
    F: FnMut(&T, &U) -> bool,
{
    let mut out = Vec::new();
    if b.is_empty() {
        return Ok(out);
    }

    for x in a {
        if b.iter().any(|y| equals(x, y)) {
            out.try_reserve(1)?;
            out.push(*x);
        }
    }
    Ok(out)
}
