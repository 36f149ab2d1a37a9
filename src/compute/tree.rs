//! Unbalanced binary search tree used as an ordered multimap.
//!
//! Nodes live in an arena (`Vec<Node>`) and refer to each other by index, so
//! the parent link is a plain back-reference with no ownership. The tree never
//! rebalances: its shape is fixed by insertion order, and sorted input produces
//! a chain of depth `n`. Every traversal is iterative for that reason.
//!
//! Ordering comes from a [`Compare`] implementation injected at construction.
//! Keys that compare equal are all kept; a new key equal to an existing one is
//! placed in that node's right subtree, so equal keys come out of a range walk
//! in insertion order.
//!
//! Whether the map owns its keys and values is a matter of type parameters:
//! `OrderedMap<&'a f64, &'a City, _>` borrows from the caller and never drops
//! the referenced data, while `OrderedMap<String, Vec<u8>>` owns and drops its
//! contents together with the nodes.

use crate::error::Result;
use std::cmp::Ordering;
use std::fmt;

/// Three-way comparison over keys.
///
/// Implementations must describe a total order; otherwise tree shape and
/// search results are unspecified (but never unsafe).
pub trait Compare<K: ?Sized> {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

impl<K: ?Sized, F> Compare<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

/// Natural order of `K: Ord`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Natural;

impl<K: Ord + ?Sized> Compare<K> for Natural {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Order of `K: PartialOrd`, with incomparable pairs treated as equal.
///
/// Suitable for coordinates: `-0.0` and `0.0` compare equal, matching the
/// closed-interval checks done with `<=` elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialOrder;

impl<K: PartialOrd + ?Sized> Compare<K> for PartialOrder {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.partial_cmp(b).unwrap_or(Ordering::Equal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

struct Node<K, V> {
    key: K,
    value: V,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Ordered multimap backed by an unbalanced binary search tree.
///
/// # Examples
///
/// ```
/// use cityscan::compute::tree::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert(30, "c")?;
/// map.insert(10, "a")?;
/// map.insert(20, "b")?;
/// map.insert(40, "d")?;
///
/// assert_eq!(map.len(), 4);
/// assert_eq!(map.search(&20), Some(&"b"));
/// assert_eq!(map.range(&15, &30)?, vec![&"b", &"c"]);
/// # Ok::<(), cityscan::Error>(())
/// ```
pub struct OrderedMap<K, V, C = Natural> {
    nodes: Vec<Node<K, V>>,
    root: Option<NodeId>,
    height: usize,
    cmp: C,
}

impl<K: Ord, V> OrderedMap<K, V, Natural> {
    /// Create an empty map ordered by the natural order of `K`.
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K: Ord, V> Default for OrderedMap<K, V, Natural> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Compare<K>> OrderedMap<K, V, C> {
    /// Create an empty map ordered by `cmp`.
    ///
    /// ```
    /// use cityscan::compute::tree::OrderedMap;
    ///
    /// let mut map = OrderedMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// map.insert(1, ())?;
    /// map.insert(2, ())?;
    /// assert_eq!(map.first().map(|(k, _)| *k), Some(2));
    /// # Ok::<(), cityscan::Error>(())
    /// ```
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            height: 0,
            cmp,
        }
    }

    /// Number of entries. O(1).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Insert `key` → `value`. Keys equal to an existing key go to its right.
    ///
    /// Fails only when the node arena cannot grow; the map is left untouched
    /// in that case.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        self.nodes.try_reserve(1)?;

        let mut parent = None;
        let mut goes_left = false;
        let mut depth = 1;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = self.node(id);
            goes_left = self.cmp.compare(&key, &node.key) == Ordering::Less;
            parent = Some(id);
            cursor = if goes_left { node.left } else { node.right };
            depth += 1;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            key,
            value,
            parent,
            left: None,
            right: None,
        });

        match parent {
            None => self.root = Some(id),
            Some(p) if goes_left => self.nodes[p.0].left = Some(id),
            Some(p) => self.nodes[p.0].right = Some(id),
        }
        self.height = self.height.max(depth);

        Ok(())
    }

    /// Look up `key` along its unique descent path.
    ///
    /// With duplicate keys this returns the first equal node met while
    /// descending, which is the earliest inserted of that path.
    pub fn search(&self, key: &K) -> Option<&V> {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = self.node(id);
            match self.cmp.compare(key, &node.key) {
                Ordering::Equal => return Some(&node.value),
                Ordering::Less => cursor = node.left,
                Ordering::Greater => cursor = node.right,
            }
        }
        None
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Visit every entry with `min <= key <= max` in ascending key order.
    ///
    /// Subtrees that cannot hold a key of the interval are skipped: the left
    /// subtree of a node whose key is `<= min`, and the right subtree of a
    /// node whose key is `> max`. A node equal to `max` still has its right
    /// subtree walked, since later duplicates of `max` live there.
    ///
    /// Stops at the first error returned by `visit` or raised while growing
    /// the traversal stack.
    pub fn for_each_in_range<'m, F>(&'m self, min: &K, max: &K, mut visit: F) -> Result<()>
    where
        F: FnMut(&'m K, &'m V) -> Result<()>,
    {
        let mut stack: Vec<NodeId> = Vec::new();
        let mut cursor = self.root;

        loop {
            while let Some(id) = cursor {
                stack.try_reserve(1)?;
                stack.push(id);
                let node = self.node(id);
                cursor = if self.cmp.compare(&node.key, min) == Ordering::Greater {
                    node.left
                } else {
                    None
                };
            }

            let Some(id) = stack.pop() else {
                return Ok(());
            };
            let node = self.node(id);
            let above_min = self.cmp.compare(&node.key, min) != Ordering::Less;
            let below_max = self.cmp.compare(&node.key, max) != Ordering::Greater;

            if above_min && below_max {
                visit(&node.key, &node.value)?;
            }
            cursor = if below_max { node.right } else { None };
        }
    }

    /// Values whose keys lie in the closed interval `[min, max]`, ascending.
    ///
    /// An empty map or an inverted interval yields an empty vector.
    pub fn range(&self, min: &K, max: &K) -> Result<Vec<&V>> {
        let mut out = Vec::new();
        self.for_each_in_range(min, max, |_, value| {
            out.try_reserve(1)?;
            out.push(value);
            Ok(())
        })?;
        Ok(out)
    }

    /// Like [`range`](Self::range) but copies the values out, which is the
    /// natural form when the values are themselves references.
    pub fn range_copied(&self, min: &K, max: &K) -> Result<Vec<V>>
    where
        V: Copy,
    {
        let mut out = Vec::new();
        self.for_each_in_range(min, max, |_, value| {
            out.try_reserve(1)?;
            out.push(*value);
            Ok(())
        })?;
        Ok(out)
    }

    /// Smallest entry.
    pub fn first(&self) -> Option<(&K, &V)> {
        let id = self.leftmost(self.root?);
        let node = self.node(id);
        Some((&node.key, &node.value))
    }

    /// Largest entry; the last inserted one among equal maxima.
    pub fn last(&self) -> Option<(&K, &V)> {
        let mut id = self.root?;
        while let Some(right) = self.node(id).right {
            id = right;
        }
        let node = self.node(id);
        Some((&node.key, &node.value))
    }

    /// In-order iterator over all entries.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            next: self.root.map(|root| self.leftmost(root)),
            remaining: self.nodes.len(),
        }
    }

    /// Drop every node and, with them, any owned keys and values.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.height = 0;
    }

    fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.0]
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C: Compare<K>> fmt::Debug for OrderedMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// In-order iterator driven by parent links; needs no auxiliary stack.
pub struct Iter<'a, K, V> {
    nodes: &'a [Node<K, V>],
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn successor(&self, id: NodeId) -> Option<NodeId> {
        let node = &self.nodes[id.0];
        if let Some(mut next) = node.right {
            while let Some(left) = self.nodes[next.0].left {
                next = left;
            }
            return Some(next);
        }

        let mut child = id;
        let mut parent = node.parent;
        while let Some(p) = parent {
            if self.nodes[p.0].left == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.nodes[p.0].parent;
        }
        None
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.successor(id);
        self.remaining -= 1;
        let node = &self.nodes[id.0];
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V, C: Compare<K>> IntoIterator for &'a OrderedMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
