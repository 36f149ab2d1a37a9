//! Compute layer: the data structures and algorithms the query strategies are
//! assembled from.
//!
//! - [`tree`]: ordered multimap backed by an unbalanced binary search tree
//! - [`zorder`]: Morton keys for latitude/longitude pairs
//! - [`sequence`]: linear filter and list intersection
//! - [`validation`]: coordinate and bounding box checks

pub mod sequence;
pub mod tree;
pub mod validation;
pub mod zorder;

pub use sequence::{filter, intersect};
pub use tree::{Compare, Natural, OrderedMap, PartialOrder};
pub use zorder::{ZKey, decode, encode};
