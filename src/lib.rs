//! Rectangular range queries over geographic points.
//!
//! Cities are indexed in unbalanced binary search trees and queried with one
//! of three strategies: a latitude tree with a longitude filter, a pair of
//! latitude/longitude trees joined by intersection, or a single tree over
//! Z-order keys with an exact filter.
//!
//! ```rust
//! use cityscan::{BoundingBox, City, Config, QueryEngine, StrategyKind};
//!
//! let cities = vec![
//!     City::new("Liège", 50.6326, 5.5797)?,
//!     City::new("Brussels", 50.8503, 4.3517)?,
//!     City::new("Sydney", -33.8688, 151.2093)?,
//! ];
//!
//! let engine = QueryEngine::new(Config::default().with_strategy(StrategyKind::ZOrder));
//! let belgium = BoundingBox::new(49.5, 51.5, 2.5, 6.4);
//! let found = engine.find_cities(&cities, &belgium)?;
//! assert_eq!(found.len(), 2);
//! # Ok::<(), cityscan::Error>(())
//! ```

pub mod compute;
pub mod config;
pub mod error;
pub mod loader;
pub mod query;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use loader::{CityLoader, load_cities, parse_cities};
pub use query::{
    DualAxis, QueryEngine, RangeQuery, SingleAxis, StrategyKind, StrategyReport, ZOrder,
    find_cities,
};
pub use types::{BoundingBox, City, CityList};

pub use compute::tree::OrderedMap;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{
        BoundingBox, City, CityList, Config, Error, QueryEngine, RangeQuery, Result,
        StrategyKind, find_cities,
    };

    pub use crate::compute::tree::{Compare, Natural, OrderedMap, PartialOrder};
}
