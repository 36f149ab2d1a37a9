//! Rectangular range queries over a city collection.
//!
//! Three interchangeable strategies answer the same question, "which cities
//! fall inside this latitude/longitude window", by composing the ordered map
//! with a filter or an intersection:
//!
//! | Strategy      | Trees              | Narrowing                          |
//! |---------------|--------------------|------------------------------------|
//! | `single_axis` | latitude           | latitude and longitude filter      |
//! | `dual_axis`   | latitude+longitude | intersection of the two bands      |
//! | `z_order`     | Morton key         | latitude and longitude filter      |
//!
//! Every call builds its trees from scratch and drops them before returning,
//! on success and on error alike. All strategies return the same set of
//! cities for the same input; only the order differs.
//!
//! ```
//! use cityscan::{BoundingBox, City, StrategyKind};
//!
//! let cities = vec![
//!     City::new("a", 10.0, 20.0)?,
//!     City::new("b", 50.0, 50.0)?,
//!     City::new("c", -5.0, 100.0)?,
//! ];
//! let window = BoundingBox::new(0.0, 60.0, 0.0, 60.0);
//!
//! for kind in StrategyKind::ALL {
//!     let found = kind.find_cities(&cities, &window)?;
//!     assert_eq!(found.len(), 2);
//! }
//! # Ok::<(), cityscan::Error>(())
//! ```

pub mod dual_axis;
pub mod single_axis;
pub mod zorder;

pub use dual_axis::DualAxis;
pub use single_axis::SingleAxis;
pub use zorder::ZOrder;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{BoundingBox, City, CityList};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// A way of answering a rectangular window query.
pub trait RangeQuery {
    /// Stable identifier, matching the serialized [`StrategyKind`].
    fn name(&self) -> &'static str;

    /// References to every city inside `bounds` (closed on all sides).
    ///
    /// Fails only when memory for a tree or a result sequence cannot be
    /// reserved; nothing built during the call outlives it.
    fn find_cities<'a>(&self, cities: &'a [City], bounds: &BoundingBox) -> Result<CityList<'a>>;
}

/// Strategy selector, usable from configuration files and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    SingleAxis,
    DualAxis,
    ZOrder,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::SingleAxis,
        StrategyKind::DualAxis,
        StrategyKind::ZOrder,
    ];

    pub fn strategy(self) -> &'static dyn RangeQuery {
        match self {
            StrategyKind::SingleAxis => &SingleAxis,
            StrategyKind::DualAxis => &DualAxis,
            StrategyKind::ZOrder => &ZOrder,
        }
    }

    pub fn name(self) -> &'static str {
        self.strategy().name()
    }

    pub fn find_cities<'a>(self, cities: &'a [City], bounds: &BoundingBox) -> Result<CityList<'a>> {
        self.strategy().find_cities(cities, bounds)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "Unknown strategy '{}', expected one of: single_axis, dual_axis, z_order",
                    s
                ))
            })
    }
}

/// Outcome of running one strategy during [`QueryEngine::compare_strategies`].
#[derive(Debug, Clone)]
pub struct StrategyReport<'a> {
    pub kind: StrategyKind,
    pub cities: CityList<'a>,
    pub elapsed: Duration,
}

/// Configured front door to the strategies.
///
/// Applies the bounds check requested by [`Config`] before dispatching to the
/// configured strategy.
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    config: Config,
}

impl QueryEngine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn strategy(&self) -> StrategyKind {
        self.config.strategy
    }

    pub fn find_cities<'a>(&self, cities: &'a [City], bounds: &BoundingBox) -> Result<CityList<'a>> {
        self.check_bounds(bounds)?;
        self.config.strategy.find_cities(cities, bounds)
    }

    /// Run every strategy on the same input and time each one.
    ///
    /// Returns an error if any two strategies disagree on the set of cities
    /// found, which would indicate a broken index.
    pub fn compare_strategies<'a>(
        &self,
        cities: &'a [City],
        bounds: &BoundingBox,
    ) -> Result<Vec<StrategyReport<'a>>> {
        self.check_bounds(bounds)?;

        let mut reports = Vec::with_capacity(StrategyKind::ALL.len());
        for kind in StrategyKind::ALL {
            let start = Instant::now();
            let found = kind.find_cities(cities, bounds)?;
            let elapsed = start.elapsed();
            log::info!("{}: {} cities in {:?}", kind, found.len(), elapsed);
            reports.push(StrategyReport {
                kind,
                cities: found,
                elapsed,
            });
        }

        if let Some((first, rest)) = reports.split_first() {
            let expected = identity_set(&first.cities);
            for report in rest {
                if identity_set(&report.cities) != expected {
                    return Err(Error::InvalidInput(format!(
                        "Strategies {} and {} returned different cities ({} vs {})",
                        first.kind,
                        report.kind,
                        first.cities.len(),
                        report.cities.len()
                    )));
                }
            }
        }

        Ok(reports)
    }

    fn check_bounds(&self, bounds: &BoundingBox) -> Result<()> {
        if self.config.validate_bounds {
            bounds.validate()?;
        }
        Ok(())
    }
}

/// Query `cities` with the default configuration.
pub fn find_cities<'a>(cities: &'a [City], bounds: &BoundingBox) -> Result<CityList<'a>> {
    QueryEngine::default().find_cities(cities, bounds)
}

/// Addresses of the referenced cities, sorted, for order-insensitive
/// comparison of result lists.
pub fn identity_set(cities: &[&City]) -> Vec<*const City> {
    let mut ids: Vec<*const City> = cities.iter().map(|c| *c as *const City).collect();
    ids.sort_unstable();
    ids
}
