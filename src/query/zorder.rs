//! Single tree over Morton keys followed by an exact rectangle filter.

use super::RangeQuery;
use crate::compute::sequence::filter;
use crate::compute::tree::OrderedMap;
use crate::compute::zorder::{ZKey, encode};
use crate::error::Result;
use crate::types::{BoundingBox, City, CityList};

/// Index cities by Z-order key and query the key interval spanned by the
/// window's lower-left and upper-right corners.
///
/// The key interval covers the whole window but also stretches of the curve
/// outside it, so every candidate is checked against both axes. Results come
/// out in ascending key order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZOrder;

impl RangeQuery for ZOrder {
    fn name(&self) -> &'static str {
        "z_order"
    }

    fn find_cities<'a>(&self, cities: &'a [City], bounds: &BoundingBox) -> Result<CityList<'a>> {
        // The tree borrows its keys, so the buffer must outlive it
        let mut keys: Vec<ZKey> = Vec::new();
        keys.try_reserve_exact(cities.len())?;
        keys.extend(cities.iter().map(|c| encode(c.latitude, c.longitude)));

        let mut by_key = OrderedMap::new();
        for (key, city) in keys.iter().zip(cities) {
            by_key.insert(key, city)?;
        }

        let low = encode(bounds.min_lat, bounds.min_lon);
        let high = encode(bounds.max_lat, bounds.max_lon);
        let candidates = by_key.range_copied(&&low, &&high)?;
        let found = filter(&candidates, |city| bounds.contains(city))?;

        log::debug!(
            "z_order: {} cities, key range [{:#018x}, {:#018x}], {} candidates, {} matched",
            cities.len(),
            low,
            high,
            candidates.len(),
            found.len()
        );
        Ok(found)
    }
}
