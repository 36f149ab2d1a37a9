//! Latitude tree followed by a longitude filter.

use super::RangeQuery;
use crate::compute::sequence::filter;
use crate::compute::tree::{OrderedMap, PartialOrder};
use crate::error::Result;
use crate::types::{BoundingBox, City, CityList};

/// Index cities by latitude, take the latitude band, then drop the cities
/// outside the window.
///
/// The filter checks both axes: the latitude comparator treats NaN as equal
/// to every key, so a NaN-latitude city can land in any band. Results come
/// out in ascending latitude order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleAxis;

impl RangeQuery for SingleAxis {
    fn name(&self) -> &'static str {
        "single_axis"
    }

    fn find_cities<'a>(&self, cities: &'a [City], bounds: &BoundingBox) -> Result<CityList<'a>> {
        let mut by_latitude = OrderedMap::with_comparator(PartialOrder);
        for city in cities {
            by_latitude.insert(&city.latitude, city)?;
        }

        let band = by_latitude.range_copied(&&bounds.min_lat, &&bounds.max_lat)?;
        let found = filter(&band, |city| bounds.contains(city))?;

        log::debug!(
            "single_axis: {} cities, tree height {}, {} in latitude band, {} matched",
            cities.len(),
            by_latitude.height(),
            band.len(),
            found.len()
        );
        Ok(found)
    }
}
