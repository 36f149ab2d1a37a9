//! Independent latitude and longitude trees joined by intersection.

use super::RangeQuery;
use crate::compute::sequence::intersect;
use crate::compute::tree::{OrderedMap, PartialOrder};
use crate::error::Result;
use crate::types::{BoundingBox, City, CityList};

/// Index cities once by latitude and once by longitude, query both bands and
/// keep the latitude-band cities that also appear in the longitude band.
///
/// Two cities are the same when both coordinates are exactly equal, so
/// distinct cities sharing a location match each other. No tolerance is
/// applied. Results follow ascending latitude order.
///
/// The intersection is quadratic in the band sizes; wide windows make this
/// the slowest strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct DualAxis;

impl RangeQuery for DualAxis {
    fn name(&self) -> &'static str {
        "dual_axis"
    }

    fn find_cities<'a>(&self, cities: &'a [City], bounds: &BoundingBox) -> Result<CityList<'a>> {
        let mut by_latitude = OrderedMap::with_comparator(PartialOrder);
        let mut by_longitude = OrderedMap::with_comparator(PartialOrder);
        for city in cities {
            by_latitude.insert(&city.latitude, city)?;
            by_longitude.insert(&city.longitude, city)?;
        }

        let lat_band = by_latitude.range_copied(&&bounds.min_lat, &&bounds.max_lat)?;
        let lon_band = by_longitude.range_copied(&&bounds.min_lon, &&bounds.max_lon)?;
        let found = intersect(&lat_band, &lon_band, |a, b| a.same_location(b))?;

        log::debug!(
            "dual_axis: {} cities, {} in latitude band, {} in longitude band, {} matched",
            cities.len(),
            lat_band.len(),
            lon_band.len(),
            found.len()
        );
        Ok(found)
    }
}
