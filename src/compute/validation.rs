//! Validation for geographic coordinates and query windows.

use crate::error::{Error, Result};
use crate::types::{BoundingBox, City};

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Validates a latitude/longitude pair.
///
/// Latitude: [-90.0, 90.0], Longitude: [-180.0, 180.0]
///
/// # Examples
///
/// ```
/// use cityscan::compute::validation::validate_coordinates;
///
/// assert!(validate_coordinates(50.6326, 5.5797).is_ok());
/// assert!(validate_coordinates(95.0, 5.0).is_err());
/// assert!(validate_coordinates(50.0, 200.0).is_err());
/// ```
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !latitude.is_finite() {
        return Err(Error::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            latitude
        )));
    }

    if !longitude.is_finite() {
        return Err(Error::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            longitude
        )));
    }

    if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
        return Err(Error::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            latitude
        )));
    }

    if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
        return Err(Error::InvalidInput(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            longitude
        )));
    }

    Ok(())
}

/// Rejects query windows with NaN bounds.
///
/// Bounds outside the geographic domain, infinite ones included, are accepted:
/// they simply extend past every city. Inverted bounds are accepted too and
/// match nothing.
pub fn validate_bounds(bounds: &BoundingBox) -> Result<()> {
    let BoundingBox {
        min_lat,
        max_lat,
        min_lon,
        max_lon,
    } = *bounds;

    if [min_lat, max_lat, min_lon, max_lon].iter().any(|v| v.is_nan()) {
        log::warn!("Rejecting bounding box query with NaN coordinates");
        return Err(Error::InvalidInput(format!(
            "Bounding box must not contain NaN, got: lat [{}, {}], lon [{}, {}]",
            min_lat, max_lat, min_lon, max_lon
        )));
    }

    Ok(())
}

/// Validates every city of a collection.
pub fn validate_cities(cities: &[City]) -> Result<()> {
    for (idx, city) in cities.iter().enumerate() {
        city.validate().map_err(|e| {
            Error::InvalidInput(format!("City '{}' at index {}: {}", city.name, idx, e))
        })?;
    }
    Ok(())
}
