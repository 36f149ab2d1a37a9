//! Core record types: cities and the rectangular query window.

use crate::compute::validation::{validate_bounds, validate_coordinates};
use crate::error::Result;
use geo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A named geographic location.
///
/// Queries never copy or mutate a `City`; they only hand back references into
/// the caller's collection.
///
/// # Examples
///
/// ```
/// use cityscan::City;
///
/// let liege = City::new("Liège", 50.6326, 5.5797)?;
/// assert_eq!(liege.latitude(), 50.6326);
/// assert_eq!(liege.point().x(), 5.5797);
/// # Ok::<(), cityscan::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct City {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A sequence of city references produced by a query.
pub type CityList<'a> = Vec<&'a City>;

impl City {
    /// Create a city, rejecting coordinates outside the geographic domain.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self> {
        validate_coordinates(latitude, longitude)?;
        Ok(Self {
            name: name.into(),
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Location as a `geo::Point` (x = longitude, y = latitude).
    pub fn point(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }

    /// Structural identity: both coordinates compare exactly equal.
    ///
    /// Names are ignored. This is the equality used to intersect the
    /// latitude and longitude candidate lists.
    pub fn same_location(&self, other: &City) -> bool {
        self.latitude == other.latitude && self.longitude == other.longitude
    }

    pub fn validate(&self) -> Result<()> {
        validate_coordinates(self.latitude, self.longitude)
    }
}

/// Closed latitude/longitude rectangle.
///
/// Bounds are stored exactly as given. Unlike `geo::Rect`, an inverted box
/// (`min > max` on either axis) is kept as is and contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Create a box from latitude bounds followed by longitude bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use cityscan::BoundingBox;
    ///
    /// let benelux = BoundingBox::new(49.4, 53.6, 2.5, 7.2);
    /// assert!(benelux.contains_point(50.85, 4.35));
    /// assert!(!benelux.contains_point(48.85, 2.35));
    /// ```
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Build from a `geo::Rect` (x = longitude, y = latitude).
    pub fn from_rect(rect: &Rect) -> Self {
        Self::new(rect.min().y, rect.max().y, rect.min().x, rect.max().x)
    }

    /// Convert to a `geo::Rect`. `geo` normalizes the corners, so an inverted
    /// box does not survive the conversion.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            geo::coord! { x: self.min_lon, y: self.min_lat },
            geo::coord! { x: self.max_lon, y: self.max_lat },
        )
    }

    pub fn is_empty(&self) -> bool {
        !(self.min_lat <= self.max_lat && self.min_lon <= self.max_lon)
    }

    pub fn contains_latitude(&self, latitude: f64) -> bool {
        self.min_lat <= latitude && latitude <= self.max_lat
    }

    pub fn contains_longitude(&self, longitude: f64) -> bool {
        self.min_lon <= longitude && longitude <= self.max_lon
    }

    pub fn contains_point(&self, latitude: f64, longitude: f64) -> bool {
        self.contains_latitude(latitude) && self.contains_longitude(longitude)
    }

    pub fn contains(&self, city: &City) -> bool {
        self.contains_point(city.latitude, city.longitude)
    }

    /// Reject bounds that are NaN.
    pub fn validate(&self) -> Result<()> {
        validate_bounds(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_rejects_out_of_range() {
        assert!(City::new("north of the pole", 90.5, 0.0).is_err());
        assert!(City::new("past the date line", 0.0, -180.5).is_err());
        assert!(City::new("nowhere", f64::NAN, 0.0).is_err());
        assert!(City::new("pole", 90.0, 180.0).is_ok());
    }

    #[test]
    fn test_same_location_ignores_name() {
        let a = City::new("a", 10.0, 20.0).unwrap();
        let b = City::new("b", 10.0, 20.0).unwrap();
        let c = City::new("c", 10.0, 20.000001).unwrap();
        assert!(a.same_location(&b));
        assert!(!a.same_location(&c));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let bbox = BoundingBox::new(0.0, 60.0, 0.0, 60.0);
        assert!(bbox.contains_point(0.0, 60.0));
        assert!(bbox.contains_point(60.0, 0.0));
        assert!(!bbox.contains_point(60.0000001, 0.0));
    }

    #[test]
    fn test_inverted_box_is_empty() {
        let bbox = BoundingBox::new(60.0, 0.0, 0.0, 60.0);
        assert!(bbox.is_empty());
        assert!(!bbox.contains_point(30.0, 30.0));
    }

    #[test]
    fn test_rect_conversion() {
        let bbox = BoundingBox::new(40.68, 40.88, -74.05, -73.91);
        let rect = bbox.to_rect();
        assert_eq!(rect.min().x, -74.05);
        assert_eq!(rect.max().y, 40.88);
        assert_eq!(BoundingBox::from_rect(&rect), bbox);
    }
}
