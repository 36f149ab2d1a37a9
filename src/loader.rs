//! Loading city collections from text and JSON.
//!
//! The text format has one city per line:
//!
//! ```text
//! # name,latitude,longitude
//! Liège,50.6326,5.5797
//! Washington, D.C.,38.9072,-77.0369
//! ```
//!
//! The last two comma-separated fields are the coordinates, so names may
//! themselves contain commas. Blank lines and lines starting with `#` are
//! ignored, and a first line whose coordinate fields are not numbers is taken
//! as a header.
//!
//! JSON input is an array of `{"name", "latitude", "longitude"}` objects.

use crate::compute::validation::{validate_cities, validate_coordinates};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::City;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parser for city files.
#[derive(Debug, Clone, Copy)]
pub struct CityLoader {
    validate: bool,
}

impl Default for CityLoader {
    fn default() -> Self {
        Self { validate: true }
    }
}

impl CityLoader {
    pub fn from_config(config: &Config) -> Self {
        Self {
            validate: config.validate_cities,
        }
    }

    /// Accept any finite coordinates, even outside the geographic domain.
    pub fn without_validation() -> Self {
        Self { validate: false }
    }

    /// Parse the line-oriented text format.
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<Vec<City>> {
        let mut cities = Vec::new();
        let mut seen_record = false;

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let first = !seen_record;
            seen_record = true;

            let mut fields = line.rsplitn(3, ',');
            let (Some(lon), Some(lat), Some(name)) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(Error::Parse {
                    line: line_no,
                    reason: "expected name,latitude,longitude".to_string(),
                });
            };

            let (latitude, longitude) = match (lat.trim().parse::<f64>(), lon.trim().parse::<f64>())
            {
                (Ok(latitude), Ok(longitude)) => (latitude, longitude),
                (Err(_), Err(_)) if first => {
                    log::debug!("Skipping header line: {}", line);
                    continue;
                }
                (Err(e), _) | (_, Err(e)) => {
                    return Err(Error::Parse {
                        line: line_no,
                        reason: format!("invalid coordinate: {}", e),
                    });
                }
            };

            let name = name.trim();
            if name.is_empty() {
                return Err(Error::Parse {
                    line: line_no,
                    reason: "missing city name".to_string(),
                });
            }

            self.check(latitude, longitude)
                .map_err(|e| Error::Parse {
                    line: line_no,
                    reason: e.to_string(),
                })?;

            cities.push(City {
                name: name.to_string(),
                latitude,
                longitude,
            });
        }

        Ok(cities)
    }

    /// Parse a JSON array of cities.
    pub fn parse_json(&self, json: &str) -> Result<Vec<City>> {
        let cities: Vec<City> = serde_json::from_str(json)?;
        if self.validate {
            validate_cities(&cities)?;
        }
        Ok(cities)
    }

    /// Load a file: `.json` files as JSON, anything else as text.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<City>> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let cities = if is_json {
            self.parse_json(&std::fs::read_to_string(path)?)?
        } else {
            self.parse(BufReader::new(File::open(path)?))?
        };

        log::debug!("Loaded {} cities from {}", cities.len(), path.display());
        Ok(cities)
    }

    fn check(&self, latitude: f64, longitude: f64) -> Result<()> {
        if self.validate {
            validate_coordinates(latitude, longitude)
        } else if latitude.is_finite() && longitude.is_finite() {
            Ok(())
        } else {
            Err(Error::InvalidInput("Coordinates must be finite".to_string()))
        }
    }
}

/// Parse text-format cities with coordinate validation.
pub fn parse_cities<R: BufRead>(reader: R) -> Result<Vec<City>> {
    CityLoader::default().parse(reader)
}

/// Load a city file with coordinate validation.
pub fn load_cities(path: impl AsRef<Path>) -> Result<Vec<City>> {
    CityLoader::default().load(path)
}
