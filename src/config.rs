//! Query configuration.
//!
//! Configuration can be built in code with the `with_*` methods or read from
//! JSON (and TOML with the `toml` feature). Unknown fields are rejected and
//! every field has a default, so `{}` is a valid configuration.

use crate::error::{Error, Result};
use crate::query::StrategyKind;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Strategy used by [`QueryEngine::find_cities`](crate::QueryEngine::find_cities)
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Reject query windows with NaN bounds
    #[serde(default = "Config::default_validate")]
    pub validate_bounds: bool,

    /// Reject cities outside [-90, 90] x [-180, 180] in
    /// [`CityLoader::from_config`](crate::CityLoader::from_config). Loader
    /// only: queries never validate the cities they are given.
    #[serde(default = "Config::default_validate")]
    pub validate_cities: bool,
}

impl Config {
    const fn default_validate() -> bool {
        true
    }

    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_validate_bounds(mut self, validate: bool) -> Self {
        self.validate_bounds = validate;
        self
    }

    pub fn with_validate_cities(mut self, validate: bool) -> Self {
        self.validate_cities = validate;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::InvalidInput(e.to_string()))
    }

    /// Read a configuration file, choosing the format from its extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&contents),
            #[cfg(feature = "toml")]
            Some("toml") => Self::from_toml(&contents),
            _ => Err(Error::InvalidInput(format!(
                "Unsupported configuration format: {}",
                path.display()
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            validate_bounds: Self::default_validate(),
            validate_cities: Self::default_validate(),
        }
    }
}
