//! Engine configuration.
//!
//! Runtime knobs are collected in [`SimConfig`], loadable from a TOML file
//! (the embedding app decides where that file lives). A missing file falls
//! back to defaults; a malformed file is a typed error, never a panic.

use std::fmt;
use std::path::Path;

use log::{debug, warn};
use serde::Deserialize;

/// Ambient temperature for freshly constructed dots, in kelvin.
pub const DEFAULT_TEMP: f32 = 300.0;

/// Simulation tuning knobs.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SimConfig {
  /// Initial map size as `[width, height]`.
  pub map_size: [u32; 2],
  /// Master switch for the heat exchange pass.
  pub temp_exchange: bool,
  /// Seed for the simulation PRNG.
  pub seed: u64,
  /// Probability per tick that a blocked liquid swaps with a liquid neighbor.
  pub liquid_diffusion: f32,
  /// Probability per tick that a blocked gas swaps with a gas neighbor.
  pub gas_diffusion: f32,
  /// Kelvin lost per tick by water vapor sitting on the topmost row.
  pub steam_top_cooling: f32,
}

impl Default for SimConfig {
  fn default() -> Self {
    Self {
      map_size: [100, 100],
      temp_exchange: true,
      seed: 0x5EED,
      liquid_diffusion: 0.01,
      gas_diffusion: 0.01,
      steam_top_cooling: 5.0,
    }
  }
}

impl SimConfig {
  /// Parses a config from TOML text.
  pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
    let config: Self = toml::from_str(text).map_err(ConfigError::Parse)?;
    config.validate()
  }

  /// Loads a config file, or returns defaults when the file is absent.
  pub fn load_or_default(path: impl AsRef<Path>) -> Self {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
      Ok(text) => match Self::from_toml(&text) {
        Ok(config) => {
          debug!("loaded config from {}", path.display());
          config
        }
        Err(e) => {
          warn!("failed to parse {}: {e}, using defaults", path.display());
          Self::default()
        }
      },
      Err(_) => Self::default(),
    }
  }

  fn validate(self) -> Result<Self, ConfigError> {
    if self.map_size[0] == 0 || self.map_size[1] == 0 {
      return Err(ConfigError::Invalid("map_size dimensions must be nonzero"));
    }
    if !(0.0..=1.0).contains(&self.liquid_diffusion) {
      return Err(ConfigError::Invalid("liquid_diffusion must be in [0, 1]"));
    }
    if !(0.0..=1.0).contains(&self.gas_diffusion) {
      return Err(ConfigError::Invalid("gas_diffusion must be in [0, 1]"));
    }
    if !self.steam_top_cooling.is_finite() || self.steam_top_cooling < 0.0 {
      return Err(ConfigError::Invalid("steam_top_cooling must be finite and >= 0"));
    }
    Ok(self)
  }
}

/// Configuration loading errors.
#[derive(Debug)]
pub enum ConfigError {
  Parse(toml::de::Error),
  Invalid(&'static str),
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Parse(e) => write!(f, "config is not valid TOML: {e}"),
      Self::Invalid(reason) => write!(f, "config rejected: {reason}"),
    }
  }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_are_valid() {
    let config = SimConfig::default();
    assert_eq!(config.map_size, [100, 100]);
    assert!(config.temp_exchange);
  }

  #[test]
  fn partial_toml_fills_defaults() {
    let config = SimConfig::from_toml("map_size = [40, 30]\nseed = 9\n").unwrap();
    assert_eq!(config.map_size, [40, 30]);
    assert_eq!(config.seed, 9);
    assert_eq!(config.liquid_diffusion, SimConfig::default().liquid_diffusion);
  }

  #[test]
  fn rejects_zero_map_size() {
    let err = SimConfig::from_toml("map_size = [0, 10]").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
  }

  #[test]
  fn rejects_out_of_range_probability() {
    let err = SimConfig::from_toml("liquid_diffusion = 1.5").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
  }

  #[test]
  fn rejects_garbage() {
    assert!(matches!(
      SimConfig::from_toml("map_size = \"wide\""),
      Err(ConfigError::Parse(_))
    ));
  }

  #[test]
  fn missing_file_is_defaults() {
    let config = SimConfig::load_or_default("/nonexistent/moonsbox.toml");
    assert_eq!(config.map_size, SimConfig::default().map_size);
  }
}
