//! Engine configuration
//!
//! Loaded from an optional TOML file, then overridden from `GR__*` environment
//! variables. Missing keys fall back to the defaults below.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MILLISECONDS_PER_SECOND;
use crate::error::ConfigError;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "GR__";

/// Physical constants for the objects the field spawns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub ship_radius: f64,
    pub ship_mass: f64,
    /// Velocity added by one boost command
    pub ship_boost: f64,

    pub missile_speed: f64,
    pub missile_radius: f64,
    pub missile_mass: f64,
    /// Gap between the ship's hull and a freshly launched missile
    pub missile_distance_from_ship: f64,

    pub asteroid_min_speed: f64,
    pub asteroid_max_speed: f64,
    /// Largest horizontal drift as a fraction of the asteroid's speed
    pub asteroid_max_drift: f64,
    pub asteroid_min_radius: f64,
    pub asteroid_max_radius: f64,
    pub asteroid_min_mass: f64,
    pub asteroid_max_mass: f64,

    pub explosion_radius: f64,
    pub explosion_mass: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            ship_radius: 1.0,
            ship_mass: 10.0,
            ship_boost: 1.0,

            missile_speed: 1.0,
            missile_radius: 0.1,
            missile_mass: 1.0,
            missile_distance_from_ship: 0.1,

            asteroid_min_speed: 0.2,
            asteroid_max_speed: 0.6,
            asteroid_max_drift: 0.25,
            asteroid_min_radius: 0.5,
            asteroid_max_radius: 2.0,
            asteroid_min_mass: 500.0,
            asteroid_max_mass: 1000.0,

            explosion_radius: 1.0,
            explosion_mass: 0.0,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ticks per second in the paced loop
    pub frame_rate: u32,
    pub field_width: u32,
    pub field_height: u32,
    /// Chance per tick that a new asteroid appears
    pub asteroid_probability: f64,
    /// 1.0 is perfectly elastic, 0.0 perfectly inelastic
    pub coefficient_restitution: f64,
    pub field: FieldConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_rate: 20,
            field_width: 12,
            field_height: 18,
            asteroid_probability: 0.02,
            coefficient_restitution: 0.8,
            field: FieldConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load from `path` (if given) and the process environment, then validate
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Apply `GR__<KEY>` overrides looked up through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        override_value(&lookup, "FRAME_RATE", &mut self.frame_rate)?;
        override_value(&lookup, "FIELD_WIDTH", &mut self.field_width)?;
        override_value(&lookup, "FIELD_HEIGHT", &mut self.field_height)?;
        override_value(&lookup, "ASTEROID_PROBABILITY", &mut self.asteroid_probability)?;
        override_value(
            &lookup,
            "COEFFICIENT_RESTITUTION",
            &mut self.coefficient_restitution,
        )?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 {
            return Err(out_of_range("frame_rate", "must be positive"));
        }
        if self.field_width == 0 {
            return Err(out_of_range("field_width", "must be positive"));
        }
        if self.field_height == 0 {
            return Err(out_of_range("field_height", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.asteroid_probability) {
            return Err(out_of_range("asteroid_probability", "must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.coefficient_restitution) {
            return Err(out_of_range("coefficient_restitution", "must be within [0, 1]"));
        }
        self.field.validate()
    }

    /// Tick budget of the paced loop
    pub fn ms_per_frame(&self) -> u64 {
        MILLISECONDS_PER_SECOND / u64::from(self.frame_rate.max(1))
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("ship_radius", self.ship_radius),
            ("missile_radius", self.missile_radius),
            ("asteroid_min_radius", self.asteroid_min_radius),
            ("explosion_radius", self.explosion_radius),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(out_of_range(field, "must be positive"));
            }
        }

        let non_negative = [
            ("ship_mass", self.ship_mass),
            ("ship_boost", self.ship_boost),
            ("missile_speed", self.missile_speed),
            ("missile_mass", self.missile_mass),
            ("missile_distance_from_ship", self.missile_distance_from_ship),
            ("asteroid_min_speed", self.asteroid_min_speed),
            ("asteroid_max_drift", self.asteroid_max_drift),
            ("asteroid_min_mass", self.asteroid_min_mass),
            ("explosion_mass", self.explosion_mass),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(out_of_range(field, "must not be negative"));
            }
        }

        let ranges = [
            ("asteroid_max_speed", self.asteroid_min_speed, self.asteroid_max_speed),
            ("asteroid_max_radius", self.asteroid_min_radius, self.asteroid_max_radius),
            ("asteroid_max_mass", self.asteroid_min_mass, self.asteroid_max_mass),
        ];
        for (field, min, max) in ranges {
            if !(max >= min) {
                return Err(out_of_range(field, "must not be below its minimum"));
            }
        }
        Ok(())
    }
}

fn out_of_range(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::OutOfRange { field, reason }
}

fn override_value<F, T>(lookup: &F, name: &str, slot: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let key = format!("{ENV_PREFIX}{name}");
    if let Some(value) = lookup(&key) {
        *slot = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            key: key.clone(),
            value: value.clone(),
        })?;
        log::debug!("{key} overridden from environment");
    }
    Ok(())
}
