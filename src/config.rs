use std::env;
use std::str::FromStr;

use crate::error::ConfigError;

pub const VIEWPORT_ENV_VAR: &str = "OREZ_VIEWPORT";
pub const RADIUS_ENV_VAR: &str = "OREZ_RADIUS";
pub const STEP_ENV_VAR: &str = "OREZ_STEP";
pub const TICK_RATE_ENV_VAR: &str = "OREZ_TICK_RATE";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub window_title: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub player_radius: f32,
    /// Per-axis movement per tick.
    pub step: f32,
    pub tick_rate: u32,
    pub start: [f32; 2],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_title: "Orez Pillars".to_string(),
            viewport_width: 500,
            viewport_height: 500,
            player_radius: 10.0,
            step: 3.0,
            tick_rate: 60,
            start: [0.0, 0.0],
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(VIEWPORT_ENV_VAR) {
            let (w, h) = value
                .trim()
                .split_once(['x', 'X'])
                .ok_or_else(|| ConfigError::Parse {
                    var: VIEWPORT_ENV_VAR,
                    value: value.clone(),
                })?;
            config.viewport_width = parse_positive(VIEWPORT_ENV_VAR, w)?;
            config.viewport_height = parse_positive(VIEWPORT_ENV_VAR, h)?;
        }
        if let Some(value) = lookup(RADIUS_ENV_VAR) {
            config.player_radius = parse_positive(RADIUS_ENV_VAR, &value)?;
        }
        if let Some(value) = lookup(STEP_ENV_VAR) {
            config.step = parse_positive(STEP_ENV_VAR, &value)?;
        }
        if let Some(value) = lookup(TICK_RATE_ENV_VAR) {
            config.tick_rate = parse_positive(TICK_RATE_ENV_VAR, &value)?;
        }

        // A step longer than the radius could jump clean over a thin wall.
        if config.step > config.player_radius {
            return Err(ConfigError::OutOfRange {
                var: STEP_ENV_VAR,
                value: config.step.to_string(),
            });
        }

        Ok(config)
    }
}

fn parse_positive<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
{
    let value: T = raw.trim().parse().map_err(|_| ConfigError::Parse {
        var,
        value: raw.to_string(),
    })?;
    if !(value > T::default()) {
        return Err(ConfigError::OutOfRange {
            var,
            value: raw.to_string(),
        });
    }
    Ok(value)
}
