/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub fleet: FleetConfig,
    pub scoring: ScoringConfig,
    pub elevator: ElevatorConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FleetConfig {
    pub n_elevators: usize,
    pub n_floors: u8,
}

/**
 * Weights of the proximity score. Lower scores win.
 *
 * # Fields
 * - `distance_weight`:     Cost per floor between the elevator and the request.
 * - `detour_weight`:       Multiplier when the elevator must turn around to reach the floor.
 * - `reversal_weight`:     Multiplier when the rider's onward direction opposes the elevator's.
 * - `destination_weight`:  Discount on the dropoff leg when scoring a pickup/dropoff pair.
 * - `score_adjustment`:    Offset that keeps a dropoff queued behind its pickup.
 */
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub distance_weight: f64,
    pub detour_weight: f64,
    pub reversal_weight: f64,
    pub destination_weight: f64,
    pub score_adjustment: f64,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ElevatorConfig {
    pub travel_delay_ms: u64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        FleetConfig {
            n_elevators: 16,
            n_floors: 20,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            distance_weight: 1.25,
            detour_weight: 2.5,
            reversal_weight: 2.0,
            destination_weight: 0.35,
            score_adjustment: 0.00005,
        }
    }
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        ElevatorConfig {
            travel_delay_ms: 2000,
        }
    }
}

impl ElevatorConfig {
    pub fn travel_delay(&self) -> Duration {
        Duration::from_millis(self.travel_delay_ms)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read configuration file: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse configuration file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fleet.n_elevators == 0 {
            return Err(ConfigError::Invalid("n_elevators must be at least 1".into()));
        }
        if self.fleet.n_floors == 0 {
            return Err(ConfigError::Invalid("n_floors must be at least 1".into()));
        }

        let weights = [
            ("distance_weight", self.scoring.distance_weight),
            ("detour_weight", self.scoring.detour_weight),
            ("reversal_weight", self.scoring.reversal_weight),
            ("destination_weight", self.scoring.destination_weight),
            ("score_adjustment", self.scoring.score_adjustment),
        ];
        for (name, value) in weights.iter() {
            if !value.is_finite() || *value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path)?;
    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

/***************************************/
/*             Unit tests              */
/***************************************/
