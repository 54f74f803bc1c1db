/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::Algorithm;

/***************************************/
/*              Constants              */
/***************************************/
pub const MIN_FLOORS: u8 = 3;
pub const MAX_FLOORS: u8 = 20;
pub const MIN_TICK_PERIOD: u64 = 100;
pub const MAX_TICK_PERIOD: u64 = 2000;

pub const DEFAULT_FLOORS: u8 = 10;
pub const DEFAULT_TICK_PERIOD: u64 = 500;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SimulatorConfig {
    pub n_floors: u8,
    pub tick_period: u64,
    pub algorithm: Algorithm,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            n_floors: DEFAULT_FLOORS,
            tick_period: DEFAULT_TICK_PERIOD,
            algorithm: Algorithm::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    OutOfRange(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read configuration file: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse configuration file: {}", e),
            ConfigError::OutOfRange(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn floors_in_range(n_floors: u8) -> bool {
    (MIN_FLOORS..=MAX_FLOORS).contains(&n_floors)
}

pub fn tick_period_in_range(tick_period: u64) -> bool {
    (MIN_TICK_PERIOD..=MAX_TICK_PERIOD).contains(&tick_period)
}

impl SimulatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !floors_in_range(self.n_floors) {
            return Err(ConfigError::OutOfRange(format!(
                "n_floors = {} (must be within {}..={})",
                self.n_floors, MIN_FLOORS, MAX_FLOORS
            )));
        }
        if !tick_period_in_range(self.tick_period) {
            return Err(ConfigError::OutOfRange(format!(
                "tick_period = {} (must be within {}..={})",
                self.tick_period, MIN_TICK_PERIOD, MAX_TICK_PERIOD
            )));
        }
        Ok(())
    }
}

pub fn parse_config(config_str: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(config_str)?;
    config.simulator.validate()?;
    Ok(config)
}

/// Loads the configuration file, falling back to defaults when it does not exist.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        log::info!(
            "No configuration file at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }
    let config_str = fs::read_to_string(path)?;
    parse_config(&config_str)
}
