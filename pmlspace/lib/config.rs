//! Simulation parameters, grouped by domain, with TOML persistence.
//!
//! Every record deserializes with defaults for missing fields, so a file only
//! needs to name what it changes:
//! ```
//! use pmlspace::{ config::Config, integrate::Method };
//!
//! let config = Config::from_toml_str(r#"
//!     [potential]
//!     magnitude = 2500.0
//!     inverted = true
//!
//!     [integration]
//!     method = "rk2"
//! "#).unwrap();
//! assert_eq!(config.potential.magnitude, 2500.0);
//! assert!(config.potential.inverted);
//! assert_eq!(config.potential.width, 0.1);
//! assert_eq!(config.integration.method, Method::RK2);
//! assert_eq!(config.grid.n, 512);
//! ```

use std::{ fs, path::Path };
use serde::{ Deserialize, Serialize };
use crate::{
    error::{ ConfigError, ParamError },
    integrate::Method,
    pml::PmlParams,
    potential::PotentialParams,
    pulse::PulseParams,
};

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Sampling domain.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
    pub xmin: f64,
    pub xmax: f64,
    pub n: usize,
}

impl Default for GridParams {
    fn default() -> Self {
        Self { xmin: 0.0, xmax: 2.0, n: 512 }
    }
}

/// Time-stepping parameters.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationParams {
    /// Time step.
    pub dt: f64,
    /// Number of steps taken per call to
    /// [`Solver::iterate`][crate::solver::Solver::iterate].
    #[serde(alias = "stepsPerIter")]
    pub steps_per_iter: usize,
    /// Integration method.
    pub method: Method,
}

impl Default for IntegrationParams {
    fn default() -> Self {
        Self { dt: 1e-4, steps_per_iter: 5, method: Method::RK4 }
    }
}

impl IntegrationParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        ParamError::check_dt(self.dt)?;
        ParamError::check_steps_per_iter(self.steps_per_iter)?;
        Ok(())
    }
}

/// Full set of simulation parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridParams,
    pub pulse: PulseParams,
    pub pulse2: PulseParams,
    pub pml: PmlParams,
    pub potential: PotentialParams,
    pub integration: IntegrationParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridParams::default(),
            pulse: PulseParams::default(),
            pulse2: PulseParams::default_second(),
            pml: PmlParams::default(),
            potential: PotentialParams::default(),
            integration: IntegrationParams::default(),
        }
    }
}

impl Config {
    /// Check every parameter record. Grid bounds are checked separately when
    /// the grid is built.
    pub fn validate(&self) -> Result<(), ParamError> {
        self.pulse.validate()?;
        self.pulse2.validate()?;
        self.pml.validate()?;
        self.potential.validate()?;
        self.integration.validate()?;
        Ok(())
    }

    /// Both pulses, in order.
    pub fn pulses(&self) -> [PulseParams; 2] { [self.pulse, self.pulse2] }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Encode as a TOML string.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Read and validate a config from a TOML file.
    pub fn read_toml<P>(path: P) -> ConfigResult<Self>
    where P: AsRef<Path>
    {
        let path = path.as_ref();
        let contents
            = fs::read_to_string(path)
            .map_err(|source| {
                ConfigError::Read { path: path.to_path_buf(), source }
            })?;
        Self::from_toml_str(&contents)
    }

    /// Write as a TOML file.
    pub fn write_toml<P>(&self, path: P) -> ConfigResult<()>
    where P: AsRef<Path>
    {
        let path = path.as_ref();
        fs::write(path, self.to_toml_string()?)
            .map_err(|source| {
                ConfigError::Write { path: path.to_path_buf(), source }
            })
    }
}
