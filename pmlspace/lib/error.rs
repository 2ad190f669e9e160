//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use std::path::PathBuf;
use thiserror::Error;

/// Returned from [`Grid::new`][crate::grid::Grid::new] when the requested
/// sampling domain is unusable.
#[derive(Debug, Error)]
pub enum GridError {
    /// Returned when fewer than 2 points are requested.
    #[error("grids must have at least 2 points; got {0}")]
    BadCount(usize),

    /// Returned when the bounds are non-finite or not strictly increasing.
    #[error("grid bounds must be finite and strictly increasing; got [{0}, {1}]")]
    BadBounds(f64, f64),
}

impl GridError {
    pub(crate) fn check_count(n: usize) -> Result<(), Self> {
        (n >= 2).then_some(()).ok_or(Self::BadCount(n))
    }

    pub(crate) fn check_bounds(xmin: f64, xmax: f64) -> Result<(), Self> {
        (xmin.is_finite() && xmax.is_finite() && xmax > xmin)
            .then_some(())
            .ok_or(Self::BadBounds(xmin, xmax))
    }
}

/// Returned when a parameter record for a recompute or integration call is
/// rejected. Tables and state are left untouched when this is returned.
#[derive(Debug, Error)]
pub enum ParamError {
    /// Returned when a negative (or NaN) width is encountered. The first field
    /// names the parameter domain.
    #[error("{0} width must be non-negative; got {1}")]
    NegativeWidth(&'static str, f64),

    /// Returned when a non-positive or non-finite time step is encountered.
    #[error("time step must be finite and greater than 0; got {0}")]
    BadTimeStep(f64),

    /// Returned when a zero steps-per-iteration count is encountered.
    #[error("steps per iteration must be at least 1; got {0}")]
    BadStepsPerIter(usize),

    /// Returned when an integration method name cannot be parsed.
    #[error("unknown integration method '{0}'; expected one of euler, rk2, rk4")]
    UnknownMethod(String),
}

impl ParamError {
    pub(crate) fn check_width(domain: &'static str, width: f64)
        -> Result<(), Self>
    {
        (width >= 0.0).then_some(()).ok_or(Self::NegativeWidth(domain, width))
    }

    pub(crate) fn check_dt(dt: f64) -> Result<(), Self> {
        (dt.is_finite() && dt > 0.0).then_some(()).ok_or(Self::BadTimeStep(dt))
    }

    pub(crate) fn check_steps_per_iter(steps: usize) -> Result<(), Self> {
        (steps != 0).then_some(()).ok_or(Self::BadStepsPerIter(steps))
    }
}

/// Returned from loading or saving a [`Config`][crate::config::Config].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when a config file can't be read.
    #[error("unable to read config file {path:?}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    /// Returned when a config file can't be written.
    #[error("unable to write config file {path:?}: {source}")]
    Write { path: PathBuf, source: std::io::Error },

    /// [`toml::de::Error`]
    #[error("unable to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// [`toml::ser::Error`]
    #[error("unable to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// [`ParamError`]
    #[error("invalid parameter: {0}")]
    Param(#[from] ParamError),
}

/// Returned from [`Solver`][crate::solver::Solver] construction.
#[derive(Debug, Error)]
pub enum SimError {
    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    /// [`ParamError`]
    #[error("parameter error: {0}")]
    Param(#[from] ParamError),
}
