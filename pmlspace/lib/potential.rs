//! Generalized Gaussian barriers and wells.
//!
//! The potential is `V(x) = M g(x)` with `g(x) = exp(-|(x - c) / w|^p)`, or
//! `1 - g(x)` when inverted. Magnitudes at or below
//! [`NO_POTENTIAL_THRESHOLD`] switch the potential off entirely.

use ndarray as nd;
use serde::{ Deserialize, Serialize };
use crate::{ NO_POTENTIAL_THRESHOLD, error::ParamError, grid::Grid };

pub type PotentialResult<T> = Result<T, ParamError>;

/// Shape parameters of the potential.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PotentialParams {
    /// Characteristic width `w`. Zero gives a vanishing barrier.
    pub width: f64,
    /// Height `M` of the barrier.
    pub magnitude: f64,
    /// Use `1 - g` instead of `g`, turning the barrier into a well.
    pub inverted: bool,
    /// Center `c` of the barrier.
    pub center: f64,
    /// Shape exponent `p`; 2 is a Gaussian, large values approach a box.
    pub exponent: f64,
}

impl Default for PotentialParams {
    fn default() -> Self {
        Self {
            width: 0.1,
            magnitude: 1000.0,
            inverted: false,
            center: 1.0,
            exponent: 2.0,
        }
    }
}

impl PotentialParams {
    pub fn validate(&self) -> PotentialResult<()> {
        ParamError::check_width("potential", self.width)
    }

    /// Magnitude actually applied, with the no-potential threshold taken into
    /// account.
    pub fn effective_magnitude(&self) -> f64 {
        if self.magnitude <= NO_POTENTIAL_THRESHOLD { 0.0 } else { self.magnitude }
    }

    /// Evaluate the potential at position `x`.
    pub fn eval(&self, x: f64) -> f64 {
        let g
            = if self.width > 0.0 {
                let xn = (x - self.center) / self.width;
                (-xn.abs().powf(self.exponent)).exp()
            } else {
                0.0
            };
        let g = if self.inverted { 1.0 - g } else { g };
        self.effective_magnitude() * g
    }
}

/// Tabulate the potential over `grid`.
pub fn compute(grid: &Grid, params: &PotentialParams)
    -> PotentialResult<nd::Array1<f64>>
{
    params.validate()?;
    let V: nd::Array1<f64> = grid.x().mapv(|xk| params.eval(xk));
    log::debug!(
        "potential: tabulated {} points, peak {:.3e}",
        grid.len(),
        V.iter().copied().fold(0.0, f64::max),
    );
    Ok(V)
}
