//! Perfectly matched layer (PML) used to absorb outgoing waves at the edges of
//! the grid.
//!
//! A scalar profile `σ(x)` is zero in the interior and ramps up to 1 over a
//! margin at each edge. Each point is assigned the complex factor
//! `1 / (1 + σ e^{iγ})`, which is applied multiplicatively after every spatial
//! derivative (see [`hamiltonian`][crate::hamiltonian]).

use std::f64::consts::FRAC_PI_2;
use ndarray as nd;
use num_complex::Complex64 as C64;
use serde::{ Deserialize, Serialize };
use crate::{ Arr1, error::ParamError, grid::Grid };

pub type PmlResult<T> = Result<T, ParamError>;

/// Shape parameters of the absorbing layer.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PmlParams {
    /// Relative size of the margin at each edge, as a fraction of the domain.
    /// Zero disables the layer.
    pub width: f64,
    /// Exponent shaping the ramp from the interior to the edge.
    pub exponent: f64,
    /// Phase of the complex stretching; `π/2` gives pure absorption.
    pub gamma: f64,
}

impl Default for PmlParams {
    fn default() -> Self {
        Self { width: 0.05, exponent: 1.0, gamma: FRAC_PI_2 }
    }
}

impl PmlParams {
    pub fn validate(&self) -> PmlResult<()> {
        ParamError::check_width("pml", self.width)
    }
}

/// Evaluate the damping profile at position `x`.
pub fn sigma(grid: &Grid, params: &PmlParams, x: f64) -> f64 {
    let w = params.width;
    if w <= 0.0 { return 0.0; }
    let xn = grid.normalize(x);
    if xn < w || xn > 1.0 - w {
        let ramp = ((2.0 * xn - 1.0).abs() - 1.0 + 2.0 * w) / (2.0 * w);
        ramp.clamp(0.0, 1.0).powf(params.exponent)
    } else {
        0.0
    }
}

/// Tabulated absorbing layer for a fixed grid.
#[derive(Clone, Debug)]
pub struct Pml {
    profile: nd::Array1<f64>,
    factor: nd::Array1<C64>,
}

impl Pml {
    /// Tabulate the layer over `grid`.
    pub fn compute(grid: &Grid, params: &PmlParams) -> PmlResult<Self> {
        params.validate()?;
        if params.width >= 0.5 {
            log::warn!(
                "pml width {} covers the whole domain; nothing is left \
                undamped",
                params.width,
            );
        }
        let profile: nd::Array1<f64>
            = grid.x().mapv(|xk| sigma(grid, params, xk));
        let (sin, cos) = params.gamma.sin_cos();
        let factor: nd::Array1<C64>
            = profile.mapv(|s| {
                let a = 1.0 + s * cos;
                let b = s * sin;
                let denom = a * a + b * b;
                C64::new(a / denom, -b / denom)
            });
        log::debug!(
            "pml: tabulated {} points ({} inside the layer)",
            grid.len(),
            profile.iter().filter(|s| **s != 0.0).count(),
        );
        Ok(Self { profile, factor })
    }

    /// Values of `σ` at each grid point.
    pub fn profile(&self) -> &nd::Array1<f64> { &self.profile }

    /// Complex factors at each grid point.
    pub fn factor(&self) -> &nd::Array1<C64> { &self.factor }

    /// Multiply `q` pointwise by the layer, in place.
    ///
    /// *Panics if `q` does not have the length of the grid*.
    pub fn apply<S>(&self, q: &mut Arr1<S>)
    where S: nd::DataMut<Elem = C64>
    {
        nd::Zip::from(q).and(&self.factor)
            .for_each(|qk, fk| { *qk *= fk; });
    }
}
