//! Gaussian-enveloped plane wave initial conditions.

use ndarray as nd;
use num_complex::Complex64 as C64;
use serde::{ Deserialize, Serialize };
use crate::{ Arr1, error::ParamError, grid::Grid };

pub type PulseResult<T> = Result<T, ParamError>;

/// A single wave packet, `M exp(-((x - c) / w)²) exp(i k x)`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseParams {
    /// Center `c` of the envelope.
    pub center: f64,
    /// Envelope width `w`. Zero gives an empty pulse.
    pub width: f64,
    /// Peak amplitude `M`.
    pub magnitude: f64,
    /// Carrier wavenumber `k` (radians per unit length); its sign sets the
    /// direction of travel.
    pub wavenumber: f64,
}

impl Default for PulseParams {
    fn default() -> Self {
        Self { center: 0.5, width: 0.1, magnitude: 1.0, wavenumber: 200.0 }
    }
}

impl PulseParams {
    /// The default second pulse: switched off, mirrored about the domain
    /// center of the default grid and travelling the other way.
    pub fn default_second() -> Self {
        Self { center: 1.5, width: 0.1, magnitude: 0.0, wavenumber: -200.0 }
    }

    pub fn validate(&self) -> PulseResult<()> {
        ParamError::check_width("pulse", self.width)
    }

    /// Evaluate the pulse at position `x`.
    pub fn eval(&self, x: f64) -> C64 {
        if self.width <= 0.0 { return C64::new(0.0, 0.0); }
        let amp
            = (-((x - self.center) / self.width).powi(2)).exp() * self.magnitude;
        C64::new(amp * (x * self.wavenumber).cos(), amp * (x * self.wavenumber).sin())
    }
}

/// Write the sum of both pulses over `grid` into `q`.
///
/// Nothing is written if either pulse is rejected.
///
/// *Panics if `q` does not have the length of the grid*.
pub fn initialize_into<S>(grid: &Grid, pulses: &[PulseParams; 2], q: &mut Arr1<S>)
    -> PulseResult<()>
where S: nd::DataMut<Elem = C64>
{
    pulses.iter().try_for_each(PulseParams::validate)?;
    let [p1, p2] = pulses;
    nd::Zip::from(q).and(grid.x())
        .for_each(|qk, xk| {
            *qk = C64::new(0.0, 0.0) + p1.eval(*xk) + p2.eval(*xk);
        });
    Ok(())
}

/// Return the sum of both pulses over `grid`.
pub fn initialize(grid: &Grid, pulses: &[PulseParams; 2])
    -> PulseResult<nd::Array1<C64>>
{
    let mut q: nd::Array1<C64> = nd::Array1::zeros(grid.len());
    initialize_into(grid, pulses, &mut q)?;
    Ok(q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn silent_second_pulse_is_exact() {
        let grid = Grid::new(0.0, 2.0, 512).unwrap();
        let p1 = PulseParams::default();
        let q = initialize(&grid, &[p1, PulseParams::default_second()]).unwrap();
        grid.x().iter().zip(&q)
            .for_each(|(xk, qk)| { assert_eq!(*qk, p1.eval(*xk)); });
    }

    #[test]
    fn envelope_and_phase() {
        let grid = Grid::new(0.0, 2.0, 201).unwrap();
        let p1 = PulseParams { center: 1.0, width: 0.2, magnitude: 0.5, wavenumber: 30.0 };
        let p2 = PulseParams { magnitude: 0.0, ..p1 };
        let q = initialize(&grid, &[p1, p2]).unwrap();
        assert_abs_diff_eq!(q[100].norm(), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(q[100].arg(), (30.0_f64).sin().atan2(30.0_f64.cos()), epsilon = 1e-9);
        // one width away the envelope has dropped by 1/e
        assert_abs_diff_eq!(q[120].norm(), 0.5 * (-1.0_f64).exp(), epsilon = 1e-9);
    }

    #[test]
    fn pulses_superpose() {
        let grid = Grid::new(0.0, 2.0, 64).unwrap();
        let p1 = PulseParams::default();
        let p2 = PulseParams { magnitude: 0.7, ..PulseParams::default_second() };
        let q = initialize(&grid, &[p1, p2]).unwrap();
        grid.x().iter().zip(&q)
            .for_each(|(xk, qk)| {
                assert_abs_diff_eq!((qk - p1.eval(*xk) - p2.eval(*xk)).norm(), 0.0, epsilon = 1e-15);
            });
    }

    #[test]
    fn rejected_pulse_leaves_state() {
        let grid = Grid::new(0.0, 2.0, 64).unwrap();
        let mut q: nd::Array1<C64> = nd::Array1::from_elem(64, C64::new(3.0, 0.0));
        let bad = PulseParams { width: -0.1, ..PulseParams::default() };
        assert!(initialize_into(&grid, &[PulseParams::default(), bad], &mut q).is_err());
        assert!(q.iter().all(|qk| *qk == C64::new(3.0, 0.0)));
    }
}
