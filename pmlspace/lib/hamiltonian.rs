//! Right-hand side of the time-dependent Schrödinger equation with an
//! absorbing boundary layer.
//!
//! For a state `q`, the time derivative is computed as
//! ```text
//! w     = P D (P D q)
//! dq/dt = -i (-w + V q)
//! ```
//! where `D` is the [spectral derivative][crate::spectral::SpectralDiff], `P`
//! is pointwise multiplication by the [PML factors][crate::pml::Pml], and `V`
//! is the tabulated [potential][crate::potential]. Each derivative is damped
//! immediately, so the layer acts on the kinetic operator itself rather than
//! on the state. In the interior, where `P = 1`, this reduces to
//! `dq/dt = -i (-(1 / 4π²) ∂²q/∂x² + V q)`.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    error::ParamError,
    grid::Grid,
    integrate::Rhs,
    pml::{ Pml, PmlParams },
    potential::{ self, PotentialParams },
    spectral::SpectralDiff,
};

pub type HResult<T> = Result<T, ParamError>;

/// The evolution operator for a fixed grid.
///
/// All buffers are sized once at construction; evaluating the operator never
/// allocates.
#[derive(Debug)]
pub struct Hamiltonian {
    diff: SpectralDiff,
    pml: Pml,
    V: nd::Array1<f64>,
}

impl Hamiltonian {
    /// Plan transforms and tabulate the potential and absorbing layer.
    pub fn new(
        grid: &Grid,
        potential: &PotentialParams,
        pml: &PmlParams,
    ) -> HResult<Self>
    {
        let V = potential::compute(grid, potential)?;
        let pml = Pml::compute(grid, pml)?;
        Ok(Self { diff: SpectralDiff::new(grid), pml, V })
    }

    /// Replace the potential table. The previous table is kept if `params` is
    /// rejected.
    pub fn set_potential(&mut self, grid: &Grid, params: &PotentialParams)
        -> HResult<()>
    {
        self.V = potential::compute(grid, params)?;
        Ok(())
    }

    /// Replace the absorbing layer. The previous layer is kept if `params` is
    /// rejected.
    pub fn set_pml(&mut self, grid: &Grid, params: &PmlParams) -> HResult<()> {
        self.pml = Pml::compute(grid, params)?;
        Ok(())
    }

    /// Tabulated potential.
    pub fn potential(&self) -> &nd::Array1<f64> { &self.V }

    /// Tabulated absorbing layer.
    pub fn pml(&self) -> &Pml { &self.pml }

    /// Evaluate the time derivative of `q`, writing it into `dq`.
    ///
    /// *Panics if either array does not have the length of the grid*.
    pub fn deriv(&mut self, dq: &mut nd::Array1<C64>, q: &nd::Array1<C64>) {
        dq.assign(q);
        self.diff.differentiate(dq);
        self.pml.apply(dq);
        self.diff.differentiate(dq);
        self.pml.apply(dq);
        nd::Zip::from(dq).and(q).and(&self.V)
            .for_each(|dqk, qk, Vk| {
                let h = -*dqk + *Vk * *qk;
                // multiply by -i
                *dqk = C64::new(h.im, -h.re);
            });
    }
}

impl Rhs<C64> for Hamiltonian {
    fn eval(&mut self, dq: &mut nd::Array1<C64>, q: &nd::Array1<C64>, _t: f64) {
        self.deriv(dq, q);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;
    use approx::assert_abs_diff_eq;
    use crate::pulse::PulseParams;

    fn free() -> (PotentialParams, PmlParams) {
        (
            PotentialParams { magnitude: 0.0, ..PotentialParams::default() },
            PmlParams { width: 0.0, ..PmlParams::default() },
        )
    }

    #[test]
    fn plane_wave_is_an_eigenstate() {
        let grid = Grid::new(0.0, 2.0, 128).unwrap();
        let (pot, pml) = free();
        let mut H = Hamiltonian::new(&grid, &pot, &pml).unwrap();
        let nu = grid.k()[5];
        let q: nd::Array1<C64> = grid.x().mapv(|xk| C64::cis(TAU * nu * xk));
        let mut dq: nd::Array1<C64> = nd::Array1::zeros(grid.len());
        H.deriv(&mut dq, &q);
        // H q = ν² q  =>  dq/dt = -i ν² q
        q.iter().zip(&dq)
            .for_each(|(qk, dqk)| {
                let expected = -C64::i() * nu * nu * qk;
                assert_abs_diff_eq!((dqk - expected).norm(), 0.0, epsilon = 1e-8);
            });
    }

    #[test]
    fn constant_potential_rotates_phase() {
        let grid = Grid::new(0.0, 1.0, 32).unwrap();
        let (_, pml) = free();
        // a very wide Gaussian is flat across the grid
        let pot = PotentialParams {
            width: 1e3,
            magnitude: 10.0,
            inverted: false,
            center: 0.5,
            exponent: 2.0,
        };
        let mut H = Hamiltonian::new(&grid, &pot, &pml).unwrap();
        let q: nd::Array1<C64> = nd::Array1::from_elem(32, C64::new(1.0, 0.5));
        let mut dq: nd::Array1<C64> = nd::Array1::zeros(32);
        H.deriv(&mut dq, &q);
        q.iter().zip(&dq).zip(H.potential())
            .for_each(|((qk, dqk), Vk)| {
                let expected = -C64::i() * *Vk * qk;
                assert_abs_diff_eq!((dqk - expected).norm(), 0.0, epsilon = 1e-10);
            });
    }

    #[test]
    fn layer_damps_each_derivative() {
        let grid = Grid::new(0.0, 2.0, 256).unwrap();
        let pot = PotentialParams::default();
        let pml_params = PmlParams { width: 0.2, exponent: 2.0, gamma: 0.7 };
        let mut H = Hamiltonian::new(&grid, &pot, &pml_params).unwrap();
        // packet sitting half inside the left layer
        let pulse = PulseParams { center: 0.35, width: 0.1, magnitude: 1.0, wavenumber: 60.0 };
        let q: nd::Array1<C64> = grid.x().mapv(|xk| pulse.eval(xk));

        let mut diff = SpectralDiff::new(&grid);
        let pml = Pml::compute(&grid, &pml_params).unwrap();
        let mut w = q.clone();
        diff.differentiate(&mut w);
        pml.apply(&mut w);
        diff.differentiate(&mut w);
        pml.apply(&mut w);

        let mut dq: nd::Array1<C64> = nd::Array1::zeros(grid.len());
        H.deriv(&mut dq, &q);
        let mut mismatch_if_swapped = 0.0_f64;
        let mut swapped = q.clone();
        pml.apply(&mut swapped);
        diff.differentiate(&mut swapped);
        pml.apply(&mut swapped);
        diff.differentiate(&mut swapped);
        nd::Zip::from(&dq).and(&w).and(&swapped).and(&q).and(H.potential())
            .for_each(|dqk, wk, sk, qk, Vk| {
                let expected = -C64::i() * (-*wk + *Vk * *qk);
                assert_abs_diff_eq!((dqk - expected).norm(), 0.0, epsilon = 1e-9);
                mismatch_if_swapped = mismatch_if_swapped.max((wk - sk).norm());
            });
        // the layer does not commute with the derivative
        assert!(mismatch_if_swapped > 1e-3);
    }

    #[test]
    fn rejected_recompute_keeps_tables() {
        let grid = Grid::new(0.0, 2.0, 64).unwrap();
        let mut H = Hamiltonian::new(
            &grid, &PotentialParams::default(), &PmlParams::default()).unwrap();
        let V0 = H.potential().clone();
        let f0 = H.pml().factor().clone();
        let bad_pot = PotentialParams { width: -1.0, ..PotentialParams::default() };
        let bad_pml = PmlParams { width: -1.0, ..PmlParams::default() };
        assert!(H.set_potential(&grid, &bad_pot).is_err());
        assert!(H.set_pml(&grid, &bad_pml).is_err());
        assert_eq!(H.potential(), &V0);
        assert_eq!(H.pml().factor(), &f0);
    }
}
