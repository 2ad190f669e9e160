//! Pseudo-spectral differentiation of complex fields.
//!
//! The derivative is taken by transforming to k-space, multiplying by `i k`,
//! and transforming back. Plans and scratch space are created once per grid so
//! that repeated differentiation does not allocate.

use std::sync::Arc;
use ndarray as nd;
use num_complex::Complex64 as C64;
use rustfft::{ Fft, FftPlanner };
use crate::{ Arr1, grid::Grid };

/// Spectral first-derivative operator for a fixed [`Grid`].
///
/// Because the wavenumber table is in cycles per unit length, the action is
/// `(1 / 2π) ∂/∂x` on band-limited periodic fields.
pub struct SpectralDiff {
    k: nd::Array1<f64>,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    scratch: Vec<C64>,
    // staging buffer for non-contiguous inputs
    work: Vec<C64>,
}

impl std::fmt::Debug for SpectralDiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpectralDiff")
            .field("len", &self.k.len())
            .finish()
    }
}

impl SpectralDiff {
    /// Plan forward and inverse transforms for `grid`.
    pub fn new(grid: &Grid) -> Self {
        let n = grid.len();
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(n);
        let inverse = planner.plan_fft_inverse(n);
        let scratch_len
            = forward.get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());
        Self {
            k: grid.k().clone(),
            forward,
            inverse,
            scratch: vec![C64::new(0.0, 0.0); scratch_len],
            work: vec![C64::new(0.0, 0.0); n],
        }
    }

    /// Number of points the operator was planned for.
    pub fn len(&self) -> usize { self.k.len() }

    /// Always `false`; see [`Grid::is_empty`].
    pub fn is_empty(&self) -> bool { self.k.is_empty() }

    /// Differentiate `q` in place.
    ///
    /// *Panics if `q` does not have the length of the grid*.
    pub fn differentiate<S>(&mut self, q: &mut Arr1<S>)
    where S: nd::DataMut<Elem = C64>
    {
        assert_eq!(
            q.len(), self.k.len(),
            "spectral::differentiate: field length does not match grid",
        );
        match q.as_slice_mut() {
            Some(buf) => differentiate_slice(
                self.forward.as_ref(),
                self.inverse.as_ref(),
                &self.k,
                buf,
                &mut self.scratch,
            ),
            None => {
                self.work.iter_mut().zip(q.iter())
                    .for_each(|(wk, qk)| { *wk = *qk; });
                differentiate_slice(
                    self.forward.as_ref(),
                    self.inverse.as_ref(),
                    &self.k,
                    &mut self.work,
                    &mut self.scratch,
                );
                q.iter_mut().zip(&self.work)
                    .for_each(|(qk, wk)| { *qk = *wk; });
            },
        }
    }
}

// the inverse transform is unnormalized, so the 1/n factor is folded into the
// k-space multiplication
fn differentiate_slice(
    forward: &dyn Fft<f64>,
    inverse: &dyn Fft<f64>,
    k: &nd::Array1<f64>,
    buf: &mut [C64],
    scratch: &mut [C64],
) {
    let norm = (buf.len() as f64).recip();
    forward.process_with_scratch(buf, scratch);
    buf.iter_mut().zip(k)
        .for_each(|(bk, kk)| {
            let s = kk * norm;
            *bk = C64::new(-s * bk.im, s * bk.re);
        });
    inverse.process_with_scratch(buf, scratch);
}
