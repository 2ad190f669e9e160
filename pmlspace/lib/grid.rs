//! Uniform sampling domains and their matching spectral frequency tables.
//!
//! ```
//! use pmlspace::grid::Grid;
//!
//! let grid = Grid::new(0.0, 2.0, 5).unwrap();
//! assert_eq!(grid.dx(), 0.5);
//! assert_eq!(grid.x().to_vec(), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
//! assert_eq!(grid.k()[0], 0.0);
//! ```

use ndarray as nd;
use crate::{ error::GridError, utils::fft_freq };

pub type GridResult<T> = Result<T, GridError>;

/// A uniform one-dimensional grid.
///
/// Positions are `x[i] = xmin + i dx` with `dx = (xmax - xmin) / (n - 1)`. The
/// wavenumber table follows the discrete Fourier ordering used by
/// [`SpectralDiff`][crate::spectral::SpectralDiff] (non-negative frequencies
/// first), in cycles per unit length.
#[derive(Clone, Debug)]
pub struct Grid {
    xmin: f64,
    xmax: f64,
    dx: f64,
    x: nd::Array1<f64>,
    k: nd::Array1<f64>,
}

impl Grid {
    /// Build a new grid of `n` points spanning `[xmin, xmax]`.
    pub fn new(xmin: f64, xmax: f64, n: usize) -> GridResult<Self> {
        GridError::check_count(n)?;
        GridError::check_bounds(xmin, xmax)?;
        let dx = (xmax - xmin) / (n - 1) as f64;
        let x: nd::Array1<f64> = nd::Array1::linspace(xmin, xmax, n);
        let k = fft_freq(n, dx);
        Ok(Self { xmin, xmax, dx, x, k })
    }

    /// Lower bound of the domain.
    pub fn xmin(&self) -> f64 { self.xmin }

    /// Upper bound of the domain.
    pub fn xmax(&self) -> f64 { self.xmax }

    /// Length of the domain, `xmax - xmin`.
    pub fn length(&self) -> f64 { self.xmax - self.xmin }

    /// Number of points.
    pub fn len(&self) -> usize { self.x.len() }

    /// Always `false`; grids hold at least two points.
    pub fn is_empty(&self) -> bool { self.x.is_empty() }

    /// Point spacing.
    pub fn dx(&self) -> f64 { self.dx }

    /// Sample positions.
    pub fn x(&self) -> &nd::Array1<f64> { &self.x }

    /// Wavenumber table.
    pub fn k(&self) -> &nd::Array1<f64> { &self.k }

    /// Position `x` normalized to the domain, so that `xmin -> 0` and
    /// `xmax -> 1`.
    pub fn normalize(&self, x: f64) -> f64 {
        (x - self.xmin) / self.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_bad_grids() {
        assert!(matches!(Grid::new(0.0, 1.0, 1), Err(GridError::BadCount(1))));
        assert!(matches!(Grid::new(0.0, 1.0, 0), Err(GridError::BadCount(0))));
        assert!(matches!(
            Grid::new(1.0, 1.0, 10),
            Err(GridError::BadBounds(..))
        ));
        assert!(matches!(
            Grid::new(2.0, -1.0, 10),
            Err(GridError::BadBounds(..))
        ));
        assert!(matches!(
            Grid::new(0.0, f64::NAN, 10),
            Err(GridError::BadBounds(..))
        ));
    }

    #[test]
    fn positions_and_spacing() {
        let grid = Grid::new(-1.0, 3.0, 9).unwrap();
        assert_eq!(grid.len(), 9);
        assert_relative_eq!(grid.dx(), 0.5);
        grid.x().iter().enumerate()
            .for_each(|(i, xi)| {
                assert_relative_eq!(*xi, -1.0 + 0.5 * i as f64, epsilon = 1e-12);
            });
        assert_relative_eq!(grid.normalize(1.0), 0.5);
    }

    #[test]
    fn wavenumbers_split_at_nyquist() {
        for n in [2_usize, 7, 8, 512, 513] {
            let grid = Grid::new(0.0, 2.0, n).unwrap();
            let k = grid.k();
            let span = n as f64 * grid.dx();
            assert_eq!(k[0], 0.0);
            let m = (n + 1) / 2;
            for i in 0..n {
                let expected
                    = if i < m { i as f64 / span } else { -((n - i) as f64) / span };
                assert_relative_eq!(k[i], expected, epsilon = 1e-12);
            }
            // k[i] == -k[n - i] away from the Nyquist bin of even grids
            for i in 1..m {
                if 2 * i != n {
                    assert_relative_eq!(k[i], -k[n - i], epsilon = 1e-12);
                }
            }
        }
    }
}
