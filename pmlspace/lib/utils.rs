//! Miscellaneous tools.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::Arr1;

/// Generate an array of frequency-space coordinates to accompany a FFT of `n`
/// points for sampling interval `dx`.
///
/// Non-negative frequencies occupy the first `⌊(n + 1) / 2⌋` slots, followed by
/// the negative frequencies in increasing order.
pub fn fft_freq(n: usize, dx: f64) -> nd::Array1<f64> {
    let m = (n + 1) / 2;
    let span = n as f64 * dx;
    (0..n)
        .map(|i| {
            if i < m { i as f64 / span } else { -((n - i) as f64) / span }
        })
        .collect()
}

/// Sum of `|q|²` over all samples.
pub fn density<S>(q: &Arr1<S>) -> f64
where S: nd::Data<Elem = C64>
{
    q.iter().map(|qk| qk.norm_sqr()).sum()
}

/// Calculate the norm of a wavefunction with the trapezoidal rule.
///
/// *Panics if `q` has length less than 2*.
pub fn wf_norm<S>(q: &Arr1<S>, dx: f64) -> f64
where S: nd::Data<Elem = C64>
{
    let n = q.len();
    (dx / 2.0) * (
        q[0].norm_sqr()
        + 2.0 * q.iter().skip(1).take(n - 2).map(|qk| qk.norm_sqr()).sum::<f64>()
        + q[n - 1].norm_sqr()
    )
}

/// Index of the sample with the largest amplitude, or `None` if `q` is empty
/// or contains only NaNs.
pub fn peak_index<S>(q: &Arr1<S>) -> Option<usize>
where S: nd::Data<Elem = C64>
{
    q.iter().enumerate()
        .map(|(i, qk)| (i, qk.norm_sqr()))
        .filter(|(_, a)| !a.is_nan())
        .max_by(|(_, l), (_, r)| l.total_cmp(r))
        .map(|(i, _)| i)
}

/// Density-weighted mean position.
///
/// *Returns NaN if the total density is zero*.
pub fn centroid<S, T>(x: &Arr1<S>, q: &Arr1<T>) -> f64
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
{
    let (moment, total)
        = x.iter().zip(q)
        .fold((0.0, 0.0), |(m, t), (xk, qk)| {
            let a = qk.norm_sqr();
            (m + xk * a, t + a)
        });
    moment / total
}

/// Fraction of the total density located at positions strictly greater than
/// `x0`.
///
/// *Returns NaN if the total density is zero*.
pub fn fraction_beyond<S, T>(x: &Arr1<S>, q: &Arr1<T>, x0: f64) -> f64
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
{
    let beyond: f64
        = x.iter().zip(q)
        .filter(|(xk, _)| **xk > x0)
        .map(|(_, qk)| qk.norm_sqr())
        .sum();
    beyond / density(q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn fft_freq_even_and_odd() {
        let f = fft_freq(4, 0.25);
        assert_eq!(f.to_vec(), vec![0.0, 1.0, -2.0, -1.0]);
        let f = fft_freq(5, 0.2);
        assert_eq!(f.to_vec(), vec![0.0, 1.0, 2.0, -2.0, -1.0]);
    }

    #[test]
    fn diagnostics() {
        let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 4.0, 5);
        let q: nd::Array1<C64> = nd::array![
            C64::new(0.0, 0.0),
            C64::new(1.0, 0.0),
            C64::new(0.0, 2.0),
            C64::new(1.0, 0.0),
            C64::new(0.0, 0.0),
        ];
        assert_abs_diff_eq!(density(&q), 6.0);
        assert_abs_diff_eq!(wf_norm(&q, 1.0), 6.0);
        assert_eq!(peak_index(&q), Some(2));
        assert_abs_diff_eq!(centroid(&x, &q), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fraction_beyond(&x, &q, 2.0), 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_field_has_no_centroid() {
        let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, 8);
        let q: nd::Array1<C64> = nd::Array1::zeros(8);
        assert!(centroid(&x, &q).is_nan());
        assert!(fraction_beyond(&x, &q, 0.5).is_nan());
    }
}
