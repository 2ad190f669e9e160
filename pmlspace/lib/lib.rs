#![allow(non_snake_case)]

//! Provides a pseudo-spectral solver for the one-dimensional, time-dependent
//! Schrödinger equation on a finite grid, with a complex absorbing boundary
//! layer (perfectly matched layer, PML) and a family of fixed-step explicit
//! integrators.
//!
//! The solver is built from small, independently usable pieces:
//! - [`grid::Grid`]: sample positions, spacing, and the matching discrete
//!   Fourier wavenumber table
//! - [`spectral::SpectralDiff`]: FFT-based first derivative
//! - [`pml::Pml`]: tabulated complex damping/rotation factors near the edges
//! - [`potential`]: tabulated real barrier/well potentials
//! - [`pulse`]: Gaussian-enveloped plane wave initial conditions
//! - [`hamiltonian::Hamiltonian`]: the right-hand side of the equation
//! - [`integrate`]: Euler, midpoint (RK2), and classic fourth-order
//!   Runge-Kutta steppers over any flat state vector
//!
//! [`solver::Solver`] ties everything together behind the small surface a
//! caller-owned animation or batch loop needs: reinitialize, edit parameters,
//! advance, and snapshot.
//!
//! ```
//! use pmlspace::{ config::Config, solver::Solver };
//!
//! let mut config = Config::default();
//! config.potential.magnitude = 0.0;
//! let mut solver = Solver::new(&config).unwrap();
//! let d0 = solver.density();
//! solver.iterate();
//! let d1 = solver.density();
//! assert!(((d1 - d0) / d0).abs() < 1e-6);
//! ```
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod grid;
pub mod utils;
pub mod spectral;
pub mod pml;
pub mod potential;
pub mod pulse;
pub mod hamiltonian;
pub mod integrate;
pub mod config;
pub mod solver;

pub mod docs;

/// Potential magnitudes at or below this value are treated as exactly zero.
pub const NO_POTENTIAL_THRESHOLD: f64 = 1.0001;

/// Extent of the fourth-order Runge-Kutta stability region along the imaginary
/// axis.
pub(crate) const RK4_IMAG_LIMIT: f64 = 2.0 * std::f64::consts::SQRT_2;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
