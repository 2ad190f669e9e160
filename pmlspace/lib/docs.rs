//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Spectral derivatives](#spectral-derivatives)
//! - [Absorbing boundaries](#absorbing-boundaries)
//! - [Time stepping](#time-stepping)
//!
//! # Background
//! The solver evolves a complex wavefunction *ψ*(*x*, *t*) under the
//! one-dimensional time-dependent Schrödinger equation
//! ```text
//! ∂ψ
//! -- = -i H ψ
//! ∂t
//! ```
//! with a Hamiltonian made of a kinetic term and a real potential *V*(*x*),
//! ```text
//!          1   ∂²
//! H = - ---- --- + V(x)
//!        4π² ∂x²
//! ```
//! The factor 1/4π² is a consequence of measuring wavenumbers in cycles per
//! unit length (see below); it amounts to a choice of units in which a plane
//! wave exp(i κ x) carries energy (κ / 2π)². A Gaussian wave packet
//! ```text
//! ψ(x, 0) = M exp(-((x - c) / w)²) exp(i κ x)
//! ```
//! therefore travels with group velocity κ / 2π² in the direction of the sign of
//! κ, spreading as it goes.
//!
//! The domain is discretized on *N* evenly spaced points,
//! ```text
//! x[j] = x_min + j δx, j ∊ {0, ..., N - 1}
//! δx = (x_max - x_min) / (N - 1)
//! ```
//!
//! # Spectral derivatives
//! Spatial derivatives are computed pseudo-spectrally. The field is taken to
//! k-space with a discrete Fourier transform, multiplied by *i k*, and taken
//! back:
//! ```text
//! D ψ = IFFT[ i k FFT[ψ] ]
//! ```
//! with the standard frequency ordering
//! ```text
//!        ⎧  j / (N δx)        j < ⌈N / 2⌉
//! k[j] = ⎨
//!        ⎩ -(N - j) / (N δx)  otherwise
//! ```
//! Because *k* is in cycles rather than radians, *D* = (1/2π) ∂/∂x, and two
//! applications give the kinetic term above. The transform treats the grid as
//! periodic with period *N* δx, so without an absorbing layer a packet leaving
//! one edge re-enters at the other.
//!
//! # Absorbing boundaries
//! Near the edges, the coordinate is stretched into the complex plane[^1],
//! ```text
//! ∂     1         ∂
//! -- → -------- --
//! ∂x   1 + σ e^{iγ} ∂x
//! ```
//! where σ(*x*) is zero in the interior and rises to 1 at each edge over a
//! margin of relative width *W*:
//! ```text
//!         ⎛ |2 x_n - 1| - 1 + 2W ⎞^p
//! σ(x) = ⎜ ---------------------- ⎟        x_n = (x - x_min) / (x_max - x_min)
//!         ⎝          2W          ⎠
//! ```
//! clamped to [0, 1] and raised to the shaping exponent *p*. For γ = π/2 the
//! stretching is purely imaginary and outgoing waves decay exponentially
//! inside the layer without reflecting off its inner edge (in the continuum
//! limit).
//!
//! The layer is folded directly into the kinetic operator: the factor
//! *P* = 1/(1 + σ e^{iγ}) is applied after each of the two first
//! derivatives,
//! ```text
//! H ψ = -P D (P D ψ) + V ψ
//! ```
//! so that no separate damping pass is needed. Where σ = 0, *P* is exactly 1
//! and the interior dynamics are untouched.
//!
//! # Time stepping
//! The semi-discrete system d*ψ*/d*t* = *f*(*ψ*) is advanced with one of three
//! explicit fixed-step schemes:
//! ```text
//! Euler:  ψ ← ψ + δt f(ψ)
//! RK2:    ψ ← ψ + δt f(ψ + δt/2 f(ψ))
//! RK4:    ψ ← ψ + δt/6 (k1 + 2 k2 + 2 k3 + k4)
//! ```
//! Since *H* (without the layer) has real eigenvalues *E*, the relevant
//! stability criterion is whether *i* δ*t* *E* lies inside each scheme's
//! stability region. Euler's region excludes the entire imaginary axis, so it
//! always amplifies; the midpoint scheme amplifies weakly (|*R*|² = 1 +
//! (δ*t E*)⁴/4); RK4 is stable for |δ*t E*| ≤ 2√2, with a norm defect of order
//! (δ*t E*)⁶ per step. The largest kinetic eigenvalue on the grid is 1/(4 δx²),
//! so the condition for RK4 reads roughly
//! ```text
//!  δt
//! --- + δt max(V) ≤ 2√2
//! 4δx²
//! ```
//! The quantity δt/δx² is reported as the CFL number.
//!
//! [^1]: S. G. Johnson, "Notes on Perfectly Matched Layers (PMLs)."
//! arXiv:2108.05348
