//! High-level solver tying together the grid, evolution operator, integrators,
//! and the wavefunction itself.
//!
//! The solver never schedules itself. A caller-owned loop decides when to call
//! [`Solver::iterate`] (or [`Solver::advance`]) and [`Solver::snapshot`];
//! stopping the simulation is simply not calling them anymore. Every
//! parameter edit goes through `&mut self`, so an edit always completes before
//! the next step can run.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    RK4_IMAG_LIMIT,
    error::{ ParamError, SimError },
    config::{ Config, IntegrationParams },
    grid::Grid,
    hamiltonian::Hamiltonian,
    integrate::{ Integrators, Method },
    pml::PmlParams,
    potential::PotentialParams,
    pulse::{ self, PulseParams },
    utils::density,
};

pub type SimResult<T> = Result<T, SimError>;

/// Read-only projection of the solver state for rendering or output.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// Simulation time.
    pub t: f64,
    /// Sample positions.
    pub x: nd::Array1<f64>,
    /// Real part of the wavefunction.
    pub real: nd::Array1<f64>,
    /// Imaginary part of the wavefunction.
    pub imag: nd::Array1<f64>,
    /// `+|ψ|`.
    pub plus_abs: nd::Array1<f64>,
    /// `-|ψ|`.
    pub minus_abs: nd::Array1<f64>,
    /// Tabulated potential.
    pub potential: nd::Array1<f64>,
    /// Absorbing layer profile `σ`.
    pub pml_profile: nd::Array1<f64>,
}

/// A wavefunction evolving under a [`Hamiltonian`].
#[derive(Debug)]
pub struct Solver {
    grid: Grid,
    config: Config,
    q: nd::Array1<C64>,
    H: Hamiltonian,
    integrators: Integrators<C64>,
}

impl Solver {
    /// Build the grid, tables, and integrators described by `config`, and
    /// initialize the wavefunction from its pulses.
    pub fn new(config: &Config) -> SimResult<Self> {
        config.validate()?;
        let grid = Grid::new(config.grid.xmin, config.grid.xmax, config.grid.n)?;
        let H = Hamiltonian::new(&grid, &config.potential, &config.pml)?;
        let integrators = Integrators::new(
            grid.len(), config.integration.dt, config.integration.method)?;
        let q = pulse::initialize(&grid, &config.pulses())?;
        let solver = Self { grid, config: config.clone(), q, H, integrators };
        log::info!(
            "solver: {} points on [{}, {}], dx = {:.3e}, CFL number = {:.3e}",
            solver.grid.len(),
            solver.grid.xmin(),
            solver.grid.xmax(),
            solver.grid.dx(),
            solver.cfl_number(),
        );
        solver.check_stability();
        Ok(solver)
    }

    /// The sampling grid.
    pub fn grid(&self) -> &Grid { &self.grid }

    /// Parameters currently in effect.
    pub fn config(&self) -> &Config { &self.config }

    /// The wavefunction.
    pub fn state(&self) -> &nd::Array1<C64> { &self.q }

    /// The evolution operator.
    pub fn hamiltonian(&self) -> &Hamiltonian { &self.H }

    /// Time elapsed since the last (re)initialization.
    pub fn time(&self) -> f64 { self.integrators.time() }

    /// Selected integration method.
    pub fn method(&self) -> Method { self.integrators.method() }

    /// Current time step.
    pub fn dt(&self) -> f64 { self.integrators.dt() }

    /// Sum of `|ψ|²` over the grid.
    pub fn density(&self) -> f64 { density(&self.q) }

    /// `dt / dx²`.
    pub fn cfl_number(&self) -> f64 {
        self.integrators.dt() / self.grid.dx().powi(2)
    }

    // the largest kinetic eigenvalue is 1 / (4 dx²) since wavenumbers are in
    // cycles; the potential adds its peak
    fn check_stability(&self) {
        let vmax = self.H.potential().iter().copied().fold(0.0, f64::max);
        let reach = self.cfl_number() / 4.0 + self.dt() * vmax;
        if reach > RK4_IMAG_LIMIT {
            log::warn!(
                "solver: dt * max|E| = {:.3} exceeds the RK4 stability limit \
                {:.3}; expect the solution to blow up",
                reach,
                RK4_IMAG_LIMIT,
            );
        }
    }

    /// Recompute the potential and absorbing layer from the stored parameters,
    /// synthesize the wavefunction from both pulses, and reset time to zero.
    ///
    /// Every stored parameter is checked before anything is recomputed, so
    /// nothing changes if one is rejected.
    pub fn reinitialize(&mut self) -> Result<(), ParamError> {
        self.config.potential.validate()?;
        self.config.pml.validate()?;
        self.config.pulses().iter().try_for_each(PulseParams::validate)?;
        self.H.set_potential(&self.grid, &self.config.potential)?;
        self.H.set_pml(&self.grid, &self.config.pml)?;
        pulse::initialize_into(&self.grid, &self.config.pulses(), &mut self.q)?;
        self.integrators.set_time(0.0);
        log::info!("solver: reinitialized; density = {:.6e}", self.density());
        Ok(())
    }

    /// Replace both pulses and [reinitialize][Self::reinitialize].
    ///
    /// Nothing changes if either pulse is rejected.
    pub fn set_pulses(&mut self, pulse: PulseParams, pulse2: PulseParams)
        -> Result<(), ParamError>
    {
        pulse.validate()?;
        pulse2.validate()?;
        self.config.pulse = pulse;
        self.config.pulse2 = pulse2;
        self.reinitialize()
    }

    /// Recompute the potential. The wavefunction is not reset.
    pub fn set_potential(&mut self, params: PotentialParams)
        -> Result<(), ParamError>
    {
        self.H.set_potential(&self.grid, &params)?;
        self.config.potential = params;
        self.check_stability();
        Ok(())
    }

    /// Recompute the absorbing layer. The wavefunction is not reset.
    pub fn set_pml(&mut self, params: PmlParams) -> Result<(), ParamError> {
        self.H.set_pml(&self.grid, &params)?;
        self.config.pml = params;
        Ok(())
    }

    /// Replace all integration parameters at once.
    pub fn set_integration(&mut self, params: IntegrationParams)
        -> Result<(), ParamError>
    {
        params.validate()?;
        self.set_time_step(params.dt)?;
        self.set_method(params.method);
        self.config.integration.steps_per_iter = params.steps_per_iter;
        Ok(())
    }

    /// Select the integration method. The wavefunction and time are kept.
    pub fn set_method(&mut self, method: Method) {
        if method != self.method() {
            log::debug!("solver: switching method {} -> {}", self.method(), method);
        }
        self.integrators.set_method(method);
        self.config.integration.method = method;
    }

    /// Set the time step used by subsequent steps.
    pub fn set_time_step(&mut self, dt: f64) -> Result<(), ParamError> {
        self.integrators.set_dt(dt)?;
        self.config.integration.dt = dt;
        log::debug!("solver: dt = {:.3e}", dt);
        self.check_stability();
        Ok(())
    }

    /// Set the number of steps taken by [`iterate`][Self::iterate].
    pub fn set_steps_per_iter(&mut self, steps: usize) -> Result<(), ParamError> {
        ParamError::check_steps_per_iter(steps)?;
        self.config.integration.steps_per_iter = steps;
        Ok(())
    }

    /// Take `count` steps with the selected method.
    pub fn advance(&mut self, count: usize) {
        self.integrators.steps(count, &mut self.q, &mut self.H);
    }

    /// Take the configured number of steps per iteration.
    pub fn iterate(&mut self) {
        self.advance(self.config.integration.steps_per_iter);
    }

    /// Project the current state into plottable arrays.
    pub fn snapshot(&self) -> Snapshot {
        let abs: nd::Array1<f64> = self.q.mapv(|qk| qk.norm());
        Snapshot {
            t: self.time(),
            x: self.grid.x().clone(),
            real: self.q.mapv(|qk| qk.re),
            imag: self.q.mapv(|qk| qk.im),
            minus_abs: -&abs,
            plus_abs: abs,
            potential: self.H.potential().clone(),
            pml_profile: self.H.pml().profile().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;
    use approx::assert_abs_diff_eq;

    fn free_config() -> Config {
        let mut config = Config::default();
        config.potential.magnitude = 0.0;
        config.pml.width = 0.0;
        config
    }

    #[test]
    fn construction_errors() {
        let mut config = Config::default();
        config.grid.n = 1;
        assert!(matches!(Solver::new(&config), Err(SimError::Grid(GridError::BadCount(1)))));
        let mut config = Config::default();
        config.grid.xmax = config.grid.xmin;
        assert!(matches!(Solver::new(&config), Err(SimError::Grid(GridError::BadBounds(..)))));
        let mut config = Config::default();
        config.integration.dt = 0.0;
        assert!(matches!(Solver::new(&config), Err(SimError::Param(ParamError::BadTimeStep(_)))));
    }

    #[test]
    fn snapshot_projects_state() {
        let solver = Solver::new(&Config::default()).unwrap();
        let snap = solver.snapshot();
        assert_eq!(snap.t, 0.0);
        assert_eq!(snap.x.len(), 512);
        solver.state().iter().enumerate()
            .for_each(|(i, qk)| {
                assert_eq!(snap.real[i], qk.re);
                assert_eq!(snap.imag[i], qk.im);
                assert_eq!(snap.plus_abs[i], qk.norm());
                assert_eq!(snap.minus_abs[i], -qk.norm());
            });
        assert_eq!(&snap.potential, solver.hamiltonian().potential());
        assert_eq!(&snap.pml_profile, solver.hamiltonian().pml().profile());
    }

    #[test]
    fn reinitialize_resets_time_and_state() {
        let mut solver = Solver::new(&free_config()).unwrap();
        let q0 = solver.state().clone();
        solver.iterate();
        assert_abs_diff_eq!(solver.time(), 5e-4, epsilon = 1e-15);
        assert_ne!(solver.state(), &q0);
        solver.reinitialize().unwrap();
        assert_eq!(solver.time(), 0.0);
        assert_eq!(solver.state(), &q0);
    }

    #[test]
    fn failed_reinitialize_is_all_or_nothing() {
        let mut solver = Solver::new(&Config::default()).unwrap();
        solver.advance(3);
        let q = solver.state().clone();
        let t = solver.time();
        let V = solver.hamiltonian().potential().clone();
        let f = solver.hamiltonian().pml().factor().clone();
        // potential would be recomputed fine; the pulse check comes later
        solver.config.potential.magnitude = 2000.0;
        solver.config.pulse2.width = -1.0;
        assert!(matches!(
            solver.reinitialize(),
            Err(ParamError::NegativeWidth("pulse", _)),
        ));
        assert_eq!(solver.state(), &q);
        assert_eq!(solver.time(), t);
        assert_eq!(solver.hamiltonian().potential(), &V);
        assert_eq!(solver.hamiltonian().pml().factor(), &f);
    }

    #[test]
    fn rejected_edits_change_nothing() {
        let mut solver = Solver::new(&Config::default()).unwrap();
        solver.advance(3);
        let q = solver.state().clone();
        let config = solver.config().clone();
        let V = solver.hamiltonian().potential().clone();
        let bad_pulse = PulseParams { width: -1.0, ..PulseParams::default() };
        assert!(solver.set_pulses(PulseParams::default(), bad_pulse).is_err());
        assert!(solver.set_potential(PotentialParams { width: -0.1, ..config.potential }).is_err());
        assert!(solver.set_pml(PmlParams { width: -0.1, ..config.pml }).is_err());
        assert!(solver.set_time_step(-1e-4).is_err());
        assert!(solver.set_steps_per_iter(0).is_err());
        assert!(solver.set_integration(IntegrationParams { dt: 0.0, ..config.integration }).is_err());
        assert_eq!(solver.state(), &q);
        assert_eq!(solver.config(), &config);
        assert_eq!(solver.hamiltonian().potential(), &V);
    }

    #[test]
    fn potential_edit_keeps_state() {
        let mut solver = Solver::new(&Config::default()).unwrap();
        solver.advance(2);
        let q = solver.state().clone();
        let t = solver.time();
        let params = PotentialParams { magnitude: 5000.0, ..solver.config().potential };
        solver.set_potential(params).unwrap();
        assert_eq!(solver.state(), &q);
        assert_eq!(solver.time(), t);
        assert_eq!(solver.config().potential.magnitude, 5000.0);
        assert_abs_diff_eq!(solver.hamiltonian().potential()[256], 5000.0, epsilon = 5.0);
    }

    #[test]
    fn steps_per_iter_controls_iterate() {
        let mut solver = Solver::new(&free_config()).unwrap();
        solver.set_steps_per_iter(3).unwrap();
        solver.set_time_step(2e-5).unwrap();
        solver.iterate();
        assert_abs_diff_eq!(solver.time(), 6e-5, epsilon = 1e-15);
        solver.set_integration(IntegrationParams {
            dt: 1e-5,
            steps_per_iter: 2,
            method: Method::RK2,
        }).unwrap();
        solver.iterate();
        assert_eq!(solver.method(), Method::RK2);
        assert_abs_diff_eq!(solver.time(), 8e-5, epsilon = 1e-15);
    }
}
