//! Fixed-step explicit integrators for `dy/dt = f(y, t)` over flat state
//! vectors.
//!
//! Each integrator owns the scratch space its stages need, sized at
//! construction, and advances a caller-owned state in place. The state is
//! never held by the integrator, so several integrators can take turns on the
//! same buffer.
//!
//! ```
//! use ndarray as nd;
//! use pmlspace::integrate::{ Integrator, RK4 };
//!
//! // dy/dt = -y
//! let mut rk4: RK4<f64> = RK4::new(1, 0.01).unwrap();
//! let mut y = nd::array![1.0];
//! let mut f = |dy: &mut nd::Array1<f64>, y: &nd::Array1<f64>, _t: f64| {
//!     dy.assign(&(-y));
//! };
//! rk4.steps(100, &mut y, &mut f);
//! assert!((y[0] - (-1.0_f64).exp()).abs() < 1e-9);
//! assert!((rk4.time() - 1.0).abs() < 1e-12);
//! ```

use std::{ fmt, ops::{ Add, Mul }, str::FromStr };
use ndarray as nd;
use num_traits::Zero;
use serde::{ Deserialize, Serialize };
use crate::error::ParamError;

pub type IResult<T> = Result<T, ParamError>;

/// Element types integrators can operate on.
pub trait Elem: Copy + Zero + Add<Output = Self> + Mul<f64, Output = Self> {}

impl<A> Elem for A
where A: Copy + Zero + Add<Output = A> + Mul<f64, Output = A>
{ }

/// A time derivative `f(y, t)`, evaluated into a preallocated output buffer.
pub trait Rhs<A> {
    /// Write `f(y, t)` into `dy`.
    fn eval(&mut self, dy: &mut nd::Array1<A>, y: &nd::Array1<A>, t: f64);
}

impl<A, F> Rhs<A> for F
where F: FnMut(&mut nd::Array1<A>, &nd::Array1<A>, f64)
{
    fn eval(&mut self, dy: &mut nd::Array1<A>, y: &nd::Array1<A>, t: f64) {
        self(dy, y, t)
    }
}

/// Available integration methods.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Forward Euler.
    Euler,
    /// Second-order midpoint Runge-Kutta.
    RK2,
    /// Classic fourth-order Runge-Kutta.
    RK4,
}

impl Method {
    pub const ALL: [Self; 3] = [Self::Euler, Self::RK2, Self::RK4];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Euler => "euler",
            Self::RK2 => "rk2",
            Self::RK4 => "rk4",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "euler" => Ok(Self::Euler),
            "rk2" => Ok(Self::RK2),
            "rk4" => Ok(Self::RK4),
            _ => Err(ParamError::UnknownMethod(s.to_string())),
        }
    }
}

/// Common interface to the fixed-step integrators.
pub trait Integrator<A> {
    /// The method implemented.
    fn method(&self) -> Method;

    /// Current time step.
    fn dt(&self) -> f64;

    /// Set the time step used by subsequent steps.
    fn set_dt(&mut self, dt: f64) -> IResult<()>;

    /// Current internal time.
    fn time(&self) -> f64;

    /// Set the internal time.
    fn set_time(&mut self, t: f64);

    /// Advance `y` by a single step, in place.
    ///
    /// *Panics if `y` does not have the length the integrator was built for*.
    fn step<F>(&mut self, y: &mut nd::Array1<A>, f: &mut F)
    where F: Rhs<A>;

    /// Advance `y` by `count` steps, in place.
    fn steps<F>(&mut self, count: usize, y: &mut nd::Array1<A>, f: &mut F)
    where F: Rhs<A>
    {
        for _ in 0..count { self.step(y, f); }
    }
}

// perform the operation `out = a + v * b` in place
fn axpy_into<A: Elem>(
    out: &mut nd::Array1<A>,
    a: &nd::Array1<A>,
    v: f64,
    b: &nd::Array1<A>,
) {
    nd::Zip::from(out).and(a).and(b)
        .for_each(|ok, ak, bk| { *ok = *ak + *bk * v; });
}

// perform the operation `a += v * b` in place
fn axpy<A: Elem>(a: &mut nd::Array1<A>, v: f64, b: &nd::Array1<A>) {
    nd::Zip::from(a).and(b)
        .for_each(|ak, bk| { *ak = *ak + *bk * v; });
}

macro_rules! clock_impls {
    () => {
        fn dt(&self) -> f64 { self.dt }

        fn set_dt(&mut self, dt: f64) -> IResult<()> {
            ParamError::check_dt(dt)?;
            self.dt = dt;
            Ok(())
        }

        fn time(&self) -> f64 { self.t }

        fn set_time(&mut self, t: f64) { self.t = t; }
    }
}

/// Forward Euler, `y += dt f(y, t)`.
#[derive(Clone, Debug)]
pub struct Euler<A> {
    dt: f64,
    t: f64,
    k1: nd::Array1<A>,
}

impl<A: Elem> Euler<A> {
    /// Create a new integrator for states of length `n`.
    pub fn new(n: usize, dt: f64) -> IResult<Self> {
        ParamError::check_dt(dt)?;
        Ok(Self { dt, t: 0.0, k1: nd::Array1::zeros(n) })
    }
}

impl<A: Elem> Integrator<A> for Euler<A> {
    fn method(&self) -> Method { Method::Euler }

    clock_impls!();

    fn step<F>(&mut self, y: &mut nd::Array1<A>, f: &mut F)
    where F: Rhs<A>
    {
        f.eval(&mut self.k1, y, self.t);
        axpy(y, self.dt, &self.k1);
        self.t += self.dt;
    }
}

/// Midpoint Runge-Kutta:
/// ```text
/// k1 = f(y, t)
/// k2 = f(y + dt/2 k1, t + dt/2)
/// y += dt k2
/// ```
#[derive(Clone, Debug)]
pub struct RK2<A> {
    dt: f64,
    t: f64,
    k1: nd::Array1<A>,
    k2: nd::Array1<A>,
    y_temp: nd::Array1<A>,
}

impl<A: Elem> RK2<A> {
    /// Create a new integrator for states of length `n`.
    pub fn new(n: usize, dt: f64) -> IResult<Self> {
        ParamError::check_dt(dt)?;
        Ok(Self {
            dt,
            t: 0.0,
            k1: nd::Array1::zeros(n),
            k2: nd::Array1::zeros(n),
            y_temp: nd::Array1::zeros(n),
        })
    }
}

impl<A: Elem> Integrator<A> for RK2<A> {
    fn method(&self) -> Method { Method::RK2 }

    clock_impls!();

    fn step<F>(&mut self, y: &mut nd::Array1<A>, f: &mut F)
    where F: Rhs<A>
    {
        let dth = self.dt / 2.0;
        f.eval(&mut self.k1, y, self.t);
        axpy_into(&mut self.y_temp, y, dth, &self.k1);
        f.eval(&mut self.k2, &self.y_temp, self.t + dth);
        axpy(y, self.dt, &self.k2);
        self.t += self.dt;
    }
}

/// Classic fourth-order Runge-Kutta,
/// `y += dt/6 (k1 + 2 k2 + 2 k3 + k4)`.
#[derive(Clone, Debug)]
pub struct RK4<A> {
    dt: f64,
    t: f64,
    k1: nd::Array1<A>,
    k2: nd::Array1<A>,
    k3: nd::Array1<A>,
    k4: nd::Array1<A>,
    y_temp: nd::Array1<A>,
}

impl<A: Elem> RK4<A> {
    /// Create a new integrator for states of length `n`.
    pub fn new(n: usize, dt: f64) -> IResult<Self> {
        ParamError::check_dt(dt)?;
        Ok(Self {
            dt,
            t: 0.0,
            k1: nd::Array1::zeros(n),
            k2: nd::Array1::zeros(n),
            k3: nd::Array1::zeros(n),
            k4: nd::Array1::zeros(n),
            y_temp: nd::Array1::zeros(n),
        })
    }
}

impl<A: Elem> Integrator<A> for RK4<A> {
    fn method(&self) -> Method { Method::RK4 }

    clock_impls!();

    fn step<F>(&mut self, y: &mut nd::Array1<A>, f: &mut F)
    where F: Rhs<A>
    {
        let dt = self.dt;
        let dth = dt / 2.0;
        f.eval(&mut self.k1, y, self.t);
        axpy_into(&mut self.y_temp, y, dth, &self.k1);
        f.eval(&mut self.k2, &self.y_temp, self.t + dth);
        axpy_into(&mut self.y_temp, y, dth, &self.k2);
        f.eval(&mut self.k3, &self.y_temp, self.t + dth);
        axpy_into(&mut self.y_temp, y, dt, &self.k3);
        f.eval(&mut self.k4, &self.y_temp, self.t + dt);
        nd::Zip::from(y)
            .and(&self.k1).and(&self.k2).and(&self.k3).and(&self.k4)
            .for_each(|yk, k1k, k2k, k3k, k4k| {
                *yk = *yk
                    + (*k1k + (*k2k + *k3k) * 2.0 + *k4k) * (dt / 6.0);
            });
        self.t += dt;
    }
}

/// All three integrators over the same state length, with one of them
/// selected.
///
/// Switching methods carries the current time over and never touches the
/// state or reallocates.
#[derive(Clone, Debug)]
pub struct Integrators<A> {
    method: Method,
    euler: Euler<A>,
    rk2: RK2<A>,
    rk4: RK4<A>,
}

impl<A: Elem> Integrators<A> {
    /// Create all three integrators for states of length `n`.
    pub fn new(n: usize, dt: f64, method: Method) -> IResult<Self> {
        Ok(Self {
            method,
            euler: Euler::new(n, dt)?,
            rk2: RK2::new(n, dt)?,
            rk4: RK4::new(n, dt)?,
        })
    }

    /// The currently selected method.
    pub fn method(&self) -> Method { self.method }

    /// Select the method used by subsequent steps.
    pub fn set_method(&mut self, method: Method) {
        let t = self.time();
        self.method = method;
        self.set_time(t);
    }

    /// Current time step.
    pub fn dt(&self) -> f64 {
        match self.method {
            Method::Euler => self.euler.dt(),
            Method::RK2 => self.rk2.dt(),
            Method::RK4 => self.rk4.dt(),
        }
    }

    /// Set the time step of every integrator.
    pub fn set_dt(&mut self, dt: f64) -> IResult<()> {
        ParamError::check_dt(dt)?;
        self.euler.set_dt(dt)?;
        self.rk2.set_dt(dt)?;
        self.rk4.set_dt(dt)?;
        Ok(())
    }

    /// Time of the selected integrator.
    pub fn time(&self) -> f64 {
        match self.method {
            Method::Euler => self.euler.time(),
            Method::RK2 => self.rk2.time(),
            Method::RK4 => self.rk4.time(),
        }
    }

    /// Set the time of every integrator.
    pub fn set_time(&mut self, t: f64) {
        self.euler.set_time(t);
        self.rk2.set_time(t);
        self.rk4.set_time(t);
    }

    /// Advance `y` by a single step of the selected method.
    pub fn step<F>(&mut self, y: &mut nd::Array1<A>, f: &mut F)
    where F: Rhs<A>
    {
        self.steps(1, y, f);
    }

    /// Advance `y` by `count` steps of the selected method.
    pub fn steps<F>(&mut self, count: usize, y: &mut nd::Array1<A>, f: &mut F)
    where F: Rhs<A>
    {
        match self.method {
            Method::Euler => self.euler.steps(count, y, f),
            Method::RK2 => self.rk2.steps(count, y, f),
            Method::RK4 => self.rk4.steps(count, y, f),
        }
    }
}
