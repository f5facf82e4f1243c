//! Explicit (forward) Euler integration of initial value problems.
//!
//! Three shapes of equation are supported, selected by the variant of [`Rhs`]:
//! - a single first-order equation `y' = f(x, y)`,
//! - a coupled pair of first-order equations `y1' = f1(x, y1, y2)`,
//!   `y2' = f2(x, y1, y2)`,
//! - a single second-order equation `y'' = f(x, y, y')`, which is reduced to a
//!   first-order pair in `(y, y')`.
//!
//! A run goes through three states: an [`Euler`] holds only the right-hand
//! side; [`Euler::configure`] validates an [`EulerConfig`] and lays out the
//! grid, producing a [`Configured`] run; [`Stepper::predict`] consumes that
//! run and returns a [`Trajectory`]. Configuring again starts a fresh run.
//!
//! Forward Euler is only conditionally stable. Runs whose solution becomes
//! non-finite (or exceeds an optional bound) fail with
//! [`OdeError::Divergent`].
//!
//! ```
//! use nmethods::ode::{ Euler, EulerConfig, Rhs, Stepper };
//!
//! // y' = y, y(0) = 1
//! let euler = Euler::new(Rhs::first(|_x, y| y));
//! let config = EulerConfig::new(0.0, 1.0, 1.0).count(1001);
//! let traj = euler.configure(&config).unwrap().predict().unwrap();
//! let y_end = traj.y()[traj.len() - 1];
//! assert!((y_end - 1.0_f64.exp()).abs() < 2e-3);
//! ```

use ndarray as nd;
use crate::error::{ ExclusiveError, OdeError };

pub type OdeResult<T> = Result<T, OdeError>;

// relative slack allowed when fitting a whole number of steps into [x0, xf]
const GRID_RTOL: f64 = 1e-9;

type Fn2<'f> = Box<dyn Fn(f64, f64) -> f64 + 'f>;
type Fn3<'f> = Box<dyn Fn(f64, f64, f64) -> f64 + 'f>;

/// Right-hand side of an ordinary differential equation.
pub enum Rhs<'f> {
    /// `y' = f(x, y)`
    First(Fn2<'f>),
    /// `y1' = f1(x, y1, y2)`, `y2' = f2(x, y1, y2)`
    Pair(Fn3<'f>, Fn3<'f>),
    /// `y'' = f(x, y, y')`
    Second(Fn3<'f>),
}

impl<'f> Rhs<'f> {
    /// Single first-order equation.
    pub fn first<F>(f: F) -> Self
    where F: Fn(f64, f64) -> f64 + 'f
    {
        Self::First(Box::new(f))
    }

    /// Coupled pair of first-order equations.
    pub fn pair<F, G>(f1: F, f2: G) -> Self
    where
        F: Fn(f64, f64, f64) -> f64 + 'f,
        G: Fn(f64, f64, f64) -> f64 + 'f,
    {
        Self::Pair(Box::new(f1), Box::new(f2))
    }

    /// Single second-order equation.
    pub fn second<F>(f: F) -> Self
    where F: Fn(f64, f64, f64) -> f64 + 'f
    {
        Self::Second(Box::new(f))
    }

    /// Highest derivative order appearing in the equation(s).
    pub fn order(&self) -> usize {
        match self {
            Self::First(_) | Self::Pair(..) => 1,
            Self::Second(_) => 2,
        }
    }

    /// Number of coupled equations.
    pub fn equation_count(&self) -> usize {
        match self {
            Self::First(_) | Self::Second(_) => 1,
            Self::Pair(..) => 2,
        }
    }

    fn needs_extra(&self) -> bool { !matches!(self, Self::First(_)) }
}

impl std::fmt::Debug for Rhs<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::First(_) => write!(f, "Rhs::First(..)"),
            Self::Pair(..) => write!(f, "Rhs::Pair(..)"),
            Self::Second(_) => write!(f, "Rhs::Second(..)"),
        }
    }
}

/// Initial conditions and grid for a single run.
///
/// Exactly one of `n` (number of grid points, including both ends) or `d`
/// (step size) must be set.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EulerConfig {
    /// Initial abscissa.
    pub x0: f64,
    /// Initial value of `y` (or `y1`).
    pub y0: f64,
    /// Second initial value: `y'(x0)` for second-order equations or
    /// `y2(x0)` for pairs.
    pub ey0: Option<f64>,
    /// Final abscissa.
    pub xf: f64,
    /// Number of grid points.
    pub n: Option<usize>,
    /// Step size.
    pub d: Option<f64>,
    /// Magnitude above which the solution is considered to have diverged.
    pub bound: Option<f64>,
}

impl EulerConfig {
    /// Start a configuration with no grid specification.
    pub fn new(x0: f64, y0: f64, xf: f64) -> Self {
        Self { x0, y0, ey0: None, xf, n: None, d: None, bound: None }
    }

    /// Set the second initial value.
    pub fn extra(mut self, ey0: f64) -> Self { self.ey0 = Some(ey0); self }

    /// Set the number of grid points.
    pub fn count(mut self, n: usize) -> Self { self.n = Some(n); self }

    /// Set the step size.
    pub fn step(mut self, d: f64) -> Self { self.d = Some(d); self }

    /// Set the divergence bound.
    pub fn bounded(mut self, bound: f64) -> Self {
        self.bound = Some(bound);
        self
    }

    // lay out the uniform grid over [x0, xf]
    fn grid(&self) -> OdeResult<(nd::Array1<f64>, f64)> {
        let Self { x0, xf, .. } = *self;
        if !x0.is_finite() || !xf.is_finite() || x0 == xf {
            return Err(OdeError::BadInterval(x0, xf));
        }
        match (self.n, self.d) {
            (Some(n), None) => {
                if n < 2 { return Err(OdeError::BadCount(n)); }
                let d = (xf - x0) / (n - 1) as f64;
                Ok((nd::Array1::linspace(x0, xf, n), d))
            },
            (None, Some(d)) => {
                let span = (xf - x0) / d;
                if !(span.is_finite() && span >= 1.0 - GRID_RTOL) {
                    return Err(OdeError::BadStep(d));
                }
                let n = (span * (1.0 + GRID_RTOL)).floor() as usize + 1;
                let x: nd::Array1<f64>
                    = (0..n).map(|i| x0 + i as f64 * d).collect();
                if (x[n - 1] - xf).abs() > GRID_RTOL * (xf - x0).abs() {
                    println!(
                        "ode::EulerConfig::grid: WARNING: step {} does not \
                        divide [{}, {}]; the grid stops at {}",
                        d, x0, xf, x[n - 1],
                    );
                }
                Ok((x, d))
            },
            _ => Err(ExclusiveError("n", "d").into()),
        }
    }
}

/// A forward Euler integrator for a fixed right-hand side.
#[derive(Debug)]
pub struct Euler<'f> {
    rhs: Rhs<'f>,
}

impl<'f> Euler<'f> {
    /// Create a new, unconfigured integrator.
    pub fn new(rhs: Rhs<'f>) -> Self { Self { rhs } }

    /// Like [`Self::new`], but first check that `rhs` has the declared
    /// derivative order and equation count.
    ///
    /// Supported shapes are order 1 with one or two equations and order 2
    /// with one equation.
    pub fn for_shape(order: usize, equation_count: usize, rhs: Rhs<'f>)
        -> OdeResult<Self>
    {
        let supported = matches!((order, equation_count), (1, 1) | (1, 2) | (2, 1));
        if !supported
            || rhs.order() != order
            || rhs.equation_count() != equation_count
        {
            return Err(OdeError::BadShape { order, count: equation_count });
        }
        Ok(Self::new(rhs))
    }

    /// Return the right-hand side.
    pub fn rhs(&self) -> &Rhs<'f> { &self.rhs }

    /// Validate `config` and lay out the integration grid.
    ///
    /// Returns [`OdeError::Exclusive`] unless exactly one of `config.n` or
    /// `config.d` is set, and [`OdeError::MissingInitial`] if the equation
    /// needs a second initial value that was not given.
    pub fn configure(&self, config: &EulerConfig) -> OdeResult<Configured<'_>> {
        ExclusiveError::check(&config.n, &config.d, ("n", "d"))?;
        if !config.y0.is_finite() { return Err(OdeError::BadValue(config.y0)); }
        let ey0
            = match (self.rhs.needs_extra(), config.ey0) {
                (true, None) => { return Err(OdeError::MissingInitial); },
                (true, Some(ey0)) if !ey0.is_finite() => {
                    return Err(OdeError::BadValue(ey0));
                },
                (true, Some(ey0)) => ey0,
                (false, _) => 0.0,
            };
        if let Some(b) = config.bound {
            if !(b > 0.0 && b.is_finite()) { return Err(OdeError::BadValue(b)); }
        }
        let (x, d) = config.grid()?;
        Ok(Configured { rhs: &self.rhs, x, d, init: (config.y0, ey0), bound: config.bound })
    }
}

/// A validated run, ready to be stepped.
#[derive(Debug)]
pub struct Configured<'a> {
    rhs: &'a Rhs<'a>,
    x: nd::Array1<f64>,
    d: f64,
    init: (f64, f64),
    bound: Option<f64>,
}

impl Configured<'_> {
    /// Integration grid.
    pub fn grid(&self) -> nd::ArrayView1<'_, f64> { self.x.view() }

    /// Step size.
    pub fn step(&self) -> f64 { self.d }

    /// Number of grid points.
    pub fn len(&self) -> usize { self.x.len() }

    /// Always `false`; grids have at least two points.
    pub fn is_empty(&self) -> bool { self.x.is_empty() }
}

/// A time-marching scheme that produces a full trajectory in one go.
pub trait Stepper {
    /// Run the scheme to completion.
    fn predict(self) -> OdeResult<Trajectory>;
}

fn check_value(step: usize, x: f64, value: f64, bound: Option<f64>)
    -> OdeResult<()>
{
    if !value.is_finite() || bound.is_some_and(|b| value.abs() > b) {
        Err(OdeError::Divergent { step, x, value })
    } else {
        Ok(())
    }
}

impl Stepper for Configured<'_> {
    fn predict(self) -> OdeResult<Trajectory> {
        let Self { rhs, x, d, init, bound } = self;
        let n = x.len();
        let mut y: nd::Array1<f64> = nd::Array1::zeros(n);
        let mut z: nd::Array1<f64> = nd::Array1::zeros(n);
        y[0] = init.0;
        z[0] = init.1;
        match rhs {
            Rhs::First(f) => {
                for i in 1..n {
                    y[i] = y[i - 1] + d * f(x[i - 1], y[i - 1]);
                    check_value(i, x[i], y[i], bound)?;
                }
                Ok(Trajectory::First { x, y })
            },
            Rhs::Pair(f1, f2) => {
                for i in 1..n {
                    y[i] = y[i - 1] + d * f1(x[i - 1], y[i - 1], z[i - 1]);
                    z[i] = z[i - 1] + d * f2(x[i - 1], y[i - 1], z[i - 1]);
                    check_value(i, x[i], y[i], bound)?;
                    check_value(i, x[i], z[i], bound)?;
                }
                Ok(Trajectory::Pair { x, y1: y, y2: z })
            },
            Rhs::Second(f) => {
                for i in 1..n {
                    y[i] = y[i - 1] + d * z[i - 1];
                    z[i] = z[i - 1] + d * f(x[i - 1], y[i - 1], z[i - 1]);
                    check_value(i, x[i], y[i], bound)?;
                    check_value(i, x[i], z[i], bound)?;
                }
                Ok(Trajectory::Second { x, y, dy: z })
            },
        }
    }
}

/// Output of a single run, with all arrays sharing the grid's length.
#[derive(Clone, Debug, PartialEq)]
pub enum Trajectory {
    First {
        x: nd::Array1<f64>,
        y: nd::Array1<f64>,
    },
    Pair {
        x: nd::Array1<f64>,
        y1: nd::Array1<f64>,
        y2: nd::Array1<f64>,
    },
    Second {
        x: nd::Array1<f64>,
        y: nd::Array1<f64>,
        dy: nd::Array1<f64>,
    },
}

impl Trajectory {
    /// Grid.
    pub fn x(&self) -> nd::ArrayView1<'_, f64> {
        match self {
            Self::First { x, .. } | Self::Pair { x, .. } | Self::Second { x, .. }
                => x.view(),
        }
    }

    /// Primary solution: `y` for single equations, `y1` for pairs.
    pub fn y(&self) -> nd::ArrayView1<'_, f64> {
        match self {
            Self::First { y, .. } | Self::Second { y, .. } => y.view(),
            Self::Pair { y1, .. } => y1.view(),
        }
    }

    /// Secondary solution: `y'` for second-order equations, `y2` for pairs.
    pub fn extra(&self) -> Option<nd::ArrayView1<'_, f64>> {
        match self {
            Self::First { .. } => None,
            Self::Pair { y2, .. } => Some(y2.view()),
            Self::Second { dy, .. } => Some(dy.view()),
        }
    }

    /// Number of grid points.
    pub fn len(&self) -> usize { self.x().len() }

    /// Always `false`; trajectories include at least the initial point.
    pub fn is_empty(&self) -> bool { self.x().is_empty() }

    /// Iterate over `(x, y)` rows, as written by the two-column export format.
    pub fn columns(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        let (x, y) = match self {
            Self::First { x, y } | Self::Second { x, y, .. } => (x, y),
            Self::Pair { x, y1, .. } => (x, y1),
        };
        x.iter().copied().zip(y.iter().copied())
    }
}
