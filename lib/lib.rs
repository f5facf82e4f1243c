//! Provides a small engine of classic numerical methods for real-valued,
//! one-dimensional data: linear algebra on tridiagonal systems, definite
//! integration, cubic spline interpolation, and explicit time-stepping of
//! ordinary differential equations.
//!
//! Provides implementations for the following numerical routines:
//! - Linear systems:
//!     - Thomas algorithm for tridiagonal systems
//! - Integration:
//!     - Composite trapezoidal rule over uniform and non-uniform samples
//!     - Adaptive trapezoidal rule with Richardson extrapolation
//! - Interpolation:
//!     - Natural cubic spline (second-derivative form)
//!     - Slope-continuous cubic Hermite spline (symmetric form)
//! - Differential equations:
//!     - Forward Euler for single first-order equations, coupled pairs of
//!       first-order equations, and single second-order equations
//!
//! All routines are pure functions of their inputs; configuration is passed
//! explicitly and results are returned as freshly allocated arrays.
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod tridiag;
pub mod quad;
pub mod spline;
pub mod ode;

pub mod docs;

pub(crate) const DEF_EPSILON: f64 = 1e-6;
pub(crate) const DEF_MAXITERS: usize = 24;
pub(crate) const DEF_PIVOT_EPSILON: f64 = f64::MIN_POSITIVE;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
