//! Definite integration via the composite trapezoidal rule.
//!
//! Sampled functions are integrated directly with [`trapz`] or
//! [`integrate_samples`]; continuous functions are integrated with
//! [`integrate_adaptive`], which refines a regular grid until a Richardson
//! estimate of the truncation error falls below a tolerance.
//!
//! ```
//! use ndarray as nd;
//! use nmethods::quad::integrate_samples;
//!
//! let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 10.0, 11);
//! let y = x.mapv(|xk| 2.0 * xk + 1.0);
//! let area = integrate_samples(&y, Some(&x), None).unwrap();
//! assert!((area - 110.0).abs() < 1e-12);
//! ```

use ndarray as nd;
use num_traits::Float;
use crate::{
    Arr1,
    error::{ ExclusiveError, LengthError, OrderError, QuadError, SizeError },
    DEF_EPSILON,
    DEF_MAXITERS,
};

pub type QuadResult<T> = Result<T, QuadError>;

// relative tolerance under which abscissa spacings are considered equal
const EVEN_RTOL: f64 = 1e-9;

/// Describes the abscissas associated with a set of function samples.
#[derive(Copy, Clone, Debug)]
pub enum Sampling<'a> {
    /// Explicit abscissas; spacings are computed individually unless they are
    /// all found to be equal.
    Points(nd::ArrayView1<'a, f64>),
    /// Explicit abscissas assumed to be evenly spaced; only the first spacing
    /// is used.
    EvenPoints(nd::ArrayView1<'a, f64>),
    /// Evenly spaced samples with a fixed step.
    Step(f64),
}

/// Output of an adaptive integration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Refined {
    /// Number of subintervals in the final partition.
    pub n: usize,
    /// Raw trapezoidal estimate on the final partition.
    pub estimate: f64,
    /// Richardson-extrapolated estimate.
    pub refined: f64,
}

/// Unchecked trapezoidal rule on evenly spaced samples of any float type.
///
/// *Panics if `y` has length less than 2*.
pub fn trapz_uniform<S, A>(y: &Arr1<S>, dx: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let n: usize = y.len();
    let two = A::one() + A::one();
    let inner = y.iter().skip(1).take(n - 2).fold(A::zero(), |acc, yk| acc + *yk);
    dx * ((y[0] + y[n - 1]) / two + inner)
}

// trapezoidal rule on arbitrary samples; assumes equal lengths >= 2
fn trapz_uneven<S, T>(y: &Arr1<S>, x: &Arr1<T>) -> f64
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    x.iter().zip(x.iter().skip(1))
        .zip(y.iter().zip(y.iter().skip(1)))
        .map(|((xk, xkp1), (yk, ykp1))| (xkp1 - xk) * (yk + ykp1) / 2.0)
        .sum()
}

fn is_even<S>(x: &Arr1<S>) -> bool
where S: nd::Data<Elem = f64>
{
    let h0 = x[1] - x[0];
    x.iter().zip(x.iter().skip(1))
        .all(|(xk, xkp1)| ((xkp1 - xk) - h0).abs() <= EVEN_RTOL * h0.abs())
}

/// Integrate samples `y` using the composite trapezoidal rule.
///
/// For [`Sampling::Points`], evenly spaced abscissas take the fast path
/// `h * ((y[0] + y[n - 1]) / 2 + y[1] + ... + y[n - 2])`; otherwise each
/// trapezoid uses its own spacing. The result is exact for piecewise-linear
/// data.
pub fn trapz<S>(y: &Arr1<S>, sampling: Sampling<'_>) -> QuadResult<f64>
where S: nd::Data<Elem = f64>
{
    SizeError::check(y, 2)?;
    match sampling {
        Sampling::Points(x) => {
            LengthError::check(y, &x)?;
            OrderError::check(&x)?;
            if is_even(&x) {
                Ok(trapz_uniform(y, x[1] - x[0]))
            } else {
                Ok(trapz_uneven(y, &x))
            }
        },
        Sampling::EvenPoints(x) => {
            LengthError::check(y, &x)?;
            QuadError::check_step(x[1] - x[0])?;
            Ok(trapz_uniform(y, x[1] - x[0]))
        },
        Sampling::Step(dx) => {
            QuadError::check_step(dx)?;
            Ok(trapz_uniform(y, dx))
        },
    }
}

/// Integrate samples `y` using the composite trapezoidal rule, where exactly
/// one of explicit abscissas `x` or a uniform `spacing` must be given.
///
/// Returns [`QuadError::Exclusive`] if both or neither are given. See
/// [`trapz`].
pub fn integrate_samples<S, T>(
    y: &Arr1<S>,
    x: Option<&Arr1<T>>,
    spacing: Option<f64>,
) -> QuadResult<f64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    match (x, spacing) {
        (Some(x), None) => trapz(y, Sampling::Points(x.view())),
        (None, Some(dx)) => trapz(y, Sampling::Step(dx)),
        _ => Err(ExclusiveError("x", "spacing").into()),
    }
}

/// An integrator for continuous functions over a finite interval.
pub trait Integrator {
    /// Integrate `f` from `lo` to `hi`.
    fn integrate<F>(&self, f: F, lo: f64, hi: f64) -> QuadResult<Refined>
    where F: FnMut(f64) -> f64;
}

/// Adaptive trapezoidal integration with Richardson extrapolation.
///
/// The number of subintervals starts at 1 and is doubled until the
/// correction `(T(2n) - T(n)) / 3` has magnitude below `tolerance`, for at
/// most `maxiters` doublings.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Richardson {
    pub tolerance: f64,
    pub maxiters: usize,
}

impl Default for Richardson {
    fn default() -> Self {
        Self { tolerance: DEF_EPSILON, maxiters: DEF_MAXITERS }
    }
}

impl Richardson {
    /// Create a new integrator, checking the tolerance and iteration cap.
    pub fn new(tolerance: f64, maxiters: usize) -> QuadResult<Self> {
        QuadError::check_epsilon(tolerance)?;
        QuadError::check_maxiters(maxiters)?;
        Ok(Self { tolerance, maxiters })
    }
}

impl Integrator for Richardson {
    fn integrate<F>(&self, mut f: F, lo: f64, hi: f64) -> QuadResult<Refined>
    where F: FnMut(f64) -> f64
    {
        QuadError::check_epsilon(self.tolerance)?;
        QuadError::check_maxiters(self.maxiters)?;
        if !lo.is_finite() || !hi.is_finite() {
            return Err(QuadError::BadBounds(lo, hi));
        }

        let mut n: usize = 1;
        let mut h: f64 = hi - lo;
        let mut est: f64 = h * (f(lo) + f(hi)) / 2.0;
        let mut est_next: f64;
        let mut mid: f64;
        let mut d: f64 = f64::NAN;
        for _ in 0..self.maxiters {
            // halve the step; the new nodes are the midpoints of the old
            // partition
            mid = (0..n).map(|k| f(lo + (k as f64 + 0.5) * h)).sum();
            est_next = est / 2.0 + h / 2.0 * mid;
            n *= 2;
            h /= 2.0;
            d = (est_next - est) / 3.0;
            if !est_next.is_finite() { break; }
            if d.abs() < self.tolerance {
                return Ok(Refined { n, estimate: est_next, refined: est_next + d });
            }
            est = est_next;
        }
        Err(QuadError::Divergent { iters: self.maxiters, correction: d })
    }
}

/// Integrate `f` from `lo` to `hi` with the trapezoidal rule, doubling the
/// number of subintervals until the Richardson correction is smaller than
/// `tolerance`.
///
/// Returns [`QuadError::Divergent`] if this does not happen within the
/// default cap of doublings. See [`Richardson`].
pub fn integrate_adaptive<F>(f: F, lo: f64, hi: f64, tolerance: f64)
    -> QuadResult<Refined>
where F: FnMut(f64) -> f64
{
    Richardson::new(tolerance, DEF_MAXITERS)?.integrate(f, lo, hi)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use approx::assert_relative_eq;
    use ndarray as nd;
    use crate::error::ErrorKind;
    use super::*;

    fn line(x: &nd::Array1<f64>) -> nd::Array1<f64> {
        x.mapv(|xk| 2.0 * xk + 1.0)
    }

    #[test]
    fn linear_exact_even() {
        for n in [2, 3, 11, 1000] {
            let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 10.0, n);
            let y = line(&x);
            let area = integrate_samples(&y, Some(&x), None).unwrap();
            assert_relative_eq!(area, 110.0, max_relative = 1e-12);
            let dx = x[1] - x[0];
            let area = integrate_samples::<_, nd::OwnedRepr<f64>>(&y, None, Some(dx))
                .unwrap();
            assert_relative_eq!(area, 110.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn linear_exact_uneven() {
        let x = nd::array![0.0, 0.1, 0.5, 2.0, 2.25, 7.0, 9.9, 10.0];
        let y = line(&x);
        let area = integrate_samples(&y, Some(&x), None).unwrap();
        assert_relative_eq!(area, 110.0, max_relative = 1e-12);
        let area = trapz(&y, Sampling::Points(x.view())).unwrap();
        assert_relative_eq!(area, 110.0, max_relative = 1e-12);
    }

    #[test]
    fn even_points_uses_first_spacing() {
        let x = nd::array![0.0, 1.0, 2.0, 4.0];
        let y = nd::array![1.0, 1.0, 1.0, 1.0];
        assert_relative_eq!(trapz(&y, Sampling::EvenPoints(x.view())).unwrap(), 3.0);
        assert_relative_eq!(trapz(&y, Sampling::Points(x.view())).unwrap(), 4.0);
    }

    #[test]
    fn uniform_single_precision() {
        let y: nd::Array1<f32> = nd::array![1.0, 3.0, 5.0, 7.0];
        assert_relative_eq!(trapz_uniform(&y, 0.5_f32), 6.0_f32);
    }

    #[test]
    fn exclusive_arguments() {
        let x = nd::array![0.0, 1.0];
        let y = nd::array![1.0, 1.0];
        let err = integrate_samples(&y, Some(&x), Some(1.0)).unwrap_err();
        assert!(matches!(err, QuadError::Exclusive(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = integrate_samples::<_, nd::OwnedRepr<f64>>(&y, None, None)
            .unwrap_err();
        assert!(matches!(err, QuadError::Exclusive(_)));
    }

    #[test]
    fn bad_samples() {
        let y = nd::array![1.0, 2.0, 3.0];
        let x = nd::array![0.0, 1.0];
        assert!(matches!(
            integrate_samples(&y, Some(&x), None),
            Err(QuadError::Length(_))
        ));
        let x = nd::array![0.0, 2.0, 1.0];
        assert!(matches!(
            integrate_samples(&y, Some(&x), None),
            Err(QuadError::Order(_))
        ));
        let y1 = nd::array![1.0];
        assert!(matches!(trapz(&y1, Sampling::Step(0.1)), Err(QuadError::Size(_))));
        assert!(matches!(trapz(&y, Sampling::Step(-0.1)), Err(QuadError::BadStep(_))));
    }

    #[test]
    fn adaptive_sine() {
        let res = integrate_adaptive(f64::sin, 0.0, PI, 1e-6).unwrap();
        assert!((res.refined - 2.0).abs() < 1e-6);
        assert!((res.estimate - 2.0).abs() < 1e-4);
        assert!(res.n.is_power_of_two());
        assert!(res.n <= 1 << DEF_MAXITERS);
    }

    #[test]
    fn adaptive_counts_evaluations() {
        let mut calls: usize = 0;
        let res = Richardson::default()
            .integrate(|x| { calls += 1; x.exp() }, 0.0, 1.0)
            .unwrap();
        assert_relative_eq!(res.refined, 1.0_f64.exp() - 1.0, epsilon = 1e-6);
        // every node of the final partition is evaluated exactly once
        assert_eq!(calls, res.n + 1);
    }

    #[test]
    fn adaptive_polynomial_exact() {
        // trapezoid error for quadratics is pure h², so a single
        // extrapolation is exact
        let res = integrate_adaptive(|x| x * x, 0.0, 3.0, 1e-8).unwrap();
        assert_relative_eq!(res.refined, 9.0, epsilon = 1e-9);
    }

    #[test]
    fn adaptive_divergent() {
        let err = Richardson::new(1e-12, 3).unwrap()
            .integrate(f64::sin, 0.0, PI)
            .unwrap_err();
        assert!(matches!(err, QuadError::Divergent { iters: 3, .. }));
        assert_eq!(err.kind(), ErrorKind::DivergentIntegration);

        let err = integrate_adaptive(|x: f64| x.recip(), 0.0, 1.0, 1e-6)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivergentIntegration);
    }

    #[test]
    fn adaptive_bad_config() {
        assert!(matches!(
            integrate_adaptive(f64::sin, 0.0, 1.0, 0.0),
            Err(QuadError::BadEpsilon(_))
        ));
        assert!(matches!(Richardson::new(1e-6, 0), Err(QuadError::BadMaxiters(0))));
        assert!(matches!(
            integrate_adaptive(f64::sin, 0.0, f64::INFINITY, 1e-6),
            Err(QuadError::BadBounds(..))
        ));
    }
}
