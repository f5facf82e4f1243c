//! Cubic spline interpolation of sampled functions.
//!
//! Two formulations are available, selected by [`SplineForm`]:
//! - [`SplineForm::Usual`]: the natural cubic spline written in terms of the
//!   second derivatives at the knots, with each segment stored as a cubic
//!   polynomial shifted to its right-hand knot.
//! - [`SplineForm::Symmetric`]: a Hermite-style spline written in terms of the
//!   slopes at the knots, with each segment stored as a correction to linear
//!   interpolation in a normalized coordinate.
//!
//! Both are solved through a [tridiagonal system][crate::tridiag] and both
//! interpolate the knots exactly.
//!
//! ```
//! use ndarray as nd;
//! use nmethods::spline::{ Spline, SplineForm };
//!
//! let x = nd::array![0.0, 1.0, 2.0, 3.0];
//! let y = nd::array![0.0, 1.0, 0.0, 1.0];
//! let spline = Spline::fit(SplineForm::Symmetric, &x, &y).unwrap();
//! let (xc, yc) = spline.predict(0.25).unwrap();
//! assert_eq!(xc.len(), 13);
//! assert!((yc[4] - 1.0).abs() < 1e-12);
//! ```

use std::{ fmt, str::FromStr };
use ndarray as nd;
use crate::{
    Arr1,
    error::{ LengthError, OrderError, SizeError, SplineError },
    tridiag::{ Solver, Thomas, TridiagonalSystem },
};

pub type SplineResult<T> = Result<T, SplineError>;

/// Selects the mathematical formulation of a [`Spline`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SplineForm {
    /// Natural cubic spline on second derivatives.
    Usual,
    /// Slope-continuous Hermite spline.
    Symmetric,
}

impl fmt::Display for SplineForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usual => write!(f, "usual"),
            Self::Symmetric => write!(f, "symmetric"),
        }
    }
}

impl FromStr for SplineForm {
    type Err = SplineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "usual" => Ok(Self::Usual),
            "symmetric" => Ok(Self::Symmetric),
            _ => Err(SplineError::BadForm(s.to_string())),
        }
    }
}

/// Per-form spline coefficients.
///
/// Segment `s` spans the knots `x[s]` and `x[s + 1]`.
#[derive(Clone, Debug, PartialEq)]
pub enum Coefs {
    /// On segment `s`, with `u = x - x[s + 1]`:
    /// ```text
    /// S(x) = a[s] + b[s] u + c[s + 1] u² / 2 + d[s] u³ / 6
    /// ```
    Usual {
        /// Function value at the right-hand knot of each segment.
        a: nd::Array1<f64>,
        /// First derivative at the right-hand knot of each segment.
        b: nd::Array1<f64>,
        /// Second derivative at every knot; zero at both ends.
        c: nd::Array1<f64>,
        /// Third derivative on each segment.
        d: nd::Array1<f64>,
    },
    /// On segment `s`, with `t = (x - x[s]) / (x[s + 1] - x[s])`:
    /// ```text
    /// S(x) = (1 - t) y[s] + t y[s + 1] + t (1 - t) (a[s] (1 - t) + b[s] t)
    /// ```
    Symmetric {
        /// Slope at every knot.
        k: nd::Array1<f64>,
        a: nd::Array1<f64>,
        b: nd::Array1<f64>,
    },
}

impl Coefs {
    /// Return the associated [`SplineForm`].
    pub fn form(&self) -> SplineForm {
        match self {
            Self::Usual { .. } => SplineForm::Usual,
            Self::Symmetric { .. } => SplineForm::Symmetric,
        }
    }
}

/// Something that can be evaluated at arbitrary points.
pub trait Interpolator {
    /// Evaluate at a single point.
    fn value(&self, x: f64) -> f64;

    /// Evaluate at each point of `x`.
    fn values<S>(&self, x: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        x.mapv(|xk| self.value(xk))
    }
}

/// A fitted cubic spline.
///
/// Splines are immutable; fitting new data produces a new `Spline`.
#[derive(Clone, Debug, PartialEq)]
pub struct Spline {
    x: nd::Array1<f64>,
    y: nd::Array1<f64>,
    coefs: Coefs,
}

// knot spacings
fn diffs<S>(a: &Arr1<S>) -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    a.iter().zip(a.iter().skip(1))
        .map(|(ak, akp1)| akp1 - ak)
        .collect()
}

fn fit_usual<V>(
    x: &nd::Array1<f64>,
    y: &nd::Array1<f64>,
    solver: &V,
) -> SplineResult<Coefs>
where V: Solver
{
    let n = x.len();
    let h = diffs(x);
    let dy = diffs(y);

    // natural boundary: zero curvature at both ends
    let mut c: nd::Array1<f64> = nd::Array1::zeros(n);
    if n > 2 {
        let m = n - 2;
        let off: nd::Array1<f64> = h.slice(nd::s![1..m]).to_owned();
        let diag: nd::Array1<f64>
            = (0..m).map(|j| 2.0 * (h[j] + h[j + 1])).collect();
        let rhs: nd::Array1<f64>
            = (0..m).map(|j| 6.0 * (dy[j + 1] / h[j + 1] - dy[j] / h[j]))
            .collect();
        let system = TridiagonalSystem::new(off.clone(), diag, off, rhs)?;
        c.slice_mut(nd::s![1..n - 1]).assign(&solver.solve(system)?);
    }

    let a: nd::Array1<f64> = y.slice(nd::s![1..]).to_owned();
    let d: nd::Array1<f64>
        = (0..n - 1).map(|s| (c[s + 1] - c[s]) / h[s]).collect();
    let b: nd::Array1<f64>
        = (0..n - 1)
        .map(|s| {
            h[s] * c[s + 1] / 2.0 - h[s].powi(2) * d[s] / 6.0 + dy[s] / h[s]
        })
        .collect();
    Ok(Coefs::Usual { a, b, c, d })
}

fn fit_symmetric<V>(
    x: &nd::Array1<f64>,
    y: &nd::Array1<f64>,
    solver: &V,
) -> SplineResult<Coefs>
where V: Solver
{
    let n = x.len();
    let h = diffs(x);
    let dy = diffs(y);

    let off: nd::Array1<f64> = h.mapv(f64::recip);
    let mut diag: nd::Array1<f64> = nd::Array1::zeros(n);
    let mut rhs: nd::Array1<f64> = nd::Array1::zeros(n);
    for (s, (&hs, &dys)) in h.iter().zip(&dy).enumerate() {
        // each segment contributes to the equations of both of its knots
        diag[s] += 2.0 / hs;
        diag[s + 1] += 2.0 / hs;
        rhs[s] += 3.0 * dys / hs.powi(2);
        rhs[s + 1] += 3.0 * dys / hs.powi(2);
    }
    let system = TridiagonalSystem::new(off.clone(), diag, off, rhs)?;
    let k = solver.solve(system)?;

    let a: nd::Array1<f64>
        = (0..n - 1).map(|s| k[s] * h[s] - dy[s]).collect();
    let b: nd::Array1<f64>
        = (0..n - 1).map(|s| -k[s + 1] * h[s] + dy[s]).collect();
    Ok(Coefs::Symmetric { k, a, b })
}

impl Spline {
    /// Fit a spline of the given form to knots `(x, y)`, using the default
    /// [`Thomas`] solver.
    ///
    /// `x` and `y` must have equal lengths of at least 2, and `x` must be
    /// strictly increasing; all values must be finite.
    pub fn fit<S, T>(form: SplineForm, x: &Arr1<S>, y: &Arr1<T>)
        -> SplineResult<Self>
    where
        S: nd::Data<Elem = f64>,
        T: nd::Data<Elem = f64>,
    {
        Self::fit_with(form, x, y, &Thomas::default())
    }

    /// Like [`Self::fit`], but use a specific tridiagonal solver.
    pub fn fit_with<S, T, V>(
        form: SplineForm,
        x: &Arr1<S>,
        y: &Arr1<T>,
        solver: &V,
    ) -> SplineResult<Self>
    where
        S: nd::Data<Elem = f64>,
        T: nd::Data<Elem = f64>,
        V: Solver,
    {
        LengthError::check(x, y)?;
        SizeError::check(x, 2)?;
        OrderError::check(x)?;
        if let Some(k) = y.iter().position(|yk| !yk.is_finite()) {
            return Err(SplineError::NonFinite(k));
        }
        let x = x.to_owned();
        let y = y.to_owned();
        let coefs
            = match form {
                SplineForm::Usual => fit_usual(&x, &y, solver)?,
                SplineForm::Symmetric => fit_symmetric(&x, &y, solver)?,
            };
        Ok(Self { x, y, coefs })
    }

    /// Return the form of `self`.
    pub fn form(&self) -> SplineForm { self.coefs.form() }

    /// Return the knots.
    pub fn knots(&self) -> (nd::ArrayView1<'_, f64>, nd::ArrayView1<'_, f64>) {
        (self.x.view(), self.y.view())
    }

    /// Return the fitted coefficients.
    pub fn coefs(&self) -> &Coefs { &self.coefs }

    /// Number of knots.
    pub fn len(&self) -> usize { self.x.len() }

    /// Always `false`; splines have at least two knots.
    pub fn is_empty(&self) -> bool { self.x.is_empty() }

    // index of the segment containing `x`; points outside the knot range are
    // assigned to the nearest end segment
    fn segment(&self, x: f64) -> usize {
        let (mut lo, mut hi) = (0, self.x.len() - 1);
        let mut mid: usize;
        while hi - lo > 1 {
            mid = (lo + hi) / 2;
            if x < self.x[mid] { hi = mid; } else { lo = mid; }
        }
        lo
    }

    fn eval(&self, s: usize, x: f64) -> f64 {
        match &self.coefs {
            Coefs::Usual { a, b, c, d } => {
                let u = x - self.x[s + 1];
                a[s] + u * (b[s] + u * (c[s + 1] / 2.0 + u * d[s] / 6.0))
            },
            Coefs::Symmetric { a, b, .. } => {
                let t = (x - self.x[s]) / (self.x[s + 1] - self.x[s]);
                (1.0 - t) * self.y[s] + t * self.y[s + 1]
                    + t * (1.0 - t) * (a[s] * (1.0 - t) + b[s] * t)
            },
        }
    }

    fn eval_slope(&self, s: usize, x: f64) -> f64 {
        match &self.coefs {
            Coefs::Usual { b, c, d, .. } => {
                let u = x - self.x[s + 1];
                b[s] + u * (c[s + 1] + u * d[s] / 2.0)
            },
            Coefs::Symmetric { a, b, .. } => {
                let h = self.x[s + 1] - self.x[s];
                let t = (x - self.x[s]) / h;
                (
                    self.y[s + 1] - self.y[s]
                    + (1.0 - 2.0 * t) * (a[s] * (1.0 - t) + b[s] * t)
                    + t * (1.0 - t) * (b[s] - a[s])
                ) / h
            },
        }
    }

    /// Evaluate the first derivative of the spline at `x`.
    ///
    /// Points outside the knot range are extrapolated from the end segments.
    pub fn slope(&self, x: f64) -> f64 { self.eval_slope(self.segment(x), x) }

    /// Resample the spline on a dense grid.
    ///
    /// Each segment `[x[s], x[s + 1])` is sampled at `x[s] + j * step` for all
    /// non-negative integer `j` such that the point lies strictly before
    /// `x[s + 1]`; the final knot is appended at the end. Hence every knot
    /// appears exactly once in the output. Returns `(x, y)`.
    pub fn predict(&self, step: f64)
        -> SplineResult<(nd::Array1<f64>, nd::Array1<f64>)>
    {
        if !(step > 0.0 && step.is_finite()) {
            return Err(SplineError::BadStep(step));
        }
        let n = self.x.len();
        let mut xc: Vec<f64> = Vec::new();
        let mut yc: Vec<f64> = Vec::new();
        let mut coarse = false;
        let mut xj: f64;
        for s in 0..n - 1 {
            let (xl, xr) = (self.x[s], self.x[s + 1]);
            coarse |= step > xr - xl;
            let m = ((xr - xl) / step).ceil() as usize;
            for j in 0..m {
                xj = xl + j as f64 * step;
                if xj >= xr { break; }
                xc.push(xj);
                yc.push(self.eval(s, xj));
            }
        }
        xc.push(self.x[n - 1]);
        yc.push(self.y[n - 1]);
        if coarse {
            println!(
                "spline::Spline::predict: WARNING: step {} is wider than at \
                least one segment; such segments are represented by their \
                left knot only",
                step,
            );
        }
        Ok((xc.into(), yc.into()))
    }
}

impl Interpolator for Spline {
    fn value(&self, x: f64) -> f64 { self.eval(self.segment(x), x) }
}

#[cfg(test)]
mod tests {
    use approx::{ assert_abs_diff_eq, assert_relative_eq };
    use ndarray as nd;
    use crate::error::{ ErrorKind, TriError };
    use super::*;

    const FORMS: [SplineForm; 2] = [SplineForm::Usual, SplineForm::Symmetric];

    fn uneven_knots() -> nd::Array1<f64> {
        nd::array![0.0, 0.3, 0.5, 1.2, 2.0, 2.1, 3.3, 4.0, 5.5, 6.0]
    }

    #[test]
    fn reproduces_knots() {
        let x = uneven_knots();
        let y = x.mapv(f64::sin);
        for form in FORMS {
            let spline = Spline::fit(form, &x, &y).unwrap();
            let (xc, yc) = spline.predict(0.01).unwrap();
            for (xk, yk) in x.iter().zip(&y) {
                let j = xc.iter().position(|xj| xj == xk).unwrap();
                assert_abs_diff_eq!(yc[j], *yk, epsilon = 1e-9);
                assert_abs_diff_eq!(spline.value(*xk), *yk, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn reproduces_lines() {
        let x = uneven_knots();
        let y = x.mapv(|xk| 3.0 * xk - 2.0);
        for form in FORMS {
            let spline = Spline::fit(form, &x, &y).unwrap();
            let (xc, yc) = spline.predict(0.013).unwrap();
            for (xj, yj) in xc.iter().zip(&yc) {
                assert_abs_diff_eq!(*yj, 3.0 * xj - 2.0, epsilon = 1e-9);
            }
            assert_abs_diff_eq!(spline.slope(1.7), 3.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn two_knots_are_a_line() {
        let x = nd::array![1.0, 3.0];
        let y = nd::array![2.0, -2.0];
        for form in FORMS {
            let spline = Spline::fit(form, &x, &y).unwrap();
            assert_relative_eq!(spline.value(2.0), 0.0, epsilon = 1e-12);
            assert_relative_eq!(spline.value(2.5), -1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn natural_spline_known_value() {
        // S(x) = 1.5 x - 0.5 x³ on [0, 1]
        let x = nd::array![0.0, 1.0, 2.0];
        let y = nd::array![0.0, 1.0, 0.0];
        let spline = Spline::fit(SplineForm::Usual, &x, &y).unwrap();
        assert_relative_eq!(spline.value(0.5), 0.6875, epsilon = 1e-12);
        assert_relative_eq!(spline.value(1.5), 0.6875, epsilon = 1e-12);
        match spline.coefs() {
            Coefs::Usual { c, .. } => {
                assert_relative_eq!(c[0], 0.0);
                assert_relative_eq!(c[1], -3.0, epsilon = 1e-12);
                assert_relative_eq!(c[2], 0.0);
            },
            Coefs::Symmetric { .. } => panic!("wrong form"),
        }
    }

    #[test]
    fn forms_agree() {
        // the slope equations close with zero end curvature, so both forms
        // describe the same natural spline
        let x = uneven_knots();
        let y = x.mapv(|xk| (0.7 * xk).cos() + 0.1 * xk * xk);
        let usual = Spline::fit(SplineForm::Usual, &x, &y).unwrap();
        let symm = Spline::fit(SplineForm::Symmetric, &x, &y).unwrap();
        let probe: nd::Array1<f64> = nd::Array1::linspace(-0.5, 6.5, 300);
        for (u, s) in usual.values(&probe).iter().zip(&symm.values(&probe)) {
            assert_abs_diff_eq!(*u, *s, epsilon = 1e-9);
        }
    }

    #[test]
    fn slopes_continuous() {
        let x = uneven_knots();
        let y = x.mapv(|xk| (2.0 * xk).sin());
        for form in FORMS {
            let spline = Spline::fit(form, &x, &y).unwrap();
            for s in 1..x.len() - 1 {
                let left = spline.eval_slope(s - 1, x[s]);
                let right = spline.eval_slope(s, x[s]);
                assert_abs_diff_eq!(left, right, epsilon = 1e-9);
            }
            if let Coefs::Symmetric { k, .. } = spline.coefs() {
                for (s, ks) in k.iter().enumerate() {
                    assert_abs_diff_eq!(spline.slope(x[s]), *ks, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn predict_grid() {
        let x = nd::array![0.0, 1.0, 3.0];
        let y = nd::array![0.0, 1.0, 0.0];
        let spline = Spline::fit(SplineForm::Usual, &x, &y).unwrap();
        let (xc, yc) = spline.predict(0.5).unwrap();
        assert_eq!(xc, nd::array![0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0]);
        assert_eq!(xc.len(), yc.len());
        assert!(xc.iter().zip(xc.iter().skip(1)).all(|(a, b)| a < b));

        // coarse steps keep every knot
        let (xc, _) = spline.predict(10.0).unwrap();
        assert_eq!(xc, x);
    }

    #[test]
    fn form_names() {
        assert_eq!("usual".parse::<SplineForm>().unwrap(), SplineForm::Usual);
        assert_eq!("symmetric".parse::<SplineForm>().unwrap(), SplineForm::Symmetric);
        let err = "cubic".parse::<SplineForm>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(SplineForm::Symmetric.to_string(), "symmetric");
    }

    #[test]
    fn bad_knots() {
        let x = nd::array![0.0, 1.0, 2.0];
        for form in FORMS {
            let err = Spline::fit(form, &x, &nd::array![0.0, 1.0]).unwrap_err();
            assert!(matches!(err, SplineError::Length(_)));
            let err = Spline::fit(form, &nd::array![1.0], &nd::array![1.0])
                .unwrap_err();
            assert!(matches!(err, SplineError::Size(_)));
            let err = Spline::fit(form, &nd::array![0.0, 2.0, 1.0], &x)
                .unwrap_err();
            assert!(matches!(err, SplineError::Order(_)));
            let err = Spline::fit(form, &x, &nd::array![0.0, f64::NAN, 1.0])
                .unwrap_err();
            assert!(matches!(err, SplineError::NonFinite(1)));
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
        let spline = Spline::fit(SplineForm::Usual, &x, &x).unwrap();
        assert!(matches!(spline.predict(0.0), Err(SplineError::BadStep(_))));
        assert!(matches!(spline.predict(f64::NAN), Err(SplineError::BadStep(_))));
    }

    #[test]
    fn solver_failure_propagates() {
        let x = nd::array![0.0, 1.0, 2.0];
        let y = nd::array![0.0, 1.0, 0.0];
        // every pivot of the slope system is at most 4
        let strict = Thomas::new(10.0).unwrap();
        let err = Spline::fit_with(SplineForm::Symmetric, &x, &y, &strict)
            .unwrap_err();
        assert!(matches!(err, SplineError::Tri(TriError::Singular { .. })));
        assert_eq!(err.kind(), ErrorKind::SingularSystem);
    }
}
