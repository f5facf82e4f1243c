//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow]. Every
//! module-level error can be reduced to one of three broad [`ErrorKind`]s.
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Broad classification shared by all error types in this crate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input: bad lengths, bad orderings, bad configuration values,
    /// or mutually exclusive parameters given together (or not at all).
    InvalidArgument,
    /// A zero pivot was encountered while eliminating a linear system.
    SingularSystem,
    /// An iteration failed to converge or a solution blew up.
    DivergentIntegration,
}

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        Self::check_len(a.len(), b.len())
    }

    pub(crate) fn check_len(expected: usize, got: usize) -> Result<(), Self> {
        (expected == got).then_some(()).ok_or(Self(expected, got))
    }
}

/// Returned when a sample array is too short for the requested operation.
#[derive(Debug, Error)]
#[error("sample arrays must have at least {min} elements; got {got}")]
pub struct SizeError {
    pub min: usize,
    pub got: usize,
}

impl SizeError {
    pub(crate) fn check<S, A>(a: &nd::ArrayBase<S, nd::Ix1>, min: usize)
        -> Result<(), Self>
    where S: nd::Data<Elem = A>
    {
        let got = a.len();
        (got >= min).then_some(()).ok_or(Self { min, got })
    }
}

/// Returned when a coordinate array is not strictly increasing, or holds a
/// non-finite value.
#[derive(Debug, Error)]
#[error("coordinates must be finite and strictly increasing; violated at index {0}")]
pub struct OrderError(pub usize);

impl OrderError {
    pub(crate) fn check<S>(x: &nd::ArrayBase<S, nd::Ix1>) -> Result<(), Self>
    where S: nd::Data<Elem = f64>
    {
        if let Some(k) = x.iter().position(|xk| !xk.is_finite()) {
            return Err(Self(k));
        }
        x.iter().zip(x.iter().skip(1))
            .position(|(xk, xkp1)| xkp1 <= xk)
            .map_or(Ok(()), |k| Err(Self(k + 1)))
    }
}

/// Returned when exactly one of two mutually exclusive parameters must be
/// supplied, but both or neither were.
#[derive(Debug, Error)]
#[error("exactly one of '{0}' or '{1}' must be given")]
pub struct ExclusiveError(pub &'static str, pub &'static str);

impl ExclusiveError {
    pub(crate) fn check<A, B>(
        a: &Option<A>,
        b: &Option<B>,
        names: (&'static str, &'static str),
    ) -> Result<(), Self>
    {
        (a.is_some() != b.is_some()).then_some(())
            .ok_or(Self(names.0, names.1))
    }
}

/// Returned from [`tridiag`][crate::tridiag] functions.
#[derive(Debug, Error)]
pub enum TriError {
    /// Returned when the system has no equations.
    #[error("tridiagonal system must have at least one equation")]
    Empty,

    /// Returned when a pivot is zero (or within the solver's epsilon of zero)
    /// during forward elimination or back substitution.
    #[error("singular system: pivot {pivot:e} in row {row}")]
    Singular { row: usize, pivot: f64 },

    /// Returned when a negative or non-finite pivot epsilon is
    /// encountered.
    #[error("pivot epsilon must be non-negative and finite; got {0}")]
    BadEpsilon(f64),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

impl TriError {
    pub(crate) fn check_epsilon(epsilon: f64) -> Result<(), Self> {
        (epsilon >= 0.0 && epsilon.is_finite()).then_some(())
            .ok_or(Self::BadEpsilon(epsilon))
    }

    /// Classify `self`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Singular { .. } => ErrorKind::SingularSystem,
            Self::Empty | Self::BadEpsilon(_) | Self::Length(_)
                => ErrorKind::InvalidArgument,
        }
    }
}

/// Returned from [`quad`][crate::quad] functions.
#[derive(Debug, Error)]
pub enum QuadError {
    /// Returned when a non-positive `epsilon` value is encountered.
    #[error("epsilon values must be greater than 0; got {0}")]
    BadEpsilon(f64),

    /// Returned when a non-positive `maxiters` value is encountered.
    #[error("maxiters must be greater than 0; got {0}")]
    BadMaxiters(usize),

    /// Returned when a sampling step is non-positive or non-finite.
    #[error("sampling step must be positive and finite; got {0}")]
    BadStep(f64),

    /// Returned when integration bounds are non-finite.
    #[error("integration bounds must be finite; got ({0}, {1})")]
    BadBounds(f64, f64),

    /// Returned when the refinement loop in
    /// [`integrate_adaptive`][crate::quad::integrate_adaptive] does not meet
    /// its tolerance within `maxiters` doublings, or produces a non-finite
    /// estimate.
    #[error("integral failed to converge after {iters} doublings (last correction {correction:e})")]
    Divergent { iters: usize, correction: f64 },

    /// [`ExclusiveError`]
    #[error("argument error: {0}")]
    Exclusive(#[from] ExclusiveError),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),

    /// [`SizeError`]
    #[error("array size error: {0}")]
    Size(#[from] SizeError),

    /// [`OrderError`]
    #[error("ordering error: {0}")]
    Order(#[from] OrderError),
}

impl QuadError {
    pub(crate) fn check_epsilon(epsilon: f64) -> Result<(), Self> {
        (epsilon > 0.0 && epsilon.is_finite()).then_some(())
            .ok_or(Self::BadEpsilon(epsilon))
    }

    pub(crate) fn check_maxiters(maxiters: usize) -> Result<(), Self> {
        (maxiters != 0).then_some(()).ok_or(Self::BadMaxiters(maxiters))
    }

    pub(crate) fn check_step(step: f64) -> Result<(), Self> {
        (step > 0.0 && step.is_finite()).then_some(())
            .ok_or(Self::BadStep(step))
    }

    /// Classify `self`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Divergent { .. } => ErrorKind::DivergentIntegration,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

/// Returned from [`spline`][crate::spline] functions.
#[derive(Debug, Error)]
pub enum SplineError {
    /// Returned when an unknown spline form name is parsed.
    #[error("spline form should be either 'usual' or 'symmetric'; got '{0}'")]
    BadForm(String),

    /// Returned when a resampling step is non-positive or non-finite.
    #[error("resampling step must be positive and finite; got {0}")]
    BadStep(f64),

    /// Returned when a function value is non-finite.
    #[error("function values must be finite; violated at index {0}")]
    NonFinite(usize),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),

    /// [`SizeError`]
    #[error("array size error: {0}")]
    Size(#[from] SizeError),

    /// [`OrderError`]
    #[error("ordering error: {0}")]
    Order(#[from] OrderError),

    /// [`TriError`]
    #[error("tridiagonal error: {0}")]
    Tri(#[from] TriError),
}

impl SplineError {
    /// Classify `self`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Tri(err) => err.kind(),
            _ => ErrorKind::InvalidArgument,
        }
    }
}

/// Returned from [`ode`][crate::ode] functions.
#[derive(Debug, Error)]
pub enum OdeError {
    /// Returned when an order/equation count combination is unsupported or
    /// does not match the right-hand side.
    #[error("unsupported equation shape: order {order} with {count} equation(s)")]
    BadShape { order: usize, count: usize },

    /// Returned when the extra initial value required by pairs and
    /// second-order equations is missing.
    #[error("a second initial value ('ey0') is required for this equation")]
    MissingInitial,

    /// Returned when the point count is less than 2.
    #[error("step count must be at least 2; got {0}")]
    BadCount(usize),

    /// Returned when the step size is zero, non-finite, or points away from
    /// the final abscissa.
    #[error("step size must be finite, non-zero, and point from x0 toward xf; got {0}")]
    BadStep(f64),

    /// Returned when `x0` or `xf` are non-finite or equal.
    #[error("integration interval must be finite and non-empty; got ({0}, {1})")]
    BadInterval(f64, f64),

    /// Returned when an initial value is non-finite or a divergence bound is
    /// not finite and positive.
    #[error("initial values must be finite and bounds finite and positive; got {0}")]
    BadValue(f64),

    /// Returned when a solution component becomes non-finite or exceeds the
    /// configured bound.
    #[error("solution diverged at step {step} (x = {x}): value {value:e}")]
    Divergent { step: usize, x: f64, value: f64 },

    /// [`ExclusiveError`]
    #[error("argument error: {0}")]
    Exclusive(#[from] ExclusiveError),
}

impl OdeError {
    /// Classify `self`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Divergent { .. } => ErrorKind::DivergentIntegration,
            _ => ErrorKind::InvalidArgument,
        }
    }
}
