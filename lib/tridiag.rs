//! Direct solution of tridiagonal linear systems via the Thomas algorithm.
//!
//! A tridiagonal system of `n` equations
//! ```text
//! a[i-1] x[i-1] + b[i] x[i] + c[i] x[i+1] = d[i]
//! ```
//! is described by a sub-diagonal `a` (length `n - 1`), a main diagonal `b`
//! (length `n`), a super-diagonal `c` (length `n - 1`), and a right-hand side
//! `d` (length `n`). No pivoting is performed, so the algorithm is only valid
//! for diagonally dominant or otherwise well-conditioned systems; a vanishing
//! pivot is reported as [`TriError::Singular`].
//!
//! ```
//! use ndarray as nd;
//! use nmethods::tridiag::solve_tridiagonal;
//!
//! let a = nd::array![1.0, 1.0];
//! let b = nd::array![4.0, 4.0, 4.0];
//! let c = nd::array![1.0, 1.0];
//! let d = nd::array![5.0, 6.0, 5.0];
//! let x = solve_tridiagonal(&a, &b, &c, &d).unwrap();
//! assert!(x.iter().all(|xk| (xk - 1.0).abs() < 1e-12));
//! ```

use ndarray as nd;
use crate::{
    Arr1,
    error::{ LengthError, TriError },
    DEF_PIVOT_EPSILON,
};

pub type TriResult<T> = Result<T, TriError>;

/// An owned tridiagonal system `A x = d`.
///
/// Solvers take the system by value and are free to overwrite its storage
/// during elimination.
#[derive(Clone, Debug, PartialEq)]
pub struct TridiagonalSystem {
    a: nd::Array1<f64>,
    b: nd::Array1<f64>,
    c: nd::Array1<f64>,
    d: nd::Array1<f64>,
}

impl TridiagonalSystem {
    /// Assemble a system from owned diagonals and right-hand side, checking
    /// that all sizes agree.
    pub fn new(
        a: nd::Array1<f64>,
        b: nd::Array1<f64>,
        c: nd::Array1<f64>,
        d: nd::Array1<f64>,
    ) -> TriResult<Self>
    {
        let n = b.len();
        if n == 0 { return Err(TriError::Empty); }
        LengthError::check(&b, &d)?;
        LengthError::check_len(n - 1, a.len())?;
        LengthError::check_len(n - 1, c.len())?;
        Ok(Self { a, b, c, d })
    }

    /// Like [`Self::new`], but copy borrowed arrays.
    pub fn from_views<S, T, U, V>(
        a: &Arr1<S>,
        b: &Arr1<T>,
        c: &Arr1<U>,
        d: &Arr1<V>,
    ) -> TriResult<Self>
    where
        S: nd::Data<Elem = f64>,
        T: nd::Data<Elem = f64>,
        U: nd::Data<Elem = f64>,
        V: nd::Data<Elem = f64>,
    {
        Self::new(a.to_owned(), b.to_owned(), c.to_owned(), d.to_owned())
    }

    /// Number of equations.
    pub fn len(&self) -> usize { self.b.len() }

    /// Always `false`; systems cannot be constructed empty.
    pub fn is_empty(&self) -> bool { self.b.is_empty() }

    /// Sub-diagonal.
    pub fn sub(&self) -> nd::ArrayView1<'_, f64> { self.a.view() }

    /// Main diagonal.
    pub fn diag(&self) -> nd::ArrayView1<'_, f64> { self.b.view() }

    /// Super-diagonal.
    pub fn sup(&self) -> nd::ArrayView1<'_, f64> { self.c.view() }

    /// Right-hand side.
    pub fn rhs(&self) -> nd::ArrayView1<'_, f64> { self.d.view() }

    /// Compute the matrix-vector product `A x`.
    ///
    /// *Panics if `x` does not have length equal to [`Self::len`]*.
    pub fn dot<S>(&self, x: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        let n = self.len();
        assert_eq!(x.len(), n, "tridiagonal product requires {} elements", n);
        (0..n)
            .map(|i| {
                let mut acc = self.b[i] * x[i];
                if i > 0 { acc += self.a[i - 1] * x[i - 1]; }
                if i + 1 < n { acc += self.c[i] * x[i + 1]; }
                acc
            })
            .collect()
    }
}

/// A direct solver for tridiagonal systems.
pub trait Solver {
    /// Consume `system` and return its solution.
    fn solve(&self, system: TridiagonalSystem) -> TriResult<nd::Array1<f64>>;
}

/// The Thomas algorithm: Gaussian elimination specialized to tridiagonal
/// systems, with no pivoting.
///
/// Any pivot with magnitude at or below `epsilon`, or which is not finite, is
/// treated as zero.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Thomas {
    pub epsilon: f64,
}

impl Default for Thomas {
    fn default() -> Self { Self { epsilon: DEF_PIVOT_EPSILON } }
}

impl Thomas {
    /// Create a new solver with a given pivot threshold.
    pub fn new(epsilon: f64) -> TriResult<Self> {
        TriError::check_epsilon(epsilon)?;
        Ok(Self { epsilon })
    }

    fn pivot(&self, row: usize, pivot: f64) -> TriResult<f64> {
        (pivot.is_finite() && pivot.abs() > self.epsilon).then_some(pivot)
            .ok_or(TriError::Singular { row, pivot })
    }
}

impl Solver for Thomas {
    fn solve(&self, system: TridiagonalSystem) -> TriResult<nd::Array1<f64>> {
        TriError::check_epsilon(self.epsilon)?;
        let TridiagonalSystem { a, mut b, c, mut d } = system;
        let n = b.len();

        // forward elimination
        let mut m: f64;
        for i in 1..n {
            m = a[i - 1] / self.pivot(i - 1, b[i - 1])?;
            b[i] -= m * c[i - 1];
            d[i] -= m * d[i - 1];
        }

        // back substitution; the eliminated right-hand side is overwritten by
        // the solution
        d[n - 1] /= self.pivot(n - 1, b[n - 1])?;
        for i in (0..n - 1).rev() {
            d[i] = (d[i] - c[i] * d[i + 1]) / b[i];
        }
        Ok(d)
    }
}

/// Solve the tridiagonal system with sub-diagonal `a`, diagonal `b`,
/// super-diagonal `c`, and right-hand side `d` using the default [`Thomas`]
/// solver.
///
/// The input arrays are copied and are never modified.
pub fn solve_tridiagonal<S, T, U, V>(
    a: &Arr1<S>,
    b: &Arr1<T>,
    c: &Arr1<U>,
    d: &Arr1<V>,
) -> TriResult<nd::Array1<f64>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
    U: nd::Data<Elem = f64>,
    V: nd::Data<Elem = f64>,
{
    let system = TridiagonalSystem::from_views(a, b, c, d)?;
    Thomas::default().solve(system)
}
