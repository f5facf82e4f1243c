//! Theoretical background.
//!
//! # Contents
//! - [Tridiagonal systems](#tridiagonal-systems)
//! - [Trapezoidal integration](#trapezoidal-integration)
//! - [Cubic splines](#cubic-splines)
//! - [Forward Euler](#forward-euler)
//!
//! # Tridiagonal systems
//! A tridiagonal system of *n* equations couples each unknown only to its
//! immediate neighbors,
//! ```text
//! a[i] x[i - 1] + b[i] x[i] + c[i] x[i + 1] = d[i],  i ∊ {0, ..., n - 1}
//! ```
//! with `a[0]` and `c[n - 1]` absent. The Thomas algorithm[^1] is Gaussian
//! elimination specialized to this band structure. A forward sweep removes the
//! sub-diagonal,
//! ```text
//! w     = a[i] / b'[i - 1]
//! b'[i] = b[i] - w c[i - 1]
//! d'[i] = d[i] - w d'[i - 1]
//! ```
//! after which back-substitution gives
//! ```text
//! x[n - 1] = d'[n - 1] / b'[n - 1]
//! x[i]     = (d'[i] - c[i] x[i + 1]) / b'[i]
//! ```
//! for a total cost of *O*(*n*) operations and no additional storage beyond
//! the modified diagonal and right-hand side. No pivoting is performed, so the
//! algorithm is only guaranteed to succeed for diagonally dominant or
//! symmetric positive-definite matrices, both of which cover the spline
//! systems below. A modified pivot `b'[i]` whose magnitude falls to or below a
//! threshold is reported as a singular system instead of being divided by.
//!
//! # Trapezoidal integration
//! Given samples `y[i] = f(x[i])`, the composite trapezoidal rule approximates
//! ```text
//!  x[n-1]
//!    ⌠             n-1
//!    ⎮ f(x) dx  ≈   Σ  (x[i] - x[i - 1]) (y[i - 1] + y[i]) / 2
//!    ⌡             i=1
//!  x[0]
//! ```
//! which for a uniform spacing *h* reduces to
//! ```text
//! h ((y[0] + y[n - 1]) / 2 + y[1] + ... + y[n - 2])
//! ```
//! The rule integrates piecewise-linear data exactly and has a truncation error
//! that, for smooth *f*, is an even power series in *h*,
//! ```text
//! T(h) = I + α h² + β h⁴ + ...
//! ```
//! Halving the step and combining the two estimates cancels the leading term
//! (Richardson extrapolation[^2]):
//! ```text
//! I ≈ T(h/2) + (T(h/2) - T(h)) / 3
//! ```
//! The correction `(T(h/2) - T(h)) / 3` is also an estimate of the error
//! remaining in *T*(*h*/2), which gives a natural stopping criterion for an
//! adaptive loop that doubles the number of subintervals until the correction
//! falls below a tolerance. Each doubling only requires evaluating *f* at the
//! new midpoints,
//! ```text
//! T(h/2) = T(h) / 2 + (h/2) Σ f(midpoints)
//! ```
//! so a final partition of *N* subintervals costs exactly *N* + 1 evaluations.
//!
//! # Cubic splines
//! A cubic spline through knots `(x[i], y[i])` is a piecewise cubic
//! polynomial that passes through every knot and is twice continuously
//! differentiable. The two missing conditions are fixed here by requiring the
//! second derivative to vanish at both ends (the *natural* spline). Two
//! equivalent parameterizations are implemented.
//!
//! In the *usual* form, the unknowns are the second derivatives `c[i]` at the
//! knots. With `h[i] = x[i] - x[i - 1]`, continuity of the first derivative
//! at the interior knots gives the tridiagonal system
//! ```text
//! h[i] c[i - 1] + 2 (h[i] + h[i + 1]) c[i] + h[i + 1] c[i + 1]
//!     = 6 ((y[i + 1] - y[i]) / h[i + 1] - (y[i] - y[i - 1]) / h[i])
//! ```
//! with `c[0] = c[n - 1] = 0`. Each segment is then expanded about its right
//! knot,
//! ```text
//! S(x) = a[i] + b[i] s + c[i] s² / 2 + d[i] s³ / 6,  s = x - x[i]
//! ```
//! with `a[i] = y[i]`, `d[i] = (c[i] - c[i - 1]) / h[i]`, and
//! `b[i] = h[i] c[i] / 2 - h[i]² d[i] / 6 + (y[i] - y[i - 1]) / h[i]`.
//!
//! In the *symmetric* form, the unknowns are instead the slopes `k[i]` at the
//! knots, and each segment is written in terms of the normalized coordinate
//! `t = (x - x[i - 1]) / h[i]`:
//! ```text
//! S(x) = (1 - t) y[i - 1] + t y[i] + t (1 - t) (a[i] (1 - t) + b[i] t)
//! a[i] =  k[i - 1] h[i] - (y[i] - y[i - 1])
//! b[i] = -k[i] h[i]     + (y[i] - y[i - 1])
//! ```
//! Continuity of the second derivative at the interior knots, together with
//! the natural end conditions, gives another symmetric, diagonally dominant
//! tridiagonal system for the slopes[^3]:
//! ```text
//! k[i - 1] / h[i] + 2 (1 / h[i] + 1 / h[i + 1]) k[i] + k[i + 1] / h[i + 1]
//!     = 3 ((y[i] - y[i - 1]) / h[i]² + (y[i + 1] - y[i]) / h[i + 1]²)
//! ```
//! Both forms describe the same curve; the symmetric form is convenient when
//! the knot slopes themselves are of interest.
//!
//! # Forward Euler
//! An initial value problem `y' = f(x, y)`, `y(x₀) = y₀` is advanced over a
//! uniform grid `x[i] = x₀ + i δx` by following the tangent line at each step,
//! ```text
//! y[i] = y[i - 1] + δx f(x[i - 1], y[i - 1])
//! ```
//! The local truncation error is *O*(*δx*²), so the global error at a fixed
//! final abscissa is *O*(*δx*): halving the step roughly halves the error.
//! Systems of equations are advanced component-wise, with every component of
//! step *i* computed from the values at step *i* - 1 only. A second-order
//! equation `y'' = f(x, y, y')` is integrated as the first-order pair
//! `(y, y')`.
//!
//! The method is explicit and only conditionally stable. For the test equation
//! `y' = λ y`, each step multiplies the solution by `1 + λ δx`, which for
//! `λ < 0` decays only if `|1 + λ δx| < 1`. Stiff problems therefore demand
//! very small steps; when a step is too large, the computed solution grows
//! geometrically and eventually overflows.
//!
//! [^1]: L. H. Thomas, "Elliptic problems in linear differential equations
//! over a network." Watson Sci. Comput. Lab. Report, Columbia University
//! (1949).
//!
//! [^2]: L. F. Richardson and J. A. Gaunt, "The deferred approach to the
//! limit." Phil. Trans. R. Soc. Lond. A **226** 299-361 (1927).
//!
//! [^3]: C. de Boor, *A Practical Guide to Splines*. Springer (1978).

