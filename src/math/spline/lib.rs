/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Natural cubic splines over tabulated data.
//!
//! These back every tabulated function of the EAM potential: the electron density
//! `rho(r)`, the embedding functional `F(rho)`, the effective charge `Z(r)` and the
//! pair potential `phi(r)`.
//!
//! Queries outside of the tabulated domain are clamped to the nearest endpoint.
//! Tabulated potentials are frequently evaluated a hair past their last sample
//! (e.g. `F` at a density slightly beyond the table), and an extrapolated cubic
//! would grow without bound there.

#[macro_use] extern crate log;

/// Relative tolerance on the sample spacing below which a grid is treated as uniform.
const UNIFORM_GRID_TOL: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SplineError {
    #[error("cannot build a spline from an empty table")]
    Empty,
    #[error("spline abscissa and ordinate tables differ in length ({xs} vs {ys})")]
    LengthMismatch { xs: usize, ys: usize },
    #[error("a spline needs at least two samples (got {0})")]
    TooFewPoints(usize),
    #[error("spline abscissae must be strictly increasing (x[{index}] = {value})")]
    NotIncreasing { index: usize, value: f64 },
    #[error("non-finite value in spline table at index {0}")]
    NonFinite(usize),
}

/// A piecewise cubic interpolant with natural boundary conditions
/// (vanishing second derivative at both ends).
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    // Per-interval coefficients of  y_i + b_i t + c_i t^2 + d_i t^3,  t = x - x_i
    b: Vec<f64>,
    c: Vec<f64>,
    d: Vec<f64>,
    lookup: Lookup,
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Lookup {
    /// Interval index can be computed directly.
    Uniform { x0: f64, inv_dx: f64 },
    /// Binary search.
    Search,
}

impl CubicSpline {
    /// Fit a spline through `(xs[i], ys[i])`.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<CubicSpline, SplineError> {
        validate(&xs, &ys)?;

        let n = xs.len();
        let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();

        // Tridiagonal solve for the quadratic coefficients (Thomas algorithm).
        let mut mu = vec![0.0; n];
        let mut z = vec![0.0; n];
        for i in 1..n - 1 {
            let alpha = 3.0 * (ys[i + 1] - ys[i]) / h[i] - 3.0 * (ys[i] - ys[i - 1]) / h[i - 1];
            let l = 2.0 * (xs[i + 1] - xs[i - 1]) - h[i - 1] * mu[i - 1];
            mu[i] = h[i] / l;
            z[i] = (alpha - h[i - 1] * z[i - 1]) / l;
        }

        let mut c = vec![0.0; n];
        let mut b = vec![0.0; n - 1];
        let mut d = vec![0.0; n - 1];
        for j in (0..n - 1).rev() {
            c[j] = z[j] - mu[j] * c[j + 1];
            b[j] = (ys[j + 1] - ys[j]) / h[j] - h[j] * (c[j + 1] + 2.0 * c[j]) / 3.0;
            d[j] = (c[j + 1] - c[j]) / (3.0 * h[j]);
        }
        c.truncate(n - 1);

        let lookup = match is_uniform(&h) {
            true => Lookup::Uniform { x0: xs[0], inv_dx: 1.0 / h[0] },
            false => Lookup::Search,
        };
        trace!("built spline with {} knots on [{}, {}] ({:?})", n, xs[0], xs[n - 1], lookup);

        Ok(CubicSpline { xs, ys, b, c, d, lookup })
    }

    /// Fit a spline to samples on the grid `x_i = x0 + i * dx`.
    pub fn uniform(x0: f64, dx: f64, ys: Vec<f64>) -> Result<CubicSpline, SplineError> {
        if ys.is_empty() {
            return Err(SplineError::Empty);
        }
        if !(dx > 0.0) || !dx.is_finite() {
            return Err(SplineError::NotIncreasing { index: 1, value: x0 + dx });
        }
        let xs = (0..ys.len()).map(|i| x0 + i as f64 * dx).collect();
        CubicSpline::new(xs, ys)
    }

    pub fn len(&self) -> usize { self.xs.len() }
    pub fn x_min(&self) -> f64 { self.xs[0] }
    pub fn x_max(&self) -> f64 { self.xs[self.xs.len() - 1] }
    pub fn knots(&self) -> (&[f64], &[f64]) { (&self.xs, &self.ys) }

    pub fn value_at(&self, x: f64) -> f64 {
        let (i, t) = self.locate(x);
        self.ys[i] + t * (self.b[i] + t * (self.c[i] + t * self.d[i]))
    }

    /// Value and first derivative.
    pub fn value_and_derivative_at(&self, x: f64) -> (f64, f64) {
        let (i, t) = self.locate(x);
        let value = self.ys[i] + t * (self.b[i] + t * (self.c[i] + t * self.d[i]));
        let deriv = self.b[i] + t * (2.0 * self.c[i] + 3.0 * self.d[i] * t);
        (value, deriv)
    }

    // Returns the interval index and the offset of the (clamped) point into it.
    #[inline]
    fn locate(&self, x: f64) -> (usize, f64) {
        let last = self.xs.len() - 2;
        let x = x.max(self.x_min()).min(self.x_max());

        let mut i = match self.lookup {
            Lookup::Uniform { x0, inv_dx } => (((x - x0) * inv_dx) as usize).min(last),
            Lookup::Search => {
                let above = self.xs.partition_point(|&knot| knot <= x);
                above.saturating_sub(1).min(last)
            },
        };
        // The uniform guess can be off by one due to rounding.
        while i > 0 && x < self.xs[i] { i -= 1; }
        while i < last && x >= self.xs[i + 1] { i += 1; }

        (i, x - self.xs[i])
    }
}

fn validate(xs: &[f64], ys: &[f64]) -> Result<(), SplineError> {
    if xs.is_empty() || ys.is_empty() {
        return Err(SplineError::Empty);
    }
    if xs.len() != ys.len() {
        return Err(SplineError::LengthMismatch { xs: xs.len(), ys: ys.len() });
    }
    if xs.len() < 2 {
        return Err(SplineError::TooFewPoints(xs.len()));
    }
    if let Some(index) = xs.iter().zip(ys).position(|(x, y)| !x.is_finite() || !y.is_finite()) {
        return Err(SplineError::NonFinite(index));
    }
    if let Some(index) = (1..xs.len()).find(|&i| !(xs[i] > xs[i - 1])) {
        return Err(SplineError::NotIncreasing { index, value: xs[index] });
    }
    Ok(())
}

fn is_uniform(h: &[f64]) -> bool {
    let h0 = h[0];
    h.iter().all(|&hi| (hi - h0).abs() <= UNIFORM_GRID_TOL * h0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eamkit_assert_close::assert_close;

    fn uniform(a: f64, b: f64) -> f64 { rand::random::<f64>() * (b - a) + a }

    fn slope(step: f64, x: f64, f: impl Fn(f64) -> f64) -> f64 {
        (f(x + step) - f(x - step)) / (2.0 * step)
    }

    #[test]
    fn reproduces_knots() {
        let ys: Vec<f64> = (0..20).map(|_| uniform(-3.0, 3.0)).collect();
        let spline = CubicSpline::uniform(0.0, 0.25, ys.clone()).unwrap();
        for (i, &y) in ys.iter().enumerate() {
            assert_close!(rel=1e-12, abs=1e-12, spline.value_at(i as f64 * 0.25), y);
        }
    }

    #[test]
    fn linear_data_is_exact() {
        let xs = vec![0.0, 0.3, 1.1, 1.5, 4.0];
        let ys: Vec<f64> = xs.iter().map(|&x| 2.0 * x - 1.0).collect();
        let spline = CubicSpline::new(xs, ys).unwrap();
        assert_eq!(spline.lookup, Lookup::Search);
        for &x in &[0.1, 0.7, 1.3, 2.9, 3.99] {
            assert_close!(abs=1e-12, spline.value_and_derivative_at(x), (2.0 * x - 1.0, 2.0));
        }
    }

    #[test]
    fn derivative_matches_numerical() {
        let spline = CubicSpline::uniform(0.0, 0.01, (0..400).map(|i| f64::sin(i as f64 * 0.01)).collect()).unwrap();
        for _ in 0..20 {
            let x = uniform(0.1, 3.8);
            let (_, deriv) = spline.value_and_derivative_at(x);
            assert_close!(rel=1e-6, abs=1e-8, deriv, slope(1e-5, x, |x| spline.value_at(x)));
            assert_close!(abs=1e-6, spline.value_at(x), x.sin());
        }
    }

    #[test]
    fn uniform_lookup_agrees_with_search() {
        let ys: Vec<f64> = (0..50).map(|_| uniform(-1.0, 1.0)).collect();
        let fast = CubicSpline::uniform(0.5, 0.1, ys).unwrap();
        assert!(matches!(fast.lookup, Lookup::Uniform { .. }));

        let mut slow = fast.clone();
        slow.lookup = Lookup::Search;
        for i in 0..500 {
            let x = 0.5 + i as f64 * 0.0098;
            assert_eq!(fast.locate(x), slow.locate(x));
        }
    }

    #[test]
    fn queries_are_clamped() {
        let spline = CubicSpline::new(vec![1.0, 2.0, 3.0], vec![1.0, 4.0, 9.0]).unwrap();
        assert_eq!(spline.value_at(-5.0), spline.value_at(1.0));
        assert_eq!(spline.value_and_derivative_at(7.0), spline.value_and_derivative_at(3.0));
        assert_close!(spline.value_at(3.0), 9.0);
    }

    #[test]
    fn two_points_is_a_line() {
        let spline = CubicSpline::new(vec![0.0, 2.0], vec![1.0, 5.0]).unwrap();
        assert_close!(spline.value_and_derivative_at(0.5), (2.0, 2.0));
    }

    #[test]
    fn bad_tables() {
        assert_eq!(CubicSpline::new(vec![], vec![]).unwrap_err(), SplineError::Empty);
        assert_eq!(CubicSpline::uniform(0.0, 1.0, vec![]).unwrap_err(), SplineError::Empty);
        assert_eq!(
            CubicSpline::new(vec![0.0, 1.0], vec![0.0]).unwrap_err(),
            SplineError::LengthMismatch { xs: 2, ys: 1 },
        );
        assert_eq!(CubicSpline::new(vec![0.0], vec![0.0]).unwrap_err(), SplineError::TooFewPoints(1));
        assert_eq!(
            CubicSpline::new(vec![0.0, 1.0, 1.0], vec![0.0; 3]).unwrap_err(),
            SplineError::NotIncreasing { index: 2, value: 1.0 },
        );
        assert_eq!(
            CubicSpline::new(vec![0.0, 1.0], vec![0.0, std::f64::NAN]).unwrap_err(),
            SplineError::NonFinite(1),
        );
        assert!(CubicSpline::uniform(0.0, 0.0, vec![1.0, 2.0]).is_err());
    }
}
