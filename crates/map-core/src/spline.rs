//! Natural cubic spline over an ordered polyline, parameterized by
//! cumulative chord length.
//!
//! # Algorithm
//!
//! For each axis (x and y) independently, a natural cubic spline is fit over
//! knots `(s_i, value_i)` by solving a tridiagonal system for the
//! second-derivative coefficients `c` via the Thomas algorithm (natural
//! boundary conditions: `c_0 = c_n = 0`). `b` and `d` follow in closed form;
//! `a` is simply the value at the left knot. Evaluation uses Horner's method
//! on `ds = s - s_i`, where `i` is found by binary search over the knot
//! array.
//!
//! This is a from-scratch implementation rather than a wrapped third-party
//! spline crate: the contract in terms of exact failure modes
//! (`NumericalFailure` on a non-finite solve) and the predecessor-knot-index
//! return from queries are bespoke to this library's callers (`Border`'s
//! resampling and nearest-s search).

use crate::error::{CoreError, CoreResult};

/// A 1D natural cubic spline: `value(s)` for one coordinate axis.
#[derive(Debug, Clone)]
struct CubicSpline1D {
    /// Knot parameters, strictly increasing.
    s: Vec<f64>,
    a: Vec<f64>,
    b: Vec<f64>,
    c: Vec<f64>,
    d: Vec<f64>,
}

impl CubicSpline1D {
    /// Fit a natural cubic spline through `(s_i, value_i)` knots.
    ///
    /// `s` must already be strictly increasing with at least two knots —
    /// callers de-duplicate before calling this.
    fn fit(s: &[f64], values: &[f64]) -> CoreResult<Self> {
        let n = s.len() - 1; // number of intervals
        let h: Vec<f64> = (0..n).map(|i| s[i + 1] - s[i]).collect();

        // ── Tridiagonal solve for c (Thomas algorithm, natural BCs) ────────
        let mut alpha = vec![0.0_f64; n + 1];
        for i in 1..n {
            alpha[i] = 3.0 / h[i] * (values[i + 1] - values[i])
                - 3.0 / h[i - 1] * (values[i] - values[i - 1]);
        }

        let mut l = vec![0.0_f64; n + 1];
        let mut mu = vec![0.0_f64; n + 1];
        let mut z = vec![0.0_f64; n + 1];
        l[0] = 1.0;

        for i in 1..n {
            l[i] = 2.0 * (s[i + 1] - s[i - 1]) - h[i - 1] * mu[i - 1];
            if l[i] == 0.0 {
                return Err(CoreError::NumericalFailure(
                    "tridiagonal pivot collapsed to zero".into(),
                ));
            }
            mu[i] = h[i] / l[i];
            z[i] = (alpha[i] - h[i - 1] * z[i - 1]) / l[i];
        }
        l[n] = 1.0;
        z[n] = 0.0;

        let mut c = vec![0.0_f64; n + 1];
        let mut b = vec![0.0_f64; n];
        let mut d = vec![0.0_f64; n];

        for j in (0..n).rev() {
            c[j] = z[j] - mu[j] * c[j + 1];
            b[j] = (values[j + 1] - values[j]) / h[j] - h[j] * (c[j + 1] + 2.0 * c[j]) / 3.0;
            d[j] = (c[j + 1] - c[j]) / (3.0 * h[j]);
        }

        let a: Vec<f64> = values[..n].to_vec();
        let spline = Self { s: s.to_vec(), a, b, c: c[..n].to_vec(), d };

        if !spline.is_finite() {
            return Err(CoreError::NumericalFailure(
                "spline solve produced a non-finite coefficient".into(),
            ));
        }
        Ok(spline)
    }

    fn is_finite(&self) -> bool {
        self.a.iter().chain(&self.b).chain(&self.c).chain(&self.d).all(|v| v.is_finite())
    }

    /// Binary search for the predecessor knot index of `s`, clamped to
    /// `[0, n_intervals - 1]`.
    fn knot_index(&self, s_query: f64) -> usize {
        let last_interval = self.b.len() - 1;
        if s_query <= self.s[0] {
            return 0;
        }
        if s_query >= *self.s.last().unwrap() {
            return last_interval;
        }
        match self.s.binary_search_by(|probe| probe.partial_cmp(&s_query).unwrap()) {
            Ok(i) => i.min(last_interval),
            Err(i) => (i - 1).min(last_interval),
        }
    }

    fn clamp_s(&self, s: f64) -> f64 {
        s.clamp(self.s[0], *self.s.last().unwrap())
    }

    fn eval(&self, s_query: f64) -> f64 {
        let s_query = self.clamp_s(s_query);
        let i = self.knot_index(s_query);
        let ds = s_query - self.s[i];
        // Horner form: a + ds*(b + ds*(c + ds*d))
        self.a[i] + ds * (self.b[i] + ds * (self.c[i] + ds * self.d[i]))
    }

    fn eval_prime(&self, s_query: f64) -> f64 {
        let s_query = self.clamp_s(s_query);
        let i = self.knot_index(s_query);
        let ds = s_query - self.s[i];
        self.b[i] + ds * (2.0 * self.c[i] + 3.0 * ds * self.d[i])
    }

    fn eval_double_prime(&self, s_query: f64) -> f64 {
        let s_query = self.clamp_s(s_query);
        let i = self.knot_index(s_query);
        let ds = s_query - self.s[i];
        2.0 * self.c[i] + 6.0 * ds * self.d[i]
    }
}

/// A natural cubic spline through a polyline, parameterized by cumulative
/// chord length `s`. Fits independent splines for `x(s)` and `y(s)`.
#[derive(Debug, Clone)]
pub struct BorderSpline {
    x: CubicSpline1D,
    y: CubicSpline1D,
    s0: f64,
    sn: f64,
}

impl BorderSpline {
    /// Build a spline from ordered `(x, y)` points and their cumulative
    /// chord-length parameters `s` (same length, `s` strictly increasing).
    ///
    /// Points with `|Δs| < 1e-6` relative to their predecessor are treated
    /// as duplicates and dropped before fitting — the spline needs distinct
    /// knots to avoid a zero-length interval.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidInput`] if fewer than two unique points remain
    ///   after de-duplication.
    /// - [`CoreError::NumericalFailure`] if the tridiagonal solve produces a
    ///   non-finite coefficient.
    pub fn initialize(points: &[(f64, f64, f64)]) -> CoreResult<Self> {
        let mut s = Vec::with_capacity(points.len());
        let mut xs = Vec::with_capacity(points.len());
        let mut ys = Vec::with_capacity(points.len());

        for &(x, y, si) in points {
            if let Some(&last_s) = s.last() {
                if (si - last_s).abs() < 1e-6 {
                    continue;
                }
            }
            s.push(si);
            xs.push(x);
            ys.push(y);
        }

        if s.len() < 2 {
            return Err(CoreError::InvalidInput(
                "BorderSpline needs at least two unique points".into(),
            ));
        }

        let x = CubicSpline1D::fit(&s, &xs)?;
        let y = CubicSpline1D::fit(&s, &ys)?;
        let s0 = s[0];
        let sn = *s.last().unwrap();

        Ok(Self { x, y, s0, sn })
    }

    /// Evaluate the spline's `(x, y)` position at arc-length `s`, clamped
    /// into `[s0, sn]`.
    pub fn point_at(&self, s: f64) -> (f64, f64) {
        (self.x.eval(s), self.y.eval(s))
    }

    pub fn x_prime(&self, s: f64) -> f64 {
        self.x.eval_prime(s)
    }

    pub fn y_prime(&self, s: f64) -> f64 {
        self.y.eval_prime(s)
    }

    pub fn x_double_prime(&self, s: f64) -> f64 {
        self.x.eval_double_prime(s)
    }

    pub fn y_double_prime(&self, s: f64) -> f64 {
        self.y.eval_double_prime(s)
    }

    /// Total arc-length span of the knot sequence, `sn - s0`.
    pub fn total_length(&self) -> f64 {
        self.sn - self.s0
    }

    /// The knot domain `[s0, sn]`.
    pub fn s_range(&self) -> (f64, f64) {
        (self.s0, self.sn)
    }
}
