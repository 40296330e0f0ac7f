//! Centripetal Catmull-Rom curves.
//!
//! # Evaluation
//!
//! `evaluate` implements the Barry-Goldman triangular scheme over the
//! centripetal knots `t0 = 0`, `t_{i+1} = t_i + sqrt(||p_{i+1} - p_i||)`:
//!
//! ```text
//! A1 = lerp(p0, p1; (t-t0)/(t1-t0))   A2 = lerp(p1, p2; (t-t1)/(t2-t1))
//! A3 = lerp(p2, p3; (t-t2)/(t3-t2))
//! B1 = lerp(A1, A2; (t-t0)/(t2-t0))   B2 = lerp(A2, A3; (t-t1)/(t3-t1))
//! C  = lerp(B1, B2; (t-t1)/(t2-t1))
//! ```
//!
//! The curve is only evaluable on `[t1, t2]` — it interpolates `p1` at `t1`
//! and `p2` at `t2`; `p0`/`p3` only shape the tangent at the endpoints.

use dt_core::Point3;

use crate::{CurveError, CurveResult};

/// A centripetal Catmull-Rom curve over exactly four control points.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatmulRomCurve3 {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
    pub p3: Point3,
}

impl CatmulRomCurve3 {
    pub fn new(p0: Point3, p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// The four control points, source-to-destination order.
    pub fn control_points(&self) -> [Point3; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// Centripetal knot values `(t0, t1, t2, t3)`, with `t0 = 0`.
    fn knots(&self) -> (f64, f64, f64, f64) {
        let t0 = 0.0;
        let t1 = t0 + self.p1.distance(self.p0).sqrt();
        let t2 = t1 + self.p2.distance(self.p1).sqrt();
        let t3 = t2 + self.p3.distance(self.p2).sqrt();
        (t0, t1, t2, t3)
    }

    /// The evaluable domain `(t1, t2)` — the curve interpolates `p1` at
    /// `t1` and `p2` at `t2`.
    pub fn domain(&self) -> (f64, f64) {
        let (_, t1, t2, _) = self.knots();
        (t1, t2)
    }

    /// Evaluate the curve at a single parameter `t ∈ [t1, t2]`.
    pub fn evaluate(&self, t: f64) -> Point3 {
        let (t0, t1, t2, t3) = self.knots();

        let a1 = self.p0.lerp(self.p1, (t - t0) / (t1 - t0));
        let a2 = self.p1.lerp(self.p2, (t - t1) / (t2 - t1));
        let a3 = self.p2.lerp(self.p3, (t - t2) / (t3 - t2));

        let b1 = a1.lerp(a2, (t - t0) / (t2 - t0));
        let b2 = a2.lerp(a3, (t - t1) / (t3 - t1));

        b1.lerp(b2, (t - t1) / (t2 - t1))
    }

    /// Evaluate the curve at each of `ts`, in order.
    pub fn evaluate_batch(&self, ts: &[f64]) -> Vec<Point3> {
        ts.iter().map(|&t| self.evaluate(t)).collect()
    }

    /// Unit tangent at `t`, via forward difference with `Δt = 1e-3`.
    pub fn unit_tangent(&self, t: f64) -> Point3 {
        const DT: f64 = 1e-3;
        let p = self.evaluate(t);
        let p_next = self.evaluate(t + DT);
        (p_next - p).normalize()
    }

    /// Sample `sample_count` parameters uniformly over `[t1, t2]` and
    /// return their prefix arc lengths (`prefix[0] == 0.0`).
    fn sample_prefix_lengths(&self, sample_count: usize) -> CurveResult<(Vec<f64>, Vec<f64>)> {
        if sample_count < 2 {
            return Err(CurveError::InvalidArgument(format!(
                "sample_count must be >= 2, got {sample_count}"
            )));
        }

        let (t1, t2) = self.domain();
        let ts: Vec<f64> = (0..sample_count)
            .map(|i| t1 + (t2 - t1) * i as f64 / (sample_count - 1) as f64)
            .collect();
        let points = self.evaluate_batch(&ts);

        let mut prefix = vec![0.0; sample_count];
        for i in 1..sample_count {
            prefix[i] = prefix[i - 1] + points[i].distance(points[i - 1]);
        }

        Ok((ts, prefix))
    }

    /// Total arc length of the curve over `[t1, t2]`, sampled at
    /// `sample_count` points (default 10).
    pub fn total_arc_length(&self, sample_count: usize) -> CurveResult<f64> {
        let (_, prefix) = self.sample_prefix_lengths(sample_count)?;
        Ok(*prefix.last().unwrap())
    }

    /// Convert a curve parameter `t ∈ [t1, t2]` to its arc length from `t1`.
    pub fn t_to_arc_length(&self, t: f64, sample_count: usize) -> CurveResult<f64> {
        let (t1, t2) = self.domain();
        if t < t1 || t > t2 {
            return Err(CurveError::OutOfDomain { t, t1, t2 });
        }

        let (ts, prefix) = self.sample_prefix_lengths(sample_count)?;

        let mut i = 1;
        while i + 1 < ts.len() && ts[i] < t {
            i += 1;
        }
        let alpha = (t - ts[i - 1]) / (ts[i] - ts[i - 1]);
        Ok((1.0 - alpha) * prefix[i - 1] + alpha * prefix[i])
    }

    /// Convert an arc length `s` (from `t1`) to a curve parameter, clamped
    /// into `[t1, t2]`.
    pub fn arc_length_to_t(&self, s: f64, sample_count: usize) -> CurveResult<f64> {
        let (t1, t2) = self.domain();
        let (ts, prefix) = self.sample_prefix_lengths(sample_count)?;

        let total = *prefix.last().unwrap();
        if total <= 0.0 {
            return Err(CurveError::InvalidArgument(
                "curve has zero total arc length".to_string(),
            ));
        }

        let mut i = 1;
        while i + 1 < prefix.len() && prefix[i] < s {
            i += 1;
        }
        let alpha = (s - prefix[i - 1]) / (prefix[i] - prefix[i - 1]);
        let t = (1.0 - alpha) * ts[i - 1] + alpha * ts[i];
        Ok(t.clamp(t1, t2))
    }
}
