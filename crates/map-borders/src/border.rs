//! `Border`: an ordered polyline along one edge of a lane, with arc-length,
//! an optional fitted spline, and a uniformly resampled point set.

use map_core::{distance, BorderSpline, CoreError, CoreResult, LaneId, MapPoint};

/// An ordered polyline along a lane edge.
///
/// `spline` is `None` until [`initialize_spline`](Border::initialize_spline)
/// runs — a `Border` may be constructed from raw points well before it is
/// spline-fit, so this is modeled as an optional field rather than requiring
/// every constructor to fit immediately.
#[derive(Debug, Clone)]
pub struct Border {
    pub parent_id: LaneId,
    pub points: Vec<MapPoint>,
    pub spline: Option<BorderSpline>,
    pub interpolated_points: Vec<MapPoint>,
    pub length: f64,
}

impl Border {
    /// Construct a `Border` from raw, unordered-in-s points. Does not fit a
    /// spline or compute s-values; call
    /// [`compute_s_values`](Self::compute_s_values) first.
    pub fn new(parent_id: LaneId, points: Vec<MapPoint>) -> Self {
        Self { parent_id, points, spline: None, interpolated_points: Vec::new(), length: 0.0 }
    }

    /// Set `points[0].s = 0` and each subsequent point's `s` to its
    /// predecessor's `s` plus the chord distance to it.
    pub fn compute_s_values(&mut self) {
        if self.points.is_empty() {
            return;
        }
        self.points[0].s = 0.0;
        for i in 1..self.points.len() {
            let d = distance(
                self.points[i - 1].x,
                self.points[i - 1].y,
                self.points[i].x,
                self.points[i].y,
            );
            self.points[i].s = self.points[i - 1].s + d;
        }
    }

    /// `points.back().s - points.front().s`. Call after
    /// [`compute_s_values`](Self::compute_s_values).
    pub fn compute_length(&mut self) -> f64 {
        self.length = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => last.s - first.s,
            _ => 0.0,
        };
        self.length
    }

    /// Drop internal points whose incoming/outgoing turn angle exceeds
    /// `angle_threshold_deg`, to remove kinks that would destabilize the
    /// spline fit. Endpoints are never dropped. Call before
    /// [`compute_s_values`](Self::compute_s_values).
    pub fn preprocess_points_for_spline(&mut self, angle_threshold_deg: f64) {
        if self.points.len() < 3 {
            return;
        }
        let threshold = angle_threshold_deg.to_radians();
        let mut kept = Vec::with_capacity(self.points.len());
        kept.push(self.points[0]);
        for i in 1..self.points.len() - 1 {
            let prev = kept.last().unwrap();
            let curr = self.points[i];
            let next = self.points[i + 1];
            let v1 = (curr.x - prev.x, curr.y - prev.y);
            let v2 = (next.x - curr.x, next.y - curr.y);
            let n1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
            let n2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();
            if n1 < 1e-12 || n2 < 1e-12 {
                kept.push(curr);
                continue;
            }
            let cos_theta = ((v1.0 * v2.0 + v1.1 * v2.1) / (n1 * n2)).clamp(-1.0, 1.0);
            let angle = cos_theta.acos();
            if angle <= threshold {
                kept.push(curr);
            }
        }
        kept.push(self.points[self.points.len() - 1]);
        self.points = kept;
    }

    /// Fit [`BorderSpline`] from the current `points` (their `x`, `y`, `s`).
    /// Call after [`compute_s_values`](Self::compute_s_values).
    ///
    /// # Errors
    ///
    /// Propagates [`CoreError::InvalidInput`] /
    /// [`CoreError::NumericalFailure`] from the underlying spline fit.
    pub fn initialize_spline(&mut self) -> CoreResult<()> {
        let knots: Vec<(f64, f64, f64)> =
            self.points.iter().map(|p| (p.x, p.y, p.s)).collect();
        self.spline = Some(BorderSpline::initialize(&knots)?);
        Ok(())
    }

    /// Evaluate the spline at each value in `s_values`, producing
    /// `interpolated_points` in the same order.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidInput`] if [`initialize_spline`](Self::initialize_spline)
    /// has not run yet.
    pub fn interpolate_border(&mut self, s_values: &[f64]) -> CoreResult<()> {
        let spline = self
            .spline
            .as_ref()
            .ok_or_else(|| CoreError::InvalidInput("border has no spline to interpolate".into()))?;
        self.interpolated_points = s_values
            .iter()
            .map(|&s| {
                let (x, y) = spline.point_at(s);
                MapPoint::new(x, y, s, self.parent_id)
            })
            .collect();
        Ok(())
    }

    /// Uniformly spaced s-values spanning this border's spline domain, at
    /// `spacing` meters apart, always including the final knot.
    pub fn uniform_s_values(&self, spacing: f64) -> Vec<f64> {
        let Some(spline) = &self.spline else { return Vec::new() };
        let (s0, sn) = spline.s_range();
        if sn <= s0 || spacing <= 0.0 {
            return vec![s0];
        }
        let mut values = Vec::new();
        let mut s = s0;
        while s < sn {
            values.push(s);
            s += spacing;
        }
        values.push(sn);
        values
    }

    /// Arc-length of the point on the current (non-spline) polyline nearest
    /// to `(x, y)`, via piecewise-linear projection onto each segment. Ties
    /// are broken in favor of the smaller `s`.
    pub fn find_nearest_s(&self, x: f64, y: f64) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        if self.points.len() == 1 {
            return self.points[0].s;
        }

        let mut best_dist = f64::INFINITY;
        let mut best_s = self.points[0].s;

        for w in self.points.windows(2) {
            let (a, b) = (w[0], w[1]);
            let dx = b.x - a.x;
            let dy = b.y - a.y;
            let len2 = dx * dx + dy * dy;
            let t = if len2 > 1e-18 {
                (((x - a.x) * dx + (y - a.y) * dy) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let px = a.x + t * dx;
            let py = a.y + t * dy;
            let d = distance(x, y, px, py);
            let s = a.s + t * (b.s - a.s);
            if d < best_dist {
                best_dist = d;
                best_s = s;
            }
        }
        best_s
    }

    /// A new `Border` whose points are the subset of `points` with
    /// `s ∈ [s_start, s_end]`, plus spline-interpolated endpoints at the
    /// boundaries. Preserves `parent_id`.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidInput`] if `s_start >= s_end` or no spline has
    /// been fit yet.
    pub fn make_clipped(&self, s_start: f64, s_end: f64) -> CoreResult<Border> {
        if s_start >= s_end {
            return Err(CoreError::InvalidInput("make_clipped requires s_start < s_end".into()));
        }
        let spline = self
            .spline
            .as_ref()
            .ok_or_else(|| CoreError::InvalidInput("border has no spline to clip from".into()))?;

        let mut points: Vec<MapPoint> = self
            .points
            .iter()
            .copied()
            .filter(|p| p.s >= s_start && p.s <= s_end)
            .collect();

        let has_start = points.first().is_some_and(|p| (p.s - s_start).abs() < 1e-9);
        if !has_start {
            let (x, y) = spline.point_at(s_start);
            points.insert(0, MapPoint::new(x, y, s_start, self.parent_id));
        }
        let has_end = points.last().is_some_and(|p| (p.s - s_end).abs() < 1e-9);
        if !has_end {
            let (x, y) = spline.point_at(s_end);
            points.push(MapPoint::new(x, y, s_end, self.parent_id));
        }

        let mut clipped = Border::new(self.parent_id, points);
        clipped.length = s_end - s_start;
        Ok(clipped)
    }

    /// Align this border's `s` domain with `reference`'s: for every point of
    /// `reference`, find the nearest arc-length position along `self`, then
    /// remap every one of `self`'s own points from its original `s` to the
    /// interpolated `reference` `s` that nearest-s mapping implies.
    ///
    /// Used to derive a lane center border's `s` parameterization from the
    /// road's reference line, so inner/outer/center all read `s` against a
    /// common domain.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidInput`] if `reference` has fewer than two points
    /// (no mapping can be built).
    pub fn reparameterize_based_on_reference(&mut self, reference: &Border) -> CoreResult<()> {
        if reference.points.len() < 2 {
            return Err(CoreError::InvalidInput(
                "reference line needs at least two points to reparameterize against".into(),
            ));
        }

        let mut mapping: Vec<(f64, f64)> = reference
            .points
            .iter()
            .map(|rp| (self.find_nearest_s(rp.x, rp.y), rp.s))
            .collect();
        mapping.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        mapping.dedup_by(|a, b| (a.0 - b.0).abs() < 1e-9);

        if mapping.len() < 2 {
            return Err(CoreError::InvalidInput(
                "reparameterization mapping collapsed to a single point".into(),
            ));
        }

        for p in &mut self.points {
            p.s = interpolate_mapping(&mapping, p.s);
        }
        self.compute_length();
        Ok(())
    }
}

/// Piecewise-linear interpolation over a sorted `(from, to)` mapping,
/// clamping `query` to the mapping's domain.
fn interpolate_mapping(mapping: &[(f64, f64)], query: f64) -> f64 {
    if query <= mapping[0].0 {
        return mapping[0].1;
    }
    if query >= mapping[mapping.len() - 1].0 {
        return mapping[mapping.len() - 1].1;
    }
    let idx = match mapping.binary_search_by(|(from, _)| from.partial_cmp(&query).unwrap()) {
        Ok(i) => return mapping[i].1,
        Err(i) => i - 1,
    };
    let (s0, t0) = mapping[idx];
    let (s1, t1) = mapping[idx + 1];
    let ratio = (query - s0) / (s1 - s0);
    t0 + ratio * (t1 - t0)
}
