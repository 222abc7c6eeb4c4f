//! `Lane`: a drivable segment paired from two borders.

use map_borders::{Border, Borders};
use map_core::{distance, CoreError, CoreResult, LaneId, MapPoint, RoadId};

use crate::types::{speed_limit_mps, LaneType, Material, RoadCategory};

/// A drivable segment, constructed from a left and right `Border` plus a
/// `left_of_reference` flag that picks which side is inner vs. outer.
///
/// Exclusively owns its `Borders`; width and speed-limit queries are
/// methods on `Lane`, not on the bare border pair.
#[derive(Debug, Clone)]
pub struct Lane {
    pub id: LaneId,
    pub road_id: RoadId,
    pub borders: Borders,
    pub left_of_reference: bool,
    pub lane_type: LaneType,
    pub material: Material,
    pub speed_limit: f64,
    pub length: f64,
}

impl Lane {
    /// Build a `Lane` from a left and right border. `inner` is the right
    /// border when `left_of_reference` is set, else the left; `outer` is
    /// the other side. The center border starts as a placeholder (a clone
    /// of `inner`) until [`process_center`](Self::process_center) runs.
    pub fn new(
        id: LaneId,
        road_id: RoadId,
        left: Border,
        right: Border,
        left_of_reference: bool,
    ) -> CoreResult<Self> {
        let (inner, outer) = if left_of_reference { (right, left) } else { (left, right) };
        let center_placeholder = inner.clone();
        let borders = Borders::new(inner, outer, center_placeholder)?;

        Ok(Self {
            id,
            road_id,
            borders,
            left_of_reference,
            lane_type: LaneType::Other(String::new()),
            material: Material::default(),
            speed_limit: speed_limit_mps(&LaneType::Other(String::new()), RoadCategory::Unknown),
            length: 0.0,
        })
    }

    /// Resample both `inner` and `outer` borders at a fixed arc-length
    /// `spacing`, then rebuild `center` as the pairwise mean of their
    /// resampled points.
    pub fn interpolate_borders(&mut self, spacing: f64) -> CoreResult<()> {
        let inner_s = self.borders.inner.uniform_s_values(spacing);
        let outer_s = self.borders.outer.uniform_s_values(spacing);
        self.borders.inner.interpolate_border(&inner_s)?;
        self.borders.outer.interpolate_border(&outer_s)?;
        self.process_center()?;
        self.length = self.borders.center.length;
        Ok(())
    }

    /// Rebuild `center` from the pairwise mean of `inner`/`outer`
    /// interpolated points.
    fn process_center(&mut self) -> CoreResult<()> {
        let n = self.borders.inner.interpolated_points.len().min(
            self.borders.outer.interpolated_points.len(),
        );
        if n == 0 {
            return Err(CoreError::InvalidInput(
                "cannot build a center border with no interpolated points".into(),
            ));
        }

        let parent_id = self.borders.parent_id();
        let points: Vec<MapPoint> = (0..n)
            .map(|i| {
                let a = self.borders.inner.interpolated_points[i];
                let b = self.borders.outer.interpolated_points[i];
                MapPoint::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0, 0.0, parent_id)
            })
            .collect();

        let mut center = Border::new(parent_id, points);
        center.compute_s_values();
        center.compute_length();
        center.initialize_spline()?;
        self.borders.center = center;
        Ok(())
    }

    /// `dist(inner(s), outer(s))`, linearly interpolating between the
    /// nearest resampled points on each side and clamping at the ends.
    pub fn get_width(&self, s: f64) -> f64 {
        let (ix, iy) = sample_at_s(&self.borders.inner.interpolated_points, s);
        let (ox, oy) = sample_at_s(&self.borders.outer.interpolated_points, s);
        distance(ix, iy, ox, oy)
    }

    /// Classify this lane's type from a raw type string and the parent
    /// road's category, deriving `speed_limit` from the fixed table.
    pub fn set_type(&mut self, type_str: &str, road_category: RoadCategory) {
        self.lane_type = LaneType::parse(type_str);
        self.speed_limit = speed_limit_mps(&self.lane_type, road_category);
    }

    /// Classify this lane's surface material from a raw material string.
    pub fn set_material(&mut self, material_str: &str) {
        self.material = Material::parse(material_str);
    }
}

/// Linearly interpolate `(x, y)` at arc-length `s` over a border's
/// resampled points, clamping at the ends. Returns `(0.0, 0.0)` if `points`
/// is empty.
fn sample_at_s(points: &[MapPoint], s: f64) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0);
    }
    if points.len() == 1 || s <= points[0].s {
        return (points[0].x, points[0].y);
    }
    let last = points.len() - 1;
    if s >= points[last].s {
        return (points[last].x, points[last].y);
    }

    let idx = match points.binary_search_by(|p| p.s.partial_cmp(&s).unwrap()) {
        Ok(i) => return (points[i].x, points[i].y),
        Err(i) => i - 1,
    };
    let a = points[idx];
    let b = points[idx + 1];
    let t = if (b.s - a.s).abs() > 1e-12 { (s - a.s) / (b.s - a.s) } else { 0.0 };
    (a.x + t * (b.x - a.x), a.y + t * (b.y - a.y))
}
