//! 2D outline building
//!
//! Builds closed 2D outlines from cubic Bezier segments, flattened to a
//! polyline for extrusion. Curves are sampled at a fixed segment count,
//! which is plenty for the card's silhouette shapes.

/// Samples per cubic Bezier segment when flattening
const SEGMENTS_PER_CURVE: usize = 12;

/// A flattened closed 2D outline
///
/// Built incrementally with [`move_to`](Self::move_to) and
/// [`bezier_curve_to`](Self::bezier_curve_to); the accumulated points trace
/// the outline in order. The outline is treated as closed (last point
/// connects back to the first).
#[derive(Clone, Debug, Default)]
pub struct PathOutline {
    points: Vec<[f32; 2]>,
}

impl PathOutline {
    /// Create an empty outline
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Start the outline at a point
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.points.push([x, y]);
        self
    }

    /// Append a cubic Bezier from the current point through two control
    /// points to an end point
    pub fn bezier_curve_to(
        &mut self,
        c1x: f32,
        c1y: f32,
        c2x: f32,
        c2y: f32,
        x: f32,
        y: f32,
    ) -> &mut Self {
        let start = *self.points.last().expect("bezier_curve_to before move_to");
        for i in 1..=SEGMENTS_PER_CURVE {
            let t = i as f32 / SEGMENTS_PER_CURVE as f32;
            self.points
                .push(cubic_point(start, [c1x, c1y], [c2x, c2y], [x, y], t));
        }
        self
    }

    /// The flattened outline points, in order
    ///
    /// If the path returned to its starting point, the duplicate closing
    /// point is dropped so consumers see each corner exactly once.
    pub fn points(&self) -> &[[f32; 2]] {
        let n = self.points.len();
        if n > 1 && points_coincide(self.points[0], self.points[n - 1]) {
            &self.points[..n - 1]
        } else {
            &self.points
        }
    }

    /// Signed area of the closed outline (positive = counter-clockwise)
    pub fn signed_area(&self) -> f32 {
        let pts = self.points();
        let n = pts.len();
        let mut area = 0.0;
        for i in 0..n {
            let [x0, y0] = pts[i];
            let [x1, y1] = pts[(i + 1) % n];
            area += x0 * y1 - x1 * y0;
        }
        area * 0.5
    }
}

fn cubic_point(p0: [f32; 2], p1: [f32; 2], p2: [f32; 2], p3: [f32; 2], t: f32) -> [f32; 2] {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    [
        b0 * p0[0] + b1 * p1[0] + b2 * p2[0] + b3 * p3[0],
        b0 * p0[1] + b1 * p1[1] + b2 * p2[1] + b3 * p3[1],
    ]
}

fn points_coincide(a: [f32; 2], b: [f32; 2]) -> bool {
    (a[0] - b[0]).abs() < 1e-5 && (a[1] - b[1]).abs() < 1e-5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_curve_endpoints() {
        let mut path = PathOutline::new();
        path.move_to(0.0, 0.0);
        path.bezier_curve_to(0.0, 1.0, 1.0, 1.0, 1.0, 0.0);

        let pts = path.points();
        assert_eq!(pts.len(), 1 + SEGMENTS_PER_CURVE);
        assert_eq!(pts[0], [0.0, 0.0]);
        let last = pts[pts.len() - 1];
        assert!((last[0] - 1.0).abs() < 1e-5 && last[1].abs() < 1e-5);
    }

    #[test]
    fn test_closing_point_dropped() {
        let mut path = PathOutline::new();
        path.move_to(0.0, 0.0);
        path.bezier_curve_to(0.5, 1.0, 1.0, 1.0, 1.0, 0.0);
        path.bezier_curve_to(0.5, -1.0, 0.0, -1.0, 0.0, 0.0);

        let pts = path.points();
        // Path returns to its start; the duplicate is not reported
        let last = pts[pts.len() - 1];
        assert!(!(last[0].abs() < 1e-5 && last[1].abs() < 1e-5));
    }

    #[test]
    fn test_degenerate_control_points_stay_on_line() {
        // Control points equal to the endpoints give a straight segment
        let mut path = PathOutline::new();
        path.move_to(0.0, 0.0);
        path.bezier_curve_to(0.0, 0.0, 2.0, 0.0, 2.0, 0.0);

        for p in path.points() {
            assert!(p[1].abs() < 1e-5);
        }
    }

    #[test]
    fn test_signed_area_orientation() {
        // Counter-clockwise loop has positive area
        let mut ccw = PathOutline::new();
        ccw.move_to(0.0, 0.0);
        ccw.bezier_curve_to(1.0, 0.0, 1.0, 0.0, 1.0, 0.0);
        ccw.bezier_curve_to(1.0, 1.0, 1.0, 1.0, 1.0, 1.0);
        ccw.bezier_curve_to(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);
        assert!(ccw.signed_area() > 0.0);
    }
}
