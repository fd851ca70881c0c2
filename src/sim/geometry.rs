//! Collision shapes and the area-intersection predicate
//!
//! Asteroid bodies are irregular and often concave, so a bounding-box or
//! vertex-containment test is not enough. Two shapes collide only when their
//! overlap has positive area:
//! - the second outline is ear-clipped into triangles
//! - the first outline (any simple polygon) is clipped against each triangle
//! - the clipped areas are summed
//!
//! Shapes that merely touch along an edge, or that have no area at all,
//! never collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Overlap area below this counts as touching, not intersecting
pub const AREA_EPSILON: f32 = 1e-3;

/// An axis-aligned rectangle (walls, bullet hitboxes, bounds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Corners in winding order
    pub fn corners(&self) -> [Vec2; 4] {
        let max = self.max();
        [
            self.min,
            Vec2::new(max.x, self.min.y),
            max,
            Vec2::new(self.min.x, max.y),
        ]
    }

    /// Strict overlap of the open rectangles
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }

    /// Area shared with another rectangle
    pub fn overlap_area(&self, other: &Rect) -> f32 {
        let lo = self.min.max(other.min);
        let hi = self.max().min(other.max());
        let extent = (hi - lo).max(Vec2::ZERO);
        extent.x * extent.y
    }
}

/// A simple (non-self-intersecting) polygon, either winding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Vec2>,
}

impl Polygon {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Area enclosed by the outline
    pub fn area(&self) -> f32 {
        signed_area(&self.points).abs()
    }

    /// Axis-aligned bounds
    pub fn bounds(&self) -> Rect {
        let Some(&first) = self.points.first() else {
            return Rect::new(0.0, 0.0, 0.0, 0.0);
        };
        let (lo, hi) = self
            .points
            .iter()
            .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p)));
        Rect {
            min: lo,
            size: hi - lo,
        }
    }
}

/// Collision shape of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Polygon(Polygon),
    Rect(Rect),
}

impl Shape {
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Polygon(poly) => poly.bounds(),
            Shape::Rect(rect) => *rect,
        }
    }

    pub fn area(&self) -> f32 {
        match self {
            Shape::Polygon(poly) => poly.area(),
            Shape::Rect(rect) => (rect.width() * rect.height()).abs(),
        }
    }

    /// Outline vertices
    pub fn outline(&self) -> Vec<Vec2> {
        match self {
            Shape::Polygon(poly) => poly.points.clone(),
            Shape::Rect(rect) => rect.corners().to_vec(),
        }
    }
}

/// True when the two shapes overlap with positive area
pub fn intersects(a: &Shape, b: &Shape) -> bool {
    if !a.bounds().overlaps(&b.bounds()) {
        return false;
    }

    if let (Shape::Rect(ra), Shape::Rect(rb)) = (a, b) {
        return ra.overlap_area(rb) > AREA_EPSILON;
    }

    intersection_area(&a.outline(), &b.outline()) > AREA_EPSILON
}

/// Area of the overlap between two simple polygons
pub fn intersection_area(a: &[Vec2], b: &[Vec2]) -> f32 {
    if a.len() < 3 || b.len() < 3 {
        return 0.0;
    }
    if signed_area(a).abs() <= AREA_EPSILON || signed_area(b).abs() <= AREA_EPSILON {
        return 0.0;
    }

    triangulate(b)
        .iter()
        .map(|tri| signed_area(&clip_to_triangle(a, tri)).abs())
        .sum()
}

/// Shoelace signed area (positive for counter-clockwise in a y-up frame)
pub fn signed_area(points: &[Vec2]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (i, &p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        sum += p.perp_dot(q);
    }
    sum / 2.0
}

/// Ear-clipping triangulation. Triangles come out with positive winding.
fn triangulate(points: &[Vec2]) -> Vec<[Vec2; 3]> {
    let mut remaining: Vec<usize> = (0..points.len()).collect();
    if signed_area(points) < 0.0 {
        remaining.reverse();
    }

    let mut triangles = Vec::with_capacity(points.len().saturating_sub(2));
    while remaining.len() > 3 {
        let n = remaining.len();
        let ear = (0..n).find(|&i| {
            let (ip, ic, inx) = (remaining[(i + n - 1) % n], remaining[i], remaining[(i + 1) % n]);
            let (prev, cur, next) = (points[ip], points[ic], points[inx]);
            if (cur - prev).perp_dot(next - cur) <= 0.0 {
                return false; // reflex or collinear
            }
            remaining
                .iter()
                .filter(|&&k| k != ip && k != ic && k != inx)
                .all(|&k| !point_in_triangle(points[k], prev, cur, next))
        });

        // Self-intersecting input has no ear left; keep what we have
        let Some(i) = ear else { break };
        triangles.push([
            points[remaining[(i + n - 1) % n]],
            points[remaining[i]],
            points[remaining[(i + 1) % n]],
        ]);
        remaining.remove(i);
    }

    if let &[a, b, c] = remaining.as_slice() {
        triangles.push([points[a], points[b], points[c]]);
    }
    triangles
}

/// Inclusive containment test for a positively wound triangle
fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    (b - a).perp_dot(p - a) >= 0.0 && (c - b).perp_dot(p - b) >= 0.0 && (a - c).perp_dot(p - c) >= 0.0
}

/// Sutherland-Hodgman clip of any simple polygon against a positively wound
/// triangle. Concave subjects may produce zero-width bridges along the clip
/// edges; they contribute nothing to the signed area.
fn clip_to_triangle(subject: &[Vec2], clip: &[Vec2; 3]) -> Vec<Vec2> {
    let mut output = subject.to_vec();

    for i in 0..3 {
        if output.is_empty() {
            break;
        }
        let (a, b) = (clip[i], clip[(i + 1) % 3]);
        let edge = b - a;
        let inside = |p: Vec2| edge.perp_dot(p - a) >= 0.0;

        let input = std::mem::take(&mut output);
        let mut prev = input[input.len() - 1];
        for &cur in &input {
            match (inside(prev), inside(cur)) {
                (true, true) => output.push(cur),
                (true, false) => output.push(line_crossing(prev, cur, a, edge)),
                (false, true) => {
                    output.push(line_crossing(prev, cur, a, edge));
                    output.push(cur);
                }
                (false, false) => {}
            }
            prev = cur;
        }
    }

    output
}

/// Point where segment `p -> q` crosses the line through `a` along `edge`
fn line_crossing(p: Vec2, q: Vec2, a: Vec2, edge: Vec2) -> Vec2 {
    let d = q - p;
    let denom = d.perp_dot(edge);
    if denom.abs() < f32::EPSILON {
        return q;
    }
    let t = (a - p).perp_dot(edge) / denom;
    p + d * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn poly(points: &[(f32, f32)]) -> Shape {
        Shape::Polygon(Polygon::new(
            points.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
        ))
    }

    fn l_shape() -> Shape {
        poly(&[
            (0.0, 0.0),
            (30.0, 0.0),
            (30.0, 10.0),
            (10.0, 10.0),
            (10.0, 30.0),
            (0.0, 30.0),
        ])
    }

    #[test]
    fn test_identical_squares_intersect() {
        let a = Shape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = poly(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        assert!(intersects(&a, &b));
        assert!((intersection_area(&a.outline(), &b.outline()) - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_square_in_concave_notch_misses() {
        // Bounding boxes overlap but the square sits in the L's empty corner
        let square = Shape::Rect(Rect::new(15.0, 15.0, 10.0, 10.0));
        assert!(l_shape().bounds().overlaps(&square.bounds()));
        assert!(!intersects(&l_shape(), &square));
        assert!(!intersects(&square, &l_shape()));
    }

    #[test]
    fn test_concave_partial_overlap_area() {
        // Covers x 5..15, y 0..10: the whole strip lies inside the L's top arm
        let strip = Shape::Rect(Rect::new(5.0, 0.0, 10.0, 10.0));
        let area = intersection_area(&l_shape().outline(), &strip.outline());
        assert!((area - 100.0).abs() < 0.01);

        // Covers x 5..15, y 5..15: only the parts inside the arms count
        let corner = Shape::Rect(Rect::new(5.0, 5.0, 10.0, 10.0));
        let area = intersection_area(&l_shape().outline(), &corner.outline());
        // 10x5 in the top arm plus 5x5 in the left arm below it
        assert!((area - 75.0).abs() < 0.01);
    }

    #[test]
    fn test_clockwise_winding_handled() {
        let cw = poly(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
        let square = Shape::Rect(Rect::new(5.0, 5.0, 10.0, 10.0));
        let area = intersection_area(&cw.outline(), &square.outline());
        assert!((area - 25.0).abs() < 0.01);
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Shape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = Shape::Rect(Rect::new(10.0, 0.0, 10.0, 10.0));
        assert!(!intersects(&a, &b));

        let tri = poly(&[(10.0, 0.0), (20.0, 5.0), (10.0, 10.0)]);
        assert!(!intersects(&a, &tri));
    }

    #[test]
    fn test_degenerate_shapes_never_intersect() {
        let flat = poly(&[(0.0, 0.0), (10.0, 10.0), (20.0, 20.0)]);
        let line = poly(&[(0.0, 5.0), (20.0, 5.0)]);
        let empty_rect = Shape::Rect(Rect::new(5.0, 5.0, 0.0, 10.0));
        let big = Shape::Rect(Rect::new(-100.0, -100.0, 300.0, 300.0));
        assert!(!intersects(&flat, &big));
        assert!(!intersects(&line, &big));
        assert!(!intersects(&empty_rect, &big));
    }

    #[test]
    fn test_triangle_crossing_rect() {
        let tri = poly(&[(0.0, 0.0), (20.0, 0.0), (10.0, 20.0)]);
        let wall = Shape::Rect(Rect::new(-50.0, 15.0, 100.0, 30.0));
        assert!(intersects(&tri, &wall));
        assert!(intersects(&wall, &tri));
    }

    fn convex_polygon() -> impl Strategy<Value = Vec<Vec2>> {
        (
            -100.0f32..100.0,
            -100.0f32..100.0,
            prop::collection::vec(5.0f32..50.0, 3..8),
        )
            .prop_map(|(cx, cy, radii)| {
                let n = radii.len();
                radii
                    .iter()
                    .enumerate()
                    .map(|(i, r)| {
                        let theta = i as f32 / n as f32 * std::f32::consts::TAU;
                        Vec2::new(cx + r * theta.cos(), cy + r * theta.sin())
                    })
                    .collect()
            })
    }

    proptest! {
        #[test]
        fn prop_intersects_is_idempotent(a in convex_polygon(), b in convex_polygon()) {
            let (a, b) = (Shape::Polygon(Polygon::new(a)), Shape::Polygon(Polygon::new(b)));
            prop_assert_eq!(intersects(&a, &b), intersects(&a, &b));
        }

        #[test]
        fn prop_overlap_area_is_symmetric(a in convex_polygon(), b in convex_polygon()) {
            let ab = intersection_area(&a, &b);
            let ba = intersection_area(&b, &a);
            prop_assert!((ab - ba).abs() <= 0.5 + ab.max(ba) * 1e-3);
        }

        #[test]
        fn prop_overlap_bounded_by_smaller_area(a in convex_polygon(), b in convex_polygon()) {
            let overlap = intersection_area(&a, &b);
            let limit = signed_area(&a).abs().min(signed_area(&b).abs());
            prop_assert!(overlap <= limit + 0.5);
        }
    }
}
