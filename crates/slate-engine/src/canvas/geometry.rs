//! CPU tessellation for canvas shapes.
//!
//! Every function maps pixel-space input (top-left origin, +Y down) into a
//! clip-space vertex list. The mapping is recomputed per call from the
//! viewport, so a resize between draws is reflected immediately. No GPU
//! types appear here, which keeps the shape math testable without a device.

use std::f32::consts::TAU;

use crate::coords::{Point, Viewport};

#[inline]
fn to_clip(vp: Viewport, x: f32, y: f32) -> [f32; 2] {
    [vp.to_clip_x(x), vp.to_clip_y(y)]
}

/// A single segment: exactly two vertices.
pub(super) fn line(vp: Viewport, start: Point, end: Point) -> Vec<[f32; 2]> {
    vec![to_clip(vp, start.x, start.y), to_clip(vp, end.x, end.y)]
}

/// Two triangles covering the rectangle: six vertices.
pub(super) fn rect_filled(vp: Viewport, x: f32, y: f32, width: f32, height: f32) -> Vec<[f32; 2]> {
    let tl = to_clip(vp, x, y);
    let tr = to_clip(vp, x + width, y);
    let br = to_clip(vp, x + width, y + height);
    let bl = to_clip(vp, x, y + height);

    vec![tl, tr, br, tl, br, bl]
}

/// The four corners in loop order.
pub(super) fn rect_outline(vp: Viewport, x: f32, y: f32, width: f32, height: f32) -> Vec<[f32; 2]> {
    vec![
        to_clip(vp, x, y),
        to_clip(vp, x + width, y),
        to_clip(vp, x + width, y + height),
        to_clip(vp, x, y + height),
    ]
}

/// Perimeter point `i` of a regular `segments`-gon starting at angle 0.
fn circle_point(vp: Viewport, x: f32, y: f32, radius: f32, i: u32, segments: u32) -> [f32; 2] {
    let angle = i as f32 * TAU / segments as f32;
    to_clip(vp, x + radius * angle.cos(), y + radius * angle.sin())
}

/// Triangle fan around the center, emitted as a triangle list:
/// `segments` triangles, three vertices each.
pub(super) fn circle_filled(
    vp: Viewport,
    x: f32,
    y: f32,
    radius: f32,
    segments: u32,
) -> Vec<[f32; 2]> {
    let center = to_clip(vp, x, y);
    let mut vertices = Vec::with_capacity(segments as usize * 3);

    for i in 0..segments {
        vertices.push(center);
        vertices.push(circle_point(vp, x, y, radius, i, segments));
        vertices.push(circle_point(vp, x, y, radius, (i + 1) % segments, segments));
    }

    vertices
}

/// Exactly `segments` perimeter vertices in loop order.
pub(super) fn circle_outline(
    vp: Viewport,
    x: f32,
    y: f32,
    radius: f32,
    segments: u32,
) -> Vec<[f32; 2]> {
    (0..segments)
        .map(|i| circle_point(vp, x, y, radius, i, segments))
        .collect()
}

/// Fan triangulation anchored at the first vertex.
///
/// Correct for convex input only; concave polygons will self-overlap.
pub(super) fn polygon_filled(vp: Viewport, points: &[Point]) -> Vec<[f32; 2]> {
    debug_assert!(points.len() >= 3);
    let anchor = to_clip(vp, points[0].x, points[0].y);
    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);

    for pair in points[1..].windows(2) {
        vertices.push(anchor);
        vertices.push(to_clip(vp, pair[0].x, pair[0].y));
        vertices.push(to_clip(vp, pair[1].x, pair[1].y));
    }

    vertices
}

/// The polygon's vertices in loop order.
pub(super) fn polygon_outline(vp: Viewport, points: &[Point]) -> Vec<[f32; 2]> {
    points.iter().map(|p| to_clip(vp, p.x, p.y)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp() -> Viewport {
        Viewport::new(800, 600)
    }

    fn assert_vertex(v: [f32; 2], expected: [f32; 2]) {
        assert!(
            (v[0] - expected[0]).abs() < 1e-5 && (v[1] - expected[1]).abs() < 1e-5,
            "{v:?} != {expected:?}"
        );
    }

    // ── line ──────────────────────────────────────────────────────────────

    #[test]
    fn line_maps_endpoints_to_clip_space() {
        let verts = line(vp(), Point::new(0.0, 0.0), Point::new(800.0, 0.0));
        assert_eq!(verts.len(), 2);
        assert_eq!(verts[0], [-1.0, 1.0]);
        assert_eq!(verts[1], [1.0, 1.0]);
    }

    // ── rect ──────────────────────────────────────────────────────────────

    #[test]
    fn rect_filled_covers_with_two_triangles() {
        let verts = rect_filled(vp(), 0.0, 0.0, 800.0, 600.0);
        assert_eq!(verts.len(), 6);
        // First triangle: top-left, top-right, bottom-right.
        assert_eq!(verts[0], [-1.0, 1.0]);
        assert_eq!(verts[1], [1.0, 1.0]);
        assert_eq!(verts[2], [1.0, -1.0]);
        // Second triangle shares the diagonal.
        assert_eq!(verts[3], verts[0]);
        assert_eq!(verts[4], verts[2]);
        assert_eq!(verts[5], [-1.0, -1.0]);
    }

    #[test]
    fn rect_outline_emits_four_corners() {
        let verts = rect_outline(vp(), 200.0, 150.0, 400.0, 300.0);
        assert_eq!(verts.len(), 4);
        assert_vertex(verts[0], [-0.5, 0.5]);
        assert_vertex(verts[1], [0.5, 0.5]);
        assert_vertex(verts[2], [0.5, -0.5]);
        assert_vertex(verts[3], [-0.5, -0.5]);
    }

    // ── circle ────────────────────────────────────────────────────────────

    #[test]
    fn circle_outline_has_exactly_segment_vertices() {
        let verts = circle_outline(vp(), 400.0, 300.0, 100.0, 32);
        assert_eq!(verts.len(), 32);
    }

    #[test]
    fn circle_outline_starts_at_angle_zero() {
        let verts = circle_outline(vp(), 400.0, 300.0, 100.0, 16);
        // Angle 0 is due +X: pixel (500, 300), which is clip (0.25, 0).
        assert_vertex(verts[0], [0.25, 0.0]);
    }

    #[test]
    fn circle_outline_vertices_lie_on_the_radius() {
        let v = vp();
        for vert in circle_outline(v, 400.0, 300.0, 100.0, 24) {
            // Undo the clip mapping back into pixel space.
            let px = (vert[0] + 1.0) * 0.5 * 800.0;
            let py = (1.0 - vert[1]) * 0.5 * 600.0;
            let dist = ((px - 400.0).powi(2) + (py - 300.0).powi(2)).sqrt();
            assert!((dist - 100.0).abs() < 1e-2, "distance {dist}");
        }
    }

    #[test]
    fn circle_filled_is_a_fan_of_segment_triangles() {
        let verts = circle_filled(vp(), 400.0, 300.0, 100.0, 32);
        assert_eq!(verts.len(), 32 * 3);
        let center = to_clip(vp(), 400.0, 300.0);
        for triangle in verts.chunks(3) {
            assert_eq!(triangle[0], center);
        }
        // The fan closes: the last triangle ends where the first began.
        assert_eq!(verts[verts.len() - 1], verts[1]);
    }

    // ── polygon ───────────────────────────────────────────────────────────

    #[test]
    fn polygon_filled_fans_from_first_vertex() {
        let points = [
            Point::new(100.0, 100.0),
            Point::new(300.0, 100.0),
            Point::new(350.0, 250.0),
            Point::new(200.0, 350.0),
            Point::new(50.0, 250.0),
        ];
        let verts = polygon_filled(vp(), &points);
        // n - 2 triangles for an n-gon fan.
        assert_eq!(verts.len(), (points.len() - 2) * 3);
        let anchor = to_clip(vp(), 100.0, 100.0);
        for triangle in verts.chunks(3) {
            assert_eq!(triangle[0], anchor);
        }
    }

    #[test]
    fn polygon_outline_maps_each_point() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(800.0, 0.0),
            Point::new(400.0, 600.0),
        ];
        let verts = polygon_outline(vp(), &points);
        assert_eq!(verts.len(), 3);
        assert_eq!(verts[0], [-1.0, 1.0]);
        assert_eq!(verts[1], [1.0, 1.0]);
        assert_vertex(verts[2], [0.0, -1.0]);
    }
}
