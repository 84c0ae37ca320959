use crate::geo::*;
use crate::segment::*;

use smallvec::*;

use std::f32::consts::PI;

///
/// The default maximum angle (in degrees) covered by a single cubic section of an arc
///
pub const DEFAULT_MAX_ARC_SWEEP: f32 = 30.0;

///
/// Generates the cubic curves for a circular arc around `center` of the specified `radius`, starting at
/// `start_angle` and sweeping through `sweep` radians (positive sweeps go anticlockwise)
///
/// Every cubic covers at most `max_sweep` radians. The first curve starts exactly at `start` and the last one
/// ends exactly at `end`, so callers can join arcs up with other curves without gaps.
///
pub fn arc_cubics(center: Point2D, radius: f32, start: Point2D, end: Point2D, start_angle: f32, sweep: f32, max_sweep: f32) -> SmallVec<[Curve; 8]> {
    let max_sweep   = max_sweep.abs().max(1.0f32.to_radians());
    let num_pieces  = (sweep.abs() / max_sweep).ceil().max(1.0) as usize;
    let piece_sweep = sweep / (num_pieces as f32);

    // Control points for a unit arc from -phi to +phi around the x axis
    let phi         = piece_sweep * 0.5;
    let (sin, cos)  = phi.sin_cos();
    let control_x   = (4.0 - cos) / 3.0;
    let control_y   = (1.0 - cos) * (3.0 - cos) / (3.0 * sin + if sin < 0.0 { -LENGTH_EPSILON } else { LENGTH_EPSILON });

    let mut curves      = smallvec![];
    let mut last_point  = start;

    for piece in 0..num_pieces {
        // Rotate the unit arc to the middle of this piece
        let mid_angle       = start_angle + piece_sweep * (piece as f32) + phi;
        let (rsin, rcos)    = mid_angle.sin_cos();
        let place           = |x: f32, y: f32| Point2D::new(center.x + radius * (x * rcos - y * rsin), center.y + radius * (x * rsin + y * rcos));

        let cp1             = place(control_x, -control_y);
        let cp2             = place(control_x, control_y);
        let end_point       = if piece + 1 == num_pieces { end } else { place(cos, sin) };

        curves.push(Curve::Cubic(last_point, cp1, cp2, end_point));
        last_point = end_point;
    }

    curves
}

///
/// Generates cubic curves for a circular arc from `start` to `end` that sweeps through `sweep_degrees`
///
/// The arc's circle is the one that passes through both points and subtends the sweep angle. A zero sweep
/// produces a straight line, and an arc that starts and ends at the same point produces nothing (the radius
/// of such an arc is undefined).
///
pub fn arc_between(start: Point2D, end: Point2D, sweep_degrees: f32, max_sweep_degrees: f32) -> SmallVec<[Curve; 8]> {
    let chord       = end - start;
    let chord_len   = chord.length();

    if chord_len <= LENGTH_EPSILON || !chord_len.is_finite() {
        return smallvec![];
    }

    // Sweeps of a full circle or more can't pass through two distinct points
    let sweep       = sweep_degrees.to_radians().max(-2.0*PI + 1e-4).min(2.0*PI - 1e-4);
    if sweep.abs() < 1e-6 {
        return smallvec![Curve::Line(start, end)];
    }

    // The center is on the perpendicular bisector of the chord (the sign of tan moves it to the correct side for the sweep)
    let half_sweep  = sweep * 0.5;
    let radius      = chord_len / (2.0 * half_sweep.sin().abs());
    let offset      = (chord_len * 0.5) / half_sweep.tan();
    let midpoint    = Point2D::lerp(0.5, start, end);
    let center      = midpoint + chord.normal() * offset;

    let start_vec   = start - center;
    let start_angle = start_vec.y.atan2(start_vec.x);

    arc_cubics(center, radius, start, end, start_angle, sweep, max_sweep_degrees.to_radians())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn quarter_circle_points_lie_on_circle() {
        let curves = arc_between(Point2D::new(100.0, 0.0), Point2D::new(0.0, 100.0), 90.0, 30.0);

        assert!(curves.len() == 3, "Expected 3 pieces, found {}", curves.len());

        for curve in curves.iter() {
            for t in 0..=10 {
                let point   = curve.point_at((t as f32) / 10.0);
                let dist    = point.length();

                assert!((dist - 100.0).abs() < 0.01, "{:?} is {} from the center", point, dist);
            }
        }

        assert!(curves[0].start_point() == Point2D::new(100.0, 0.0));
        assert!(curves[2].end_point() == Point2D::new(0.0, 100.0));
    }

    #[test]
    fn negative_sweep_goes_clockwise() {
        let curves  = arc_between(Point2D::new(100.0, 0.0), Point2D::new(0.0, -100.0), -90.0, 30.0);
        let mid     = curves[1].point_at(0.5);

        // Clockwise from (100, 0) to (0, -100) around the origin passes through the lower-right quadrant
        assert!(mid.x > 0.0 && mid.y < 0.0, "{:?}", mid);
        assert!((mid.length() - 100.0).abs() < 0.01, "{:?}", mid);
    }

    #[test]
    fn zero_sweep_is_a_line() {
        let curves = arc_between(Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0), 0.0, 30.0);

        assert!(curves.len() == 1);
        assert!(curves[0].kind() == CurveKind::Line);
    }
}
