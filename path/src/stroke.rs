//!
//! Builds the outline of a stroked path as a set of small closed regions
//!
//! Every leaf segment becomes one closed outline between its two offset curves. Joins and caps are added as
//! separate polygons. Each region is oriented so its signed area is positive, which means the union of all the
//! regions can be filled with the nonzero rule without the overlaps cancelling out.
//!

use crate::arc::*;
use crate::dash::*;
use crate::geo::*;
use crate::path::*;
use crate::style::*;
use crate::segment::*;

use log::*;
use smallvec::*;

use std::mem;
use std::f32::consts::PI;

///
/// Miter joins whose apex is further than this many half-widths from the join point are drawn as bevels
///
pub const MITER_LIMIT: f32 = 10.0;

///
/// Turns with a sine below this are treated as straight continuations (which need no join)
///
const COLLINEAR_EPSILON: f32 = 1e-5;

///
/// The curves making up a single closed region of the stroke
///
type Piece = SmallVec<[Curve; 12]>;

///
/// Splits every cubic segment whose control polygon crosses itself at its midpoint
///
/// The offset of such a curve folds back on itself, so it's split before offsetting. Both halves are marked as
/// starting and ending a section so a join is drawn where they meet. This acts on the top-level segments, so
/// it should be called before the path is refined. Returns the number of segments that were split.
///
pub fn presplit_self_intersecting(path: &mut Path) -> usize {
    let mut num_split = 0;

    for contour_idx in 0..path.contours.len() {
        let segments            = mem::take(&mut path.contours[contour_idx].segments);
        let mut new_segments    = Vec::with_capacity(segments.len());
        let split_before        = num_split;

        for segment_id in segments {
            let segment = path.segment(segment_id).clone();

            match segment.curve {
                Curve::Cubic(p1, c1, c2, p2) if segments_cross(p1, p2, c1, c2) => {
                    let (first, second) = segment.curve.split(0.5);

                    // The first half re-uses the ID of the original segment
                    path.release_children(segment_id);
                    path.segments[segment_id.0] = Segment { curve: first, children: None, sub_start: segment.sub_start, sub_end: true };
                    let second_id               = path.alloc_segment(Segment { curve: second, children: None, sub_start: true, sub_end: segment.sub_end });

                    new_segments.push(segment_id);
                    new_segments.push(second_id);
                    num_split += 1;
                }

                _ => new_segments.push(segment_id),
            }
        }

        let contour         = &mut path.contours[contour_idx];
        contour.segments    = new_segments;
        if num_split > split_before {
            contour.refined = None;
        }
    }

    if num_split > 0 {
        path.invalidate();
    }

    num_split
}

///
/// Moves a point on a curve's control polygon by offsetting the lines either side of it and intersecting them
///
/// The lines are `(before, before + before_dir)` and `(after, after + after_dir)`. When they don't meet
/// (parallel lines) or meet implausibly far away, `fallback` is used instead.
///
fn intersect_offset_lines(before: Point2D, before_dir: Point2D, after: Point2D, after_dir: Point2D, fallback: Point2D, max_distance: f32) -> Point2D {
    match line_intersection(before, before + before_dir, after, after + after_dir) {
        Some((t, _)) => {
            let point = before + before_dir * t;

            if point.is_finite() && point.distance(fallback) <= max_distance {
                point
            } else {
                fallback
            }
        }

        None => fallback,
    }
}

///
/// Approximates the curve that runs parallel to another curve at the specified distance
///
/// Positive distances are to the left of the curve's direction of travel. Lines are translated along their
/// normal. Quadratic and cubic curves move their end points along the normals at each end, then rebuild the
/// control points by intersecting the offset edges of the control polygon. This is an approximation that is
/// only accurate for curves that are already fairly flat, so it's intended to be used on refined leaves.
///
pub fn offset_curve(curve: &Curve, distance: f32) -> Curve {
    match *curve {
        Curve::Line(p1, p2) => {
            let offset = (p2 - p1).normal() * distance;

            Curve::Line(p1 + offset, p2 + offset)
        }

        Curve::Quadratic(p1, c1, p2) => {
            let start_dir   = curve.start_tangent();
            let end_dir     = curve.end_tangent();
            let n1          = start_dir.normal();
            let n2          = end_dir.normal();

            let q1          = p1 + n1 * distance;
            let q2          = p2 + n2 * distance;
            let fallback    = c1 + average_normal(n1, n2) * distance;
            let max_dist    = curve.control_polygon_length() + distance.abs() * 4.0;

            Curve::Quadratic(q1, intersect_offset_lines(q1, start_dir, q2, end_dir, fallback, max_dist), q2)
        }

        Curve::Cubic(p1, c1, c2, p2) => {
            let start_dir   = curve.start_tangent();
            let end_dir     = curve.end_tangent();
            let mid_dir     = if c1.distance(c2) > LENGTH_EPSILON { c2 - c1 } else { p2 - p1 };

            let n1          = start_dir.normal();
            let nm          = mid_dir.normal();
            let n2          = end_dir.normal();

            let q1          = p1 + n1 * distance;
            let q2          = p2 + n2 * distance;
            let mid         = c1 + nm * distance;
            let max_dist    = curve.control_polygon_length() + distance.abs() * 4.0;

            let d1          = intersect_offset_lines(q1, start_dir, mid, mid_dir, c1 + average_normal(n1, nm) * distance, max_dist);
            let d2          = intersect_offset_lines(mid, mid_dir, q2, end_dir, c2 + average_normal(nm, n2) * distance, max_dist);

            Curve::Cubic(q1, d1, d2, q2)
        }
    }
}

///
/// The normal halfway between two unit normals (or the first normal if they point in opposite directions)
///
#[inline]
fn average_normal(n1: Point2D, n2: Point2D) -> Point2D {
    let sum = n1 + n2;

    if sum.length() > 1e-6 { sum.normalized() } else { n1 }
}

///
/// Twice the signed area of the polygon formed by the control points of a closed loop of curves
///
fn control_polygon_area(curves: &[Curve]) -> f32 {
    let mut area = 0.0;

    for curve in curves.iter() {
        let mut last = curve.start_point();

        for point in curve.points().skip(1) {
            area += last.cross(point);
            last = point;
        }
    }

    area
}

///
/// Adds a closed region to the stroke, reversing it if needed so that it has a positive signed area
///
/// Regions with no area are left out.
///
fn push_piece(stroke: &mut Path, mut piece: Piece) {
    let area = control_polygon_area(&piece);

    if !(area.abs() > 0.0) {
        return;
    }

    if area < 0.0 {
        piece.reverse();
        piece.iter_mut().for_each(|curve| *curve = curve.reversed());
    }

    stroke.move_to_abs(piece[0].start_point());
    for curve in piece {
        stroke.push_curve_to(|_| curve);
    }
    stroke.close();
}

///
/// Adds the outline of a single leaf segment: the right offset forwards, across, the left offset backwards
///
fn push_leaf_outline(stroke: &mut Path, curve: &Curve, half_width: f32) {
    let right   = offset_curve(curve, -half_width);
    let left    = offset_curve(curve, half_width).reversed();

    let piece: Piece = smallvec![
        right,
        Curve::Line(right.end_point(), left.start_point()),
        left,
        Curve::Line(left.end_point(), right.start_point()),
    ];

    push_piece(stroke, piece);
}

///
/// Adds a circular wedge centred on `center` that runs from `from` to `to` (both at `radius` from the center),
/// taking the shorter way around unless `sweep` is specified
///
fn round_piece(center: Point2D, radius: f32, from: Point2D, to: Point2D, sweep: Option<f32>) -> Piece {
    let from_vec    = from - center;
    let to_vec      = to - center;
    let start_angle = from_vec.y.atan2(from_vec.x);
    let sweep       = sweep.unwrap_or_else(|| from_vec.cross(to_vec).atan2(from_vec.dot(to_vec)));

    let mut piece: Piece = smallvec![];
    piece.push(Curve::Line(center, from));
    piece.extend(arc_cubics(center, radius, from, to, start_angle, sweep, DEFAULT_MAX_ARC_SWEEP.to_radians()));
    piece.push(Curve::Line(to, center));

    piece
}

///
/// Adds the join between a segment arriving at `point` along `incoming` and one leaving along `outgoing`
///
fn push_join(stroke: &mut Path, join: JoinKind, point: Point2D, incoming: Point2D, outgoing: Point2D, half_width: f32) {
    if join == JoinKind::None {
        return;
    }

    if incoming.length() <= LENGTH_EPSILON || outgoing.length() <= LENGTH_EPSILON {
        return;
    }

    let incoming    = incoming.normalized();
    let outgoing    = outgoing.normalized();
    let turn        = incoming.cross(outgoing);

    // A straight continuation leaves no gap between the outlines
    if turn.abs() < COLLINEAR_EPSILON && incoming.dot(outgoing) > 0.0 {
        return;
    }

    // The gap is on the outside of the turn: the right side for left turns, the left side for right turns
    let side        = if turn > 0.0 { -half_width } else { half_width };
    let outer_in    = point + incoming.normal() * side;
    let outer_out   = point + outgoing.normal() * side;

    let bevel: Piece = smallvec![
        Curve::Line(point, outer_in),
        Curve::Line(outer_in, outer_out),
        Curve::Line(outer_out, point),
    ];

    let piece = match join {
        JoinKind::None  => return,
        JoinKind::Flat  => bevel,

        JoinKind::Sharp => {
            let apex = line_intersection(outer_in, outer_in + incoming, outer_out, outer_out + outgoing)
                .map(|(t, _)| outer_in + incoming * t)
                .filter(|apex| apex.is_finite() && apex.distance(point) <= MITER_LIMIT * half_width);

            match apex {
                Some(apex)  => smallvec![
                    Curve::Line(point, outer_in),
                    Curve::Line(outer_in, apex),
                    Curve::Line(apex, outer_out),
                    Curve::Line(outer_out, point),
                ],
                None        => bevel,
            }
        }

        JoinKind::Round => round_piece(point, half_width, outer_in, outer_out, None),
    };

    push_piece(stroke, piece);
}

///
/// Adds a cap to an open end of a contour
///
/// `direction` points away from the contour, along the line that the stroke would continue if it was extended.
///
fn push_cap(stroke: &mut Path, cap: CapKind, end: Point2D, direction: Point2D, half_width: f32) {
    if direction.length() <= LENGTH_EPSILON {
        return;
    }

    let direction   = direction.normalized();
    let normal      = direction.normal();
    let left        = end + normal * half_width;
    let right       = end - normal * half_width;
    let extend      = direction * half_width;

    let piece: Piece = match cap {
        CapKind::None   => return,
        CapKind::Flat   => smallvec![
            Curve::Line(right, right + extend),
            Curve::Line(right + extend, left + extend),
            Curve::Line(left + extend, left),
            Curve::Line(left, right),
        ],
        CapKind::Sharp  => smallvec![
            Curve::Line(right, end + extend),
            Curve::Line(end + extend, left),
            Curve::Line(left, right),
        ],
        CapKind::Round  => {
            // Half circle from the right edge, through the extension point, to the left edge
            let mut piece   = round_piece(end, half_width, right, left, Some(PI));
            piece.remove(0);
            piece.pop();
            piece.push(Curve::Line(left, right));

            piece
        }
    };

    push_piece(stroke, piece);
}

///
/// Builds the outline of the stroke for a path
///
/// The outline is made from the leaves of each contour, so the path should usually be refined first (an
/// unrefined path is stroked using its top-level segments). The result is a path of small closed regions that
/// should be filled with the nonzero rule.
///
pub fn build_stroke(path: &Path, style: &StrokeStyle) -> Path {
    if style.is_dashed() {
        let dashed = dash_path(path, &style.dash_pattern);
        return build_solid_stroke(&dashed, style);
    }

    build_solid_stroke(path, style)
}

///
/// True if a curve has no direction to stroke along (all of its points coincide)
///
#[inline]
fn is_degenerate(curve: &Curve) -> bool {
    curve.start_tangent().length() <= LENGTH_EPSILON
}

fn build_solid_stroke(path: &Path, style: &StrokeStyle) -> Path {
    let half_width  = style.width.abs() * 0.5;
    let mut stroke  = Path::new();

    if !(half_width > 0.0) {
        return stroke;
    }

    for contour in path.contours().iter().filter(|contour| !contour.is_empty()) {
        // Zero-length leaves have no tangent, so they're dropped and the join that would follow them moves to the
        // leaf before them. The flag is the 'ends a section' flag for the join after each kept leaf.
        let mut leaves: SmallVec<[(Curve, bool); 16]>   = smallvec![];
        let mut leading_sub_end                         = false;

        for leaf in contour.leaves().iter().map(|leaf_id| path.segment(*leaf_id)) {
            if !is_degenerate(leaf.curve()) {
                leaves.push((*leaf.curve(), leaf.sub_end()));
            } else if let Some(last) = leaves.last_mut() {
                last.1 |= leaf.sub_end();
            } else {
                leading_sub_end |= leaf.sub_end();
            }
        }

        if contour.is_closed() {
            if let Some(last) = leaves.last_mut() {
                last.1 |= leading_sub_end;
            }
        }

        for (idx, (curve, sub_end)) in leaves.iter().enumerate() {
            push_leaf_outline(&mut stroke, curve, half_width);

            if *sub_end {
                if let Some(next_idx) = contour.next_index(idx, leaves.len()) {
                    let next = &leaves[next_idx].0;
                    push_join(&mut stroke, style.join, curve.end_point(), curve.end_tangent(), next.start_tangent(), half_width);
                }
            }
        }

        if !contour.is_closed() {
            match (leaves.first(), leaves.last()) {
                (Some((first, _)), Some((last, _))) => {
                    push_cap(&mut stroke, style.cap, first.start_point(), -first.start_tangent(), half_width);
                    push_cap(&mut stroke, style.cap, last.end_point(), last.end_tangent(), half_width);
                }

                _ => {
                    // A contour with no length is drawn as a dot made from two caps facing along the x axis
                    let point = path.segment(contour.segments()[0]).curve().start_point();

                    push_cap(&mut stroke, style.cap, point, Point2D::new(1.0, 0.0), half_width);
                    push_cap(&mut stroke, style.cap, point, Point2D::new(-1.0, 0.0), half_width);
                }
            }
        }
    }

    trace!("Stroke of width {} generated {} segments", style.width, stroke.segment_count());

    stroke
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn line_offset_is_parallel() {
        let line    = Curve::Line(Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0));
        let offset  = offset_curve(&line, 2.0);

        assert!(offset == Curve::Line(Point2D::new(0.0, 2.0), Point2D::new(10.0, 2.0)), "{:?}", offset);
    }

    #[test]
    fn straight_cubic_offset_stays_straight() {
        let cubic   = Curve::Cubic(Point2D::new(0.0, 0.0), Point2D::new(30.0, 0.0), Point2D::new(60.0, 0.0), Point2D::new(90.0, 0.0));
        let offset  = offset_curve(&cubic, -3.0);

        for point in offset.points() {
            assert!((point.y + 3.0).abs() < 1e-4, "{:?}", offset);
        }
    }

    #[test]
    fn s_curve_is_presplit() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.cubic_to2(30.0, 50.0, 70.0, -50.0, 100.0, 0.0);

        assert!(presplit_self_intersecting(&mut path) == 1);
        assert!(path.segment_count() == 2);

        let first = path.segment(path.contours()[0].segments()[0]);
        assert!(first.sub_end());
    }

    #[test]
    fn reversed_piece_has_positive_area() {
        let mut stroke = Path::new();
        push_piece(&mut stroke, smallvec![
            Curve::Line(Point2D::new(0.0, 0.0), Point2D::new(0.0, 10.0)),
            Curve::Line(Point2D::new(0.0, 10.0), Point2D::new(10.0, 10.0)),
            Curve::Line(Point2D::new(10.0, 10.0), Point2D::new(0.0, 0.0)),
        ]);

        let curves = stroke.leaf_curves(&stroke.contours()[0]).copied().collect::<Vec<_>>();
        assert!(control_polygon_area(&curves) > 0.0);
    }
}
