use crate::geo::*;
use crate::path::*;
use crate::segment::*;

use itertools::*;

use std::hash::{Hash, Hasher};
use std::collections::hash_map::{DefaultHasher};

///
/// Number of steps per unit that coordinates are quantized to before hashing or comparing them
///
pub const QUANTIZE_RESOLUTION: f32 = 1024.0;

///
/// Converts a coordinate to the fixed-point value used for hashing and comparison
///
/// Values that differ by less than 1/1024 of a unit usually quantize to the same value.
///
#[inline]
pub fn quantize(value: f32) -> i32 {
    (value * QUANTIZE_RESOLUTION).round() as i32
}

#[inline]
pub fn quantize_point(point: Point2D) -> (i32, i32) {
    (quantize(point.x), quantize(point.y))
}

///
/// The kind tag mixed into segment hashes
///
#[inline]
fn kind_tag(kind: CurveKind) -> u8 {
    match kind {
        CurveKind::Line         => 1,
        CurveKind::Quadratic    => 2,
        CurveKind::Cubic        => 3,
    }
}

///
/// Adds a curve to a hash, using its kind and quantized coordinates
///
pub fn hash_curve<H: Hasher>(curve: &Curve, state: &mut H) {
    kind_tag(curve.kind()).hash(state);
    curve.points().for_each(|point| quantize_point(point).hash(state));
}

///
/// The hash of a single curve
///
pub fn curve_hash(curve: &Curve) -> u64 {
    let mut hasher = DefaultHasher::new();
    hash_curve(curve, &mut hasher);

    hasher.finish()
}

///
/// Calculates the content hash of a path, by folding the segment hashes of every contour in order
///
/// Empty contours are ignored so that paths that differ only by a trailing `move_to` hash identically.
///
pub fn path_hash(path: &Path) -> u64 {
    let mut hasher = DefaultHasher::new();

    for contour in path.contours().iter().filter(|contour| !contour.is_empty()) {
        0xc0u8.hash(&mut hasher);
        contour.is_closed().hash(&mut hasher);
        contour.segments().len().hash(&mut hasher);

        for segment_id in contour.segments() {
            curve_hash(path.segment(*segment_id).curve()).hash(&mut hasher);
        }
    }

    hasher.finish()
}

///
/// True if two curves are the same kind and have the same quantized coordinates
///
pub fn curves_match(a: &Curve, b: &Curve) -> bool {
    a.kind() == b.kind()
        && a.points().zip(b.points()).all(|(p, q)| quantize_point(p) == quantize_point(q))
}

///
/// Compares two paths structurally at the quantized resolution (used to resolve hash collisions)
///
pub fn paths_match(a: &Path, b: &Path) -> bool {
    let contours_a = a.contours().iter().filter(|contour| !contour.is_empty());
    let contours_b = b.contours().iter().filter(|contour| !contour.is_empty());

    contours_a.zip_longest(contours_b).all(|pair| {
        match pair {
            EitherOrBoth::Both(contour_a, contour_b) => {
                contour_a.is_closed() == contour_b.is_closed()
                    && contour_a.segments().len() == contour_b.segments().len()
                    && contour_a.segments().iter().zip(contour_b.segments().iter())
                        .all(|(id_a, id_b)| curves_match(a.segment(*id_a).curve(), b.segment(*id_b).curve()))
            }

            _ => false,
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn noise_below_resolution_does_not_change_hash() {
        let a = Curve::Line(Point2D::new(10.0, 20.0), Point2D::new(30.0, 40.0));
        let b = Curve::Line(Point2D::new(10.0001, 20.0), Point2D::new(30.0, 39.9999));

        assert!(curve_hash(&a) == curve_hash(&b));
        assert!(curves_match(&a, &b));
    }

    #[test]
    fn kind_changes_hash() {
        let line    = Curve::Line(Point2D::new(0.0, 0.0), Point2D::new(30.0, 0.0));
        let cubic   = Curve::Cubic(Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0), Point2D::new(20.0, 0.0), Point2D::new(30.0, 0.0));

        assert!(curve_hash(&line) != curve_hash(&cubic));
        assert!(!curves_match(&line, &cubic));
    }
}
