use crate::geo::*;

use flo_curves::geo::Coord2;
use flo_curves::bezier;
use flo_curves::bezier::{BezierCurveFactory, de_casteljau3, de_casteljau4, subdivide4};

///
/// Identifies a segment within the arena of the path that owns it
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SegmentId(pub (crate) usize);

impl SegmentId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

///
/// The kind of a curve, without its coordinates
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum CurveKind {
    Line,
    Quadratic,
    Cubic,
}

///
/// A single curve primitive
///
/// Control points are stored in path order: start point, control points, end point
///
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub enum Curve {
    Line(Point2D, Point2D),
    Quadratic(Point2D, Point2D, Point2D),
    Cubic(Point2D, Point2D, Point2D, Point2D),
}

impl Curve {
    #[inline]
    pub fn kind(&self) -> CurveKind {
        match self {
            Curve::Line(..)         => CurveKind::Line,
            Curve::Quadratic(..)    => CurveKind::Quadratic,
            Curve::Cubic(..)        => CurveKind::Cubic,
        }
    }

    #[inline]
    pub fn start_point(&self) -> Point2D {
        match self {
            Curve::Line(p1, _)              => *p1,
            Curve::Quadratic(p1, _, _)      => *p1,
            Curve::Cubic(p1, _, _, _)       => *p1,
        }
    }

    #[inline]
    pub fn end_point(&self) -> Point2D {
        match self {
            Curve::Line(_, p2)              => *p2,
            Curve::Quadratic(_, _, p2)      => *p2,
            Curve::Cubic(_, _, _, p2)       => *p2,
        }
    }

    ///
    /// Every defining point of this curve, in path order
    ///
    pub fn points(&self) -> impl Iterator<Item=Point2D> {
        let (points, count) = match *self {
            Curve::Line(p1, p2)             => ([p1, p2, p2, p2], 2),
            Curve::Quadratic(p1, c1, p2)    => ([p1, c1, p2, p2], 3),
            Curve::Cubic(p1, c1, c2, p2)    => ([p1, c1, c2, p2], 4),
        };

        IntoIterator::into_iter(points).take(count)
    }

    ///
    /// Applies a function to every defining point of this curve
    ///
    pub fn map_points(&self, map: impl Fn(Point2D) -> Point2D) -> Curve {
        match *self {
            Curve::Line(p1, p2)             => Curve::Line(map(p1), map(p2)),
            Curve::Quadratic(p1, c1, p2)    => Curve::Quadratic(map(p1), map(c1), map(p2)),
            Curve::Cubic(p1, c1, c2, p2)    => Curve::Cubic(map(p1), map(c1), map(c2), map(p2)),
        }
    }

    #[inline]
    pub fn transform(&self, transform: &Transform2D) -> Curve {
        self.map_points(|point| transform.transform_point(point))
    }

    ///
    /// The same curve, travelling in the opposite direction
    ///
    pub fn reversed(&self) -> Curve {
        match *self {
            Curve::Line(p1, p2)             => Curve::Line(p2, p1),
            Curve::Quadratic(p1, c1, p2)    => Curve::Quadratic(p2, c1, p1),
            Curve::Cubic(p1, c1, c2, p2)    => Curve::Cubic(p2, c2, c1, p1),
        }
    }

    ///
    /// Evaluates the curve at a parametric position
    ///
    pub fn point_at(&self, t: f32) -> Point2D {
        let t = t as f64;

        match *self {
            Curve::Line(p1, p2)             => Point2D::lerp(t as f32, p1, p2),
            Curve::Quadratic(p1, c1, p2)    => de_casteljau3(t, Coord2::from(p1), Coord2::from(c1), Coord2::from(p2)).into(),
            Curve::Cubic(p1, c1, c2, p2)    => de_casteljau4(t, Coord2::from(p1), Coord2::from(c1), Coord2::from(c2), Coord2::from(p2)).into(),
        }
    }

    ///
    /// Splits this curve in two at a parametric position
    ///
    pub fn split(&self, t: f32) -> (Curve, Curve) {
        match *self {
            Curve::Line(p1, p2) => {
                let mid = Point2D::lerp(t, p1, p2);

                (Curve::Line(p1, mid), Curve::Line(mid, p2))
            }

            Curve::Quadratic(p1, c1, p2) => {
                let a   = Point2D::lerp(t, p1, c1);
                let b   = Point2D::lerp(t, c1, p2);
                let mid = self.point_at(t);

                (Curve::Quadratic(p1, a, mid), Curve::Quadratic(mid, b, p2))
            }

            Curve::Cubic(p1, c1, c2, p2) => {
                let ((_, a1, a2, mid), (_, b1, b2, _)) = subdivide4(t as f64, Coord2::from(p1), Coord2::from(c1), Coord2::from(c2), Coord2::from(p2));
                let mid = Point2D::from(mid);

                (Curve::Cubic(p1, a1.into(), a2.into(), mid), Curve::Cubic(mid, b1.into(), b2.into(), p2))
            }
        }
    }

    ///
    /// This curve as a `flo_curves` cubic, elevating lines and quadratics
    ///
    pub fn to_bezier(&self) -> bezier::Curve<Coord2> {
        let (p1, c1, c2, p2) = match *self {
            Curve::Line(p1, p2)             => (p1, Point2D::lerp(1.0/3.0, p1, p2), Point2D::lerp(2.0/3.0, p1, p2), p2),
            Curve::Quadratic(p1, c1, p2)    => (p1, Point2D::lerp(2.0/3.0, p1, c1), Point2D::lerp(2.0/3.0, p2, c1), p2),
            Curve::Cubic(p1, c1, c2, p2)    => (p1, c1, c2, p2),
        };

        bezier::Curve::from_points(Coord2::from(p1), (Coord2::from(c1), Coord2::from(c2)), Coord2::from(p2))
    }

    ///
    /// Direction the curve leaves its start point (not normalized, may be zero for a fully degenerate curve)
    ///
    pub fn start_tangent(&self) -> Point2D {
        let start = self.start_point();

        self.points()
            .skip(1)
            .map(|point| point - start)
            .find(|tangent| tangent.length() > 0.0)
            .unwrap_or_else(Point2D::origin)
    }

    ///
    /// Direction the curve arrives at its end point
    ///
    pub fn end_tangent(&self) -> Point2D {
        self.reversed().start_tangent() * -1.0
    }

    ///
    /// Length of the polyline through the control points
    ///
    pub fn control_polygon_length(&self) -> f32 {
        match *self {
            Curve::Line(p1, p2)             => p1.distance(p2),
            Curve::Quadratic(p1, c1, p2)    => p1.distance(c1) + c1.distance(p2),
            Curve::Cubic(p1, c1, c2, p2)    => p1.distance(c1) + c1.distance(c2) + c2.distance(p2),
        }
    }

    #[inline]
    pub fn chord_length(&self) -> f32 {
        self.start_point().distance(self.end_point())
    }

    ///
    /// The last control point before the end point, as it would be placed if this curve was elevated to a cubic
    ///
    /// This is what a smooth `cubic_to` reflects to find its first control point
    ///
    pub fn outgoing_control_point(&self) -> Point2D {
        match *self {
            Curve::Line(p1, p2)             => Point2D::lerp(2.0/3.0, p1, p2),
            Curve::Quadratic(_, c1, p2)     => Point2D::lerp(2.0/3.0, p2, c1),
            Curve::Cubic(_, _, c2, _)       => c2,
        }
    }
}

///
/// A segment of a contour
///
/// Segments form a binary subdivision tree: a refined segment has two children that cover the first and
/// second part of the same curve. Only leaves (unrefined segments) should be used for flattening or
/// offsetting.
///
#[derive(Clone, Debug)]
pub struct Segment {
    /// The curve covered by this segment
    pub (crate) curve: Curve,

    /// The two halves of this segment, if it has been refined
    pub (crate) children: Option<[SegmentId; 2]>,

    /// True if this segment begins a section of the original path (so a join may be needed before it)
    pub (crate) sub_start: bool,

    /// True if this segment ends a section of the original path (so a join may be needed after it)
    pub (crate) sub_end: bool,
}

impl Segment {
    ///
    /// Creates a new, unrefined segment that starts and ends a section of the path
    ///
    #[inline]
    pub fn new(curve: Curve) -> Segment {
        Segment {
            curve:      curve,
            children:   None,
            sub_start:  true,
            sub_end:    true,
        }
    }

    #[inline]
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    #[inline]
    pub fn kind(&self) -> CurveKind {
        self.curve.kind()
    }

    #[inline]
    pub fn is_refined(&self) -> bool {
        self.children.is_some()
    }

    #[inline]
    pub fn children(&self) -> Option<[SegmentId; 2]> {
        self.children
    }

    #[inline]
    pub fn sub_start(&self) -> bool {
        self.sub_start
    }

    #[inline]
    pub fn sub_end(&self) -> bool {
        self.sub_end
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn split_cubic_meets_at_point_on_curve() {
        let curve           = Curve::Cubic(Point2D::new(0.0, 0.0), Point2D::new(0.0, 100.0), Point2D::new(100.0, 100.0), Point2D::new(100.0, 0.0));
        let (first, second) = curve.split(0.3);
        let expected        = curve.point_at(0.3);

        assert!(first.end_point().distance(expected) < 1e-4, "{:?} {:?}", first, expected);
        assert!(second.start_point() == first.end_point());
        assert!(first.start_point() == curve.start_point());
        assert!(second.end_point() == curve.end_point());

        // Points on the halves should match points on the original curve
        let half_point = first.point_at(0.5);
        assert!(half_point.distance(curve.point_at(0.15)) < 1e-3, "{:?}", half_point);
    }

    #[test]
    fn elevated_quadratic_follows_the_same_curve() {
        use flo_curves::bezier::BezierCurve;

        let curve   = Curve::Quadratic(Point2D::new(0.0, 0.0), Point2D::new(50.0, 80.0), Point2D::new(100.0, 0.0));
        let cubic   = curve.to_bezier();

        for t in vec![0.0, 0.25, 0.5, 0.9] {
            let elevated = Point2D::from(cubic.point_at_pos(t as f64));
            assert!(elevated.distance(curve.point_at(t)) < 1e-3, "{:?} {:?}", elevated, curve.point_at(t));
        }
    }

    #[test]
    fn tangents_skip_coincident_control_points() {
        let curve = Curve::Cubic(Point2D::new(0.0, 0.0), Point2D::new(0.0, 0.0), Point2D::new(10.0, 10.0), Point2D::new(10.0, 0.0));

        assert!(curve.start_tangent() == Point2D::new(10.0, 10.0), "{:?}", curve.start_tangent());
        assert!(curve.end_tangent() == Point2D::new(0.0, -10.0), "{:?}", curve.end_tangent());
    }

    #[test]
    fn line_outgoing_control_point_is_two_thirds_along() {
        let line = Curve::Line(Point2D::new(0.0, 0.0), Point2D::new(30.0, 0.0));

        assert!(line.outgoing_control_point() == Point2D::new(20.0, 0.0));
    }
}
