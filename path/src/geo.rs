use flo_curves::geo::{Coord2, Coordinate, Coordinate2D, Bounds};
use flo_curves::geo::BoundingBox as CurveBounds;
use flo_curves::line::{line_intersects_line, ray_intersects_ray};

use std::ops::*;

///
/// Small value added to the denominator whenever we divide by a vector length, so zero-length edges
/// produce 0 rather than NaN
///
pub const LENGTH_EPSILON: f32 = 1e-16;

///
/// A point (or vector) in 2D space
///
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Point2D {
        Point2D { x, y }
    }

    #[inline]
    pub const fn origin() -> Point2D {
        Point2D { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn dot(self, other: Point2D) -> f32 {
        self.x * other.x + self.y * other.y
    }

    ///
    /// The z component of the cross product of two vectors (positive if `other` is anticlockwise from `self`)
    ///
    #[inline]
    pub fn cross(self, other: Point2D) -> f32 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn distance(self, other: Point2D) -> f32 {
        Coord2::from(self).distance_to(&Coord2::from(other)) as f32
    }

    ///
    /// Returns this vector scaled to unit length (a zero vector stays zero)
    ///
    #[inline]
    pub fn normalized(self) -> Point2D {
        self * (1.0 / (self.length() + LENGTH_EPSILON))
    }

    ///
    /// The unit vector perpendicular to this one, rotated 90 degrees anticlockwise
    ///
    #[inline]
    pub fn normal(self) -> Point2D {
        Point2D::new(-self.y, self.x).normalized()
    }

    #[inline]
    pub fn lerp(t: f32, a: Point2D, b: Point2D) -> Point2D {
        a + (b - a) * t
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point2D {
    type Output = Point2D;

    #[inline]
    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point2D {
    #[inline]
    fn add_assign(&mut self, rhs: Point2D) {
        *self = *self + rhs;
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    #[inline]
    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point2D {
    #[inline]
    fn sub_assign(&mut self, rhs: Point2D) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Point2D {
    type Output = Point2D;

    #[inline]
    fn mul(self, rhs: f32) -> Point2D {
        Point2D::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point2D {
    type Output = Point2D;

    #[inline]
    fn neg(self) -> Point2D {
        Point2D::new(-self.x, -self.y)
    }
}

impl From<(f32, f32)> for Point2D {
    #[inline]
    fn from((x, y): (f32, f32)) -> Point2D {
        Point2D::new(x, y)
    }
}

impl Coordinate2D for Point2D {
    #[inline]
    fn x(&self) -> f64 { self.x as f64 }

    #[inline]
    fn y(&self) -> f64 { self.y as f64 }
}

impl From<Point2D> for Coord2 {
    #[inline]
    fn from(point: Point2D) -> Coord2 {
        Coord2(point.x(), point.y())
    }
}

impl From<Coord2> for Point2D {
    #[inline]
    fn from(coord: Coord2) -> Point2D {
        Point2D::new(coord.x() as f32, coord.y() as f32)
    }
}

///
/// Position of `point` along the line from `start` in the direction `dir`, as a multiple of the length of `dir`
///
#[inline]
fn position_along(start: Coord2, dir: Coord2, point: Coord2) -> f32 {
    ((point - start).dot(&dir) / dir.dot(&dir)) as f32
}

///
/// Finds where the lines through p1-p2 and p3-p4 meet
///
/// Returns the parametric positions `(t, s)` of the intersection along each line, or `None` if the lines are
/// parallel. The positions are not limited to the 0..1 range, so this also finds intersections of the
/// infinite lines: use `segments_cross` to test the segments themselves.
///
pub fn line_intersection(p1: Point2D, p2: Point2D, p3: Point2D, p4: Point2D) -> Option<(f32, f32)> {
    let d1      = p2 - p1;
    let d2      = p4 - p3;
    let denom   = d1.cross(d2);

    // Compare against the lengths so nearly-parallel lines are rejected at any scale
    if denom.abs() <= 1e-6 * (d1.length() * d2.length()) || denom == 0.0 {
        return None;
    }

    let (p1, p2)    = (Coord2::from(p1), Coord2::from(p2));
    let (p3, p4)    = (Coord2::from(p3), Coord2::from(p4));
    let meet        = ray_intersects_ray(&(p1, p2), &(p3, p4))?;

    Some((position_along(p1, p2 - p1, meet), position_along(p3, p4 - p3, meet)))
}

///
/// True if the line segment p1-p2 crosses the line segment p3-p4 strictly inside both segments
///
/// Segments that only touch at an end point don't count as crossing.
///
pub fn segments_cross(p1: Point2D, p2: Point2D, p3: Point2D, p4: Point2D) -> bool {
    let (p1, p2)    = (Coord2::from(p1), Coord2::from(p2));
    let (p3, p4)    = (Coord2::from(p3), Coord2::from(p4));

    match line_intersects_line(&(p1, p2), &(p3, p4)) {
        Some(meet)  => [p1, p2, p3, p4].iter().all(|end| meet.distance_to(end) > 1e-6),
        None        => false,
    }
}

///
/// A 2D affine transformation, stored as a 3x3 row-major matrix
///
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Transform2D(pub [[f32; 3]; 3]);

impl Default for Transform2D {
    fn default() -> Self {
        Transform2D::identity()
    }
}

impl Transform2D {
    #[inline]
    pub fn identity() -> Transform2D {
        Transform2D([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    #[inline]
    pub fn translate(x: f32, y: f32) -> Transform2D {
        Transform2D([[1.0, 0.0, x], [0.0, 1.0, y], [0.0, 0.0, 1.0]])
    }

    #[inline]
    pub fn scale(x: f32, y: f32) -> Transform2D {
        Transform2D([[x, 0.0, 0.0], [0.0, y, 0.0], [0.0, 0.0, 1.0]])
    }

    ///
    /// Rotation about the origin by an angle in degrees (anticlockwise when the y axis points up)
    ///
    pub fn rotate_degrees(degrees: f32) -> Transform2D {
        let (sin, cos) = degrees.to_radians().sin_cos();

        Transform2D([[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]])
    }

    #[inline]
    pub fn transform_point(&self, point: Point2D) -> Point2D {
        let [[a, b, c], [d, e, f], _] = self.0;

        Point2D::new(a * point.x + b * point.y + c, d * point.x + e * point.y + f)
    }

    ///
    /// The factor this transform scales lengths by (the geometric mean of the axis scale factors)
    ///
    pub fn scale_factor(&self) -> f32 {
        let [[a, b, _], [d, e, _], _] = self.0;

        (a * e - b * d).abs().sqrt()
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Transform2D::identity()
    }
}

impl Mul<Transform2D> for Transform2D {
    type Output = Transform2D;

    fn mul(self, rhs: Transform2D) -> Transform2D {
        let mut result = [[0.0; 3]; 3];

        for row in 0..3 {
            for col in 0..3 {
                result[row][col] = (0..3).map(|idx| self.0[row][idx] * rhs.0[idx][col]).sum();
            }
        }

        Transform2D(result)
    }
}

///
/// An axis-aligned bounding box
///
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point2D,
    pub max: Point2D,
}

impl BoundingBox {
    ///
    /// A bounding box containing nothing (adding any point will make it contain just that point)
    ///
    pub fn empty() -> BoundingBox {
        BoundingBox {
            min: Point2D::new(f32::MAX, f32::MAX),
            max: Point2D::new(f32::MIN, f32::MIN),
        }
    }

    pub fn from_points(points: impl IntoIterator<Item=Point2D>) -> BoundingBox {
        let mut bounds = BoundingBox::empty();
        points.into_iter().for_each(|point| bounds.add_point(point));

        bounds
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    ///
    /// The same region as a `flo_curves` bounding box
    ///
    #[inline]
    fn to_bounds(&self) -> Bounds<Coord2> {
        Bounds::from_min_max(Coord2::from(self.min), Coord2::from(self.max))
    }

    #[inline]
    fn from_bounds(bounds: Bounds<Coord2>) -> BoundingBox {
        BoundingBox {
            min: Point2D::from(bounds.min()),
            max: Point2D::from(bounds.max()),
        }
    }

    #[inline]
    pub fn add_point(&mut self, point: Point2D) {
        if self.is_empty() {
            *self = BoundingBox { min: point, max: point };
        } else {
            *self = BoundingBox::from_bounds(self.to_bounds().union_bounds(Bounds::from_min_max(Coord2::from(point), Coord2::from(point))));
        }
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        match (self.is_empty(), other.is_empty()) {
            (true, _)       => *other,
            (_, true)       => *self,
            (false, false)  => BoundingBox::from_bounds(self.to_bounds().union_bounds(other.to_bounds())),
        }
    }

    #[inline]
    pub fn contains(&self, point: Point2D) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    #[inline]
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        !self.is_empty() && !other.is_empty() && self.to_bounds().overlaps(&other.to_bounds())
    }

    #[inline]
    pub fn width(&self) -> f32 {
        if self.is_empty() { 0.0 } else { self.max.x - self.min.x }
    }

    #[inline]
    pub fn height(&self) -> f32 {
        if self.is_empty() { 0.0 } else { self.max.y - self.min.y }
    }
}
