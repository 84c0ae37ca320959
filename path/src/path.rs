use crate::arc::*;
use crate::geo::*;
use crate::hash::*;
use crate::contour::*;
use crate::segment::*;

///
/// The distance within which `close()` treats the end of a contour as already touching its start
///
const CLOSE_EPSILON: f32 = 1e-16;

///
/// A path made up of one or more contours of line and curve segments
///
/// Segments and contours are stored in arenas owned by the path. Calling `reset()` recycles their storage
/// so a path can be edited repeatedly without reallocating.
///
/// Paths are edited like a drawing context: `move_to`, `line_to`, `quad_to`, `cubic_to`, `arc_to` and
/// `close` all act on the current contour, starting from the current point. None of these operations fail:
/// a sequence that doesn't make sense (closing an empty contour, for instance) is ignored.
///
#[derive(Clone, Debug)]
pub struct Path {
    /// The segment arena (both top-level segments and subdivision children)
    pub (crate) segments: Vec<Segment>,

    /// Slots in the segment arena that are free to be reused
    pub (crate) free_segments: Vec<SegmentId>,

    /// The contours in this path (there's always at least one, the last is the current contour)
    pub (crate) contours: Vec<Contour>,

    /// Contours released by `reset()` that can be reused
    spare_contours: Vec<Contour>,

    /// The point that the next segment will start from
    current: Point2D,

    /// True if coordinates passed to the drawing operations are relative to the current point
    relative: bool,

    /// The largest angle (in degrees) that a single cubic in an arc can cover
    max_arc_sweep: f32,

    /// The content hash of this path, if it's been calculated since the last edit
    hash: Option<u64>,

    /// The bounding box of this path, if it's been calculated since the last edit
    bounds: Option<BoundingBox>,

    /// True if this path is the copy stored in a path cache
    canonical: bool,
}

impl Default for Path {
    fn default() -> Self {
        Path::new()
    }
}

impl Path {
    ///
    /// Creates a new empty path, in absolute coordinate mode
    ///
    pub fn new() -> Path {
        Path {
            segments:       vec![],
            free_segments:  vec![],
            contours:       vec![Contour::starting_at(Point2D::origin())],
            spare_contours: vec![],
            current:        Point2D::origin(),
            relative:       false,
            max_arc_sweep:  DEFAULT_MAX_ARC_SWEEP,
            hash:           None,
            bounds:         None,
            canonical:      false,
        }
    }

    ///
    /// Creates a closed rectangular path
    ///
    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Path {
        let mut path = Path::new();
        path.add_rect(x, y, width, height);

        path
    }

    ///
    /// Creates a closed circular path
    ///
    pub fn circle(center_x: f32, center_y: f32, radius: f32) -> Path {
        let mut path = Path::new();
        path.add_circle(center_x, center_y, radius);

        path
    }

    ///
    /// Adds a rectangle as a new closed contour (coordinates are always absolute)
    ///
    pub fn add_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.move_to_abs(Point2D::new(x, y));
        self.push_curve_to(|start| Curve::Line(start, Point2D::new(x + width, y)));
        self.push_curve_to(|start| Curve::Line(start, Point2D::new(x + width, y + height)));
        self.push_curve_to(|start| Curve::Line(start, Point2D::new(x, y + height)));
        self.close();
    }

    ///
    /// Adds a circle as a new closed contour (coordinates are always absolute)
    ///
    pub fn add_circle(&mut self, center_x: f32, center_y: f32, radius: f32) {
        let right   = Point2D::new(center_x + radius, center_y);
        let left    = Point2D::new(center_x - radius, center_y);

        self.move_to_abs(right);
        self.arc_to_abs(left, 180.0);
        self.arc_to_abs(right, 180.0);
        self.close();
    }

    ///
    /// Sets whether the coordinates passed to the drawing operations are relative to the current point
    ///
    #[inline]
    pub fn set_relative(&mut self, relative: bool) {
        self.relative = relative;
    }

    #[inline]
    pub fn is_relative(&self) -> bool {
        self.relative
    }

    ///
    /// Sets the largest angle (in degrees) that a single cubic section generated by `arc_to` can cover
    ///
    pub fn set_max_arc_sweep(&mut self, degrees: f32) {
        self.max_arc_sweep = degrees.abs().max(1.0).min(90.0);
    }

    #[inline]
    pub fn max_arc_sweep(&self) -> f32 {
        self.max_arc_sweep
    }

    ///
    /// The point where the next segment will start
    ///
    #[inline]
    pub fn current_point(&self) -> Point2D {
        self.current
    }

    ///
    /// The contours making up this path (the last one may be empty)
    ///
    #[inline]
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    ///
    /// Retrieves a segment by ID
    ///
    #[inline]
    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id.0]
    }

    ///
    /// The number of top-level segments across all the contours of this path
    ///
    pub fn segment_count(&self) -> usize {
        self.contours.iter().map(|contour| contour.segments.len()).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contours.iter().all(|contour| contour.is_empty())
    }

    ///
    /// True if this is the copy of a path stored in a `PathCache`
    ///
    #[inline]
    pub fn is_canonical(&self) -> bool {
        self.canonical
    }

    ///
    /// Iterates over the leaf curves of each contour (the refined curves if the path has been refined, or
    /// the original segments if it has not)
    ///
    pub fn leaf_curves<'a>(&'a self, contour: &'a Contour) -> impl 'a + Iterator<Item=&'a Curve> {
        contour.leaves().iter().map(move |id| &self.segments[id.0].curve)
    }

    ///
    /// Starts a new contour at the specified point
    ///
    /// If the current contour has no segments yet, this just moves its start point.
    ///
    pub fn move_to(&mut self, x: f32, y: f32) {
        let point = self.resolve(x, y);
        self.move_to_abs(point);
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        let end = self.resolve(x, y);
        self.push_curve_to(|start| Curve::Line(start, end));
    }

    pub fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        let control = self.resolve(cx, cy);
        let end     = self.resolve(x, y);

        self.push_curve_to(|start| Curve::Quadratic(start, control, end));
    }

    ///
    /// Adds a cubic curve with a single explicit control point
    ///
    /// The first control point continues the tangent that the previous segment left the current point with.
    /// If there is no previous segment, the first control point is the current point.
    ///
    pub fn cubic_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        let control2    = self.resolve(cx, cy);
        let end         = self.resolve(x, y);
        let current     = self.current;
        let control1    = match self.last_curve() {
            Some(curve) => current + (current - curve.outgoing_control_point()),
            None        => current,
        };

        self.push_curve_to(|start| Curve::Cubic(start, control1, control2, end));
    }

    ///
    /// Adds a cubic curve with two explicit control points
    ///
    pub fn cubic_to2(&mut self, cx1: f32, cy1: f32, cx2: f32, cy2: f32, x: f32, y: f32) {
        let control1    = self.resolve(cx1, cy1);
        let control2    = self.resolve(cx2, cy2);
        let end         = self.resolve(x, y);

        self.push_curve_to(|start| Curve::Cubic(start, control1, control2, end));
    }

    ///
    /// Adds a circular arc from the current point to (x, y), sweeping through the specified angle
    ///
    /// Positive angles sweep anticlockwise. The arc is approximated by cubic curves that each cover at most
    /// `max_arc_sweep()` degrees.
    ///
    pub fn arc_to(&mut self, x: f32, y: f32, sweep_degrees: f32) {
        let end = self.resolve(x, y);
        self.arc_to_abs(end, sweep_degrees);
    }

    ///
    /// As for `arc_to`, except the end point is always relative to the current point
    ///
    pub fn arc_by(&mut self, dx: f32, dy: f32, sweep_degrees: f32) {
        let end = self.current + Point2D::new(dx, dy);
        self.arc_to_abs(end, sweep_degrees);
    }

    ///
    /// Closes the current contour
    ///
    /// A line is added back to the start of the contour unless the contour already ends there.
    ///
    pub fn close(&mut self) {
        let contour_idx = self.contours.len() - 1;
        let contour     = &self.contours[contour_idx];

        if contour.closed || contour.segments.is_empty() {
            return;
        }

        let start   = contour.start;
        let end     = self.current;

        if end.distance(start) > CLOSE_EPSILON {
            self.push_curve_to(|from| Curve::Line(from, start));
        }

        let contour     = &mut self.contours[contour_idx];
        contour.closed  = true;
        contour.refined = None;
        self.current    = start;
        self.invalidate();
    }

    ///
    /// Removes everything from this path, returning it to the state of a new path
    ///
    /// The storage for segments and contours is kept for re-use.
    ///
    pub fn reset(&mut self) {
        self.segments.clear();
        self.free_segments.clear();

        self.spare_contours.extend(self.contours.drain(..));

        let mut contour = self.spare_contours.pop().unwrap_or_default();
        contour.recycle(Point2D::origin());
        self.contours.push(contour);

        self.current    = Point2D::origin();
        self.relative   = false;
        self.invalidate();
    }

    ///
    /// Copies all of the contours from another path into this one, transforming every point on the way
    ///
    pub fn import_path(&mut self, source: &Path, transform: &Transform2D) {
        for contour in source.contours.iter().filter(|contour| !contour.is_empty()) {
            self.move_to_abs(transform.transform_point(contour.start));

            for segment_id in contour.segments.iter() {
                let curve = source.segments[segment_id.0].curve.transform(transform);
                self.push_curve_to(|_| curve);
            }

            if contour.closed {
                let current_idx     = self.contours.len() - 1;
                let current         = &mut self.contours[current_idx];
                current.closed      = true;
                self.current        = current.start;
            }
        }

        self.invalidate();
    }

    ///
    /// Returns a compact copy of this path containing only its top-level segments, marked as canonical and with
    /// its content hash calculated
    ///
    pub fn canonical_copy(&self) -> Path {
        let mut copy = Path::new();
        copy.max_arc_sweep = self.max_arc_sweep;
        copy.import_path(self, &Transform2D::identity());

        copy.canonical = true;
        copy.update_hash();
        copy.update_bounds();

        copy
    }

    ///
    /// The content hash of this path (calculated now if it's not already cached)
    ///
    pub fn content_hash(&self) -> u64 {
        self.hash.unwrap_or_else(|| path_hash(self))
    }

    ///
    /// The cached content hash, if it has been calculated since the path was last edited
    ///
    #[inline]
    pub fn cached_hash(&self) -> Option<u64> {
        self.hash
    }

    ///
    /// Calculates and caches the content hash of this path
    ///
    pub fn update_hash(&mut self) -> u64 {
        let hash    = self.content_hash();
        self.hash   = Some(hash);

        hash
    }

    ///
    /// The bounding box of every point (including control points) in this path
    ///
    pub fn bounds(&self) -> BoundingBox {
        self.bounds.unwrap_or_else(|| {
            BoundingBox::from_points(self.contours.iter()
                .flat_map(|contour| contour.segments.iter())
                .flat_map(|id| self.segments[id.0].curve.points()))
        })
    }

    ///
    /// Calculates and caches the bounding box of this path
    ///
    pub fn update_bounds(&mut self) -> BoundingBox {
        let bounds  = self.bounds();
        self.bounds = Some(bounds);

        bounds
    }

    ///
    /// Converts a coordinate passed to a drawing operation to an absolute position
    ///
    #[inline]
    fn resolve(&self, x: f32, y: f32) -> Point2D {
        if self.relative {
            self.current + Point2D::new(x, y)
        } else {
            Point2D::new(x, y)
        }
    }

    ///
    /// Marks the cached properties of this path as out of date
    ///
    #[inline]
    pub (crate) fn invalidate(&mut self) {
        self.hash       = None;
        self.bounds     = None;
        self.canonical  = false;
    }

    pub (crate) fn move_to_abs(&mut self, point: Point2D) {
        let last_idx = self.contours.len() - 1;

        if self.contours[last_idx].is_empty() {
            self.contours[last_idx].recycle(point);
        } else {
            let mut contour = self.spare_contours.pop().unwrap_or_default();
            contour.recycle(point);
            self.contours.push(contour);
        }

        self.current = point;
        self.invalidate();
    }

    fn arc_to_abs(&mut self, end: Point2D, sweep_degrees: f32) {
        let start = self.current;

        for curve in arc_between(start, end, sweep_degrees, self.max_arc_sweep) {
            self.push_curve_to(|_| curve);
        }
    }

    ///
    /// The curve of the last segment in the current contour, if it's still open
    ///
    fn last_curve(&self) -> Option<&Curve> {
        let contour = self.contours.last()?;

        if contour.closed {
            None
        } else {
            contour.segments.last().map(|id| &self.segments[id.0].curve)
        }
    }

    ///
    /// Adds a segment to the current contour, starting from the current point
    ///
    /// If the current contour is closed, a new contour is started at the current point first.
    ///
    pub (crate) fn push_curve_to(&mut self, make_curve: impl FnOnce(Point2D) -> Curve) {
        let start = self.current;
        if self.contours.last().map(|contour| contour.closed).unwrap_or(true) {
            let mut contour = self.spare_contours.pop().unwrap_or_default();
            contour.recycle(start);
            self.contours.push(contour);
        }

        let curve       = make_curve(start);
        let segment_id  = self.alloc_segment(Segment::new(curve));

        if let Some(contour) = self.contours.last_mut() {
            contour.segments.push(segment_id);
            contour.refined = None;
        }

        self.current    = curve.end_point();
        self.invalidate();
    }

    ///
    /// Adds an explicit segment to the current contour, with the specified sub-path flags
    ///
    pub (crate) fn push_segment(&mut self, curve: Curve, sub_start: bool, sub_end: bool) {
        self.push_curve_to(|_| curve);

        if let Some(segment_id) = self.contours.last().and_then(|contour| contour.segments.last()).copied() {
            let segment         = &mut self.segments[segment_id.0];
            segment.sub_start   = sub_start;
            segment.sub_end     = sub_end;
        }
    }

    ///
    /// Stores a segment in the arena, re-using a free slot if there is one
    ///
    pub (crate) fn alloc_segment(&mut self, segment: Segment) -> SegmentId {
        if let Some(free_id) = self.free_segments.pop() {
            self.segments[free_id.0] = segment;
            free_id
        } else {
            self.segments.push(segment);
            SegmentId(self.segments.len() - 1)
        }
    }

    ///
    /// Returns the children of a segment (and their children) to the free list, leaving the segment unrefined
    ///
    pub (crate) fn release_children(&mut self, id: SegmentId) {
        if let Some([first, second]) = self.segments[id.0].children.take() {
            self.release_children(first);
            self.release_children(second);

            self.free_segments.push(first);
            self.free_segments.push(second);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn move_to_on_empty_contour_moves_start() {
        let mut path = Path::new();
        path.move_to(10.0, 10.0);
        path.move_to(20.0, 20.0);

        assert!(path.contours().len() == 1);
        assert!(path.contours()[0].start_point() == Point2D::new(20.0, 20.0));
    }

    #[test]
    fn close_on_empty_contour_does_nothing() {
        let mut path = Path::new();
        path.close();

        assert!(path.is_empty());
        assert!(!path.contours()[0].is_closed());
    }

    #[test]
    fn reset_recycles_segments() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.line_to(10.0, 0.0);
        path.line_to(10.0, 10.0);
        path.close();

        let capacity = path.segments.capacity();
        path.reset();

        assert!(path.is_empty());
        assert!(path.segments.capacity() == capacity);
        assert!(path.current_point() == Point2D::origin());
    }
}
