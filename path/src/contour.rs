use crate::geo::*;
use crate::segment::*;

///
/// A single chain of segments within a path
///
/// A closed contour continues from its last segment back to its first. Segments are referenced by ID: the
/// path that owns the contour also owns the segments.
///
#[derive(Clone, Debug, Default)]
pub struct Contour {
    /// The implicit first point of the contour (set by `move_to` before any segments are added)
    pub (crate) start: Point2D,

    /// The top-level segments of this contour, in order
    pub (crate) segments: Vec<SegmentId>,

    /// True if the last segment of this contour joins back up with the first
    pub (crate) closed: bool,

    /// The leaves of the subdivision trees of all the segments, once the contour has been refined
    pub (crate) refined: Option<Vec<SegmentId>>,
}

impl Contour {
    ///
    /// Creates an empty contour starting at the specified point
    ///
    pub (crate) fn starting_at(start: Point2D) -> Contour {
        Contour {
            start:      start,
            segments:   vec![],
            closed:     false,
            refined:    None,
        }
    }

    ///
    /// Clears this contour so it can be re-used
    ///
    pub (crate) fn recycle(&mut self, start: Point2D) {
        self.start      = start;
        self.closed     = false;
        self.refined    = None;
        self.segments.clear();
    }

    #[inline]
    pub fn start_point(&self) -> Point2D {
        self.start
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    ///
    /// The top-level segments of this contour
    ///
    #[inline]
    pub fn segments(&self) -> &[SegmentId] {
        &self.segments
    }

    #[inline]
    pub fn is_refined(&self) -> bool {
        self.refined.is_some()
    }

    ///
    /// The leaf segments of this contour: the refined chain if the contour has been refined, or the top-level
    /// segments if it has not
    ///
    #[inline]
    pub fn leaves(&self) -> &[SegmentId] {
        self.refined.as_deref().unwrap_or(&self.segments)
    }

    ///
    /// Given an index into a chain of `len` segments, returns the index of the segment that follows it, taking
    /// account of whether or not this contour is closed
    ///
    #[inline]
    pub fn next_index(&self, idx: usize, len: usize) -> Option<usize> {
        if idx + 1 < len {
            Some(idx + 1)
        } else if self.closed && len > 0 {
            Some(0)
        } else {
            None
        }
    }
}
