//!
//! Adaptive subdivision of curves into chains of segments that are short and flat enough to treat as lines
//!

use crate::geo::*;
use crate::path::*;
use crate::segment::*;

use log::*;

use std::mem;

///
/// Curves shorter than this are never subdivided, however curved they are
///
pub const MIN_SUBDIVIDE_LENGTH: f32 = 1.0;

///
/// Subdivision stops at this depth (only reached for non-finite coordinates)
///
const MAX_REFINE_DEPTH: usize = 48;

///
/// Tolerances used when refining curves
///
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct RefineOptions {
    /// Leaves must be shorter than this (average of the control polygon and chord lengths)
    pub max_length: f32,

    /// Leaves must have `(polygon_length - chord_length) / chord_length` below this
    pub max_flatness: f32,
}

impl Default for RefineOptions {
    ///
    /// The default options are suitable for flattening curves in device coordinates
    ///
    fn default() -> Self {
        RefineOptions {
            max_length:     10.0,
            max_flatness:   0.001,
        }
    }
}

impl RefineOptions {
    ///
    /// Coarse tolerances, used when generating meshes that will be re-flattened for display later on
    ///
    pub fn coarse() -> RefineOptions {
        RefineOptions {
            max_length:     100.0,
            max_flatness:   0.001,
        }
    }

    pub fn with_max_length(mut self, max_length: f32) -> RefineOptions {
        self.max_length = max_length;
        self
    }

    pub fn with_max_flatness(mut self, max_flatness: f32) -> RefineOptions {
        self.max_flatness = max_flatness;
        self
    }
}

///
/// True if a curve is too long or too curved to be used as a leaf
///
pub fn needs_subdivision(curve: &Curve, options: &RefineOptions) -> bool {
    if let Curve::Line(..) = curve {
        return false;
    }

    let polygon = curve.control_polygon_length();
    let chord   = curve.chord_length();
    let length  = (polygon + chord) * 0.5;

    // Written so that NaN lengths count as short
    if !(length >= MIN_SUBDIVIDE_LENGTH) {
        return false;
    }

    let delta = (polygon - chord) / (chord + LENGTH_EPSILON);

    !(length < options.max_length && delta < options.max_flatness)
}

///
/// Chooses where to split a curve, biased towards the end with the longer control arm
///
pub fn split_position(curve: &Curve) -> f32 {
    let (first_arm, last_arm) = match *curve {
        Curve::Line(..)                 => return 0.5,
        Curve::Quadratic(p1, c1, p2)    => (p1.distance(c1), c1.distance(p2)),
        Curve::Cubic(p1, c1, c2, p2)    => (p1.distance(c1), c2.distance(p2)),
    };

    let t = 0.1 * 0.5 + 0.9 * first_arm / (first_arm + last_arm + LENGTH_EPSILON);

    if t.is_finite() { t.max(0.05).min(0.95) } else { 0.5 }
}

///
/// Refines a single segment, building (or rebuilding) its subdivision tree
///
/// Returns the number of leaves in the tree.
///
pub fn refine_segment(path: &mut Path, segment_id: SegmentId, options: &RefineOptions) -> usize {
    refine_segment_to_depth(path, segment_id, options, 0)
}

fn refine_segment_to_depth(path: &mut Path, segment_id: SegmentId, options: &RefineOptions, depth: usize) -> usize {
    // Any previous refinement is out of date (the test might now pass, or the split point might have moved)
    path.release_children(segment_id);

    let segment = path.segment(segment_id).clone();
    if depth >= MAX_REFINE_DEPTH || !needs_subdivision(&segment.curve, options) {
        return 1;
    }

    // Split the curve: the split point is in the middle of an original segment, so it's not a join
    let (first, second) = segment.curve.split(split_position(&segment.curve));
    let first           = path.alloc_segment(Segment { curve: first, children: None, sub_start: segment.sub_start, sub_end: false });
    let second          = path.alloc_segment(Segment { curve: second, children: None, sub_start: false, sub_end: segment.sub_end });

    path.segments[segment_id.0].children = Some([first, second]);

    refine_segment_to_depth(path, first, options, depth+1) + refine_segment_to_depth(path, second, options, depth+1)
}

///
/// Appends the leaves of a segment's subdivision tree to a list, in path order
///
pub fn retrieve_refined(path: &Path, segment_id: SegmentId, leaves: &mut Vec<SegmentId>) {
    match path.segment(segment_id).children() {
        None                    => leaves.push(segment_id),
        Some([first, second])   => {
            retrieve_refined(path, first, leaves);
            retrieve_refined(path, second, leaves);
        }
    }
}

///
/// Rebuilds the chain of refined leaves for a contour from the subdivision trees of its segments
///
pub (crate) fn rebuild_refined_chain(path: &mut Path, contour_idx: usize) {
    let mut leaves      = path.contours[contour_idx].refined.take().unwrap_or_default();
    let segments        = mem::take(&mut path.contours[contour_idx].segments);
    leaves.clear();

    for segment_id in segments.iter() {
        retrieve_refined(path, *segment_id, &mut leaves);
    }

    let contour         = &mut path.contours[contour_idx];
    contour.segments    = segments;
    contour.refined     = Some(leaves);
}

///
/// Refines every segment in a path, and builds the leaf chain for each contour
///
pub fn refine_path(path: &mut Path, options: &RefineOptions) {
    let mut num_leaves = 0;

    for contour_idx in 0..path.contours.len() {
        let segments = mem::take(&mut path.contours[contour_idx].segments);

        for segment_id in segments.iter() {
            num_leaves += refine_segment(path, *segment_id, options);
        }

        path.contours[contour_idx].segments = segments;
        rebuild_refined_chain(path, contour_idx);
    }

    trace!("Refined {} segments into {} leaves", path.segment_count(), num_leaves);
}

///
/// Flattens a curve into a series of points, using the same subdivision rules as `refine_segment` but without
/// building a tree
///
/// The start point is not emitted: `emit` is called with the end point of every leaf in order.
///
pub fn flatten_curve(curve: &Curve, options: &RefineOptions, emit: &mut impl FnMut(Point2D)) {
    flatten_curve_to_depth(curve, options, emit, 0);
}

fn flatten_curve_to_depth(curve: &Curve, options: &RefineOptions, emit: &mut impl FnMut(Point2D), depth: usize) {
    if depth >= MAX_REFINE_DEPTH || !needs_subdivision(curve, options) {
        emit(curve.end_point());
    } else {
        let (first, second) = curve.split(split_position(curve));

        flatten_curve_to_depth(&first, options, emit, depth+1);
        flatten_curve_to_depth(&second, options, emit, depth+1);
    }
}
