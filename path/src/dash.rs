use crate::geo::Point2D;
use crate::path::*;
use crate::segment::Curve;

use flo_curves::bezier::*;
use smallvec::*;

use std::iter;

///
/// Dash boundaries closer than this to the end of a leaf are moved to the end of the leaf
///
const DASH_EPSILON: f32 = 0.02;

///
/// Sections shorter than this are left over from the end of a walk and are dropped
///
const SLIVER_LENGTH: f32 = 1e-4;

///
/// Largest difference between the length requested for a section and the length of the section that's generated
///
const DASH_MAX_ERROR: f64 = 0.005;

///
/// The shortest length a single dash or gap can have
///
pub const MIN_DASH_LENGTH: f32 = 0.05;

///
/// Dash patterns shorter than this in total are drawn as solid lines
///
pub const MIN_DASH_PATTERN_LENGTH: f32 = 0.5;

///
/// Tracks the position within a dash pattern
///
struct DashState<'a> {
    pattern:    &'a [f32],
    index:      usize,
    remaining:  f32,
    on:         bool,
}

impl<'a> DashState<'a> {
    fn new(pattern: &'a [f32]) -> DashState<'a> {
        DashState {
            pattern:    pattern,
            index:      0,
            remaining:  pattern[0],
            on:         true,
        }
    }

    ///
    /// Moves on to the next entry in the pattern
    ///
    fn advance(&mut self) {
        self.index      = (self.index + 1) % self.pattern.len();
        self.remaining  = self.pattern[self.index];
        self.on         = !self.on;
    }

    ///
    /// The lengths of the sections to cut from here on: what's left of the current entry, then the rest of the pattern
    ///
    fn lengths(&self) -> impl '_ + Iterator<Item=f64> {
        iter::once(self.remaining as f64)
            .chain(self.pattern.iter().cycle().skip(self.index + 1).map(|len| *len as f64))
    }
}

///
/// Builds the dashes for a curve section and adds them to a path
///
struct DashWriter<'a> {
    target:     &'a mut Path,

    /// True if the last thing written to the target was part of a dash (so the next piece continues it)
    in_dash:    bool,
}

impl<'a> DashWriter<'a> {
    fn write(&mut self, curve: Curve, sub_start: bool, sub_end: bool) {
        if !self.in_dash {
            self.target.move_to_abs(curve.start_point());
            self.in_dash = true;
        }

        self.target.push_segment(curve, sub_start, sub_end);
    }
}

///
/// Converts a section of a walk along a leaf back into a curve (lines stay as lines)
///
fn section_curve<C: BezierCurve>(leaf: &Curve, section: &C) -> Curve
where C::Point: Into<Point2D> {
    let start: Point2D  = section.start_point().into();
    let end: Point2D    = section.end_point().into();

    match leaf {
        Curve::Line(..) => Curve::Line(start, end),
        _               => {
            let (cp1, cp2) = section.control_points();
            Curve::Cubic(start, cp1.into(), cp2.into(), end)
        }
    }
}

///
/// Splits the contours of a path into dashes
///
/// The pattern alternates between the lengths of the dashes and the gaps between them, starting with a dash.
/// Patterns with an odd number of entries are repeated to make them even. Entries are at least `MIN_DASH_LENGTH`
/// long, and a pattern that adds up to less than `MIN_DASH_PATTERN_LENGTH` leaves the path undashed. The pattern
/// restarts at the beginning of every contour. Lengths are measured along the curves by walking them evenly.
///
/// Every dash becomes an open contour in the result. Segments keep the join markers of the leaves they came
/// from, except where a dash starts or ends partway along a leaf.
///
pub fn dash_path(path: &Path, pattern: &[f32]) -> Path {
    let mut pattern: SmallVec<[f32; 16]> = pattern.iter().map(|len| if *len > MIN_DASH_LENGTH { *len } else { MIN_DASH_LENGTH }).collect();
    if pattern.len() % 2 == 1 {
        let repeat = pattern.clone();
        pattern.extend(repeat);
    }

    let mut dashed = Path::new();

    if !(pattern.iter().sum::<f32>() >= MIN_DASH_PATTERN_LENGTH) {
        dashed.import_path(path, &Default::default());
        return dashed;
    }

    for contour in path.contours().iter().filter(|contour| !contour.is_empty()) {
        let mut state   = DashState::new(&pattern);
        let mut writer  = DashWriter { target: &mut dashed, in_dash: false };

        for leaf_id in contour.leaves() {
            let leaf    = path.segment(*leaf_id);
            let curve   = *leaf.curve();

            // Leaves with no length can't be walked: they just belong to whichever dash or gap they're in
            if curve.control_polygon_length() <= SLIVER_LENGTH {
                if state.on {
                    writer.write(curve, leaf.sub_start(), leaf.sub_end());
                }
                continue;
            }

            // Every section but the last ends at a dash boundary
            let bezier      = curve.to_bezier();
            let sections    = walk_curve_evenly(&bezier, 1.0, DASH_MAX_ERROR)
                .vary_by(state.lengths())
                .map(|section| (section_curve(&curve, &section), chord_length(&section) as f32))
                .filter(|(_, length)| *length > SLIVER_LENGTH)
                .collect::<SmallVec<[_; 8]>>();
            let num_sections = sections.len();

            for (idx, (section, length)) in sections.into_iter().enumerate() {
                let is_first    = idx == 0;
                let is_last     = idx + 1 == num_sections;

                state.remaining -= length;

                if state.on {
                    writer.write(section, is_first && leaf.sub_start(), is_last && leaf.sub_end());
                }

                if !is_last || state.remaining < DASH_EPSILON {
                    if state.on {
                        writer.in_dash = false;
                    }
                    state.advance();
                }
            }
        }
    }

    dashed
}
