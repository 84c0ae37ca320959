//!
//! Anti-aliased scanline rasterizer
//!
//! Polygon edges are decomposed into cells (one per pixel that an edge passes through), each recording the
//! signed area and cover of the edge within that pixel. Sorting the cells into scanline order and sweeping
//! across each row produces the coverage of every pixel, which is handed on to a `SpanRenderer` one span at a
//! time.
//!

mod cell;
mod outline;
mod scanline;

pub use self::cell::*;
pub use self::outline::*;
pub use self::scanline::*;

use crate::brush::*;
use crate::gamma::*;
use crate::renderer::*;

use flo_vector::*;
use log::*;

///
/// Fixed-point coordinates are clamped to this range so cell positions fit in an i16
///
const MAX_COORD: i32 = 32000 << POLY_BASE_SHIFT;

///
/// How the winding number of a point determines if it's inside a shape
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum FillRule {
    /// Points with a non-zero winding number are inside the shape
    NonZero,

    /// Points with an odd winding number are inside the shape
    EvenOdd,
}

impl Default for FillRule {
    fn default() -> Self {
        FillRule::NonZero
    }
}

///
/// Where the rasterizer is in the process of building an outline
///
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum RasterizerStatus {
    /// No contour has been started
    Idle,

    /// A contour has been started but has no edges yet
    MoveTo,

    /// Edges are being added to a contour
    LineTo,

    /// The last contour has been closed
    Closed,

    /// The cells have been sorted and are ready to render
    Sorted,
}

///
/// Converts a pixel coordinate to fixed-point
///
#[inline]
fn to_fixed(value: f32) -> i32 {
    let fixed = (value * POLY_BASE_SIZE as f32).round();

    if fixed.is_nan() {
        0
    } else {
        clamp_fixed(fixed as i32)
    }
}

///
/// Limits a fixed-point coordinate so that its cell position fits in an `i16`
///
#[inline]
fn clamp_fixed(value: i32) -> i32 {
    value.max(-MAX_COORD).min(MAX_COORD)
}

///
/// Builds the coverage of polygons and renders them a scanline at a time
///
/// Contours are closed automatically when a new one is started or when the outline is rendered. Once an outline
/// has been rendered it can be rendered again or hit tested: adding a new contour after that starts a new outline.
///
pub struct Rasterizer {
    /// The cells for the current outline
    outline: Outline,

    /// Working storage for the row being rendered
    scanline: Scanline,

    status: RasterizerStatus,

    /// Start of the current contour (fixed-point)
    start_x: i32,
    start_y: i32,

    /// The last point added to the current contour (fixed-point)
    prev_x: i32,
    prev_y: i32,

    fill_rule: FillRule,

    gamma: GammaTable,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Rasterizer::new()
    }
}

impl Rasterizer {
    ///
    /// Creates a new rasterizer using the nonzero fill rule and a linear gamma table
    ///
    pub fn new() -> Rasterizer {
        Rasterizer {
            outline:    Outline::new(),
            scanline:   Scanline::new(),
            status:     RasterizerStatus::Idle,
            start_x:    0,
            start_y:    0,
            prev_x:     0,
            prev_y:     0,
            fill_rule:  FillRule::NonZero,
            gamma:      GammaTable::linear(),
        }
    }

    ///
    /// Discards the current outline (the fill rule and gamma table are kept)
    ///
    pub fn reset(&mut self) {
        self.outline.reset();
        self.status = RasterizerStatus::Idle;
    }

    #[inline]
    pub fn set_fill_rule(&mut self, fill_rule: FillRule) {
        self.fill_rule = fill_rule;
    }

    #[inline]
    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    ///
    /// Sets the gamma correction applied to coverage values
    ///
    pub fn set_gamma(&mut self, gamma: f64) {
        if gamma != self.gamma.gamma() {
            self.gamma = GammaTable::new(gamma);
        }
    }

    #[inline]
    pub fn gamma(&self) -> &GammaTable {
        &self.gamma
    }

    ///
    /// The outline that has been built so far
    ///
    #[inline]
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    ///
    /// Starts a new contour at a fixed-point position
    ///
    /// Positions are clamped to ±32000 pixels.
    ///
    pub fn move_to(&mut self, x: i32, y: i32) {
        let (x, y) = (clamp_fixed(x), clamp_fixed(y));

        if self.status == RasterizerStatus::Sorted {
            self.reset();
        }

        self.close();

        self.start_x    = x;
        self.start_y    = y;
        self.prev_x     = x;
        self.prev_y     = y;
        self.status     = RasterizerStatus::MoveTo;
    }

    ///
    /// Adds an edge to the current contour, ending at a fixed-point position
    ///
    /// Positions are clamped to ±32000 pixels.
    ///
    pub fn line_to(&mut self, x: i32, y: i32) {
        let (x, y) = (clamp_fixed(x), clamp_fixed(y));

        match self.status {
            RasterizerStatus::Idle | RasterizerStatus::Sorted => {
                // There's no contour to add to
                self.move_to(x, y);
            }

            RasterizerStatus::MoveTo | RasterizerStatus::LineTo | RasterizerStatus::Closed => {
                self.outline.line_to(self.prev_x, self.prev_y, x, y);

                self.prev_x = x;
                self.prev_y = y;
                self.status = RasterizerStatus::LineTo;
            }
        }
    }

    ///
    /// Starts a new contour at a position in pixels
    ///
    #[inline]
    pub fn move_to_f(&mut self, x: f32, y: f32) {
        self.move_to(to_fixed(x), to_fixed(y));
    }

    ///
    /// Adds an edge ending at a position in pixels
    ///
    #[inline]
    pub fn line_to_f(&mut self, x: f32, y: f32) {
        self.line_to(to_fixed(x), to_fixed(y));
    }

    ///
    /// Closes the current contour by adding an edge back to its start
    ///
    pub fn close(&mut self) {
        if self.status == RasterizerStatus::LineTo {
            self.outline.line_to(self.prev_x, self.prev_y, self.start_x, self.start_y);

            self.prev_x = self.start_x;
            self.prev_y = self.start_y;
            self.status = RasterizerStatus::Closed;
        }
    }

    ///
    /// Adds the contours of a path to the outline
    ///
    /// Curves are transformed into device space before they are flattened, so `options` should specify tolerances
    /// in pixels. Every contour is closed, whether or not it was closed in the path.
    ///
    pub fn add_path(&mut self, path: &Path, transform: &Transform2D, options: &RefineOptions) {
        for contour in path.contours().iter().filter(|contour| !contour.is_empty()) {
            let start = transform.transform_point(contour.start_point());
            self.move_to_f(start.x, start.y);

            for segment_id in contour.segments() {
                match path.segment(*segment_id).curve() {
                    Curve::Line(_, end) => {
                        let end = transform.transform_point(*end);
                        self.line_to_f(end.x, end.y);
                    }

                    curve => {
                        let curve = curve.transform(transform);
                        flatten_curve(&curve, options, &mut |point| self.line_to_f(point.x, point.y));
                    }
                }
            }
        }

        self.close();
    }

    ///
    /// Closes the outline and sorts its cells, if that hasn't already been done
    ///
    fn prepare(&mut self) {
        if self.status != RasterizerStatus::Sorted {
            self.close();
            self.outline.sort_cells();
            self.status = RasterizerStatus::Sorted;

            trace!("Sorted {} cells covering ({}, {})-({}, {})", self.outline.num_cells(), self.outline.min_x(), self.outline.min_y(), self.outline.max_x(), self.outline.max_y());
        }
    }

    ///
    /// Renders the outline using a brush
    ///
    /// The outline is kept after rendering, so it can be rendered again with a different brush or target.
    ///
    pub fn render(&mut self, renderer: &mut impl SpanRenderer, brush: &Brush) {
        self.prepare();

        if self.outline.num_cells() == 0 {
            return;
        }

        let cells       = self.outline.cells();
        let scanline    = &mut self.scanline;
        let fill_rule   = self.fill_rule;
        let gamma       = &self.gamma;

        scanline.reset(self.outline.min_x(), self.outline.max_x());

        let mut row_start = 0;
        while row_start < cells.len() {
            let row_end = row_end(cells, row_start);

            scanline.reset_spans();
            sweep_row(&cells[row_start..row_end], fill_rule, gamma, scanline);

            if scanline.num_spans() > 0 {
                scanline.finalize(cells[row_start].y as i32);

                for span in scanline.spans() {
                    renderer.blend_span(span.x, scanline.y(), scanline.covers(span), brush);
                }
            }

            row_start = row_end;
        }
    }

    ///
    /// The coverage of a single pixel by the outline
    ///
    pub fn coverage_at(&mut self, x: i32, y: i32) -> u8 {
        self.prepare();

        let cells = self.outline.cells();
        let start = cells.partition_point(|cell| (cell.y as i32) < y);
        let end   = cells.partition_point(|cell| (cell.y as i32) <= y);

        let mut cover   = 0;
        let mut area    = 0;

        for cell in cells[start..end].iter() {
            let cell_x = cell.x as i32;

            if cell_x > x {
                break;
            }

            cover += cell.cover;
            if cell_x == x {
                area += cell.area;
            }
        }

        calculate_alpha((cover << (POLY_BASE_SHIFT + 1)) - area, self.fill_rule, &self.gamma)
    }

    ///
    /// True if the outline covers any part of a pixel
    ///
    #[inline]
    pub fn hit_test(&mut self, x: i32, y: i32) -> bool {
        self.coverage_at(x, y) != 0
    }
}

///
/// Finds the end of the row of cells that starts at `row_start`
///
#[inline]
fn row_end(cells: &[Cell], row_start: usize) -> usize {
    let y = cells[row_start].y;

    cells[row_start..].iter()
        .position(|cell| cell.y != y)
        .map(|len| row_start + len)
        .unwrap_or(cells.len())
}

///
/// Converts an accumulated area to an alpha value
///
/// `area` is `(cover << (POLY_BASE_SHIFT + 1)) - cell_area`, so a pixel entirely inside a single contour has an
/// area of `256 << 9`.
///
pub fn calculate_alpha(area: i32, fill_rule: FillRule, gamma: &GammaTable) -> u8 {
    let mut cover = (area >> (POLY_BASE_SHIFT * 2 + 1 - 8)).abs();

    if fill_rule == FillRule::EvenOdd {
        cover &= 511;
        if cover > 256 {
            cover = 512 - cover;
        }
    }

    gamma.look_up(cover.min(255) as u8)
}

///
/// Sweeps across a row of cells (sorted by x), adding the coverage they generate to a scanline
///
/// Cover accumulates from left to right: a pixel with area has partial coverage, and the pixels between one cell
/// and the next are all covered by the accumulated cover.
///
pub fn sweep_row(cells: &[Cell], fill_rule: FillRule, gamma: &GammaTable, scanline: &mut Scanline) {
    let mut cover   = 0;
    let mut idx     = 0;

    while idx < cells.len() {
        let mut x       = cells[idx].x as i32;
        let mut area    = 0;

        // Cells at the same position are combined
        while idx < cells.len() && cells[idx].x as i32 == x {
            area    += cells[idx].area;
            cover   += cells[idx].cover;
            idx     += 1;
        }

        if area != 0 {
            let alpha = calculate_alpha((cover << (POLY_BASE_SHIFT + 1)) - area, fill_rule, gamma);
            if alpha != 0 {
                scanline.add_cell(x, alpha);
            }

            x += 1;
        }

        if idx < cells.len() {
            let next_x = cells[idx].x as i32;

            if next_x > x {
                let alpha = calculate_alpha(cover << (POLY_BASE_SHIFT + 1), fill_rule, gamma);
                if alpha != 0 {
                    scanline.add_span(x, next_x - x, alpha);
                }
            }
        }
    }
}
