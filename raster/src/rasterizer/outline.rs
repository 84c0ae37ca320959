use super::cell::*;

use smallvec::*;

///
/// Cell storage grows by at least this many cells at a time
///
const CELL_BLOCK_SIZE: usize = 4096;

///
/// Partitions smaller than this are sorted by insertion sort
///
const QSORT_THRESHOLD: usize = 9;

///
/// Lines wider than this (in sub-pixels) are split in half before they are rendered, to keep the
/// intermediate products within range of an i32
///
const DX_LIMIT: i32 = 16384 << POLY_BASE_SHIFT;

///
/// The cells covered by the edges of a polygon
///
/// Lines are decomposed into one cell per pixel they cross, with exact integer accounting of the area and
/// cover within each pixel. Cells are accumulated in a `current` cell until the line moves into another pixel.
///
pub struct Outline {
    /// The cells generated so far
    cells: Vec<Cell>,

    /// Position of the cell being accumulated (`i32::MAX` if there isn't one)
    current_x: i32,
    current_y: i32,

    /// Coverage accumulated for the current cell
    current_cover: i32,
    current_area: i32,

    /// Bounds of the cells (in pixels)
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,

    /// True once the cells have been sorted into scanline order
    sorted: bool,
}

impl Default for Outline {
    fn default() -> Self {
        Outline::new()
    }
}

impl Outline {
    ///
    /// Creates a new empty outline
    ///
    pub fn new() -> Outline {
        Outline {
            cells:          vec![],
            current_x:      i32::MAX,
            current_y:      i32::MAX,
            current_cover:  0,
            current_area:   0,
            min_x:          i32::MAX,
            min_y:          i32::MAX,
            max_x:          i32::MIN,
            max_y:          i32::MIN,
            sorted:         false,
        }
    }

    ///
    /// Removes all of the cells from this outline (the storage is kept for re-use)
    ///
    pub fn reset(&mut self) {
        self.cells.clear();

        self.current_x      = i32::MAX;
        self.current_y      = i32::MAX;
        self.current_cover  = 0;
        self.current_area   = 0;
        self.min_x          = i32::MAX;
        self.min_y          = i32::MAX;
        self.max_x          = i32::MIN;
        self.max_y          = i32::MIN;
        self.sorted         = false;
    }

    #[inline] pub fn min_x(&self) -> i32 { self.min_x }
    #[inline] pub fn min_y(&self) -> i32 { self.min_y }
    #[inline] pub fn max_x(&self) -> i32 { self.max_x }
    #[inline] pub fn max_y(&self) -> i32 { self.max_y }

    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    ///
    /// The number of cells in this outline (including the current cell once the outline is sorted)
    ///
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    ///
    /// The cells in this outline (in scanline order once `sort_cells` has been called)
    ///
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    ///
    /// Stores the current cell if it has any coverage
    ///
    #[inline]
    fn add_current_cell(&mut self) {
        if (self.current_area | self.current_cover) != 0 {
            if self.cells.len() == self.cells.capacity() {
                self.cells.reserve(CELL_BLOCK_SIZE.max(self.cells.len()));
            }

            self.cells.push(Cell::new(self.current_x, self.current_y, self.current_cover, self.current_area));
        }
    }

    ///
    /// Moves the current cell to a new pixel, storing the old one
    ///
    #[inline]
    fn set_current_cell(&mut self, x: i32, y: i32) {
        if self.current_x != x || self.current_y != y {
            self.add_current_cell();

            self.current_x      = x;
            self.current_y      = y;
            self.current_cover  = 0;
            self.current_area   = 0;
        }
    }

    #[inline]
    fn accumulate(&mut self, cover: i32, area: i32) {
        self.current_cover  += cover;
        self.current_area   += area;
    }

    ///
    /// Renders the part of a line that lies within a single pixel row
    ///
    /// `x1` and `x2` are fixed-point, `y1` and `y2` are the fractional positions within row `ey`.
    ///
    fn render_hline(&mut self, ey: i32, x1: i32, y1: i32, x2: i32, y2: i32) {
        let mut ex1 = x1 >> POLY_BASE_SHIFT;
        let ex2     = x2 >> POLY_BASE_SHIFT;
        let fx1     = x1 & POLY_BASE_MASK;
        let fx2     = x2 & POLY_BASE_MASK;

        // Horizontal lines only move the current cell
        if y1 == y2 {
            self.set_current_cell(ex2, ey);
            return;
        }

        // Everything in one cell
        if ex1 == ex2 {
            let delta = y2 - y1;
            self.accumulate(delta, (fx1 + fx2) * delta);
            return;
        }

        // Run of adjacent cells on the same row
        let mut p       = (POLY_BASE_SIZE - fx1) * (y2 - y1);
        let mut first   = POLY_BASE_SIZE;
        let mut incr    = 1;
        let mut dx      = x2 - x1;

        if dx < 0 {
            p       = fx1 * (y2 - y1);
            first   = 0;
            incr    = -1;
            dx      = -dx;
        }

        let mut delta   = p / dx;
        let mut modulo  = p % dx;

        if modulo < 0 {
            delta   -= 1;
            modulo  += dx;
        }

        self.accumulate(delta, (fx1 + first) * delta);

        ex1         += incr;
        self.set_current_cell(ex1, ey);
        let mut y1  = y1 + delta;

        if ex1 != ex2 {
            let p           = POLY_BASE_SIZE * (y2 - y1 + delta);
            let mut lift    = p / dx;
            let mut rem     = p % dx;

            if rem < 0 {
                lift    -= 1;
                rem     += dx;
            }

            modulo -= dx;

            while ex1 != ex2 {
                delta   = lift;
                modulo  += rem;

                if modulo >= 0 {
                    modulo  -= dx;
                    delta   += 1;
                }

                self.accumulate(delta, POLY_BASE_SIZE * delta);
                y1  += delta;
                ex1 += incr;
                self.set_current_cell(ex1, ey);
            }
        }

        let delta = y2 - y1;
        self.accumulate(delta, (fx2 + POLY_BASE_SIZE - first) * delta);
    }

    ///
    /// Adds a line between two fixed-point coordinates
    ///
    pub fn line_to(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let dx = x2 - x1;

        if dx >= DX_LIMIT || dx <= -DX_LIMIT {
            let cx = ((x1 as i64 + x2 as i64) >> 1) as i32;
            let cy = ((y1 as i64 + y2 as i64) >> 1) as i32;

            self.line_to(x1, y1, cx, cy);
            self.line_to(cx, cy, x2, y2);
            return;
        }

        let mut dy      = y2 - y1;
        let ex1         = x1 >> POLY_BASE_SHIFT;
        let ex2         = x2 >> POLY_BASE_SHIFT;
        let mut ey1     = y1 >> POLY_BASE_SHIFT;
        let ey2         = y2 >> POLY_BASE_SHIFT;
        let fy1         = y1 & POLY_BASE_MASK;
        let fy2         = y2 & POLY_BASE_MASK;

        self.min_x = self.min_x.min(ex1).min(ex2);
        self.min_y = self.min_y.min(ey1).min(ey2);
        self.max_x = self.max_x.max(ex1).max(ex2);
        self.max_y = self.max_y.max(ey1).max(ey2);

        self.set_current_cell(ex1, ey1);

        // Everything on a single row
        if ey1 == ey2 {
            self.render_hline(ey1, x1, fy1, x2, fy2);
            return;
        }

        let mut incr = 1;

        // Vertical lines only touch one column of cells
        if dx == 0 {
            let ex          = x1 >> POLY_BASE_SHIFT;
            let two_fx      = (x1 - (ex << POLY_BASE_SHIFT)) << 1;
            let mut first   = POLY_BASE_SIZE;

            if dy < 0 {
                first   = 0;
                incr    = -1;
            }

            let delta = first - fy1;
            self.accumulate(delta, two_fx * delta);

            ey1 += incr;
            self.set_current_cell(ex, ey1);

            let delta   = first + first - POLY_BASE_SIZE;
            let area    = two_fx * delta;

            while ey1 != ey2 {
                self.current_cover  = delta;
                self.current_area   = area;

                ey1 += incr;
                self.set_current_cell(ex, ey1);
            }

            let delta = fy2 - POLY_BASE_SIZE + first;
            self.accumulate(delta, two_fx * delta);
            return;
        }

        // A line crossing several rows: render one row at a time
        let mut p       = (POLY_BASE_SIZE - fy1) * dx;
        let mut first   = POLY_BASE_SIZE;

        if dy < 0 {
            p       = fy1 * dx;
            first   = 0;
            incr    = -1;
            dy      = -dy;
        }

        let mut delta   = p / dy;
        let mut modulo  = p % dy;

        if modulo < 0 {
            delta   -= 1;
            modulo  += dy;
        }

        let mut x_from = x1 + delta;
        self.render_hline(ey1, x1, fy1, x_from, first);

        ey1 += incr;
        self.set_current_cell(x_from >> POLY_BASE_SHIFT, ey1);

        if ey1 != ey2 {
            let p           = POLY_BASE_SIZE * dx;
            let mut lift    = p / dy;
            let mut rem     = p % dy;

            if rem < 0 {
                lift    -= 1;
                rem     += dy;
            }

            modulo -= dy;

            while ey1 != ey2 {
                delta   = lift;
                modulo  += rem;

                if modulo >= 0 {
                    modulo  -= dy;
                    delta   += 1;
                }

                let x_to = x_from + delta;
                self.render_hline(ey1, x_from, POLY_BASE_SIZE - first, x_to, first);
                x_from = x_to;

                ey1 += incr;
                self.set_current_cell(x_from >> POLY_BASE_SHIFT, ey1);
            }
        }

        self.render_hline(ey1, x_from, POLY_BASE_SIZE - first, x2, fy2);
    }

    ///
    /// Stores the current cell and sorts all the cells into scanline order
    ///
    /// Does nothing if the cells are already sorted.
    ///
    pub fn sort_cells(&mut self) {
        if self.sorted {
            return;
        }

        self.add_current_cell();
        self.current_x      = i32::MAX;
        self.current_y      = i32::MAX;
        self.current_cover  = 0;
        self.current_area   = 0;

        if !self.cells.is_empty() {
            qsort_cells(&mut self.cells);
        }

        self.sorted = true;
    }
}

///
/// Sorts cells by their packed coordinate
///
/// This is a quicksort that picks its pivot as the median of three values, and switches to an insertion sort for
/// small partitions. The larger partition is pushed on to a stack so the stack depth stays logarithmic.
///
pub fn qsort_cells(cells: &mut [Cell]) {
    let mut stack: SmallVec<[(usize, usize); 64]> = smallvec![];
    let mut base    = 0;
    let mut limit   = cells.len();

    loop {
        let len = limit - base;

        if len > QSORT_THRESHOLD {
            // Use the middle element as the pivot, and move it to the start
            let pivot = base + len / 2;
            cells.swap(base, pivot);

            let mut i = base + 1;
            let mut j = limit - 1;

            // Ensure cells[i] <= cells[base] <= cells[j] so the scans below stop at the ends
            if cells[j].packed < cells[i].packed    { cells.swap(i, j); }
            if cells[base].packed < cells[i].packed { cells.swap(base, i); }
            if cells[j].packed < cells[base].packed { cells.swap(base, j); }

            let pivot_value = cells[base].packed;

            loop {
                i += 1;
                while cells[i].packed < pivot_value { i += 1; }

                j -= 1;
                while pivot_value < cells[j].packed { j -= 1; }

                if i > j {
                    break;
                }

                cells.swap(i, j);
            }

            cells.swap(base, j);

            // Push the larger partition, and continue with the smaller one
            if j - base > limit - i {
                stack.push((base, j));
                base = i;
            } else {
                stack.push((i, limit));
                limit = j;
            }
        } else {
            // Insertion sort for small partitions
            for i in (base + 1)..limit {
                let mut j = i;

                while j > base && cells[j].packed < cells[j - 1].packed {
                    cells.swap(j, j - 1);
                    j -= 1;
                }
            }

            match stack.pop() {
                Some((next_base, next_limit)) => {
                    base    = next_base;
                    limit   = next_limit;
                }

                None => break,
            }
        }
    }
}
