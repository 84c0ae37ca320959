///
/// A run of pixels in a scanline
///
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Span {
    /// The first pixel covered by this span
    pub x: i32,

    /// The number of pixels in this span
    pub len: i32,

    /// Where the coverage values for this span start in the scanline's cover buffer
    pub cover_offset: usize,
}

///
/// The coverage values for a single row of pixels, stored as a list of spans
///
/// The buffers are kept between rows and between renders, so once they have grown to fit the widest row they
/// do not need to be reallocated.
///
pub struct Scanline {
    /// Coverage values, indexed by `x - min_x`
    covers: Vec<u8>,

    /// The spans in this scanline
    spans: Vec<Span>,

    /// The leftmost x position that can be stored in this scanline
    min_x: i32,

    /// The x position of the last pixel added
    last_x: i32,

    /// The row this scanline represents
    y: i32,
}

impl Default for Scanline {
    fn default() -> Self {
        Scanline::new()
    }
}

impl Scanline {
    pub fn new() -> Scanline {
        Scanline {
            covers: vec![],
            spans:  vec![],
            min_x:  0,
            last_x: i32::MIN + 1,
            y:      0,
        }
    }

    ///
    /// Prepares the scanline to receive pixels between `min_x` and `max_x` (inclusive)
    ///
    pub fn reset(&mut self, min_x: i32, max_x: i32) {
        let required = (max_x - min_x + 3).max(0) as usize;
        if self.covers.len() < required {
            self.covers.resize(required, 0);
        }

        self.spans.clear();
        self.min_x  = min_x;
        self.last_x = i32::MIN + 1;
    }

    ///
    /// Removes the spans from this scanline without changing its range
    ///
    #[inline]
    pub fn reset_spans(&mut self) {
        self.spans.clear();
        self.last_x = i32::MIN + 1;
    }

    ///
    /// Adds a single pixel to the scanline
    ///
    pub fn add_cell(&mut self, x: i32, cover: u8) {
        let offset = (x - self.min_x) as usize;
        self.covers[offset] = cover;

        self.extend_span(x, 1, offset);
    }

    ///
    /// Adds a run of pixels with the same coverage to the scanline
    ///
    pub fn add_span(&mut self, x: i32, len: i32, cover: u8) {
        let offset = (x - self.min_x) as usize;
        self.covers[offset..(offset + len as usize)].iter_mut().for_each(|value| *value = cover);

        self.extend_span(x, len, offset);
    }

    ///
    /// Adds pixels to the last span if they follow on from it, or starts a new span if they don't
    ///
    #[inline]
    fn extend_span(&mut self, x: i32, len: i32, offset: usize) {
        let follows_last    = x == self.last_x + 1;
        self.last_x         = x + len - 1;

        if follows_last {
            if let Some(span) = self.spans.last_mut() {
                span.len += len;
                return;
            }
        }

        self.spans.push(Span { x: x, len: len, cover_offset: offset });
    }

    ///
    /// Sets the row that this scanline represents
    ///
    #[inline]
    pub fn finalize(&mut self, y: i32) {
        self.y = y;
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn num_spans(&self) -> usize {
        self.spans.len()
    }

    #[inline]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    ///
    /// The coverage values for a span
    ///
    #[inline]
    pub fn covers(&self, span: &Span) -> &[u8] {
        &self.covers[span.cover_offset..(span.cover_offset + span.len as usize)]
    }

    ///
    /// The coverage of a single pixel (0 if the pixel is not in any span)
    ///
    pub fn coverage_at(&self, x: i32) -> u8 {
        self.spans.iter()
            .find(|span| x >= span.x && x < span.x + span.len)
            .map(|span| self.covers[span.cover_offset + (x - span.x) as usize])
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn adjacent_cells_join_spans() {
        let mut scanline = Scanline::new();
        scanline.reset(0, 20);

        scanline.add_cell(2, 10);
        scanline.add_span(3, 4, 255);
        scanline.add_cell(7, 20);
        scanline.add_cell(10, 30);

        assert!(scanline.num_spans() == 2, "{:?}", scanline.spans());
        assert!(scanline.covers(&scanline.spans()[0]) == &[10, 255, 255, 255, 255, 20]);
        assert!(scanline.coverage_at(10) == 30);
        assert!(scanline.coverage_at(9) == 0);
    }
}
