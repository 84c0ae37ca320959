///
/// Number of fractional bits in the fixed-point coordinates accepted by the rasterizer
///
pub const POLY_BASE_SHIFT: i32 = 8;

///
/// The number of sub-pixel steps in a pixel
///
pub const POLY_BASE_SIZE: i32 = 1 << POLY_BASE_SHIFT;

///
/// Mask for the fractional part of a fixed-point coordinate
///
pub const POLY_BASE_MASK: i32 = POLY_BASE_SIZE - 1;

///
/// The coverage accumulated by the edges that cross a single pixel
///
/// `cover` is the total height of the edges crossing the pixel, and `area` is twice the area between those edges
/// and the left-hand side of the pixel, both in sub-pixel units. Cells sort into scanline order on `packed`.
///
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Cell {
    pub x:      i16,
    pub y:      i16,
    pub packed: i32,
    pub cover:  i32,
    pub area:   i32,
}

impl Cell {
    ///
    /// Creates a cell for a pixel position
    ///
    #[inline]
    pub fn new(x: i32, y: i32, cover: i32, area: i32) -> Cell {
        Cell {
            x:      x as i16,
            y:      y as i16,
            packed: packed_coord(x, y),
            cover:  cover,
            area:   area,
        }
    }
}

///
/// Packs a pixel position into a value that orders cells by row and then by column
///
#[inline]
pub fn packed_coord(x: i32, y: i32) -> i32 {
    ((y as i16 as i32) << 16) + ((x as i16 as i32) + 0x8000)
}
