use crate::brush::*;
use crate::color::*;
use crate::frame::*;

///
/// Receives the coverage generated by the rasterizer, one span of pixels at a time
///
pub trait SpanRenderer {
    ///
    /// The width and height of the target, in pixels
    ///
    fn size(&self) -> (i32, i32);

    ///
    /// Blends a brush into a run of pixels starting at `(x, y)`, with one coverage value per pixel
    ///
    /// Spans can extend beyond the edges of the target, so implementations must clip them.
    ///
    fn blend_span(&mut self, x: i32, y: i32, covers: &[u8], brush: &Brush);
}

///
/// Widens an 8-bit value to the range 0..=256, so that 255 becomes exactly 256
///
#[inline]
fn widen(value: u8) -> i32 {
    let value = value as i32;
    value + (value >> 7)
}

///
/// The blend weight for a pixel (0..=65536) from its coverage and the alpha of the colour drawn there
///
#[inline]
pub fn blend_weight(cover: u8, alpha: u8) -> i32 {
    widen(cover) * widen(alpha)
}

///
/// Blends a source channel value into a destination channel value
///
#[inline]
pub fn blend_channel(src: u8, dst: u8, weight: i32) -> u8 {
    let src = src as i32;
    let dst = dst as i32;

    (((src - dst) * weight + (dst << 16)) >> 16) as u8
}

///
/// Blends a colour into a single pixel (3 or 4 bytes, depending on the format)
///
#[inline]
fn blend_pixel(pixel: &mut [u8], color: Color, cover: u8) {
    let weight = blend_weight(cover, color.a);

    pixel[0] = blend_channel(color.r, pixel[0], weight);
    pixel[1] = blend_channel(color.g, pixel[1], weight);
    pixel[2] = blend_channel(color.b, pixel[2], weight);

    if pixel.len() > 3 {
        pixel[3] = blend_channel(255, pixel[3], weight);
    }
}

impl<'a> SpanRenderer for FrameBuffer<'a> {
    #[inline]
    fn size(&self) -> (i32, i32) {
        (self.width as i32, self.height as i32)
    }

    fn blend_span(&mut self, x: i32, y: i32, covers: &[u8], brush: &Brush) {
        let (width, height) = self.size();

        if y < 0 || y >= height {
            return;
        }

        // Clip the span to the frame
        let start   = x.max(0);
        let end     = (x + covers.len() as i32).min(width);
        if start >= end {
            return;
        }

        let bpp     = self.format.bytes_per_pixel();
        let covers  = &covers[((start - x) as usize)..((end - x) as usize)];
        let row     = self.row_mut(y as usize);
        let pixels  = row[(start as usize * bpp)..(end as usize * bpp)].chunks_exact_mut(bpp);

        match brush {
            Brush::Solid(color) => {
                for (pixel, cover) in pixels.zip(covers.iter()) {
                    blend_pixel(pixel, *color, *cover);
                }
            }

            Brush::Gradient(_) => {
                for ((pixel, cover), pixel_x) in pixels.zip(covers.iter()).zip(start..end) {
                    blend_pixel(pixel, brush.color_at(pixel_x, y), *cover);
                }
            }
        }
    }
}
