use crate::color::*;
use crate::error::*;

///
/// The layout of the pixels in a frame buffer
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 3 bytes per pixel: red, green, blue
    Rgb8,

    /// 4 bytes per pixel: red, green, blue, alpha (not premultiplied)
    Rgba8,
}

impl PixelFormat {
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Rgb8   => 3,
            PixelFormat::Rgba8  => 4,
        }
    }

    ///
    /// True if this format has an alpha channel
    ///
    #[inline]
    pub fn has_alpha(&self) -> bool {
        *self == PixelFormat::Rgba8
    }
}

///
/// A render target backed by a caller-supplied buffer of u8 pixels
///
pub struct FrameBuffer<'a> {
    pub (crate) width:  usize,
    pub (crate) height: usize,

    /// Bytes from the start of one row to the start of the next
    pub (crate) stride: usize,
    pub (crate) format: PixelFormat,
    pub (crate) data:   &'a mut [u8],
}

impl<'a> FrameBuffer<'a> {
    ///
    /// Creates a frame buffer with an explicit stride (returns an error if the buffer is not big enough)
    ///
    pub fn new(width: usize, height: usize, stride: usize, format: PixelFormat, data: &'a mut [u8]) -> Result<Self, RenderError> {
        let row_bytes = width * format.bytes_per_pixel();

        if stride < row_bytes {
            return Err(RenderError::InvalidStride { stride, row_bytes });
        }

        // The last row doesn't need any padding
        let required = if height == 0 { 0 } else { stride * (height - 1) + row_bytes };

        if data.len() < required {
            Err(RenderError::BufferTooSmall { required, actual: data.len() })
        } else {
            Ok(FrameBuffer {
                width:  width,
                height: height,
                stride: stride,
                format: format,
                data:   data,
            })
        }
    }

    ///
    /// Creates a frame buffer from tightly packed rows of pixels
    ///
    #[inline]
    pub fn from_bytes(width: usize, height: usize, format: PixelFormat, data: &'a mut [u8]) -> Result<Self, RenderError> {
        Self::new(width, height, width * format.bytes_per_pixel(), format, data)
    }

    #[inline] pub fn width(&self) -> usize { self.width }
    #[inline] pub fn height(&self) -> usize { self.height }
    #[inline] pub fn stride(&self) -> usize { self.stride }
    #[inline] pub fn format(&self) -> PixelFormat { self.format }

    ///
    /// The raw pixel data for this frame
    ///
    #[inline]
    pub fn data(&self) -> &[u8] {
        &*self.data
    }

    ///
    /// The bytes making up a row of pixels
    ///
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..(start + self.width * self.format.bytes_per_pixel())]
    }

    #[inline]
    pub (crate) fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start       = y * self.stride;
        let row_bytes   = self.width * self.format.bytes_per_pixel();

        &mut self.data[start..(start + row_bytes)]
    }

    ///
    /// Reads a pixel from the frame (formats without alpha return opaque colours)
    ///
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        let bpp     = self.format.bytes_per_pixel();
        let pixel   = &self.row(y)[(x * bpp)..((x + 1) * bpp)];

        match self.format {
            PixelFormat::Rgb8   => Color::rgb(pixel[0], pixel[1], pixel[2]),
            PixelFormat::Rgba8  => Color::rgba(pixel[0], pixel[1], pixel[2], pixel[3]),
        }
    }

    ///
    /// Sets every pixel in the frame to a colour
    ///
    pub fn clear(&mut self, color: Color) {
        let bpp     = self.format.bytes_per_pixel();
        let value   = [color.r, color.g, color.b, color.a];

        for y in 0..self.height {
            for pixel in self.row_mut(y).chunks_exact_mut(bpp) {
                pixel.copy_from_slice(&value[0..bpp]);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn short_buffer_is_rejected() {
        let mut data = vec![0u8; 99];

        match FrameBuffer::from_bytes(5, 5, PixelFormat::Rgba8, &mut data) {
            Err(RenderError::BufferTooSmall { required, actual }) => {
                assert!(required == 100);
                assert!(actual == 99);
            }
            _ => assert!(false, "Buffer should be too small"),
        }
    }

    #[test]
    fn narrow_stride_is_rejected() {
        let mut data = vec![0u8; 1000];

        assert!(FrameBuffer::new(10, 10, 29, PixelFormat::Rgb8, &mut data).is_err());
    }

    #[test]
    fn last_row_is_not_padded() {
        let mut data = vec![0u8; 2 * 16 + 12];

        assert!(FrameBuffer::new(3, 3, 16, PixelFormat::Rgba8, &mut data).is_ok());
    }

    #[test]
    fn clear_sets_pixels() {
        let mut data    = vec![0u8; 4 * 16 + 12];
        let mut frame   = FrameBuffer::new(4, 5, 16, PixelFormat::Rgb8, &mut data).unwrap();

        frame.clear(Color::rgb(1, 2, 3));

        assert!(frame.pixel(3, 4) == Color::rgb(1, 2, 3));
        assert!(frame.data()[12..16] == [0, 0, 0, 0]);
    }
}
