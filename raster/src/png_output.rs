#[cfg(feature="render_png")]
mod render_png {
    use crate::frame::*;
    use crate::error::*;

    use log::*;

    use std::io::{Write, BufWriter};

    ///
    /// Writes the contents of a frame buffer to a stream as a PNG file
    ///
    pub fn write_png<TStream>(frame: &FrameBuffer, target: TStream) -> Result<(), RenderError>
    where
        TStream: Write,
    {
        let mut encoder = png::Encoder::new(BufWriter::new(target), frame.width() as u32, frame.height() as u32);

        encoder.set_color(match frame.format() {
            PixelFormat::Rgb8   => png::ColorType::Rgb,
            PixelFormat::Rgba8  => png::ColorType::Rgba,
        });
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer  = encoder.write_header()?;
        let row_bytes   = frame.width() * frame.format().bytes_per_pixel();

        if frame.stride() == row_bytes {
            writer.write_image_data(&frame.data()[0..(row_bytes * frame.height())])?;
        } else {
            // Strip out the padding at the end of each row
            let mut pixel_data = Vec::with_capacity(row_bytes * frame.height());
            for y in 0..frame.height() {
                pixel_data.extend_from_slice(frame.row(y));
            }

            writer.write_image_data(&pixel_data)?;
        }

        writer.finish()?;
        debug!("Wrote {}x{} PNG", frame.width(), frame.height());

        Ok(())
    }

}

#[cfg(feature="render_png")]
pub use render_png::*;
