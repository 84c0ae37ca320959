use std::fmt;
use std::error::{Error};

///
/// Errors that can occur when setting up or writing out a frame
///
#[derive(Debug)]
pub enum RenderError {
    /// The pixel data is too small to hold a frame of the requested size
    BufferTooSmall { required: usize, actual: usize },

    /// The stride is too small to hold a row of pixels
    InvalidStride { stride: usize, row_bytes: usize },

    /// The PNG encoder could not write the frame
    #[cfg(feature="render_png")]
    Png(png::EncodingError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RenderError::BufferTooSmall { required, actual }    => write!(f, "frame needs {} bytes of pixel data but the buffer is only {} bytes", required, actual),
            RenderError::InvalidStride { stride, row_bytes }    => write!(f, "stride of {} bytes is too small for a row of {} bytes", stride, row_bytes),

            #[cfg(feature="render_png")]
            RenderError::Png(err)                               => write!(f, "could not encode PNG: {}", err),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            #[cfg(feature="render_png")]
            RenderError::Png(err)   => Some(err),

            _                       => None,
        }
    }
}

#[cfg(feature="render_png")]
impl From<png::EncodingError> for RenderError {
    fn from(err: png::EncodingError) -> RenderError {
        RenderError::Png(err)
    }
}
