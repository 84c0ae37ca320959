//!
//! # flo_raster
//!
//! `flo_raster` renders `flo_vector` paths into 8-bit RGB or RGBA frame buffers. Paths are flattened in device
//! space and converted into cells by an exact, integer-only scanline rasterizer, and the resulting coverage is
//! blended into the frame using a solid colour or a gradient.
//!
//! ```
//! # use flo_vector::*;
//! # use flo_raster::*;
//! let mut pixels      = vec![0u8; 64*64*4];
//! let mut frame       = FrameBuffer::from_bytes(64, 64, PixelFormat::Rgba8, &mut pixels).unwrap();
//! let mut renderer    = VectorRenderer::new();
//!
//! let circle          = Path::circle(32.0, 32.0, 20.0);
//! let style           = StrokeStyle::fill().with_width(4.0).with_join(JoinKind::Round);
//! renderer.draw_path(&mut frame, &circle, &Transform2D::identity(), &style, &Brush::Solid(Color::rgb(0, 0, 255)), &Brush::Solid(Color::BLACK));
//!
//! assert!(frame.pixel(32, 32) == Color::rgb(0, 0, 255));
//! assert!(frame.pixel(32, 12).b < 16);
//! assert!(frame.pixel(0, 0) == Color::TRANSPARENT);
//! ```
//!
//! The lower-level `Rasterizer` can be used directly to render polygons or to hit test them.
//!

#![warn(bare_trait_objects)]

#[macro_use]
extern crate serde_derive;

mod color;
mod brush;
mod error;
mod frame;
mod gamma;
mod gradient;
mod renderer;
mod png_output;
mod rasterizer;
mod vector_renderer;

pub use self::color::*;
pub use self::brush::*;
pub use self::error::*;
pub use self::frame::*;
pub use self::gamma::*;
pub use self::gradient::*;
pub use self::renderer::*;
pub use self::png_output::*;
pub use self::rasterizer::*;
pub use self::vector_renderer::*;
