//!
//! # flo_vector
//!
//! `flo_vector` provides a resolution-independent model of 2D paths, along with the operations needed to
//! prepare them for rendering: adaptive refinement of curves into short, flat segments, construction of
//! stroke outlines (with joins, caps and dashes) and a content-addressed cache that shares the geometry
//! generated for identical paths.
//!
//! Paths are built using drawing operations similar to a 2D canvas:
//!
//! ```
//! # use flo_vector::*;
//! let mut path = Path::new();
//! path.move_to(10.0, 10.0);
//! path.line_to(100.0, 10.0);
//! path.cubic_to2(120.0, 10.0, 120.0, 50.0, 100.0, 50.0);
//! path.close();
//!
//! let mut cache   = PathCache::new();
//! let mesh        = cache.find_mesh(&path, &StrokeStyle::stroke(4.0).with_join(JoinKind::Round));
//!
//! assert!(mesh.stroke_path().is_some());
//! ```
//!
//! The geometry is consumed by `flo_raster`, which flattens paths in device space and renders them with an
//! anti-aliased scanline rasterizer.
//!

#![warn(bare_trait_objects)]

#[macro_use]
extern crate serde_derive;

mod geo;
mod arc;
mod hash;
mod dash;
mod path;
mod style;
mod cache;
mod stroke;
mod refine;
mod segment;
mod contour;

pub use self::geo::*;
pub use self::arc::*;
pub use self::hash::*;
pub use self::dash::*;
pub use self::path::*;
pub use self::style::*;
pub use self::cache::*;
pub use self::stroke::*;
pub use self::refine::*;
pub use self::segment::*;
pub use self::contour::*;
