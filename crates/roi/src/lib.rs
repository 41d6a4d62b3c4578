//! # Legacy Region-of-Interest Shapes
//!
//! The mutable, display-bound shape model that the `mask` crate adapts.
//!
//! Shapes come in a closed set of variants (rectangles, ovals, vertex
//! arrays, lines, point sets and the rectangle-typed text and bitmap
//! overlays). A shape may be shown on a [`DisplayContext`]; index-based
//! structural edits of a shown shape are delegated to that display.
//!
//! ```rust
//! use std::rc::Rc;
//! use roi::{Canvas, PolygonKind, Roi};
//!
//! let mut roi = Roi::polygon(
//!     PolygonKind::Polyline,
//!     vec![1.25, 20.0, 50.0],
//!     vec![1.25, 20.0, -30.0],
//! )?;
//! roi.attach(Rc::new(Canvas::new("blobs")));
//! assert!(roi.is_attached());
//! # Ok::<(), roi::RoiError>(())
//! ```

pub mod bitmap;
pub mod display;
pub mod error;
pub mod roi;
pub mod shape;

pub use bitmap::BitmapRegion;
pub use display::{Canvas, DisplayContext, HandleEdit};
pub use error::{Result, RoiError};
pub use roi::{Roi, RoiHandle, RoiMut};
pub use shape::{
    Bounds, LineShape, OvalShape, PointShape, PolygonKind, PolygonShape, RectangleShape,
    RoiGeometry, RoiType, TextShape,
};
