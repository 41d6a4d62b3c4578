//! # Mask Bridge Library
//!
//! Bridges mutable, display-bound legacy shapes (the [`roi`] crate) and
//! real-valued masks: containment predicates with bounding intervals.
//!
//! ## Core Features
//!
//! - **Wrappers**: live mask views over legacy shapes that read through to
//!   the backing shape on every call
//! - **Value masks**: immutable boxes, ellipsoids, lines, polylines,
//!   polygons and point sets
//! - **Converters**: unwrap, structural and rasterization rules in both
//!   directions
//! - **Dispatch**: a registry picking the best applicable rule for a value
//!   and a target capability
//!
//! ## Quick Start
//!
//! ```rust
//! use mask::{Capability, ConverterRegistry, Convertible, Mask};
//! use roi::Roi;
//!
//! let registry = ConverterRegistry::standard();
//! let oval = Convertible::from(Roi::oval(10.0, 22.0, 7.0, 4.0));
//!
//! let ellipsoid = registry
//!     .convert_or_err(&oval, Capability::Ellipsoid)?
//!     .into_mask()
//!     .expect("mask side");
//! assert!(ellipsoid.test(&[12.125, 23.0]));
//!
//! // Converting back hands out the very same shape.
//! let back = registry.convert_or_err(&Convertible::Mask(ellipsoid), Capability::Roi)?;
//! assert!(back.as_roi().expect("shape side").ptr_eq(oval.as_roi().expect("shape side")));
//! # Ok::<(), mask::MaskError>(())
//! ```
//!
//! ## Custom Registry
//!
//! ```rust
//! use mask::{ConverterRegistry, RasterOptions};
//!
//! let registry = ConverterRegistry::builder()
//!     .with_standard_converters()
//!     .with_rasterization(RasterOptions { sample_offset: 0.5, ..Default::default() })
//!     .build();
//! println!("{}", registry.info());
//! ```

// Core modules
pub mod convert;
pub mod error;
pub mod geometry;
pub mod registry;
pub mod shapes;
pub mod traits;
pub mod types;
pub mod wrappers;

// Re-exports for convenience
pub use convert::{AnyMask, Capability, Convertible, Priority, RasterOptions, Rasterizer, rasterize};
pub use error::{MaskError, Result};
pub use registry::{ConverterRegistry, RegistryBuilder};
pub use shapes::{Ellipsoid, LineSegment, PointCollection, PointMask, Polygon2D, Polyline, RealBox};
pub use traits::*;
pub use types::{BoundaryType, BoundingInterval, PointView};
pub use wrappers::{
    LineWrapper, OvalWrapper, PointWrapper, PolygonWrapper, PolylineWrapper, RectangleWrapper,
};
