//! Conversion rules between legacy shapes and masks.
//!
//! Three families, in dispatch preference:
//!
//! - [`unwrap`]: recover the backing shape of a wrapper by identity.
//! - [`to_mask`] and [`to_roi`]: structural rules, one per shape kind and
//!   direction.
//! - [`raster`]: the bitmap fallback for any finite planar mask.

pub mod capability;
pub mod raster;
pub mod to_mask;
pub mod to_roi;
pub mod unwrap;
pub mod value;

pub use capability::{Capability, Priority};
pub use raster::{PixelGrid, RasterOptions, Rasterizer, rasterize};
pub use to_mask::{
    OvalToEllipsoid, PointRoiToPointCollection, PolygonRoiToPolygon, PolylineRoiToPolyline,
    RoiToBox, RoiToLine,
};
pub use to_roi::{
    BoxToRoi, EllipsoidToOval, LineToRoi, PointCollectionToRoi, PointMaskToRoi, PolygonToRoi,
    PolylineToRoi,
};
pub use unwrap::Unwrap;
pub use value::{AnyMask, Convertible};
