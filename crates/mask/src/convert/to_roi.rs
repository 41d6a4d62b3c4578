//! Structural converters from masks to new legacy shapes.
//!
//! The produced shape is a snapshot of the mask's current geometry with no
//! link back to the mask. Vertex and point coordinates are narrowed to
//! single precision, which is why those rules are lossy.

use roi::{PolygonKind, Roi};

use crate::{
    convert::{AnyMask, Capability, Convertible, Priority},
    error::{MaskError, Result},
    traits::{Converter, Mask, VertexMask},
    types::{BoundaryType, PointView},
};

fn source_mask<'a>(name: &str, value: &'a Convertible) -> Result<&'a AnyMask> {
    value
        .as_mask()
        .ok_or_else(|| MaskError::Conversion(format!("{name} expects a mask")))
}

fn narrow(points: &[PointView]) -> Result<(Vec<f32>, Vec<f32>)> {
    let mut xs = Vec::with_capacity(points.len());
    let mut ys = Vec::with_capacity(points.len());
    for p in points {
        match p.as_slice() {
            &[x, y] => {
                xs.push(x as f32);
                ys.push(y as f32);
            }
            other => {
                return Err(MaskError::Conversion(format!(
                    "legacy shapes are planar, got a {}-dimensional position",
                    other.len()
                )))
            }
        }
    }
    Ok((xs, ys))
}

fn missing(name: &str) -> MaskError {
    MaskError::Conversion(format!("{name} received an unsupported mask"))
}

/// [`crate::traits::BoxMask`] → rectangle. Lossy: open boxes become closed.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoxToRoi;

impl Converter for BoxToRoi {
    fn name(&self) -> &'static str {
        "box_to_roi"
    }

    fn input(&self) -> Capability {
        Capability::Box
    }

    fn output(&self) -> Capability {
        Capability::RectangleRoi
    }

    fn priority(&self) -> Priority {
        Priority::Structural
    }

    fn is_lossy(&self) -> bool {
        true
    }

    fn supports(&self, value: &Convertible) -> bool {
        value
            .as_mask()
            .and_then(AnyMask::as_box)
            .is_some_and(|b| b.num_dimensions() == 2 && b.bounds().is_finite())
    }

    fn convert(&self, value: &Convertible) -> Result<Convertible> {
        let mask = source_mask(self.name(), value)?;
        let bounds = mask.as_box().ok_or_else(|| missing(self.name()))?.bounds();
        let (x, y) = (bounds.min(0)?, bounds.min(1)?);
        Ok(Roi::rectangle(x, y, bounds.extent(0)?, bounds.extent(1)?).into())
    }
}

/// Closed planar [`crate::traits::EllipsoidMask`] → oval.
#[derive(Debug, Default, Clone, Copy)]
pub struct EllipsoidToOval;

impl Converter for EllipsoidToOval {
    fn name(&self) -> &'static str {
        "ellipsoid_to_oval"
    }

    fn input(&self) -> Capability {
        Capability::Ellipsoid
    }

    fn output(&self) -> Capability {
        Capability::OvalRoi
    }

    fn priority(&self) -> Priority {
        Priority::Structural
    }

    fn supports(&self, value: &Convertible) -> bool {
        value
            .as_mask()
            .and_then(AnyMask::as_ellipsoid)
            .is_some_and(|e| {
                e.num_dimensions() == 2
                    && e.boundary_type() == BoundaryType::Closed
                    && e.bounds().is_finite()
            })
    }

    fn convert(&self, value: &Convertible) -> Result<Convertible> {
        let mask = source_mask(self.name(), value)?;
        let ellipsoid = mask.as_ellipsoid().ok_or_else(|| missing(self.name()))?;
        let center = ellipsoid.center();
        let (rx, ry) = (ellipsoid.semi_axis_length(0)?, ellipsoid.semi_axis_length(1)?);
        let (cx, cy) = (center.position(0)?, center.position(1)?);
        Ok(Roi::oval(cx - rx, cy - ry, 2.0 * rx, 2.0 * ry).into())
    }
}

/// Planar [`crate::traits::LineMask`] → line shape.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineToRoi;

impl Converter for LineToRoi {
    fn name(&self) -> &'static str {
        "line_to_roi"
    }

    fn input(&self) -> Capability {
        Capability::Line
    }

    fn output(&self) -> Capability {
        Capability::LineRoi
    }

    fn priority(&self) -> Priority {
        Priority::Structural
    }

    fn supports(&self, value: &Convertible) -> bool {
        value
            .as_mask()
            .and_then(AnyMask::as_line)
            .is_some_and(|l| l.num_dimensions() == 2)
    }

    fn convert(&self, value: &Convertible) -> Result<Convertible> {
        let mask = source_mask(self.name(), value)?;
        let line = mask.as_line().ok_or_else(|| missing(self.name()))?;
        let (one, two) = (line.endpoint_one(), line.endpoint_two());
        Ok(Roi::line(one.position(0)?, one.position(1)?, two.position(0)?, two.position(1)?).into())
    }
}

/// Planar [`crate::traits::PolylineMask`] → polyline shape.
#[derive(Debug, Default, Clone, Copy)]
pub struct PolylineToRoi;

impl Converter for PolylineToRoi {
    fn name(&self) -> &'static str {
        "polyline_to_roi"
    }

    fn input(&self) -> Capability {
        Capability::Polyline
    }

    fn output(&self) -> Capability {
        Capability::PolygonRoi
    }

    fn priority(&self) -> Priority {
        Priority::Structural
    }

    fn is_lossy(&self) -> bool {
        true
    }

    fn supports(&self, value: &Convertible) -> bool {
        value
            .as_mask()
            .and_then(AnyMask::as_polyline)
            .is_some_and(|p| p.num_dimensions() == 2)
    }

    fn convert(&self, value: &Convertible) -> Result<Convertible> {
        let mask = source_mask(self.name(), value)?;
        let polyline = mask.as_polyline().ok_or_else(|| missing(self.name()))?;
        let (xs, ys) = narrow(&polyline.vertices())?;
        Ok(Roi::polygon(PolygonKind::Polyline, xs, ys)?.into())
    }
}

/// Planar [`crate::traits::PolygonMask`] → polygon shape.
#[derive(Debug, Default, Clone, Copy)]
pub struct PolygonToRoi;

impl Converter for PolygonToRoi {
    fn name(&self) -> &'static str {
        "polygon_to_roi"
    }

    fn input(&self) -> Capability {
        Capability::Polygon
    }

    fn output(&self) -> Capability {
        Capability::PolygonRoi
    }

    fn priority(&self) -> Priority {
        Priority::Structural
    }

    fn is_lossy(&self) -> bool {
        true
    }

    fn supports(&self, value: &Convertible) -> bool {
        value
            .as_mask()
            .and_then(AnyMask::as_polygon)
            .is_some_and(|p| p.num_dimensions() == 2)
    }

    fn convert(&self, value: &Convertible) -> Result<Convertible> {
        let mask = source_mask(self.name(), value)?;
        let polygon = mask.as_polygon().ok_or_else(|| missing(self.name()))?;
        let (xs, ys) = narrow(&polygon.vertices())?;
        Ok(Roi::polygon(PolygonKind::Polygon, xs, ys)?.into())
    }
}

/// Planar [`crate::traits::PointCollectionMask`] → point set. Collections
/// with more than two dimensions have no legacy counterpart.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointCollectionToRoi;

impl Converter for PointCollectionToRoi {
    fn name(&self) -> &'static str {
        "point_collection_to_roi"
    }

    fn input(&self) -> Capability {
        Capability::PointCollection
    }

    fn output(&self) -> Capability {
        Capability::PointRoi
    }

    fn priority(&self) -> Priority {
        Priority::Structural
    }

    fn is_lossy(&self) -> bool {
        true
    }

    fn supports(&self, value: &Convertible) -> bool {
        value
            .as_mask()
            .and_then(AnyMask::as_points)
            .is_some_and(|p| p.num_dimensions() == 2)
    }

    fn convert(&self, value: &Convertible) -> Result<Convertible> {
        let mask = source_mask(self.name(), value)?;
        let points = mask.as_points().ok_or_else(|| missing(self.name()))?;
        let (xs, ys) = narrow(&points.points())?;
        Ok(Roi::points(xs, ys)?.into())
    }
}

/// Planar [`crate::shapes::PointMask`] → single-point set.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointMaskToRoi;

impl Converter for PointMaskToRoi {
    fn name(&self) -> &'static str {
        "point_mask_to_roi"
    }

    fn input(&self) -> Capability {
        Capability::Point
    }

    fn output(&self) -> Capability {
        Capability::PointRoi
    }

    fn priority(&self) -> Priority {
        Priority::Structural
    }

    fn is_lossy(&self) -> bool {
        true
    }

    fn supports(&self, value: &Convertible) -> bool {
        value
            .as_mask()
            .and_then(AnyMask::as_point)
            .is_some_and(|p| p.num_dimensions() == 2)
    }

    fn convert(&self, value: &Convertible) -> Result<Convertible> {
        let mask = source_mask(self.name(), value)?;
        let point = mask.as_point().ok_or_else(|| missing(self.name()))?;
        let (xs, ys) = narrow(&[point.position()])?;
        Ok(Roi::points(xs, ys)?.into())
    }
}

/// Every mask-to-legacy rule, in dispatch order.
pub fn standard() -> Vec<Box<dyn Converter>> {
    vec![
        Box::new(BoxToRoi),
        Box::new(EllipsoidToOval),
        Box::new(LineToRoi),
        Box::new(PolylineToRoi),
        Box::new(PolygonToRoi),
        Box::new(PointCollectionToRoi),
        Box::new(PointMaskToRoi),
    ]
}
