//! Structural converters from legacy shapes to live wrappers.
//!
//! None of these copy geometry; the produced mask reads through to the
//! source shape.

use roi::{PolygonKind, RoiGeometry, RoiHandle};

use crate::{
    convert::{Capability, Convertible, Priority},
    error::{MaskError, Result},
    traits::Converter,
    wrappers::{
        LineWrapper, OvalWrapper, PointWrapper, PolygonWrapper, PolylineWrapper,
        RectangleWrapper,
    },
};

fn source_roi<'a>(name: &str, value: &'a Convertible) -> Result<&'a RoiHandle> {
    value
        .as_roi()
        .ok_or_else(|| MaskError::Conversion(format!("{name} expects a legacy shape")))
}

fn roi_matches(value: &Convertible, guard: impl FnOnce(&roi::Roi) -> bool) -> bool {
    value.as_roi().is_some_and(|handle| guard(&handle.borrow()))
}

/// Rectangle → [`crate::traits::BoxMask`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RoiToBox;

impl Converter for RoiToBox {
    fn name(&self) -> &'static str {
        "roi_to_box"
    }

    fn input(&self) -> Capability {
        Capability::RectangleRoi
    }

    fn output(&self) -> Capability {
        Capability::Box
    }

    fn priority(&self) -> Priority {
        Priority::Structural
    }

    fn supports(&self, value: &Convertible) -> bool {
        roi_matches(value, RectangleWrapper::supports)
    }

    fn convert(&self, value: &Convertible) -> Result<Convertible> {
        let roi = source_roi(self.name(), value)?;
        Ok(RectangleWrapper::new(roi.clone())?.into())
    }
}

/// Oval → [`crate::traits::EllipsoidMask`].
#[derive(Debug, Default, Clone, Copy)]
pub struct OvalToEllipsoid;

impl Converter for OvalToEllipsoid {
    fn name(&self) -> &'static str {
        "oval_to_ellipsoid"
    }

    fn input(&self) -> Capability {
        Capability::OvalRoi
    }

    fn output(&self) -> Capability {
        Capability::Ellipsoid
    }

    fn priority(&self) -> Priority {
        Priority::Structural
    }

    fn supports(&self, value: &Convertible) -> bool {
        roi_matches(value, |roi| matches!(roi.geometry(), RoiGeometry::Oval(_)))
    }

    fn convert(&self, value: &Convertible) -> Result<Convertible> {
        let roi = source_roi(self.name(), value)?;
        Ok(OvalWrapper::new(roi.clone())?.into())
    }
}

/// Line shape → [`crate::traits::LineMask`], for lines at most one pixel wide.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoiToLine;

impl Converter for RoiToLine {
    fn name(&self) -> &'static str {
        "roi_to_line"
    }

    fn input(&self) -> Capability {
        Capability::LineRoi
    }

    fn output(&self) -> Capability {
        Capability::Line
    }

    fn priority(&self) -> Priority {
        Priority::Structural
    }

    fn supports(&self, value: &Convertible) -> bool {
        roi_matches(value, LineWrapper::supports)
    }

    fn convert(&self, value: &Convertible) -> Result<Convertible> {
        let roi = source_roi(self.name(), value)?;
        Ok(LineWrapper::new(roi.clone())?.into())
    }
}

/// Open vertex-array shape → [`crate::traits::PolylineMask`].
///
/// Plain polylines become modifiable wrappers and angles read-only ones.
/// Freehand lines, stroked lines and spline-fitted lines are not converted.
#[derive(Debug, Default, Clone, Copy)]
pub struct PolylineRoiToPolyline;

impl Converter for PolylineRoiToPolyline {
    fn name(&self) -> &'static str {
        "polyline_roi_to_polyline"
    }

    fn input(&self) -> Capability {
        Capability::PolygonRoi
    }

    fn output(&self) -> Capability {
        Capability::Polyline
    }

    fn priority(&self) -> Priority {
        Priority::Structural
    }

    fn supports(&self, value: &Convertible) -> bool {
        roi_matches(value, |roi| match roi.geometry() {
            RoiGeometry::Polygon(p) => {
                matches!(p.kind(), PolygonKind::Polyline | PolygonKind::Angle)
                    && roi.stroke_width() == 0.0
                    && !p.is_spline_fit()
            }
            _ => false,
        })
    }

    fn convert(&self, value: &Convertible) -> Result<Convertible> {
        let roi = source_roi(self.name(), value)?;
        let kind = match roi.borrow().geometry() {
            RoiGeometry::Polygon(p) => p.kind(),
            _ => return Err(MaskError::Conversion("not a vertex-array shape".into())),
        };
        let wrapper = match kind {
            PolygonKind::Polyline => PolylineWrapper::new(roi.clone())?,
            _ => PolylineWrapper::read_only(roi.clone())?,
        };
        Ok(wrapper.into())
    }
}

/// Closed vertex-array shape → [`crate::traits::PolygonMask`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PolygonRoiToPolygon;

impl Converter for PolygonRoiToPolygon {
    fn name(&self) -> &'static str {
        "polygon_roi_to_polygon"
    }

    fn input(&self) -> Capability {
        Capability::PolygonRoi
    }

    fn output(&self) -> Capability {
        Capability::Polygon
    }

    fn priority(&self) -> Priority {
        Priority::Structural
    }

    fn supports(&self, value: &Convertible) -> bool {
        roi_matches(value, PolygonWrapper::supports)
    }

    fn convert(&self, value: &Convertible) -> Result<Convertible> {
        let roi = source_roi(self.name(), value)?;
        Ok(PolygonWrapper::new(roi.clone())?.into())
    }
}

/// Point set → [`crate::traits::PointCollectionMask`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PointRoiToPointCollection;

impl Converter for PointRoiToPointCollection {
    fn name(&self) -> &'static str {
        "point_roi_to_point_collection"
    }

    fn input(&self) -> Capability {
        Capability::PointRoi
    }

    fn output(&self) -> Capability {
        Capability::PointCollection
    }

    fn priority(&self) -> Priority {
        Priority::Structural
    }

    fn supports(&self, value: &Convertible) -> bool {
        roi_matches(value, |roi| matches!(roi.geometry(), RoiGeometry::Point(_)))
    }

    fn convert(&self, value: &Convertible) -> Result<Convertible> {
        let roi = source_roi(self.name(), value)?;
        Ok(PointWrapper::new(roi.clone())?.into())
    }
}

/// Every legacy-to-mask rule, in dispatch order.
pub fn standard() -> Vec<Box<dyn Converter>> {
    vec![
        Box::new(RoiToBox),
        Box::new(OvalToEllipsoid),
        Box::new(RoiToLine),
        Box::new(PolylineRoiToPolyline),
        Box::new(PolygonRoiToPolygon),
        Box::new(PointRoiToPointCollection),
    ]
}
