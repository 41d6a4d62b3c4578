use std::cell::Ref;

use roi::{PolygonKind, PolygonShape, Roi, RoiGeometry, RoiHandle};

use crate::{
    error::{MaskError, Result},
    geometry,
    traits::{Mask, PolygonMask, VertexMask},
    types::{BoundingInterval, PointView},
    wrappers::{
        delete_through_display,
        polyline::{polygon_shape, vertex_of},
        wrong_kind,
    },
};

/// [`PolygonMask`] over a closed vertex-array shape.
///
/// Containment is boundary inclusive. Plain polygons honour vertex removal
/// through their display; freehand and traced outlines are read-only.
#[derive(Debug, Clone)]
pub struct PolygonWrapper {
    roi: RoiHandle,
    modifiable: bool,
}

impl PolygonWrapper {
    pub fn new(roi: RoiHandle) -> Result<Self> {
        let kind = Self::check(&roi.borrow())?;
        Ok(Self {
            roi,
            modifiable: kind == PolygonKind::Polygon,
        })
    }

    /// Closed kind, not spline fitted. Returns the kind on success.
    pub fn check(roi: &Roi) -> Result<PolygonKind> {
        let kind = match roi.geometry() {
            RoiGeometry::Polygon(p) if p.kind().is_closed() => p.kind(),
            _ => return Err(wrong_kind("a closed vertex-array", roi)),
        };
        if roi.is_spline_fit() {
            return Err(MaskError::MalformedShape("polygon is spline fitted".into()));
        }
        Ok(kind)
    }

    pub fn supports(roi: &Roi) -> bool {
        Self::check(roi).is_ok()
    }

    pub fn is_modifiable(&self) -> bool {
        self.modifiable
    }

    pub fn roi(&self) -> &RoiHandle {
        &self.roi
    }

    fn shape(&self) -> Ref<'_, PolygonShape> {
        polygon_shape(&self.roi)
    }
}

impl Mask for PolygonWrapper {
    fn num_dimensions(&self) -> usize {
        2
    }

    fn test(&self, point: &[f64]) -> bool {
        if !self.bounds().contains(point) {
            return false;
        }
        let vertices: Vec<[f64; 2]> = self.shape().vertices().collect();
        geometry::polygon_contains(&vertices, point)
    }

    fn bounds(&self) -> BoundingInterval {
        BoundingInterval::from_points(2, self.shape().vertices())
    }

    fn wrapped_roi(&self) -> Option<&RoiHandle> {
        Some(&self.roi)
    }
}

impl VertexMask for PolygonWrapper {
    fn num_vertices(&self) -> usize {
        self.shape().len()
    }

    fn vertex(&self, index: usize) -> Result<PointView> {
        vertex_of(&self.shape(), index)
    }

    fn add_vertex(&mut self, _index: usize, _position: &[f64]) -> Result<()> {
        Err(MaskError::unsupported("add_vertex"))
    }

    fn remove_vertex(&mut self, index: usize) -> Result<()> {
        if !self.modifiable {
            return Err(MaskError::unsupported("remove_vertex"));
        }
        delete_through_display(&self.roi, index, "remove_vertex")
    }
}

impl PolygonMask for PolygonWrapper {}
