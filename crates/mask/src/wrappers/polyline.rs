use std::cell::Ref;

use roi::{PolygonKind, PolygonShape, Roi, RoiGeometry, RoiHandle};

use crate::{
    error::{MaskError, Result},
    geometry,
    traits::{Mask, PolylineMask, VertexMask},
    types::{BoundaryType, BoundingInterval, PointView},
    wrappers::{delete_through_display, wrong_kind},
};

/// [`PolylineMask`] over an open vertex-array shape.
///
/// Plain polylines honour vertex removal through their display. Freehand
/// lines and angles are wrapped read-only.
#[derive(Debug, Clone)]
pub struct PolylineWrapper {
    roi: RoiHandle,
    modifiable: bool,
}

impl PolylineWrapper {
    /// Wrap a plain polyline with zero stroke width that is not spline fitted.
    pub fn new(roi: RoiHandle) -> Result<Self> {
        Self::check(&roi.borrow())?;
        Ok(Self {
            roi,
            modifiable: true,
        })
    }

    /// Wrap any open vertex-array shape without allowing structural edits.
    pub fn read_only(roi: RoiHandle) -> Result<Self> {
        open_kind(&roi.borrow())?;
        Ok(Self {
            roi,
            modifiable: false,
        })
    }

    pub fn check(roi: &Roi) -> Result<()> {
        let kind = open_kind(roi)?;
        if kind != PolygonKind::Polyline {
            return Err(MaskError::MalformedShape(format!(
                "{kind} shapes can only be wrapped read-only"
            )));
        }
        if roi.stroke_width() != 0.0 {
            return Err(MaskError::MalformedShape(format!(
                "polyline has stroke width {}",
                roi.stroke_width()
            )));
        }
        if roi.is_spline_fit() {
            return Err(MaskError::MalformedShape("polyline is spline fitted".into()));
        }
        Ok(())
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

fn open_kind(roi: &Roi) -> Result<PolygonKind> {
    match roi.geometry() {
        RoiGeometry::Polygon(p) if !p.kind().is_closed() => Ok(p.kind()),
        _ => Err(wrong_kind("an open vertex-array", roi)),
    }
}

pub(crate) fn polygon_shape(roi: &RoiHandle) -> Ref<'_, PolygonShape> {
    Ref::map(roi.borrow(), |roi| match roi.geometry() {
        RoiGeometry::Polygon(p) => p,
        _ => unreachable!("vertex wrapper over a non-vertex shape"),
    })
}

pub(crate) fn vertex_of(shape: &PolygonShape, index: usize) -> Result<PointView> {
    shape
        .vertex(index)
        .map(PointView::from)
        .ok_or(MaskError::InvalidIndex {
            index,
            len: shape.len(),
        })
}

impl Mask for PolylineWrapper {
    fn num_dimensions(&self) -> usize {
        2
    }

    fn test(&self, point: &[f64]) -> bool {
        if !self.bounds().contains(point) {
            return false;
        }
        let vertices: Vec<[f64; 2]> = self.shape().vertices().collect();
        geometry::polyline_contains(&vertices, point)
    }

    fn bounds(&self) -> BoundingInterval {
        BoundingInterval::from_points(2, self.shape().vertices())
    }

    fn boundary_type(&self) -> BoundaryType {
        BoundaryType::Closed
    }

    fn wrapped_roi(&self) -> Option<&RoiHandle> {
        Some(&self.roi)
    }
}

impl VertexMask for PolylineWrapper {
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

impl PolylineMask for PolylineWrapper {}
