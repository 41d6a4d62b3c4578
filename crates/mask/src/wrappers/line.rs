use std::cell::Ref;

use roi::{LineShape, Roi, RoiGeometry, RoiHandle};

use crate::{
    error::{MaskError, Result},
    geometry,
    traits::{LineMask, Mask},
    types::{BoundaryType, BoundingInterval, PointView, check_dimensions},
    wrappers::wrong_kind,
};

/// [`LineMask`] over a straight line shape.
///
/// Endpoints are returned as read-only [`PointView`]s; moving an endpoint
/// through the mask is not possible.
#[derive(Debug, Clone)]
pub struct LineWrapper {
    roi: RoiHandle,
}

impl LineWrapper {
    pub fn new(roi: RoiHandle) -> Result<Self> {
        Self::check(&roi.borrow())?;
        Ok(Self { roi })
    }

    /// Wrap a fresh line shape from `(x1, y1)` to `(x2, y2)`.
    pub fn from_endpoints(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            roi: Roi::line(x1, y1, x2, y2).into_handle(),
        }
    }

    /// Wrap a fresh line shape between two planar positions.
    pub fn from_points(one: &[f64], two: &[f64]) -> Result<Self> {
        check_dimensions(2, one.len())?;
        check_dimensions(2, two.len())?;
        Ok(Self::from_endpoints(one[0], one[1], two[0], two[1]))
    }

    /// Lines wider than one pixel describe an area, not a segment.
    pub fn check(roi: &Roi) -> Result<()> {
        if !matches!(roi.geometry(), RoiGeometry::Line(_)) {
            return Err(wrong_kind("a line", roi));
        }
        if roi.stroke_width() > 1.0 {
            return Err(MaskError::MalformedShape(format!(
                "line stroke width {} exceeds one pixel",
                roi.stroke_width()
            )));
        }
        Ok(())
    }

    pub fn supports(roi: &Roi) -> bool {
        Self::check(roi).is_ok()
    }

    pub fn roi(&self) -> &RoiHandle {
        &self.roi
    }

    fn shape(&self) -> Ref<'_, LineShape> {
        Ref::map(self.roi.borrow(), |roi| match roi.geometry() {
            RoiGeometry::Line(line) => line,
            _ => unreachable!("line wrapper over a non-line shape"),
        })
    }
}

impl Mask for LineWrapper {
    fn num_dimensions(&self) -> usize {
        2
    }

    fn test(&self, point: &[f64]) -> bool {
        let line = self.shape();
        geometry::segment_contains(&line.start(), &line.end(), point)
    }

    fn bounds(&self) -> BoundingInterval {
        let line = self.shape();
        BoundingInterval::from_points(2, [line.start(), line.end()])
    }

    fn boundary_type(&self) -> BoundaryType {
        BoundaryType::Closed
    }

    fn wrapped_roi(&self) -> Option<&RoiHandle> {
        Some(&self.roi)
    }
}

impl LineMask for LineWrapper {
    fn endpoint_one(&self) -> PointView {
        PointView::from(self.shape().start())
    }

    fn endpoint_two(&self) -> PointView {
        PointView::from(self.shape().end())
    }
}
