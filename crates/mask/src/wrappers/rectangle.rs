use std::cell::Ref;

use roi::{RectangleShape, Roi, RoiGeometry, RoiHandle};

use crate::{
    error::{MaskError, Result},
    geometry,
    traits::{BoxMask, Mask},
    types::{BoundaryType, BoundingInterval, PointView},
    wrappers::{planar, wrong_kind},
};

/// Closed [`BoxMask`] over a square-cornered rectangle.
///
/// Text and bitmap overlays report a rectangle type but are not wrapped.
#[derive(Debug, Clone)]
pub struct RectangleWrapper {
    roi: RoiHandle,
}

impl RectangleWrapper {
    pub fn new(roi: RoiHandle) -> Result<Self> {
        Self::check(&roi.borrow())?;
        Ok(Self { roi })
    }

    pub fn check(roi: &Roi) -> Result<()> {
        match roi.geometry() {
            RoiGeometry::Rectangle(r) if r.corner_diameter == 0 => Ok(()),
            RoiGeometry::Rectangle(r) => Err(MaskError::MalformedShape(format!(
                "rectangle has rounded corners (diameter {})",
                r.corner_diameter
            ))),
            _ => Err(wrong_kind("a plain rectangle", roi)),
        }
    }

    pub fn supports(roi: &Roi) -> bool {
        Self::check(roi).is_ok()
    }

    pub fn roi(&self) -> &RoiHandle {
        &self.roi
    }

    fn shape(&self) -> Ref<'_, RectangleShape> {
        Ref::map(self.roi.borrow(), |roi| match roi.geometry() {
            RoiGeometry::Rectangle(rect) => rect,
            _ => unreachable!("rectangle wrapper over a non-rectangle shape"),
        })
    }
}

impl Mask for RectangleWrapper {
    fn num_dimensions(&self) -> usize {
        2
    }

    fn test(&self, point: &[f64]) -> bool {
        let bounds = self.bounds();
        geometry::interval_contains(bounds.mins(), bounds.maxs(), point, BoundaryType::Closed)
    }

    fn bounds(&self) -> BoundingInterval {
        let r = self.shape();
        BoundingInterval::from_points(2, [[r.x, r.y], [r.x + r.width, r.y + r.height]])
    }

    fn boundary_type(&self) -> BoundaryType {
        BoundaryType::Closed
    }

    fn wrapped_roi(&self) -> Option<&RoiHandle> {
        Some(&self.roi)
    }
}

impl BoxMask for RectangleWrapper {
    fn center(&self) -> PointView {
        let r = self.shape();
        PointView::from([r.x + r.width / 2.0, r.y + r.height / 2.0])
    }

    fn side_length(&self, d: usize) -> Result<f64> {
        self.bounds().extent(d)
    }

    fn set_center(&mut self, position: &[f64]) -> Result<()> {
        let [cx, cy] = planar(position)?;
        let [x0, y0] = planar(self.center().as_slice())?;
        self.roi.borrow_mut().translate(cx - x0, cy - y0);
        Ok(())
    }

    fn set_side_length(&mut self, _d: usize, _length: f64) -> Result<()> {
        Err(MaskError::unsupported("set_side_length"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_interval() {
        let rect = RectangleWrapper::new(Roi::rectangle(1.0, 2.0, 10.0, 4.0).into_handle())
            .expect("Plain rectangle");

        assert!(rect.test(&[1.0, 2.0]));
        assert!(rect.test(&[11.0, 6.0]));
        assert!(!rect.test(&[11.5, 6.0]));
        assert_eq!(rect.side_length(0).expect("x exists"), 10.0);
        assert_eq!(rect.center().as_slice(), &[6.0, 4.0]);
    }

    #[test]
    fn test_set_center_translates() {
        let mut rect = RectangleWrapper::new(Roi::rectangle(0.0, 0.0, 4.0, 2.0).into_handle())
            .expect("Plain rectangle");
        rect.set_center(&[10.0, 10.0]).expect("Planar center");

        assert_eq!(rect.bounds().mins(), &[8.0, 9.0]);
        assert_eq!(rect.roi().borrow().bounds().x, 8.0);
        assert!(rect.set_side_length(0, 3.0).is_err());
    }

    #[test]
    fn test_guard() {
        assert!(!RectangleWrapper::supports(&Roi::rounded_rectangle(0.0, 0.0, 5.0, 5.0, 2)));
        assert!(!RectangleWrapper::supports(&Roi::text(0.0, 0.0, 5.0, 5.0, "label")));
        assert!(RectangleWrapper::supports(&Roi::rectangle(0.0, 0.0, 5.0, 5.0)));
    }
}
