use std::cell::Ref;

use roi::{OvalShape, Roi, RoiGeometry, RoiHandle};

use crate::{
    error::{MaskError, Result},
    geometry,
    traits::{EllipsoidMask, Mask},
    types::{BoundaryType, BoundingInterval, PointView},
    wrappers::{planar, wrong_kind},
};

/// Closed [`EllipsoidMask`] over an oval shape.
#[derive(Debug, Clone)]
pub struct OvalWrapper {
    roi: RoiHandle,
}

impl OvalWrapper {
    pub fn new(roi: RoiHandle) -> Result<Self> {
        Self::check(&roi.borrow())?;
        Ok(Self { roi })
    }

    pub fn check(roi: &Roi) -> Result<()> {
        match roi.geometry() {
            RoiGeometry::Oval(_) => Ok(()),
            _ => Err(wrong_kind("an oval", roi)),
        }
    }

    pub fn roi(&self) -> &RoiHandle {
        &self.roi
    }

    fn shape(&self) -> Ref<'_, OvalShape> {
        Ref::map(self.roi.borrow(), |roi| match roi.geometry() {
            RoiGeometry::Oval(oval) => oval,
            _ => unreachable!("oval wrapper over a non-oval shape"),
        })
    }
}

impl Mask for OvalWrapper {
    fn num_dimensions(&self) -> usize {
        2
    }

    fn test(&self, point: &[f64]) -> bool {
        let oval = self.shape();
        geometry::ellipsoid_contains(&oval.center(), &oval.semi_axes(), point, BoundaryType::Closed)
    }

    fn bounds(&self) -> BoundingInterval {
        let oval = self.shape();
        BoundingInterval::from_points(
            2,
            [[oval.x, oval.y], [oval.x + oval.width, oval.y + oval.height]],
        )
    }

    fn boundary_type(&self) -> BoundaryType {
        BoundaryType::Closed
    }

    fn wrapped_roi(&self) -> Option<&RoiHandle> {
        Some(&self.roi)
    }
}

impl EllipsoidMask for OvalWrapper {
    fn center(&self) -> PointView {
        PointView::from(self.shape().center())
    }

    fn semi_axis_length(&self, d: usize) -> Result<f64> {
        self.shape()
            .semi_axes()
            .get(d)
            .copied()
            .ok_or(MaskError::InvalidDimension {
                dimension: d,
                num_dimensions: 2,
            })
    }

    /// Move the oval, keeping its extent.
    fn set_center(&mut self, position: &[f64]) -> Result<()> {
        let [cx, cy] = planar(position)?;
        let [rx, ry] = self.shape().semi_axes();
        self.roi.borrow_mut().set_location(cx - rx, cy - ry);
        Ok(())
    }

    /// Oval extents are only editable interactively.
    fn set_semi_axis_length(&mut self, _d: usize, _length: f64) -> Result<()> {
        Err(MaskError::unsupported("set_semi_axis_length"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrapper() -> OvalWrapper {
        OvalWrapper::new(Roi::oval(10.0, 22.0, 7.0, 4.0).into_handle()).expect("Oval shape")
    }

    #[test]
    fn test_geometry() {
        let oval = wrapper();

        assert_eq!(oval.center().as_slice(), &[13.5, 24.0]);
        assert_eq!(oval.semi_axis_length(0).expect("x axis"), 3.5);
        assert_eq!(oval.semi_axis_length(1).expect("y axis"), 2.0);
        assert!(oval.semi_axis_length(2).is_err());
    }

    #[test]
    fn test_containment() {
        let oval = wrapper();

        assert!(oval.test(&[12.125, 23.0]));
        assert!(oval.test(&[17.0, 24.0]));
        assert!(!oval.test(&[101.0, 41.125]));
    }

    #[test]
    fn test_set_center_moves_backing_shape() {
        let mut oval = wrapper();
        oval.set_center(&[100.0, 40.5]).expect("Planar center");

        let bounds = oval.bounds();
        assert_eq!(bounds.mins(), &[96.5, 38.5]);
        assert_eq!(bounds.maxs(), &[103.5, 42.5]);
        assert!(oval.test(&[100.0, 42.5]));
        assert!(oval.test(&[101.0, 41.125]));
        assert!(!oval.test(&[12.125, 23.0]));
        assert_eq!(oval.roi().borrow().bounds().x, 96.5);
    }

    #[test]
    fn test_semi_axes_are_fixed() {
        let mut oval = wrapper();
        assert!(matches!(
            oval.set_semi_axis_length(0, 2.0),
            Err(MaskError::UnsupportedMutation { .. })
        ));
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(OvalWrapper::new(Roi::rectangle(0.0, 0.0, 1.0, 1.0).into_handle()).is_err());
    }
}
