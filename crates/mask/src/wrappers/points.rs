use std::cell::Ref;

use roi::{PointShape, Roi, RoiGeometry, RoiHandle};

use crate::{
    error::{MaskError, Result},
    traits::{Mask, PointCollectionMask},
    types::{BoundaryType, BoundingInterval, PointView},
    wrappers::{delete_through_display, planar, wrong_kind},
};

/// [`PointCollectionMask`] over a point-set shape.
///
/// A position is contained only if it equals a stored point exactly.
#[derive(Debug, Clone)]
pub struct PointWrapper {
    roi: RoiHandle,
}

impl PointWrapper {
    pub fn new(roi: RoiHandle) -> Result<Self> {
        Self::check(&roi.borrow())?;
        Ok(Self { roi })
    }

    pub fn check(roi: &Roi) -> Result<()> {
        match roi.geometry() {
            RoiGeometry::Point(_) => Ok(()),
            _ => Err(wrong_kind("a point set", roi)),
        }
    }

    pub fn roi(&self) -> &RoiHandle {
        &self.roi
    }

    fn shape(&self) -> Ref<'_, PointShape> {
        Ref::map(self.roi.borrow(), |roi| match roi.geometry() {
            RoiGeometry::Point(points) => points,
            _ => unreachable!("point wrapper over a non-point shape"),
        })
    }
}

impl Mask for PointWrapper {
    fn num_dimensions(&self) -> usize {
        2
    }

    fn test(&self, point: &[f64]) -> bool {
        point.len() >= 2 && self.shape().points().any(|p| p[..] == point[..2])
    }

    fn bounds(&self) -> BoundingInterval {
        BoundingInterval::from_points(2, self.shape().points())
    }

    fn boundary_type(&self) -> BoundaryType {
        BoundaryType::Closed
    }

    fn wrapped_roi(&self) -> Option<&RoiHandle> {
        Some(&self.roi)
    }
}

impl PointCollectionMask for PointWrapper {
    fn points(&self) -> Vec<PointView> {
        self.shape().points().map(PointView::from).collect()
    }

    fn size(&self) -> usize {
        self.shape().len()
    }

    /// Append a point. Coordinates are stored in single precision.
    fn add_point(&mut self, position: &[f64]) -> Result<()> {
        let [x, y] = planar(position)?;
        self.roi.borrow_mut().add_point(x as f32, y as f32)?;
        Ok(())
    }

    fn remove_point(&mut self, position: &[f64]) -> Result<()> {
        if !self.roi.borrow().is_attached() {
            return Err(MaskError::unsupported("remove_point"));
        }
        let target = planar(position)?;
        let found = self.shape().points().position(|p| p == target);
        match found {
            Some(index) => delete_through_display(&self.roi, index, "remove_point"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use roi::Canvas;

    use super::*;

    fn points_roi() -> Roi {
        Roi::points(vec![12.125, 17.0, 1.0], vec![-4.0, 6.5, 30.0])
            .expect("Parallel arrays should build")
    }

    #[test]
    fn test_exact_membership_and_bounds() {
        let wrap = PointWrapper::new(points_roi().into_handle()).expect("Point set");

        assert!(wrap.test(&[12.125, -4.0]));
        assert!(!wrap.test(&[8.0, 15.5]));
        assert!(!wrap.test(&[12.125]));
        assert_eq!(wrap.bounds().mins(), &[1.0, -4.0]);
        assert_eq!(wrap.bounds().maxs(), &[17.0, 30.0]);
        assert_eq!(wrap.size(), 3);
    }

    #[test]
    fn test_add_point_extends_bounds() {
        let mut wrap = PointWrapper::new(points_roi().into_handle()).expect("Point set");
        wrap.add_point(&[8.0, 100.25]).expect("Planar point");

        assert_eq!(wrap.size(), 4);
        assert!(wrap.test(&[8.0, 100.25]));
        assert_eq!(wrap.real_max(1).expect("y exists"), 100.25);
        assert_eq!(wrap.roi().borrow().coordinate_count(), 4);
    }

    #[test]
    fn test_remove_point_needs_display() {
        let mut wrap = PointWrapper::new(points_roi().into_handle()).expect("Point set");
        assert!(matches!(
            wrap.remove_point(&[17.0, 6.5]),
            Err(MaskError::UnsupportedMutation { .. })
        ));
        assert_eq!(wrap.size(), 3);
    }

    #[test]
    fn test_remove_point_through_display() {
        let canvas = Rc::new(Canvas::new("blobs"));
        let mut roi = points_roi();
        roi.attach(canvas.clone());
        let mut wrap = PointWrapper::new(roi.into_handle()).expect("Point set");

        wrap.remove_point(&[1.0, 30.0]).expect("Attached point set");
        assert_eq!(wrap.size(), 2);
        assert!(!wrap.test(&[1.0, 30.0]));
        assert_eq!(wrap.real_max(1).expect("y exists"), 6.5);

        wrap.remove_point(&[5.0, 5.0]).expect("Missing points are ignored");
        assert_eq!(wrap.size(), 2);
        assert_eq!(canvas.edits().len(), 1);
    }
}
