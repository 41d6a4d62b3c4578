use crate::{
    error::Result,
    geometry,
    traits::{LineMask, Mask},
    types::{BoundaryType, BoundingInterval, PointView, check_dimensions},
};

/// Closed straight segment in any dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    one: Vec<f64>,
    two: Vec<f64>,
}

impl LineSegment {
    pub fn new(one: Vec<f64>, two: Vec<f64>) -> Result<Self> {
        check_dimensions(one.len(), two.len())?;
        Ok(Self { one, two })
    }
}

impl Mask for LineSegment {
    fn num_dimensions(&self) -> usize {
        self.one.len()
    }

    fn test(&self, point: &[f64]) -> bool {
        geometry::segment_contains(&self.one, &self.two, point)
    }

    fn bounds(&self) -> BoundingInterval {
        BoundingInterval::from_points(self.one.len(), [&self.one, &self.two])
    }

    fn boundary_type(&self) -> BoundaryType {
        BoundaryType::Closed
    }
}

impl LineMask for LineSegment {
    fn endpoint_one(&self) -> PointView {
        PointView::new(self.one.clone())
    }

    fn endpoint_two(&self) -> PointView {
        PointView::new(self.two.clone())
    }
}
