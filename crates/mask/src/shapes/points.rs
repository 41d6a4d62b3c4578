use crate::{
    error::{MaskError, Result},
    shapes::common_dimensions,
    traits::{Mask, PointCollectionMask},
    types::{BoundaryType, BoundingInterval, PointView},
};

/// Finite point set. Membership is exact coordinate equality.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCollection {
    points: Vec<Vec<f64>>,
    num_dimensions: usize,
}

impl PointCollection {
    pub fn new(points: Vec<Vec<f64>>) -> Result<Self> {
        let num_dimensions = common_dimensions("point collection", &points)?;
        Ok(Self {
            points,
            num_dimensions,
        })
    }
}

impl Mask for PointCollection {
    fn num_dimensions(&self) -> usize {
        self.num_dimensions
    }

    fn test(&self, point: &[f64]) -> bool {
        point.len() >= self.num_dimensions
            && self
                .points
                .iter()
                .any(|p| p.as_slice() == &point[..self.num_dimensions])
    }

    fn bounds(&self) -> BoundingInterval {
        BoundingInterval::from_points(self.num_dimensions, &self.points)
    }

    fn boundary_type(&self) -> BoundaryType {
        BoundaryType::Closed
    }
}

impl PointCollectionMask for PointCollection {
    fn points(&self) -> Vec<PointView> {
        self.points.iter().map(|p| PointView::new(p.clone())).collect()
    }

    fn add_point(&mut self, _position: &[f64]) -> Result<()> {
        Err(MaskError::unsupported("add_point"))
    }

    fn remove_point(&mut self, _position: &[f64]) -> Result<()> {
        Err(MaskError::unsupported("remove_point"))
    }
}

/// A single position.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMask {
    position: Vec<f64>,
}

impl PointMask {
    pub fn new(position: Vec<f64>) -> Self {
        Self { position }
    }

    pub fn position(&self) -> PointView {
        PointView::new(self.position.clone())
    }
}

impl Mask for PointMask {
    fn num_dimensions(&self) -> usize {
        self.position.len()
    }

    fn test(&self, point: &[f64]) -> bool {
        point.len() >= self.position.len() && self.position.as_slice() == &point[..self.position.len()]
    }

    fn bounds(&self) -> BoundingInterval {
        BoundingInterval::from_points(self.position.len(), [&self.position])
    }

    fn boundary_type(&self) -> BoundaryType {
        BoundaryType::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_membership() {
        let points = PointCollection::new(vec![vec![12.125, -4.0], vec![17.0, 6.5]])
            .expect("Valid collection");

        assert!(points.test(&[12.125, -4.0]));
        assert!(!points.test(&[12.125, -4.000001]));
        assert_eq!(points.size(), 2);
    }

    #[test]
    fn test_point_mask_bounds() {
        let p = PointMask::new(vec![140.25, -0.5]);
        assert_eq!(p.bounds().mins(), &[140.25, -0.5]);
        assert_eq!(p.bounds().maxs(), &[140.25, -0.5]);
        assert!(p.test(&[140.25, -0.5]));
    }
}
