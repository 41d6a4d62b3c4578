use crate::{
    error::{MaskError, Result},
    geometry,
    traits::{BoxMask, Mask},
    types::{BoundaryType, BoundingInterval, PointView, check_dimensions},
};

/// Axis-aligned box between `min` and `max`.
#[derive(Debug, Clone, PartialEq)]
pub struct RealBox {
    min: Vec<f64>,
    max: Vec<f64>,
    boundary: BoundaryType,
}

impl RealBox {
    pub fn closed(min: Vec<f64>, max: Vec<f64>) -> Result<Self> {
        Self::with_boundary(min, max, BoundaryType::Closed)
    }

    pub fn open(min: Vec<f64>, max: Vec<f64>) -> Result<Self> {
        Self::with_boundary(min, max, BoundaryType::Open)
    }

    fn with_boundary(min: Vec<f64>, max: Vec<f64>, boundary: BoundaryType) -> Result<Self> {
        check_dimensions(min.len(), max.len())?;
        if let Some(d) = (0..min.len()).find(|&d| min[d] > max[d]) {
            return Err(MaskError::MalformedShape(format!(
                "box min exceeds max along dimension {d}"
            )));
        }
        Ok(Self { min, max, boundary })
    }
}

impl Mask for RealBox {
    fn num_dimensions(&self) -> usize {
        self.min.len()
    }

    fn test(&self, point: &[f64]) -> bool {
        geometry::interval_contains(&self.min, &self.max, point, self.boundary)
    }

    fn bounds(&self) -> BoundingInterval {
        BoundingInterval::from_points(self.min.len(), [&self.min, &self.max])
    }

    fn boundary_type(&self) -> BoundaryType {
        self.boundary
    }
}

impl BoxMask for RealBox {
    fn center(&self) -> PointView {
        PointView::new(
            self.min
                .iter()
                .zip(&self.max)
                .map(|(lo, hi)| (lo + hi) / 2.0)
                .collect::<Vec<_>>(),
        )
    }

    fn side_length(&self, d: usize) -> Result<f64> {
        self.bounds().extent(d)
    }

    fn set_center(&mut self, _position: &[f64]) -> Result<()> {
        Err(MaskError::unsupported("set_center"))
    }

    fn set_side_length(&mut self, _d: usize, _length: f64) -> Result<()> {
        Err(MaskError::unsupported("set_side_length"))
    }
}
