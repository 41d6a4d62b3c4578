use crate::{
    error::{MaskError, Result},
    geometry,
    traits::{EllipsoidMask, Mask},
    types::{BoundaryType, BoundingInterval, PointView, check_dimensions},
};

/// Axis-aligned ellipsoid given by its center and semi-axis lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipsoid {
    center: Vec<f64>,
    semi_axes: Vec<f64>,
    boundary: BoundaryType,
}

impl Ellipsoid {
    pub fn closed(center: Vec<f64>, semi_axes: Vec<f64>) -> Result<Self> {
        Self::with_boundary(center, semi_axes, BoundaryType::Closed)
    }

    pub fn open(center: Vec<f64>, semi_axes: Vec<f64>) -> Result<Self> {
        Self::with_boundary(center, semi_axes, BoundaryType::Open)
    }

    /// Closed sphere: every semi-axis equals `radius`.
    pub fn sphere(center: Vec<f64>, radius: f64) -> Result<Self> {
        let semi_axes = vec![radius; center.len()];
        Self::closed(center, semi_axes)
    }

    fn with_boundary(center: Vec<f64>, semi_axes: Vec<f64>, boundary: BoundaryType) -> Result<Self> {
        check_dimensions(center.len(), semi_axes.len())?;
        if semi_axes.iter().any(|r| r.is_nan() || *r <= 0.0) {
            return Err(MaskError::MalformedShape(
                "semi-axis lengths must be positive".into(),
            ));
        }
        Ok(Self {
            center,
            semi_axes,
            boundary,
        })
    }
}

impl Mask for Ellipsoid {
    fn num_dimensions(&self) -> usize {
        self.center.len()
    }

    fn test(&self, point: &[f64]) -> bool {
        geometry::ellipsoid_contains(&self.center, &self.semi_axes, point, self.boundary)
    }

    fn bounds(&self) -> BoundingInterval {
        let lo: Vec<f64> = self.center.iter().zip(&self.semi_axes).map(|(c, r)| c - r).collect();
        let hi: Vec<f64> = self.center.iter().zip(&self.semi_axes).map(|(c, r)| c + r).collect();
        BoundingInterval::from_points(self.center.len(), [lo, hi])
    }

    fn boundary_type(&self) -> BoundaryType {
        self.boundary
    }
}

impl EllipsoidMask for Ellipsoid {
    fn center(&self) -> PointView {
        PointView::new(self.center.clone())
    }

    fn semi_axis_length(&self, d: usize) -> Result<f64> {
        self.semi_axes
            .get(d)
            .copied()
            .ok_or(MaskError::InvalidDimension {
                dimension: d,
                num_dimensions: self.semi_axes.len(),
            })
    }

    fn set_center(&mut self, _position: &[f64]) -> Result<()> {
        Err(MaskError::unsupported("set_center"))
    }

    fn set_semi_axis_length(&mut self, _d: usize, _length: f64) -> Result<()> {
        Err(MaskError::unsupported("set_semi_axis_length"))
    }
}
