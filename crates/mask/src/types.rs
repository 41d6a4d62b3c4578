use geo_types::{Coord, Rect};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

use crate::error::{MaskError, Result};

/// How a mask treats points lying exactly on its boundary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    Serialize, Deserialize, JsonSchema,
    Display, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BoundaryType {
    /// Boundary points are contained
    Closed,
    /// Boundary points are not contained
    Open,
    /// No guarantee either way
    Unspecified,
}

/// Per-dimension `[min, max]` box enclosing a mask's support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingInterval {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl BoundingInterval {
    pub fn new(min: Vec<f64>, max: Vec<f64>) -> Result<Self> {
        check_dimensions(min.len(), max.len())?;
        Ok(Self { min, max })
    }

    /// Smallest interval enclosing `points`. With no points the interval is
    /// empty (every `min` is `+inf`, every `max` is `-inf`).
    pub fn from_points<I, P>(num_dimensions: usize, points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[f64]>,
    {
        let mut min = vec![f64::INFINITY; num_dimensions];
        let mut max = vec![f64::NEG_INFINITY; num_dimensions];

        for point in points {
            for (d, &value) in point.as_ref().iter().take(num_dimensions).enumerate() {
                min[d] = min[d].min(value);
                max[d] = max[d].max(value);
            }
        }

        Self { min, max }
    }

    pub fn num_dimensions(&self) -> usize {
        self.min.len()
    }

    pub fn min(&self, d: usize) -> Result<f64> {
        self.min.get(d).copied().ok_or_else(|| self.invalid_dimension(d))
    }

    pub fn max(&self, d: usize) -> Result<f64> {
        self.max.get(d).copied().ok_or_else(|| self.invalid_dimension(d))
    }

    pub fn mins(&self) -> &[f64] {
        &self.min
    }

    pub fn maxs(&self) -> &[f64] {
        &self.max
    }

    /// `max - min` along dimension `d`.
    pub fn extent(&self, d: usize) -> Result<f64> {
        Ok(self.max(d)? - self.min(d)?)
    }

    pub fn is_empty(&self) -> bool {
        self.min.iter().zip(&self.max).any(|(lo, hi)| lo > hi)
    }

    /// Non-empty with every bound a finite number.
    pub fn is_finite(&self) -> bool {
        !self.is_empty() && self.min.iter().chain(&self.max).all(|v| v.is_finite())
    }

    /// Closed containment test.
    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() >= self.num_dimensions()
            && self
                .min
                .iter()
                .zip(&self.max)
                .zip(point)
                .all(|((lo, hi), p)| lo <= p && p <= hi)
    }

    /// The interval as a `geo` rectangle, for 2-D intervals only.
    pub fn to_rect(&self) -> Option<Rect<f64>> {
        if self.num_dimensions() != 2 || self.is_empty() {
            return None;
        }
        Some(Rect::new(
            Coord { x: self.min[0], y: self.min[1] },
            Coord { x: self.max[0], y: self.max[1] },
        ))
    }

    fn invalid_dimension(&self, dimension: usize) -> MaskError {
        MaskError::InvalidDimension {
            dimension,
            num_dimensions: self.num_dimensions(),
        }
    }
}

/// Read-only position handed out by mask accessors.
///
/// A view is a copy of the mask's coordinates at the time of the call and
/// offers no way to move it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointView(Vec<f64>);

impl PointView {
    pub fn new(coords: impl Into<Vec<f64>>) -> Self {
        Self(coords.into())
    }

    pub fn num_dimensions(&self) -> usize {
        self.0.len()
    }

    pub fn position(&self, d: usize) -> Result<f64> {
        self.0.get(d).copied().ok_or_else(|| MaskError::InvalidDimension {
            dimension: d,
            num_dimensions: self.0.len(),
        })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn to_coord(&self) -> Option<Coord<f64>> {
        match self.0.as_slice() {
            [x, y] => Some(Coord { x: *x, y: *y }),
            _ => None,
        }
    }
}

impl From<[f64; 2]> for PointView {
    fn from(coords: [f64; 2]) -> Self {
        Self(coords.to_vec())
    }
}

impl AsRef<[f64]> for PointView {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Fail unless `actual` matches the `expected` dimensionality.
pub(crate) fn check_dimensions(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(MaskError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
