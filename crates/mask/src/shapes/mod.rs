//! Value masks: masks that own immutable geometry.
//!
//! These are what structural converters consume when building legacy
//! shapes, and what callers build by hand. Every mutator on them fails with
//! [`crate::MaskError::UnsupportedMutation`].

pub mod boxes;
pub mod ellipsoid;
pub mod line;
pub mod points;
pub mod polyline;

pub use boxes::RealBox;
pub use ellipsoid::Ellipsoid;
pub use line::LineSegment;
pub use points::{PointCollection, PointMask};
pub use polyline::{Polygon2D, Polyline};

use crate::{
    error::{MaskError, Result},
    types::check_dimensions,
};

/// Infer the shared dimensionality of `points`, rejecting empty or ragged
/// input.
pub(crate) fn common_dimensions(what: &str, points: &[Vec<f64>]) -> Result<usize> {
    let first = points
        .first()
        .ok_or_else(|| MaskError::MalformedShape(format!("{what} needs at least one point")))?;
    let n = first.len();
    for point in points {
        check_dimensions(n, point.len())?;
    }
    Ok(n)
}
