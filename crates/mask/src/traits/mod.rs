use std::fmt;

use roi::RoiHandle;

use crate::{
    convert::{Capability, Convertible, Priority},
    error::Result,
    types::{BoundaryType, BoundingInterval, PointView},
};

/// Real-valued containment predicate with a bounding interval.
///
/// Implementations must derive bounds and containment from their current
/// geometry on every call.
pub trait Mask: fmt::Debug {
    fn num_dimensions(&self) -> usize;

    /// Whether `point` is contained. Points with fewer coordinates than
    /// [`Mask::num_dimensions`] are never contained.
    fn test(&self, point: &[f64]) -> bool;

    fn bounds(&self) -> BoundingInterval;

    fn boundary_type(&self) -> BoundaryType {
        BoundaryType::Unspecified
    }

    fn real_min(&self, d: usize) -> Result<f64> {
        self.bounds().min(d)
    }

    fn real_max(&self, d: usize) -> Result<f64> {
        self.bounds().max(d)
    }

    /// The legacy shape backing this mask, for wrappers.
    fn wrapped_roi(&self) -> Option<&RoiHandle> {
        None
    }
}

/// Straight segment between two endpoints.
pub trait LineMask: Mask {
    fn endpoint_one(&self) -> PointView;
    fn endpoint_two(&self) -> PointView;
}

/// Ordered vertex sequence shared by polylines and polygons.
pub trait VertexMask: Mask {
    fn num_vertices(&self) -> usize;

    fn vertex(&self, index: usize) -> Result<PointView>;

    fn vertices(&self) -> Vec<PointView> {
        (0..self.num_vertices())
            .filter_map(|i| self.vertex(i).ok())
            .collect()
    }

    /// Insert a vertex before `index`.
    fn add_vertex(&mut self, index: usize, position: &[f64]) -> Result<()>;

    fn remove_vertex(&mut self, index: usize) -> Result<()>;
}

/// Open path through its vertices.
pub trait PolylineMask: VertexMask {}

/// Closed region bounded by its vertices.
pub trait PolygonMask: VertexMask {}

/// Axis-aligned ellipsoid.
pub trait EllipsoidMask: Mask {
    fn center(&self) -> PointView;

    fn semi_axis_length(&self, d: usize) -> Result<f64>;

    fn set_center(&mut self, position: &[f64]) -> Result<()>;

    fn set_semi_axis_length(&mut self, d: usize, length: f64) -> Result<()>;
}

/// Axis-aligned box.
pub trait BoxMask: Mask {
    fn center(&self) -> PointView;

    fn side_length(&self, d: usize) -> Result<f64>;

    fn set_center(&mut self, position: &[f64]) -> Result<()>;

    fn set_side_length(&mut self, d: usize, length: f64) -> Result<()>;
}

/// Finite set of points, contained by exact coordinate equality.
pub trait PointCollectionMask: Mask {
    fn points(&self) -> Vec<PointView>;

    fn size(&self) -> usize {
        self.points().len()
    }

    fn add_point(&mut self, position: &[f64]) -> Result<()>;

    /// Remove the first point equal to `position`; a no-op when none is.
    fn remove_point(&mut self, position: &[f64]) -> Result<()>;
}

/// A conversion rule the registry can dispatch to.
///
/// Guards must be side-effect free and give the same answer for the same
/// value every time.
pub trait Converter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Capability the value must provide before the guard is consulted.
    fn input(&self) -> Capability;

    /// Capability of the values this rule produces.
    fn output(&self) -> Capability;

    fn priority(&self) -> Priority;

    fn is_lossy(&self) -> bool {
        false
    }

    /// Guard beyond the raw input capability.
    fn supports(&self, value: &Convertible) -> bool;

    fn convert(&self, value: &Convertible) -> Result<Convertible>;
}
