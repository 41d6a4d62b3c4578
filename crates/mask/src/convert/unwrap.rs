//! Identity converters from wrappers back to their backing shapes.

use crate::{
    convert::{Capability, Convertible, Priority},
    error::{MaskError, Result},
    traits::{Converter, Mask},
};

/// Hands back the shape behind a wrapper. O(1) and lossless: the result is
/// the very same [`roi::RoiHandle`], not a copy.
#[derive(Debug, Clone, Copy)]
pub struct Unwrap {
    name: &'static str,
    input: Capability,
    output: Capability,
}

impl Unwrap {
    const fn new(name: &'static str, input: Capability, output: Capability) -> Self {
        Self {
            name,
            input,
            output,
        }
    }

    pub const fn box_mask() -> Self {
        Self::new("unwrap_box", Capability::Box, Capability::RectangleRoi)
    }

    pub const fn ellipsoid() -> Self {
        Self::new("unwrap_ellipsoid", Capability::Ellipsoid, Capability::OvalRoi)
    }

    pub const fn line() -> Self {
        Self::new("unwrap_line", Capability::Line, Capability::LineRoi)
    }

    pub const fn polyline() -> Self {
        Self::new("unwrap_polyline", Capability::Polyline, Capability::PolygonRoi)
    }

    pub const fn polygon() -> Self {
        Self::new("unwrap_polygon", Capability::Polygon, Capability::PolygonRoi)
    }

    pub const fn points() -> Self {
        Self::new("unwrap_points", Capability::PointCollection, Capability::PointRoi)
    }

    /// One unwrap rule per wrapper kind, in dispatch order.
    pub fn all() -> [Self; 6] {
        [
            Self::box_mask(),
            Self::ellipsoid(),
            Self::line(),
            Self::polyline(),
            Self::polygon(),
            Self::points(),
        ]
    }
}

impl Converter for Unwrap {
    fn name(&self) -> &'static str {
        self.name
    }

    fn input(&self) -> Capability {
        self.input
    }

    fn output(&self) -> Capability {
        self.output
    }

    fn priority(&self) -> Priority {
        Priority::Unwrap
    }

    fn supports(&self, value: &Convertible) -> bool {
        value
            .as_mask()
            .and_then(|mask| mask.wrapped_roi())
            .is_some_and(|roi| Capability::of_roi(&roi.borrow()).satisfies(self.output))
    }

    fn convert(&self, value: &Convertible) -> Result<Convertible> {
        value
            .as_mask()
            .and_then(|mask| mask.wrapped_roi())
            .map(|roi| Convertible::Roi(roi.clone()))
            .ok_or_else(|| MaskError::Conversion(format!("{} needs a wrapped shape", self.name)))
    }
}
