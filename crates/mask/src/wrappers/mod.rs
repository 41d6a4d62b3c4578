//! Live mask views over legacy shapes.
//!
//! A wrapper holds a [`RoiHandle`] to its backing shape and never copies
//! geometry: every `test` and `bounds` call reads the shape as it is now, so
//! edits made through the display, the shape or the wrapper itself show up
//! immediately. Unwrap converters hand the same handle back.

mod line;
mod oval;
mod points;
mod polygon;
mod polyline;
mod rectangle;

pub use line::LineWrapper;
pub use oval::OvalWrapper;
pub use points::PointWrapper;
pub use polygon::PolygonWrapper;
pub use polyline::PolylineWrapper;
pub use rectangle::RectangleWrapper;

use roi::{Roi, RoiHandle};

use crate::{
    error::{MaskError, Result},
    types::check_dimensions,
};

/// Planar position from a mask-side coordinate slice.
pub(crate) fn planar(position: &[f64]) -> Result<[f64; 2]> {
    check_dimensions(2, position.len())?;
    Ok([position[0], position[1]])
}

/// Route a structural edit through the display the shape is shown on.
pub(crate) fn delete_through_display(roi: &RoiHandle, index: usize, operation: &'static str) -> Result<()> {
    let display = {
        let shape = roi.borrow();
        match shape.display() {
            Some(display) if display.is_live() => display,
            _ => return Err(MaskError::unsupported(operation)),
        }
    };
    roi.borrow_mut().delete_handle(&*display, index)?;
    Ok(())
}

pub(crate) fn wrong_kind(expected: &str, roi: &Roi) -> MaskError {
    MaskError::MalformedShape(format!("expected {expected}, found {} shape", roi.roi_type()))
}
