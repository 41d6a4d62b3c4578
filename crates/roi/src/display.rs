use std::cell::{Cell, RefCell};

use tracing::debug;

use crate::{
    error::{Result, RoiError},
    roi::Roi,
};

/// A display a shape can be shown on.
///
/// Index-based structural edits of a shown shape are routed through its
/// display so that the display can re-derive whatever state it keeps for
/// the shape.
pub trait DisplayContext {
    /// Whether the display is still showing shapes.
    fn is_live(&self) -> bool;

    /// Remove the vertex or point at `index` from a shape shown here. The
    /// shape must keep its geometry variant.
    fn delete_handle(&self, roi: &mut Roi, index: usize) -> Result<()>;
}

/// A structural edit performed by a [`Canvas`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleEdit {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

/// In-memory display that applies handle deletions and keeps a log of them.
#[derive(Debug, Default)]
pub struct Canvas {
    title: String,
    closed: Cell<bool>,
    edits: RefCell<Vec<HandleEdit>>,
}

impl Canvas {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            closed: Cell::new(false),
            edits: RefCell::new(Vec::new()),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Stop showing shapes. Attached shapes are no longer considered live.
    pub fn close(&self) {
        self.closed.set(true);
    }

    pub fn edits(&self) -> Vec<HandleEdit> {
        self.edits.borrow().clone()
    }
}

impl DisplayContext for Canvas {
    fn is_live(&self) -> bool {
        !self.closed.get()
    }

    fn delete_handle(&self, roi: &mut Roi, index: usize) -> Result<()> {
        if self.closed.get() {
            return Err(RoiError::UnsupportedMutation { operation: "delete_handle" });
        }

        let [x, y] = roi.coordinate(index)?;
        roi.remove_coordinate(index)?;
        debug!(canvas = %self.title, index, x, y, "deleted handle");
        self.edits.borrow_mut().push(HandleEdit { index, x, y });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_canvas_deletes_and_logs() {
        let canvas = Rc::new(Canvas::new("blobs"));
        let mut roi = Roi::points(vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0])
            .expect("Parallel arrays should build");
        roi.attach(canvas.clone());

        canvas.delete_handle(&mut roi, 1).expect("Live canvas should delete");

        assert_eq!(roi.coordinate_count(), 2);
        assert_eq!(canvas.edits(), vec![HandleEdit { index: 1, x: 2.0, y: 5.0 }]);
    }

    #[test]
    fn test_closed_canvas_refuses_edits() {
        let canvas = Canvas::new("closed");
        canvas.close();
        let mut roi = Roi::points(vec![1.0], vec![1.0]).expect("Parallel arrays should build");

        let err = canvas.delete_handle(&mut roi, 0).unwrap_err();
        assert!(matches!(err, RoiError::UnsupportedMutation { .. }));
        assert_eq!(roi.coordinate_count(), 1);
    }
}
