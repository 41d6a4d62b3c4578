use std::{
    cell::{Ref, RefCell, RefMut},
    fmt,
    ops::Deref,
    rc::Rc,
};

use crate::{
    bitmap::BitmapRegion,
    display::DisplayContext,
    error::{Result, RoiError},
    shape::{
        Bounds, LineShape, OvalShape, PointShape, PolygonKind, PolygonShape, RectangleShape,
        RoiGeometry, RoiType, TextShape,
    },
};

/// A mutable, display-bound region of interest.
///
/// The geometry variant is fixed at construction; mutators only ever edit
/// the coordinates of that variant.
#[derive(Clone)]
pub struct Roi {
    geometry: RoiGeometry,
    stroke_width: f64,
    display: Option<Rc<dyn DisplayContext>>,
}

impl Roi {
    fn from_geometry(geometry: RoiGeometry) -> Self {
        Self {
            geometry,
            stroke_width: 0.0,
            display: None,
        }
    }

    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::rounded_rectangle(x, y, width, height, 0)
    }

    pub fn rounded_rectangle(x: f64, y: f64, width: f64, height: f64, corner_diameter: u32) -> Self {
        Self::from_geometry(RoiGeometry::Rectangle(RectangleShape {
            x,
            y,
            width,
            height,
            corner_diameter,
        }))
    }

    pub fn oval(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_geometry(RoiGeometry::Oval(OvalShape { x, y, width, height }))
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::from_geometry(RoiGeometry::Line(LineShape { x1, y1, x2, y2 }))
    }

    pub fn polygon(kind: PolygonKind, xs: Vec<f32>, ys: Vec<f32>) -> Result<Self> {
        Ok(Self::from_geometry(RoiGeometry::Polygon(PolygonShape::new(kind, xs, ys)?)))
    }

    pub fn points(xs: Vec<f32>, ys: Vec<f32>) -> Result<Self> {
        Ok(Self::from_geometry(RoiGeometry::Point(PointShape::new(xs, ys)?)))
    }

    pub fn text(x: f64, y: f64, width: f64, height: f64, text: impl Into<String>) -> Self {
        Self::from_geometry(RoiGeometry::Text(TextShape {
            x,
            y,
            width,
            height,
            text: text.into(),
        }))
    }

    pub fn bitmap(region: BitmapRegion) -> Self {
        Self::from_geometry(RoiGeometry::Bitmap(region))
    }

    pub fn geometry(&self) -> &RoiGeometry {
        &self.geometry
    }

    pub fn roi_type(&self) -> RoiType {
        self.geometry.roi_type()
    }

    pub fn bounds(&self) -> Bounds {
        self.geometry.bounds()
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.stroke_width = width.max(0.0);
    }

    pub fn corner_diameter(&self) -> u32 {
        match &self.geometry {
            RoiGeometry::Rectangle(r) => r.corner_diameter,
            _ => 0,
        }
    }

    pub fn is_spline_fit(&self) -> bool {
        match &self.geometry {
            RoiGeometry::Polygon(p) => p.is_spline_fit(),
            _ => false,
        }
    }

    /// Mark a vertex-array shape as spline fitted.
    pub fn fit_spline(&mut self) -> Result<()> {
        if self.geometry.set_spline_fit() {
            Ok(())
        } else {
            Err(RoiError::UnsupportedMutation { operation: "fit_spline" })
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.geometry.translate(dx, dy);
    }

    /// Move the shape so that its base point lands on `(x, y)`.
    pub fn set_location(&mut self, x: f64, y: f64) {
        let bounds = self.bounds();
        self.translate(x - bounds.x, y - bounds.y);
    }

    /// Append a point to a point-set shape.
    pub fn add_point(&mut self, x: f32, y: f32) -> Result<()> {
        match &mut self.geometry {
            RoiGeometry::Point(p) => {
                p.push(x, y);
                Ok(())
            }
            _ => Err(RoiError::UnsupportedMutation { operation: "add_point" }),
        }
    }

    pub fn coordinate_count(&self) -> usize {
        self.geometry.coordinate_count()
    }

    /// Coordinates of the vertex or point at `index` of a vertex-array or
    /// point-set shape.
    pub fn coordinate(&self, index: usize) -> Result<[f64; 2]> {
        let (found, len) = match &self.geometry {
            RoiGeometry::Polygon(p) => (p.vertex(index), p.len()),
            RoiGeometry::Point(p) => (p.point(index), p.len()),
            _ => return Err(RoiError::UnsupportedMutation { operation: "coordinate" }),
        };
        found.ok_or(RoiError::InvalidIndex { index, len })
    }

    /// Raw structural edit removing the coordinate at `index`.
    ///
    /// Shapes shown on a display should be edited through
    /// [`DisplayContext::delete_handle`] instead.
    pub fn remove_coordinate(&mut self, index: usize) -> Result<()> {
        let (xs, ys) = self
            .geometry
            .arrays_mut()
            .ok_or(RoiError::UnsupportedMutation { operation: "remove_coordinate" })?;
        if index >= xs.len() {
            return Err(RoiError::InvalidIndex { index, len: xs.len() });
        }
        xs.remove(index);
        ys.remove(index);
        Ok(())
    }

    pub fn attach(&mut self, display: Rc<dyn DisplayContext>) {
        self.display = Some(display);
    }

    pub fn detach(&mut self) -> Option<Rc<dyn DisplayContext>> {
        self.display.take()
    }

    pub fn display(&self) -> Option<Rc<dyn DisplayContext>> {
        self.display.clone()
    }

    /// Whether the shape is currently shown on a live display.
    pub fn is_attached(&self) -> bool {
        self.display.as_ref().is_some_and(|d| d.is_live())
    }

    pub fn into_handle(self) -> RoiHandle {
        RoiHandle::new(self)
    }
}

impl fmt::Debug for Roi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Roi")
            .field("geometry", &self.geometry)
            .field("stroke_width", &self.stroke_width)
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Shared handle to a [`Roi`].
///
/// Cloning the handle shares the shape; [`RoiHandle::ptr_eq`] compares
/// identity. Handles are not `Send`: a shape and everything viewing it stay
/// on the thread that created them.
#[derive(Clone)]
pub struct RoiHandle(Rc<RefCell<Roi>>);

impl RoiHandle {
    pub fn new(roi: Roi) -> Self {
        Self(Rc::new(RefCell::new(roi)))
    }

    pub fn borrow(&self) -> Ref<'_, Roi> {
        self.0.borrow()
    }

    /// Mutable access limited to the shape's own mutators, so the geometry
    /// variant stays the one the handle was created with.
    pub fn borrow_mut(&self) -> RoiMut<'_> {
        RoiMut(self.0.borrow_mut())
    }

    pub fn ptr_eq(&self, other: &RoiHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn roi_type(&self) -> RoiType {
        self.borrow().roi_type()
    }
}

/// Exclusive borrow of a shared shape.
///
/// Reads go through `Deref`; writes are limited to the variant-preserving
/// mutators below. There is no `DerefMut`, so a handle's shape can never be
/// swapped for one of another kind:
///
/// ```compile_fail
/// use roi::{Roi, RoiHandle};
///
/// let handle = RoiHandle::new(Roi::oval(0.0, 0.0, 4.0, 2.0));
/// *handle.borrow_mut() = Roi::rectangle(0.0, 0.0, 1.0, 1.0);
/// ```
pub struct RoiMut<'a>(RefMut<'a, Roi>);

impl RoiMut<'_> {
    pub fn set_stroke_width(&mut self, width: f64) {
        self.0.set_stroke_width(width);
    }

    pub fn fit_spline(&mut self) -> Result<()> {
        self.0.fit_spline()
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.0.translate(dx, dy);
    }

    pub fn set_location(&mut self, x: f64, y: f64) {
        self.0.set_location(x, y);
    }

    pub fn add_point(&mut self, x: f32, y: f32) -> Result<()> {
        self.0.add_point(x, y)
    }

    pub fn remove_coordinate(&mut self, index: usize) -> Result<()> {
        self.0.remove_coordinate(index)
    }

    /// Let `display` delete the handle at `index`. A display that changes
    /// the geometry variant is rejected and the edit rolled back.
    pub fn delete_handle(&mut self, display: &dyn DisplayContext, index: usize) -> Result<()> {
        let before = self.0.clone();
        display.delete_handle(&mut self.0, index)?;
        if self.0.roi_type() != before.roi_type() {
            *self.0 = before;
            return Err(RoiError::UnsupportedMutation {
                operation: "delete_handle",
            });
        }
        Ok(())
    }

    pub fn attach(&mut self, display: Rc<dyn DisplayContext>) {
        self.0.attach(display);
    }

    pub fn detach(&mut self) -> Option<Rc<dyn DisplayContext>> {
        self.0.detach()
    }
}

impl Deref for RoiMut<'_> {
    type Target = Roi;

    fn deref(&self) -> &Roi {
        &self.0
    }
}

impl From<Roi> for RoiHandle {
    fn from(roi: Roi) -> Self {
        Self::new(roi)
    }
}

impl fmt::Debug for RoiHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RoiHandle").field(&*self.borrow()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Canvas;

    #[test]
    fn test_set_location_moves_base_point() {
        let mut roi = Roi::oval(10.0, 22.0, 7.0, 4.0);
        roi.set_location(96.5, 38.5);

        let bounds = roi.bounds();
        assert_eq!((bounds.x, bounds.y), (96.5, 38.5));
        assert_eq!((bounds.width, bounds.height), (7.0, 4.0));
    }

    #[test]
    fn test_add_point_only_on_point_sets() {
        let mut points = Roi::points(vec![1.0], vec![2.0]).expect("Parallel arrays should build");
        points.add_point(3.0, 4.0).expect("Point sets accept points");
        assert_eq!(points.coordinate(1).expect("Index 1 exists"), [3.0, 4.0]);

        let mut line = Roi::line(0.0, 0.0, 1.0, 1.0);
        assert!(line.add_point(3.0, 4.0).is_err());
    }

    #[test]
    fn test_remove_coordinate_validates_index() {
        let mut roi = Roi::polygon(PolygonKind::Polygon, vec![0.0, 1.0, 1.0], vec![0.0, 0.0, 1.0])
            .expect("Parallel arrays should build");

        assert_eq!(
            roi.remove_coordinate(3),
            Err(RoiError::InvalidIndex { index: 3, len: 3 })
        );
        roi.remove_coordinate(0).expect("Index 0 exists");
        assert_eq!(roi.coordinate_count(), 2);
    }

    #[test]
    fn test_attachment_follows_display_liveness() {
        let canvas = Rc::new(Canvas::new("blobs"));
        let mut roi = Roi::rectangle(0.0, 0.0, 5.0, 5.0);
        assert!(!roi.is_attached());

        roi.attach(canvas.clone());
        assert!(roi.is_attached());

        canvas.close();
        assert!(!roi.is_attached());
    }

    #[test]
    fn test_handle_identity() {
        let handle = Roi::line(0.0, 0.0, 3.0, 4.0).into_handle();
        let shared = handle.clone();
        let other = Roi::line(0.0, 0.0, 3.0, 4.0).into_handle();

        assert!(handle.ptr_eq(&shared));
        assert!(!handle.ptr_eq(&other));
    }

    /// Display that answers a deletion by replacing the whole shape.
    struct Replacing;

    impl DisplayContext for Replacing {
        fn is_live(&self) -> bool {
            true
        }

        fn delete_handle(&self, roi: &mut Roi, _index: usize) -> Result<()> {
            *roi = Roi::rectangle(0.0, 0.0, 1.0, 1.0);
            Ok(())
        }
    }

    #[test]
    fn test_handle_edits_keep_the_variant() {
        let handle = Roi::points(vec![1.0, 2.0], vec![3.0, 4.0])
            .expect("Parallel arrays should build")
            .into_handle();
        let canvas = Canvas::new("blobs");

        handle.borrow_mut().translate(1.0, 1.0);
        handle.borrow_mut().add_point(9.0, 9.0).expect("Point sets accept points");
        handle
            .borrow_mut()
            .delete_handle(&canvas, 0)
            .expect("Live canvas should delete");

        assert_eq!(handle.roi_type(), RoiType::Point);
        assert_eq!(handle.borrow().coordinate(0).expect("Index 0 exists"), [3.0, 5.0]);
    }

    #[test]
    fn test_display_swapping_the_variant_is_rolled_back() {
        let handle = Roi::points(vec![1.0, 2.0], vec![3.0, 4.0])
            .expect("Parallel arrays should build")
            .into_handle();

        let err = handle.borrow_mut().delete_handle(&Replacing, 0).unwrap_err();

        assert!(matches!(err, RoiError::UnsupportedMutation { .. }));
        assert_eq!(handle.roi_type(), RoiType::Point);
        assert_eq!(handle.borrow().coordinate_count(), 2);
    }
}
