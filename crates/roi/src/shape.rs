use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

use crate::{
    bitmap::BitmapRegion,
    error::{Result, RoiError},
};

/// Type tag reported by a shape.
///
/// Text and bitmap overlays report [`RoiType::Rectangle`], like the plain
/// rectangles they are drawn into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    Serialize, Deserialize,
    Display, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoiType {
    Rectangle,
    Oval,
    Polygon,
    Freehand,
    Traced,
    Line,
    Polyline,
    Freeline,
    Angle,
    Point,
}

/// Flavour of a vertex-array shape.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    Serialize, Deserialize,
    Display, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PolygonKind {
    Polygon,
    Freehand,
    Traced,
    Polyline,
    Freeline,
    Angle,
}

impl PolygonKind {
    /// Closed kinds enclose an area, open kinds are traced paths.
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Polygon | Self::Freehand | Self::Traced)
    }

    pub fn roi_type(self) -> RoiType {
        match self {
            Self::Polygon => RoiType::Polygon,
            Self::Freehand => RoiType::Freehand,
            Self::Traced => RoiType::Traced,
            Self::Polyline => RoiType::Polyline,
            Self::Freeline => RoiType::Freeline,
            Self::Angle => RoiType::Angle,
        }
    }
}

/// Axis-aligned extent of a shape: base point plus width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn from_coords<I>(coords: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for (x, y) in coords {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        if min_x > max_x {
            return Self::default();
        }

        Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleShape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Diameter of the rounded corners; zero for square corners.
    pub corner_diameter: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvalShape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl OvalShape {
    pub fn center(&self) -> [f64; 2] {
        [self.x + self.width / 2.0, self.y + self.height / 2.0]
    }

    pub fn semi_axes(&self) -> [f64; 2] {
        [self.width / 2.0, self.height / 2.0]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineShape {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LineShape {
    pub fn start(&self) -> [f64; 2] {
        [self.x1, self.y1]
    }

    pub fn end(&self) -> [f64; 2] {
        [self.x2, self.y2]
    }
}

/// Vertex-array shape. Coordinates are stored in single precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonShape {
    kind: PolygonKind,
    xs: Vec<f32>,
    ys: Vec<f32>,
    spline_fit: bool,
}

impl PolygonShape {
    pub fn new(kind: PolygonKind, xs: Vec<f32>, ys: Vec<f32>) -> Result<Self> {
        check_parallel(&xs, &ys)?;
        Ok(Self {
            kind,
            xs,
            ys,
            spline_fit: false,
        })
    }

    pub fn kind(&self) -> PolygonKind {
        self.kind
    }

    pub fn xs(&self) -> &[f32] {
        &self.xs
    }

    pub fn ys(&self) -> &[f32] {
        &self.ys
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn vertex(&self, index: usize) -> Option<[f64; 2]> {
        Some([*self.xs.get(index)? as f64, *self.ys.get(index)? as f64])
    }

    pub fn vertices(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.xs
            .iter()
            .zip(&self.ys)
            .map(|(&x, &y)| [x as f64, y as f64])
    }

    pub fn is_spline_fit(&self) -> bool {
        self.spline_fit
    }
}

/// Point set backed by parallel coordinate arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointShape {
    xs: Vec<f32>,
    ys: Vec<f32>,
}

impl PointShape {
    pub fn new(xs: Vec<f32>, ys: Vec<f32>) -> Result<Self> {
        check_parallel(&xs, &ys)?;
        Ok(Self { xs, ys })
    }

    pub fn xs(&self) -> &[f32] {
        &self.xs
    }

    pub fn ys(&self) -> &[f32] {
        &self.ys
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<[f64; 2]> {
        Some([*self.xs.get(index)? as f64, *self.ys.get(index)? as f64])
    }

    pub(crate) fn push(&mut self, x: f32, y: f32) {
        self.xs.push(x);
        self.ys.push(y);
    }

    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.xs
            .iter()
            .zip(&self.ys)
            .map(|(&x, &y)| [x as f64, y as f64])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextShape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub text: String,
}

/// The closed set of legacy shape variants.
#[derive(Debug, Clone, PartialEq)]
pub enum RoiGeometry {
    Rectangle(RectangleShape),
    Oval(OvalShape),
    Polygon(PolygonShape),
    Line(LineShape),
    Point(PointShape),
    Text(TextShape),
    Bitmap(BitmapRegion),
}

impl RoiGeometry {
    pub fn roi_type(&self) -> RoiType {
        match self {
            Self::Rectangle(_) | Self::Text(_) | Self::Bitmap(_) => RoiType::Rectangle,
            Self::Oval(_) => RoiType::Oval,
            Self::Polygon(p) => p.kind.roi_type(),
            Self::Line(_) => RoiType::Line,
            Self::Point(_) => RoiType::Point,
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Rectangle(r) => Bounds { x: r.x, y: r.y, width: r.width, height: r.height },
            Self::Oval(o) => Bounds { x: o.x, y: o.y, width: o.width, height: o.height },
            Self::Polygon(p) => Bounds::from_coords(p.vertices().map(|[x, y]| (x, y))),
            Self::Line(l) => Bounds::from_coords([(l.x1, l.y1), (l.x2, l.y2)]),
            Self::Point(p) => Bounds::from_coords(p.points().map(|[x, y]| (x, y))),
            Self::Text(t) => Bounds { x: t.x, y: t.y, width: t.width, height: t.height },
            Self::Bitmap(b) => {
                let (x, y) = b.origin();
                Bounds {
                    x: x as f64,
                    y: y as f64,
                    width: b.width() as f64,
                    height: b.height() as f64,
                }
            }
        }
    }

    pub(crate) fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Self::Rectangle(r) => {
                r.x += dx;
                r.y += dy;
            }
            Self::Oval(o) => {
                o.x += dx;
                o.y += dy;
            }
            Self::Polygon(p) => shift(&mut p.xs, &mut p.ys, dx, dy),
            Self::Line(l) => {
                l.x1 += dx;
                l.y1 += dy;
                l.x2 += dx;
                l.y2 += dy;
            }
            Self::Point(p) => shift(&mut p.xs, &mut p.ys, dx, dy),
            Self::Text(t) => {
                t.x += dx;
                t.y += dy;
            }
            // Bitmap origins are integral.
            Self::Bitmap(b) => b.translate(dx.round() as i64, dy.round() as i64),
        }
    }

    pub(crate) fn coordinate_count(&self) -> usize {
        match self {
            Self::Polygon(p) => p.len(),
            Self::Point(p) => p.len(),
            Self::Line(_) => 2,
            Self::Rectangle(_) | Self::Oval(_) | Self::Text(_) | Self::Bitmap(_) => 4,
        }
    }

    pub(crate) fn arrays_mut(&mut self) -> Option<(&mut Vec<f32>, &mut Vec<f32>)> {
        match self {
            Self::Polygon(p) => Some((&mut p.xs, &mut p.ys)),
            Self::Point(p) => Some((&mut p.xs, &mut p.ys)),
            _ => None,
        }
    }

    pub(crate) fn set_spline_fit(&mut self) -> bool {
        match self {
            Self::Polygon(p) => {
                p.spline_fit = true;
                true
            }
            _ => false,
        }
    }
}

fn check_parallel(xs: &[f32], ys: &[f32]) -> Result<()> {
    if xs.len() != ys.len() {
        return Err(RoiError::MalformedShape(format!(
            "coordinate arrays differ in length ({} x, {} y)",
            xs.len(),
            ys.len()
        )));
    }
    Ok(())
}

fn shift(xs: &mut [f32], ys: &mut [f32], dx: f64, dy: f64) {
    for x in xs.iter_mut() {
        *x = (*x as f64 + dx) as f32;
    }
    for y in ys.iter_mut() {
        *y = (*y as f64 + dy) as f32;
    }
}
