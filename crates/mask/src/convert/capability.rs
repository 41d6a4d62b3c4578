use roi::{Roi, RoiGeometry};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

/// What a value can be used as: a legacy shape kind or a mask capability.
///
/// Converters declare one capability they consume and one they produce;
/// callers ask the registry for a target capability.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Capability {
    /// Any legacy shape.
    Roi,
    RectangleRoi,
    OvalRoi,
    /// Vertex-array shapes, open or closed.
    PolygonRoi,
    LineRoi,
    PointRoi,
    TextRoi,
    /// Bitmap-backed shape produced by rasterization.
    ImageRoi,

    /// Any mask.
    Mask,
    Box,
    Ellipsoid,
    Line,
    Polyline,
    Polygon,
    PointCollection,
    Point,
}

impl Capability {
    pub fn is_roi(self) -> bool {
        matches!(
            self,
            Self::Roi
                | Self::RectangleRoi
                | Self::OvalRoi
                | Self::PolygonRoi
                | Self::LineRoi
                | Self::PointRoi
                | Self::TextRoi
                | Self::ImageRoi
        )
    }

    pub fn is_mask(self) -> bool {
        !self.is_roi()
    }

    /// Whether a value with this capability is acceptable where `requested`
    /// is asked for. The generic `Roi` and `Mask` accept every member of
    /// their side.
    pub fn satisfies(self, requested: Capability) -> bool {
        self == requested
            || (requested == Self::Roi && self.is_roi())
            || (requested == Self::Mask && self.is_mask())
    }

    /// Most specific capability of a legacy shape.
    pub fn of_roi(roi: &Roi) -> Self {
        match roi.geometry() {
            RoiGeometry::Rectangle(_) => Self::RectangleRoi,
            RoiGeometry::Oval(_) => Self::OvalRoi,
            RoiGeometry::Polygon(_) => Self::PolygonRoi,
            RoiGeometry::Line(_) => Self::LineRoi,
            RoiGeometry::Point(_) => Self::PointRoi,
            RoiGeometry::Text(_) => Self::TextRoi,
            RoiGeometry::Bitmap(_) => Self::ImageRoi,
        }
    }

    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(Capability)
    }

    pub fn names() -> &'static [&'static str] {
        <Self as VariantNames>::VARIANTS
    }
}

/// Priority class of a converter. Within the registry, lossless
/// structural rules outrank lossy ones.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Priority {
    /// Recover the backing shape of a wrapper by identity.
    Unwrap,
    Structural,
    /// Universal bitmap fallback.
    Rasterization,
}

impl Priority {
    /// Dispatch rank; lower wins.
    pub fn rank(self, lossy: bool) -> u8 {
        match (self, lossy) {
            (Self::Unwrap, _) => 0,
            (Self::Structural, false) => 1,
            (Self::Structural, true) => 2,
            (Self::Rasterization, _) => 3,
        }
    }
}
