use roi::{Roi, RoiHandle};

use crate::{
    convert::Capability,
    shapes::PointMask,
    traits::{
        BoxMask, EllipsoidMask, LineMask, Mask, PointCollectionMask, PolygonMask, PolylineMask,
    },
    types::{BoundaryType, BoundingInterval},
};

/// A mask tagged with the most specific capability it offers.
#[derive(Debug)]
pub enum AnyMask {
    Box(Box<dyn BoxMask>),
    Ellipsoid(Box<dyn EllipsoidMask>),
    Line(Box<dyn LineMask>),
    Polyline(Box<dyn PolylineMask>),
    Polygon(Box<dyn PolygonMask>),
    Points(Box<dyn PointCollectionMask>),
    Point(PointMask),
    /// A mask with no shape-specific accessors.
    Other(Box<dyn Mask>),
}

macro_rules! delegate {
    ($value:expr, $mask:ident => $body:expr) => {
        match $value {
            AnyMask::Box($mask) => $body,
            AnyMask::Ellipsoid($mask) => $body,
            AnyMask::Line($mask) => $body,
            AnyMask::Polyline($mask) => $body,
            AnyMask::Polygon($mask) => $body,
            AnyMask::Points($mask) => $body,
            AnyMask::Point($mask) => $body,
            AnyMask::Other($mask) => $body,
        }
    };
}

impl AnyMask {
    pub fn capability(&self) -> Capability {
        match self {
            Self::Box(_) => Capability::Box,
            Self::Ellipsoid(_) => Capability::Ellipsoid,
            Self::Line(_) => Capability::Line,
            Self::Polyline(_) => Capability::Polyline,
            Self::Polygon(_) => Capability::Polygon,
            Self::Points(_) => Capability::PointCollection,
            Self::Point(_) => Capability::Point,
            Self::Other(_) => Capability::Mask,
        }
    }

    pub fn as_box(&self) -> Option<&dyn BoxMask> {
        match self {
            Self::Box(m) => Some(m.as_ref()),
            _ => None,
        }
    }

    pub fn as_box_mut(&mut self) -> Option<&mut dyn BoxMask> {
        match self {
            Self::Box(m) => Some(m.as_mut()),
            _ => None,
        }
    }

    pub fn as_ellipsoid(&self) -> Option<&dyn EllipsoidMask> {
        match self {
            Self::Ellipsoid(m) => Some(m.as_ref()),
            _ => None,
        }
    }

    pub fn as_ellipsoid_mut(&mut self) -> Option<&mut dyn EllipsoidMask> {
        match self {
            Self::Ellipsoid(m) => Some(m.as_mut()),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&dyn LineMask> {
        match self {
            Self::Line(m) => Some(m.as_ref()),
            _ => None,
        }
    }

    pub fn as_polyline(&self) -> Option<&dyn PolylineMask> {
        match self {
            Self::Polyline(m) => Some(m.as_ref()),
            _ => None,
        }
    }

    pub fn as_polyline_mut(&mut self) -> Option<&mut dyn PolylineMask> {
        match self {
            Self::Polyline(m) => Some(m.as_mut()),
            _ => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&dyn PolygonMask> {
        match self {
            Self::Polygon(m) => Some(m.as_ref()),
            _ => None,
        }
    }

    pub fn as_polygon_mut(&mut self) -> Option<&mut dyn PolygonMask> {
        match self {
            Self::Polygon(m) => Some(m.as_mut()),
            _ => None,
        }
    }

    pub fn as_points(&self) -> Option<&dyn PointCollectionMask> {
        match self {
            Self::Points(m) => Some(m.as_ref()),
            _ => None,
        }
    }

    pub fn as_points_mut(&mut self) -> Option<&mut dyn PointCollectionMask> {
        match self {
            Self::Points(m) => Some(m.as_mut()),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<&PointMask> {
        match self {
            Self::Point(m) => Some(m),
            _ => None,
        }
    }
}

impl Mask for AnyMask {
    fn num_dimensions(&self) -> usize {
        delegate!(self, m => m.num_dimensions())
    }

    fn test(&self, point: &[f64]) -> bool {
        delegate!(self, m => m.test(point))
    }

    fn bounds(&self) -> BoundingInterval {
        delegate!(self, m => m.bounds())
    }

    fn boundary_type(&self) -> BoundaryType {
        delegate!(self, m => m.boundary_type())
    }

    fn wrapped_roi(&self) -> Option<&RoiHandle> {
        delegate!(self, m => m.wrapped_roi())
    }
}

macro_rules! impl_from_mask {
    ($($variant:ident: $ty:path),* $(,)?) => {
        $(
            impl From<$ty> for AnyMask {
                fn from(mask: $ty) -> Self {
                    AnyMask::$variant(Box::new(mask))
                }
            }

            impl From<$ty> for Convertible {
                fn from(mask: $ty) -> Self {
                    Convertible::Mask(AnyMask::$variant(Box::new(mask)))
                }
            }
        )*
    };
}

impl_from_mask! {
    Box: crate::shapes::RealBox,
    Box: crate::wrappers::RectangleWrapper,
    Ellipsoid: crate::shapes::Ellipsoid,
    Ellipsoid: crate::wrappers::OvalWrapper,
    Line: crate::shapes::LineSegment,
    Line: crate::wrappers::LineWrapper,
    Polyline: crate::shapes::Polyline,
    Polyline: crate::wrappers::PolylineWrapper,
    Polygon: crate::shapes::Polygon2D,
    Polygon: crate::wrappers::PolygonWrapper,
    Points: crate::shapes::PointCollection,
    Points: crate::wrappers::PointWrapper,
}

impl From<PointMask> for AnyMask {
    fn from(mask: PointMask) -> Self {
        AnyMask::Point(mask)
    }
}

/// A value the registry can convert: either side of the bridge.
#[derive(Debug)]
pub enum Convertible {
    Roi(RoiHandle),
    Mask(AnyMask),
}

impl Convertible {
    /// Whether the value can be consumed where `capability` is expected.
    pub fn provides(&self, capability: Capability) -> bool {
        self.capability().satisfies(capability)
    }

    /// Most specific capability of the value.
    pub fn capability(&self) -> Capability {
        match self {
            Self::Roi(handle) => Capability::of_roi(&handle.borrow()),
            Self::Mask(mask) => mask.capability(),
        }
    }

    pub fn as_roi(&self) -> Option<&RoiHandle> {
        match self {
            Self::Roi(handle) => Some(handle),
            Self::Mask(_) => None,
        }
    }

    pub fn into_roi(self) -> Option<RoiHandle> {
        match self {
            Self::Roi(handle) => Some(handle),
            Self::Mask(_) => None,
        }
    }

    pub fn as_mask(&self) -> Option<&AnyMask> {
        match self {
            Self::Mask(mask) => Some(mask),
            Self::Roi(_) => None,
        }
    }

    pub fn into_mask(self) -> Option<AnyMask> {
        match self {
            Self::Mask(mask) => Some(mask),
            Self::Roi(_) => None,
        }
    }
}

impl From<RoiHandle> for Convertible {
    fn from(handle: RoiHandle) -> Self {
        Self::Roi(handle)
    }
}

impl From<Roi> for Convertible {
    fn from(roi: Roi) -> Self {
        Self::Roi(roi.into_handle())
    }
}

impl From<AnyMask> for Convertible {
    fn from(mask: AnyMask) -> Self {
        Self::Mask(mask)
    }
}

impl From<PointMask> for Convertible {
    fn from(mask: PointMask) -> Self {
        Self::Mask(AnyMask::Point(mask))
    }
}
