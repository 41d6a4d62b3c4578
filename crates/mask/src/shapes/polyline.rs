use crate::{
    error::{MaskError, Result},
    geometry,
    shapes::common_dimensions,
    traits::{Mask, PolygonMask, PolylineMask, VertexMask},
    types::{BoundaryType, BoundingInterval, PointView},
};

/// Open path through `vertices`, in any dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    vertices: Vec<Vec<f64>>,
    num_dimensions: usize,
}

impl Polyline {
    pub fn new(vertices: Vec<Vec<f64>>) -> Result<Self> {
        let num_dimensions = common_dimensions("polyline", &vertices)?;
        Ok(Self {
            vertices,
            num_dimensions,
        })
    }
}

impl Mask for Polyline {
    fn num_dimensions(&self) -> usize {
        self.num_dimensions
    }

    fn test(&self, point: &[f64]) -> bool {
        self.bounds().contains(point) && geometry::polyline_contains(&self.vertices, point)
    }

    fn bounds(&self) -> BoundingInterval {
        BoundingInterval::from_points(self.num_dimensions, &self.vertices)
    }

    fn boundary_type(&self) -> BoundaryType {
        BoundaryType::Closed
    }
}

impl VertexMask for Polyline {
    fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    fn vertex(&self, index: usize) -> Result<PointView> {
        self.vertices
            .get(index)
            .map(|v| PointView::new(v.clone()))
            .ok_or(MaskError::InvalidIndex {
                index,
                len: self.vertices.len(),
            })
    }

    fn add_vertex(&mut self, _index: usize, _position: &[f64]) -> Result<()> {
        Err(MaskError::unsupported("add_vertex"))
    }

    fn remove_vertex(&mut self, _index: usize) -> Result<()> {
        Err(MaskError::unsupported("remove_vertex"))
    }
}

impl PolylineMask for Polyline {}

/// Simple or self-intersecting planar polygon. The ring closes implicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon2D {
    vertices: Vec<[f64; 2]>,
}

impl Polygon2D {
    pub fn new(vertices: Vec<[f64; 2]>) -> Result<Self> {
        if vertices.is_empty() {
            return Err(MaskError::MalformedShape(
                "polygon needs at least one vertex".into(),
            ));
        }
        Ok(Self { vertices })
    }
}

impl Mask for Polygon2D {
    fn num_dimensions(&self) -> usize {
        2
    }

    fn test(&self, point: &[f64]) -> bool {
        self.bounds().contains(point) && geometry::polygon_contains(&self.vertices, point)
    }

    fn bounds(&self) -> BoundingInterval {
        BoundingInterval::from_points(2, &self.vertices)
    }

    fn boundary_type(&self) -> BoundaryType {
        BoundaryType::Unspecified
    }
}

impl VertexMask for Polygon2D {
    fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    fn vertex(&self, index: usize) -> Result<PointView> {
        self.vertices
            .get(index)
            .map(|v| PointView::from(*v))
            .ok_or(MaskError::InvalidIndex {
                index,
                len: self.vertices.len(),
            })
    }

    fn add_vertex(&mut self, _index: usize, _position: &[f64]) -> Result<()> {
        Err(MaskError::unsupported("add_vertex"))
    }

    fn remove_vertex(&mut self, _index: usize) -> Result<()> {
        Err(MaskError::unsupported("remove_vertex"))
    }
}

impl PolygonMask for Polygon2D {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_segments() {
        let line = Polyline::new(vec![vec![0.0, 0.0], vec![10.0, 0.0], vec![10.0, 10.0]])
            .expect("Valid polyline");

        assert!(line.test(&[5.0, 0.0]));
        assert!(line.test(&[10.0, 7.5]));
        assert!(!line.test(&[5.0, 5.0]));
        assert_eq!(line.num_vertices(), 3);
    }

    #[test]
    fn test_ragged_polyline_is_rejected() {
        let err = Polyline::new(vec![vec![0.0, 0.0], vec![1.0]]).unwrap_err();
        assert!(matches!(err, MaskError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_polygon_containment() {
        let triangle = Polygon2D::new(vec![[0.0, 0.0], [10.0, 0.0], [0.0, 10.0]])
            .expect("Valid polygon");

        assert!(triangle.test(&[2.0, 2.0]));
        assert!(!triangle.test(&[8.0, 8.0]));
        assert_eq!(triangle.vertex(1).expect("Vertex 1").as_slice(), &[10.0, 0.0]);
        assert!(triangle.vertex(3).is_err());
    }
}
