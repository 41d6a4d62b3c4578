//! Containment primitives shared by wrappers and value masks.
//!
//! Two-dimensional segment and polygon tests go through `geo`'s robust
//! orientation predicates, so collinearity and boundary hits are decided
//! exactly rather than within a tolerance.

use geo::Intersects;
use geo_types::{Coord, Line, LineString, Polygon};

use crate::types::BoundaryType;

fn coord(p: &[f64]) -> Coord<f64> {
    Coord { x: p[0], y: p[1] }
}

/// Whether `point` lies on the closed segment `start`-`end`.
pub fn segment_contains(start: &[f64], end: &[f64], point: &[f64]) -> bool {
    let n = start.len();
    if end.len() != n || point.len() < n {
        return false;
    }

    if n == 2 {
        return Line::new(coord(start), coord(end)).intersects(&coord(point));
    }

    let within = (0..n).all(|d| {
        let (lo, hi) = if start[d] <= end[d] { (start[d], end[d]) } else { (end[d], start[d]) };
        lo <= point[d] && point[d] <= hi
    });
    if !within {
        return false;
    }

    // Collinear iff every 2x2 minor of [point - start, end - start] vanishes.
    for i in 0..n {
        for j in (i + 1)..n {
            let lhs = (point[i] - start[i]) * (end[j] - start[j]);
            let rhs = (point[j] - start[j]) * (end[i] - start[i]);
            if lhs != rhs {
                return false;
            }
        }
    }
    true
}

/// Whether `point` lies on any segment joining consecutive `vertices`.
///
/// A single vertex is a degenerate segment and contains only itself.
pub fn polyline_contains<V: AsRef<[f64]>>(vertices: &[V], point: &[f64]) -> bool {
    match vertices {
        [only] => segment_contains(only.as_ref(), only.as_ref(), point),
        vertices => vertices
            .windows(2)
            .any(|pair| segment_contains(pair[0].as_ref(), pair[1].as_ref(), point)),
    }
}

/// Boundary-inclusive point-in-polygon test. The ring is closed implicitly.
pub fn polygon_contains(vertices: &[[f64; 2]], point: &[f64]) -> bool {
    if point.len() < 2 {
        return false;
    }
    if vertices.len() < 3 {
        return polyline_contains(vertices, point);
    }

    let ring: LineString<f64> = vertices.iter().map(|v| coord(v)).collect();
    Polygon::new(ring, vec![]).intersects(&coord(point))
}

/// Normalised quadratic form `sum(((p - c) / r)^2)` compared against one.
pub fn ellipsoid_contains(
    center: &[f64],
    semi_axes: &[f64],
    point: &[f64],
    boundary: BoundaryType,
) -> bool {
    let n = center.len();
    if semi_axes.len() != n || point.len() < n {
        return false;
    }

    let distance: f64 = (0..n)
        .map(|d| {
            let t = (point[d] - center[d]) / semi_axes[d];
            t * t
        })
        .sum();

    match boundary {
        BoundaryType::Open => distance < 1.0,
        BoundaryType::Closed | BoundaryType::Unspecified => distance <= 1.0,
    }
}

/// Axis-aligned interval test with the given boundary behaviour.
pub fn interval_contains(min: &[f64], max: &[f64], point: &[f64], boundary: BoundaryType) -> bool {
    if point.len() < min.len() {
        return false;
    }
    min.iter().zip(max).zip(point).all(|((lo, hi), p)| match boundary {
        BoundaryType::Open => lo < p && p < hi,
        BoundaryType::Closed | BoundaryType::Unspecified => lo <= p && p <= hi,
    })
}
