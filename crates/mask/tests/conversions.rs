use std::rc::Rc;

use mask::{
    AnyMask, BoundingInterval, Capability, ConverterRegistry, Convertible, Ellipsoid,
    EllipsoidMask, LineMask, LineSegment, Mask, MaskError, PointCollection, PointCollectionMask,
    PointMask, Polygon2D, Polyline, Priority, RealBox, VertexMask,
};
use roi::{Canvas, DisplayContext, PolygonKind, Roi, RoiGeometry, RoiHandle, RoiType};

fn registry() -> ConverterRegistry {
    ConverterRegistry::standard()
}

fn to_mask(registry: &ConverterRegistry, roi: &RoiHandle, target: Capability) -> AnyMask {
    registry
        .convert_or_err(&Convertible::Roi(roi.clone()), target)
        .expect("Shape converts to a mask")
        .into_mask()
        .expect("Mask side")
}

fn to_roi(registry: &ConverterRegistry, mask: AnyMask, target: Capability) -> RoiHandle {
    registry
        .convert_or_err(&Convertible::Mask(mask), target)
        .expect("Mask converts to a shape")
        .into_roi()
        .expect("Shape side")
}

#[test]
fn test_wrapped_shapes_round_trip_by_identity() {
    let registry = registry();
    let shapes = [
        (Roi::rectangle(1.0, 2.0, 3.0, 4.0), Capability::Box),
        (Roi::oval(10.0, 22.0, 7.0, 4.0), Capability::Ellipsoid),
        (Roi::line(10.5, 20.0, 120.5, 150.0), Capability::Line),
        (
            Roi::polygon(PolygonKind::Polyline, vec![1.25, 20.0], vec![1.25, 20.0])
                .expect("Parallel arrays should build"),
            Capability::Polyline,
        ),
        (
            Roi::polygon(PolygonKind::Polygon, vec![0.0, 4.0, 4.0], vec![0.0, 0.0, 4.0])
                .expect("Parallel arrays should build"),
            Capability::Polygon,
        ),
        (
            Roi::points(vec![1.0, 2.0], vec![3.0, 4.0]).expect("Parallel arrays should build"),
            Capability::PointCollection,
        ),
    ];

    for (roi, target) in shapes {
        let handle = roi.into_handle();
        let mask = to_mask(&registry, &handle, target);
        assert_eq!(mask.capability(), target);
        assert!(mask.wrapped_roi().is_some_and(|r| r.ptr_eq(&handle)));

        let value = Convertible::Mask(mask);
        let rule = registry
            .find_converter(&value, Capability::Roi)
            .expect("Wrapper converts back");
        assert_eq!(rule.priority(), Priority::Unwrap, "{target}");

        let back = rule
            .convert(&value)
            .expect("Unwrap succeeds")
            .into_roi()
            .expect("Shape side");
        assert!(back.ptr_eq(&handle), "{target} lost identity");
    }
}

#[test]
fn test_value_polyline_round_trip_is_single_precision() {
    let registry = registry();
    let vertices = vec![vec![0.1, 0.2], vec![10.3, -4.7], vec![20.0, 5.5]];
    let value = Polyline::new(vertices.clone()).expect("Valid polyline");

    let roi = to_roi(&registry, value.into(), Capability::PolygonRoi);
    assert_eq!(roi.roi_type(), RoiType::Polyline);

    let back = to_mask(&registry, &roi, Capability::Polyline);
    let polyline = back.as_polyline().expect("Polyline mask");
    assert_eq!(polyline.num_vertices(), 3);
    for (i, expected) in vertices.iter().enumerate() {
        let vertex = polyline.vertex(i).expect("Vertex in range");
        for d in 0..2 {
            let got = vertex.position(d).expect("Planar vertex");
            assert_eq!(got, expected[d] as f32 as f64);
            assert!((got - expected[d]).abs() < 1e-6);
        }
    }
}

/// Grid of sample positions covering `[x0, x1] x [y0, y1]`.
fn samples(x0: f64, x1: f64, y0: f64, y1: f64, step: f64) -> Vec<[f64; 2]> {
    let nx = ((x1 - x0) / step) as usize;
    let ny = ((y1 - y0) / step) as usize;
    (0..=nx)
        .flat_map(|i| (0..=ny).map(move |j| [x0 + i as f64 * step, y0 + j as f64 * step]))
        .collect()
}

/// Value mask -> new shape -> wrapper.
fn round_trip(registry: &ConverterRegistry, value: AnyMask, shape: Capability, mask: Capability) -> AnyMask {
    let roi = to_roi(registry, value, shape);
    to_mask(registry, &roi, mask)
}

#[test]
fn test_exact_rules_preserve_membership() {
    let registry = registry();

    let ellipsoid = Ellipsoid::closed(vec![13.5, 24.0], vec![3.5, 2.0]).expect("Valid ellipsoid");
    let wrapped = round_trip(&registry, ellipsoid.clone().into(), Capability::OvalRoi, Capability::Ellipsoid);
    for p in samples(8.0, 19.0, 20.0, 28.0, 0.125) {
        assert_eq!(wrapped.test(&p), ellipsoid.test(&p), "ellipsoid at {p:?}");
    }
    assert!(wrapped.test(&[17.0, 24.0]));

    let segment = LineSegment::new(vec![10.5, 20.0], vec![120.5, 150.0]).expect("Valid segment");
    let wrapped = round_trip(&registry, segment.clone().into(), Capability::LineRoi, Capability::Line);
    let along = (0..=10).map(|k| [10.5 + 11.0 * f64::from(k), 20.0 + 13.0 * f64::from(k)]);
    for p in along.chain(samples(0.0, 130.0, 10.0, 160.0, 2.5)) {
        assert_eq!(wrapped.test(&p), segment.test(&p), "segment at {p:?}");
    }
}

#[test]
fn test_lossy_polygon_rule_preserves_membership_away_from_edges() {
    let registry = registry();
    let polygon = Polygon2D::new(vec![[0.1, 0.1], [10.3, 0.2], [5.7, 9.9], [3.3, 4.4]])
        .expect("Valid polygon");
    let wrapped = round_trip(&registry, polygon.clone().into(), Capability::PolygonRoi, Capability::Polygon);

    let eps = 1e-4;
    let near_edge = |p: &[f64; 2]| {
        let inside = polygon.test(p);
        [[eps, 0.0], [-eps, 0.0], [0.0, eps], [0.0, -eps]]
            .iter()
            .any(|[dx, dy]| polygon.test(&[p[0] + dx, p[1] + dy]) != inside)
    };

    let mut compared = 0;
    for p in samples(-1.0, 11.0, -1.0, 11.0, 0.05) {
        if near_edge(&p) {
            continue;
        }
        assert_eq!(wrapped.test(&p), polygon.test(&p), "polygon at {p:?}");
        compared += 1;
    }
    assert!(compared > 40_000);
}

#[test]
fn test_single_vertex_polyline_keeps_its_point() {
    let registry = registry();
    let dot = Polyline::new(vec![vec![2.0, 3.0]]).expect("Valid polyline");
    assert!(dot.test(&[2.0, 3.0]));

    let wrapped = round_trip(&registry, dot.clone().into(), Capability::PolygonRoi, Capability::Polyline);
    assert!(wrapped.test(&[2.0, 3.0]));
    for p in samples(1.0, 3.0, 2.0, 4.0, 0.25) {
        assert_eq!(wrapped.test(&p), dot.test(&p), "dot at {p:?}");
    }
}

#[test]
fn test_value_shapes_become_shapes() {
    let registry = registry();

    let sphere = Ellipsoid::sphere(vec![1.25, -13.5], 10.0).expect("Valid sphere");
    let rule = registry
        .find_converter(&sphere.clone().into(), Capability::Roi)
        .expect("Closed planar ellipsoid converts");
    assert_eq!(rule.name(), "ellipsoid_to_oval");
    assert!(!rule.is_lossy());

    let oval = to_roi(&registry, sphere.into(), Capability::Roi);
    let bounds = oval.borrow().bounds();
    assert_eq!((bounds.x, bounds.y, bounds.width, bounds.height), (-8.75, -23.5, 20.0, 20.0));

    let triangle = Polygon2D::new(vec![[0.0, 0.0], [8.0, 0.0], [0.0, 8.0]]).expect("Valid polygon");
    let roi = to_roi(&registry, triangle.into(), Capability::Roi);
    assert_eq!(roi.roi_type(), RoiType::Polygon);

    let point = to_roi(&registry, PointMask::new(vec![140.25, -0.5]).into(), Capability::Roi);
    assert_eq!(point.borrow().coordinate(0).expect("Single point"), [140.25, -0.5]);

    let points = PointCollection::new(vec![vec![12.125, -4.0], vec![17.0, 6.5]])
        .expect("Valid collection");
    let roi = to_roi(&registry, points.into(), Capability::PointRoi);
    assert_eq!(roi.borrow().coordinate_count(), 2);
}

#[test]
fn test_unconvertible_values() {
    let registry = registry();

    let open_4d = Ellipsoid::open(vec![0.0; 4], vec![1.0, 2.0, 3.0, 4.0]).expect("Valid ellipsoid");
    assert!(registry.find_converter(&open_4d.into(), Capability::Roi).is_none());

    let points_3d = PointCollection::new(vec![vec![1.0, 2.0, 3.0]]).expect("Valid collection");
    assert!(registry.find_converter(&points_3d.into(), Capability::PointRoi).is_none());

    let mut wide = Roi::polygon(PolygonKind::Polyline, vec![1.0, 2.0], vec![1.0, 2.0])
        .expect("Parallel arrays should build");
    wide.set_stroke_width(15.5);
    assert!(registry.find_converter(&wide.into(), Capability::Polyline).is_none());

    let mut fitted = Roi::polygon(PolygonKind::Polyline, vec![1.0, 2.0], vec![1.0, 2.0])
        .expect("Parallel arrays should build");
    fitted.fit_spline().expect("Vertex shapes can be fitted");
    assert!(registry.find_converter(&fitted.into(), Capability::Polyline).is_none());

    let label = Convertible::from(Roi::text(0.0, 0.0, 10.0, 10.0, "label"));
    assert!(registry.find_converter(&label, Capability::Box).is_none());
}

#[test]
fn test_lossless_structural_rules_beat_rasterization() {
    let registry = registry();
    let line = mask::LineSegment::new(vec![0.0, 0.0], vec![3.0, 4.0]).expect("Valid segment");
    let rule = registry
        .find_converter(&line.into(), Capability::Roi)
        .expect("Planar line converts");
    assert_eq!(rule.name(), "line_to_roi");

    let open_box = RealBox::open(vec![0.0, 0.0], vec![2.0, 2.0]).expect("Valid box");
    let rule = registry
        .find_converter(&open_box.into(), Capability::Roi)
        .expect("Planar box converts");
    assert_eq!(rule.name(), "box_to_roi");
    assert!(rule.is_lossy());
}

/// Diagonal stripes over a fixed interval, with no structural counterpart.
#[derive(Debug)]
struct Stripes;

impl Mask for Stripes {
    fn num_dimensions(&self) -> usize {
        2
    }

    fn test(&self, point: &[f64]) -> bool {
        (point[0] + point[1]) as i64 % 2 == 0
    }

    fn bounds(&self) -> BoundingInterval {
        BoundingInterval::from_points(2, [[15.0, 20.0], [50.0, 72.0]])
    }
}

#[test]
fn test_rasterization_matches_every_pixel() {
    let registry = registry();
    let roi = to_roi(&registry, AnyMask::Other(Box::new(Stripes)), Capability::Roi);
    let roi = roi.borrow();

    let RoiGeometry::Bitmap(region) = roi.geometry() else {
        panic!("expected a bitmap shape, got {:?}", roi.geometry());
    };
    assert_eq!(region.origin(), (15, 20));
    assert_eq!((region.width(), region.height()), (36, 53));

    let mut mismatches = 0;
    for j in 0..region.height() {
        for i in 0..region.width() {
            let p = [15.0 + f64::from(i), 20.0 + f64::from(j)];
            if region.is_set(i, j) != Stripes.test(&p) {
                mismatches += 1;
            }
        }
    }
    assert_eq!(mismatches, 0);
    assert_eq!(region.is_set(5, 10), Stripes.test(&[20.0, 30.0]));
}

#[test]
fn test_wrappers_follow_mutations() {
    let registry = registry();
    let canvas = Rc::new(Canvas::new("blobs"));

    let mut polygon = Roi::polygon(
        PolygonKind::Polygon,
        vec![100.5, 100.5, 150.0, 199.0, 199.0],
        vec![100.0, 200.0, 250.25, 200.0, 100.0],
    )
    .expect("Parallel arrays should build");
    polygon.attach(canvas.clone());
    let handle = polygon.into_handle();

    let mut mask = to_mask(&registry, &handle, Capability::Polygon);
    assert!(mask.test(&[151.0, 225.0]));

    mask.as_polygon_mut()
        .expect("Polygon mask")
        .remove_vertex(2)
        .expect("Attached polygon allows removal");
    assert!(!mask.test(&[151.0, 225.0]));
    assert_eq!(mask.real_max(1).expect("y exists"), 200.0);
    assert_eq!(handle.borrow().coordinate_count(), 4);

    handle.borrow_mut().translate(10.0, 0.0);
    assert_eq!(mask.real_min(0).expect("x exists"), 110.5);
    assert_eq!(handle.roi_type(), RoiType::Polygon);

    let oval = Roi::oval(10.0, 22.0, 7.0, 4.0).into_handle();
    let mut ellipsoid = to_mask(&registry, &oval, Capability::Ellipsoid);
    ellipsoid
        .as_ellipsoid_mut()
        .expect("Ellipsoid mask")
        .set_center(&[100.0, 40.5])
        .expect("Planar center");
    assert_eq!(oval.borrow().bounds().x, 96.5);
    assert!(ellipsoid.test(&[100.0, 42.5]));
    assert!(ellipsoid.test(&[101.0, 41.125]));
    assert!(!ellipsoid.test(&[12.125, 23.0]));

    let points = Roi::points(vec![12.125, 17.0, 1.0], vec![-4.0, 6.5, 30.0])
        .expect("Parallel arrays should build")
        .into_handle();
    let mut collection = to_mask(&registry, &points, Capability::PointCollection);
    collection
        .as_points_mut()
        .expect("Point mask")
        .add_point(&[8.0, 100.25])
        .expect("Planar point");
    assert_eq!(collection.real_max(1).expect("y exists"), 100.25);
    assert_eq!(points.borrow().coordinate_count(), 4);
}

#[test]
fn test_line_endpoints_are_views() {
    let registry = registry();
    let handle = Roi::line(10.5, 20.0, 120.5, 150.0).into_handle();
    let line = to_mask(&registry, &handle, Capability::Line);
    let line = line.as_line().expect("Line mask");

    let one = line.endpoint_one();
    handle.borrow_mut().translate(1.0, 0.0);
    assert_eq!(one.as_slice(), &[10.5, 20.0]);
    assert_eq!(line.endpoint_one().as_slice(), &[11.5, 20.0]);
}

#[test]
fn test_value_masks_reject_mutation() {
    let mut value = AnyMask::from(Ellipsoid::sphere(vec![0.0, 0.0], 1.0).expect("Valid sphere"));
    let err = value
        .as_ellipsoid_mut()
        .expect("Ellipsoid mask")
        .set_center(&[1.0, 1.0])
        .unwrap_err();
    assert!(matches!(err, mask::MaskError::UnsupportedMutation { .. }));
}

/// Display that answers a deletion by swapping in a rectangle.
struct Swapping;

impl DisplayContext for Swapping {
    fn is_live(&self) -> bool {
        true
    }

    fn delete_handle(&self, roi: &mut Roi, _index: usize) -> roi::Result<()> {
        *roi = Roi::rectangle(0.0, 0.0, 1.0, 1.0);
        Ok(())
    }
}

#[test]
fn test_wrapper_survives_a_display_swapping_its_shape() {
    let registry = registry();
    let mut points = Roi::points(vec![1.0, 2.0], vec![1.0, 2.0]).expect("Parallel arrays should build");
    points.attach(Rc::new(Swapping));
    let handle = points.into_handle();

    let mut collection = to_mask(&registry, &handle, Capability::PointCollection);
    let err = collection
        .as_points_mut()
        .expect("Point mask")
        .remove_point(&[1.0, 1.0])
        .unwrap_err();

    assert!(matches!(err, MaskError::UnsupportedMutation { .. }));
    assert_eq!(handle.roi_type(), RoiType::Point);
    assert!(collection.test(&[1.0, 1.0]));
    assert!(collection.test(&[2.0, 2.0]));
}
