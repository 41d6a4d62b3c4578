use std::rc::Rc;

use mask::{
    BoxMask, Capability, Converter, ConverterRegistry, Convertible, Ellipsoid, Mask,
    PointCollectionMask, PointWrapper, RasterOptions, VertexMask,
};
use roi::{Canvas, PolygonKind, Roi, RoiGeometry};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let registry = ConverterRegistry::standard();
    info!("{}", registry.info());

    demo_capabilities()?;
    demo_round_trip(&registry)?;
    demo_display_edits(&registry)?;
    demo_rasterization(&registry)?;

    info!("all demos completed");
    Ok(())
}

fn demo_capabilities() -> color_eyre::Result<()> {
    info!(names = ?Capability::names(), "capabilities");
    let schema = serde_json::to_string_pretty(&RasterOptions::schema())?;
    info!("raster options schema:\n{schema}");
    Ok(())
}

fn demo_round_trip(registry: &ConverterRegistry) -> color_eyre::Result<()> {
    let rect = Convertible::from(Roi::rectangle(2.0, 3.0, 10.0, 5.0));

    let mut boxed = registry
        .convert_or_err(&rect, Capability::Box)?
        .into_mask()
        .ok_or_else(|| color_eyre::eyre::eyre!("expected a mask"))?;
    if let Some(b) = boxed.as_box_mut() {
        b.set_center(&[0.0, 0.0])?;
        info!(center = ?b.center(), bounds = ?b.bounds(), "moved box");
    }

    let back = registry.convert_or_err(&Convertible::Mask(boxed), Capability::Roi)?;
    let same = back.as_roi().zip(rect.as_roi()).is_some_and(|(a, b)| a.ptr_eq(b));
    info!(same, bounds = ?rect.as_roi().map(|r| r.borrow().bounds()), "unwrapped rectangle");
    Ok(())
}

fn demo_display_edits(registry: &ConverterRegistry) -> color_eyre::Result<()> {
    let canvas = Rc::new(Canvas::new("blobs"));
    let mut polyline = Roi::polygon(
        PolygonKind::Polyline,
        vec![1.25, 20.0, 50.0, 79.0],
        vec![1.25, 20.0, -30.0, -1.0],
    )?;
    polyline.attach(canvas.clone());

    let value = Convertible::from(polyline);
    let mut mask = registry
        .convert_or_err(&value, Capability::Polyline)?
        .into_mask()
        .ok_or_else(|| color_eyre::eyre::eyre!("expected a mask"))?;
    if let Some(line) = mask.as_polyline_mut() {
        line.remove_vertex(3)?;
        info!(vertices = line.num_vertices(), bounds = ?line.bounds(), "removed a vertex");
    }
    info!(edits = ?canvas.edits(), "canvas log");

    let mut points = PointWrapper::new(Roi::points(vec![12.125, 17.0], vec![-4.0, 6.5])?.into_handle())?;
    points.add_point(&[8.0, 100.25])?;
    info!(size = points.size(), max_y = points.real_max(1)?, "added a point");
    if let Err(err) = points.remove_point(&[8.0, 100.25]) {
        info!(%err, "point removal needs a display");
    }
    Ok(())
}

fn demo_rasterization(registry: &ConverterRegistry) -> color_eyre::Result<()> {
    let open = Ellipsoid::open(vec![10.0, 10.0], vec![6.0, 3.5])?;
    let value = Convertible::from(open);

    let converter = registry
        .find_converter(&value, Capability::Roi)
        .ok_or_else(|| color_eyre::eyre::eyre!("no converter"))?;
    info!(rule = converter.name(), lossy = converter.is_lossy(), "selected");

    let roi = converter
        .convert(&value)?
        .into_roi()
        .ok_or_else(|| color_eyre::eyre::eyre!("expected a shape"))?;
    if let RoiGeometry::Bitmap(region) = roi.borrow().geometry() {
        info!(
            origin = ?region.origin(),
            width = region.width(),
            height = region.height(),
            set = region.count_set(),
            "rasterized"
        );
    }
    Ok(())
}
