use std::path::Path;

use roi::{BitmapRegion, Roi};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    convert::{Capability, Convertible, Priority},
    error::{MaskError, Result},
    traits::{Converter, Mask},
};

/// Sampling parameters for the rasterization fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RasterOptions {
    /// Pixel value for samples inside the mask.
    pub foreground: u8,
    /// Pixel value for samples outside the mask.
    pub background: u8,
    /// Added to both integer pixel coordinates before sampling. `0.5`
    /// samples pixel centres on a corner-aligned grid.
    #[schemars(range(min = 0.0, max = 1.0))]
    pub sample_offset: f64,
    /// Largest grid the rasterizer will allocate.
    pub max_pixels: u64,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            foreground: 255,
            background: 0,
            sample_offset: 0.0,
            max_pixels: 1 << 26,
        }
    }
}

impl RasterOptions {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(RasterOptions)
    }

    /// Bitmap regions include every non-zero pixel, so the foreground must
    /// be non-zero and the background zero.
    pub fn validate(&self) -> Result<()> {
        if self.foreground == 0 || self.background != 0 {
            return Err(MaskError::Conversion(format!(
                "foreground {} and background {} do not encode inclusion",
                self.foreground, self.background
            )));
        }
        if !(0.0..=1.0).contains(&self.sample_offset) {
            return Err(MaskError::Conversion(format!(
                "sample offset {} outside [0, 1]",
                self.sample_offset
            )));
        }
        Ok(())
    }
}

/// Integer grid covering a planar mask's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelGrid {
    pub origin: (i64, i64),
    pub width: u32,
    pub height: u32,
}

impl PixelGrid {
    /// Grid aligned to `floor(min)` with enough pixels to reach `ceil(max)`.
    pub fn covering(mask: &dyn Mask) -> Result<Self> {
        if mask.num_dimensions() != 2 {
            return Err(MaskError::Conversion(format!(
                "cannot rasterize a {}-dimensional mask",
                mask.num_dimensions()
            )));
        }
        let bounds = mask.bounds();
        if !bounds.is_finite() {
            return Err(MaskError::Conversion(
                "cannot rasterize a mask with unbounded or empty extent".into(),
            ));
        }

        let axis = |d: usize| -> Result<(i64, u32)> {
            let too_large = || MaskError::Conversion(format!("extent along axis {d} too large"));
            let lo = bounds.min(d)?.floor();
            let count = bounds.max(d)?.ceil() - lo + 1.0;
            // Both checked in f64 so that no cast below saturates.
            if count > f64::from(u32::MAX) || lo < i64::MIN as f64 || lo >= i64::MAX as f64 {
                return Err(too_large());
            }
            let (origin, count) = (lo as i64, count as u32);
            origin.checked_add(i64::from(count)).ok_or_else(too_large)?;
            Ok((origin, count))
        };
        let (x, width) = axis(0)?;
        let (y, height) = axis(1)?;

        Ok(Self {
            origin: (x, y),
            width,
            height,
        })
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Mask-space position sampled for pixel `(i, j)`.
    pub fn sample_point(&self, i: u32, j: u32, offset: f64) -> [f64; 2] {
        [
            (self.origin.0 + i64::from(i)) as f64 + offset,
            (self.origin.1 + i64::from(j)) as f64 + offset,
        ]
    }
}

/// Sample `mask` on the integer grid covering its bounds.
pub fn rasterize(mask: &dyn Mask, options: &RasterOptions) -> Result<BitmapRegion> {
    options.validate()?;
    let grid = PixelGrid::covering(mask)?;
    if grid.pixel_count() > options.max_pixels {
        return Err(MaskError::Conversion(format!(
            "raster of {}x{} pixels exceeds the limit of {}",
            grid.width, grid.height, options.max_pixels
        )));
    }
    debug!(
        origin = ?grid.origin,
        width = grid.width,
        height = grid.height,
        "rasterizing mask"
    );

    Ok(BitmapRegion::from_fn(
        grid.origin.0,
        grid.origin.1,
        grid.width,
        grid.height,
        |i, j| {
            if mask.test(&grid.sample_point(i, j, options.sample_offset)) {
                options.foreground
            } else {
                options.background
            }
        },
    ))
}

/// Fallback turning any finite planar mask into a bitmap shape.
#[derive(Debug, Clone, Default)]
pub struct Rasterizer {
    options: RasterOptions,
}

impl Rasterizer {
    pub fn new(options: RasterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RasterOptions {
        &self.options
    }
}

impl Converter for Rasterizer {
    fn name(&self) -> &'static str {
        "rasterize"
    }

    fn input(&self) -> Capability {
        Capability::Mask
    }

    fn output(&self) -> Capability {
        Capability::ImageRoi
    }

    fn priority(&self) -> Priority {
        Priority::Rasterization
    }

    fn is_lossy(&self) -> bool {
        true
    }

    fn supports(&self, value: &Convertible) -> bool {
        value
            .as_mask()
            .is_some_and(|mask| mask.num_dimensions() == 2 && mask.bounds().is_finite())
    }

    fn convert(&self, value: &Convertible) -> Result<Convertible> {
        let mask = value
            .as_mask()
            .ok_or_else(|| MaskError::Conversion("rasterize expects a mask".into()))?;
        let region = rasterize(mask, &self.options)?;
        Ok(Roi::bitmap(region).into())
    }
}
