use image::{GrayImage, Luma};

/// Pixel-mask overlay positioned at an integer origin.
///
/// A pixel is part of the region when its value is non-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct BitmapRegion {
    origin: (i64, i64),
    pixels: GrayImage,
}

impl BitmapRegion {
    pub fn new(origin_x: i64, origin_y: i64, pixels: GrayImage) -> Self {
        Self {
            origin: (origin_x, origin_y),
            pixels,
        }
    }

    /// Build a region by evaluating `value` for every pixel `(i, j)` of a
    /// `width` x `height` grid.
    pub fn from_fn<F>(origin_x: i64, origin_y: i64, width: u32, height: u32, mut value: F) -> Self
    where
        F: FnMut(u32, u32) -> u8,
    {
        let pixels = GrayImage::from_fn(width, height, |i, j| Luma([value(i, j)]));
        Self::new(origin_x, origin_y, pixels)
    }

    pub fn origin(&self) -> (i64, i64) {
        self.origin
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &GrayImage {
        &self.pixels
    }

    /// Raw value at grid position `(i, j)`, `None` outside the grid.
    pub fn value(&self, i: u32, j: u32) -> Option<u8> {
        self.pixels.get_pixel_checked(i, j).map(|p| p.0[0])
    }

    pub fn is_set(&self, i: u32, j: u32) -> bool {
        self.value(i, j).is_some_and(|v| v > 0)
    }

    /// Number of included pixels.
    pub fn count_set(&self) -> usize {
        self.pixels.pixels().filter(|p| p.0[0] > 0).count()
    }

    pub fn translate(&mut self, dx: i64, dy: i64) {
        self.origin.0 += dx;
        self.origin.1 += dy;
    }
}
