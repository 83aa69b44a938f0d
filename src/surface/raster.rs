use egui::{ColorImage, Pos2};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

use crate::error::ExportError;
use crate::geometry::{distance_to_line_segment, segment_bounds};

/// Fixed-size opaque pixel buffer that accumulates ink.
///
/// Pixel `(x, y)` covers `[x, x + 1) x [y, y + 1)` and is sampled at its
/// center.
pub struct Raster {
    image: RgbaImage,
}

impl Raster {
    /// Allocate a `width` x `height` buffer filled with `background`
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    pub fn pixels(&self) -> impl Iterator<Item = &Rgba<u8>> {
        self.image.pixels()
    }

    pub fn fill(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    /// Paint a capsule of `radius` around the segment `from`-`to`.
    ///
    /// A capsule has round caps and round joins by construction, so a run
    /// of short segments reads as one smooth stroke. A zero-length segment
    /// paints a filled dot. Edge pixels are blended by their coverage.
    /// Returns whether any pixel was touched.
    pub fn stamp_segment(&mut self, from: Pos2, to: Pos2, radius: f32, color: Rgba<u8>) -> bool {
        let reach = radius + 0.5;
        let bounds = segment_bounds(from, to, reach);

        // Saturating float casts clip the box to the buffer
        let min_x = bounds.min.x.floor().max(0.0) as u32;
        let min_y = bounds.min.y.floor().max(0.0) as u32;
        let max_x = bounds.max.x.ceil().min(self.width() as f32) as u32;
        let max_y = bounds.max.y.ceil().min(self.height() as f32) as u32;

        let mut touched = false;
        for y in min_y..max_y {
            for x in min_x..max_x {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (reach - distance_to_line_segment(center, from, to)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    blend(self.image.get_pixel_mut(x, y), color, coverage);
                    touched = true;
                }
            }
        }
        touched
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        let mut bytes = Vec::new();
        self.image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [self.width() as usize, self.height() as usize],
            self.image.as_raw(),
        )
    }
}

/// Source-over blend onto an opaque pixel
fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: f32) {
    if coverage >= 1.0 {
        *dst = src;
        return;
    }
    for channel in 0..3 {
        let mixed = src.0[channel] as f32 * coverage + dst.0[channel] as f32 * (1.0 - coverage);
        dst.0[channel] = mixed.round() as u8;
    }
}
