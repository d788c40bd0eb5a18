//! Mutable RGB pixel buffer and drawing primitives

use std::path::Path;

use super::palette::Rgb;
use crate::error::RenderError;

/// Relative pixel offsets of the ring marker: the 8 neighbors of the marked
/// coordinate, center excluded so the exact position stays visible.
const MARKER_RING: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
];

/// RGB canvas owned by a single renderer for its lifetime.
///
/// Pixels are stored row-major, 3 bytes per pixel.
pub struct Canvas {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize, background: Rgb) -> Self {
        let mut pixels = vec![0u8; width * height * 3];
        for px in pixels.chunks_exact_mut(3) {
            px.copy_from_slice(&background.to_bytes());
        }
        Self { pixels, width, height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Write one pixel. Coordinates outside the canvas are silently skipped;
    /// markers near the edge routinely spill over.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            let idx = (y as usize * self.width + x as usize) * 3;
            self.pixels[idx..idx + 3].copy_from_slice(&color.to_bytes());
        }
    }

    /// Read one pixel. Panics if out of bounds; callers index within the
    /// dimensions they created the canvas with.
    pub fn get_pixel(&self, x: usize, y: usize) -> Rgb {
        assert!(x < self.width && y < self.height);
        let idx = (y * self.width + x) * 3;
        Rgb::new(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2])
    }

    /// Paint the ring marker around (x, y). The center pixel is never
    /// written; out-of-bounds ring pixels are skipped per pixel.
    pub fn draw_marker(&mut self, x: i32, y: i32, color: Rgb) {
        for (dx, dy) in MARKER_RING {
            self.set_pixel(x + dx, y + dy, color);
        }
    }

    /// Mirror the canvas left-right.
    pub fn mirror_horizontal(&mut self) {
        for y in 0..self.height {
            let row = y * self.width * 3;
            for x in 0..self.width / 2 {
                let a = row + x * 3;
                let b = row + (self.width - 1 - x) * 3;
                for k in 0..3 {
                    self.pixels.swap(a + k, b + k);
                }
            }
        }
    }

    /// Mirror the canvas top-bottom.
    pub fn mirror_vertical(&mut self) {
        let stride = self.width * 3;
        for y in 0..self.height / 2 {
            let a = y * stride;
            let b = (self.height - 1 - y) * stride;
            for k in 0..stride {
                self.pixels.swap(a + k, b + k);
            }
        }
    }

    /// Encode the canvas as PNG at `path`. This is the single I/O boundary
    /// of the render core; failures are surfaced, never retried.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        let path = path.as_ref();
        image::save_buffer(
            path,
            &self.pixels,
            self.width as u32,
            self.height as u32,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|source| RenderError::Persistence {
            path: path.to_path_buf(),
            source,
        })
    }
}
