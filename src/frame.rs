use image::{GrayImage, Luma};

use crate::geometry::{FloatType, ScreenPoint, ScreenSize};

/// Glyphs ordered from darkest to brightest.
pub const GRADIENT: &str = " .:!/r(l1Z4H9W8$@";

const GRADIENT_GLYPHS: &[u8] = GRADIENT.as_bytes();

/// Picks the glyph for an intensity, `max_intensity` and anything above it map to the
/// brightest one.
pub fn glyph(intensity: FloatType, max_intensity: FloatType) -> char {
    let count = GRADIENT_GLYPHS.len();
    // Float to int casts saturate, negative values and NaN end up as 0
    let index = ((intensity / max_intensity * count as FloatType) as usize).min(count - 1);
    GRADIENT_GLYPHS[index] as char
}

/// Maps an intensity to an 8-bit gray level, saturating at `max_intensity`.
pub fn gray_level(intensity: FloatType, max_intensity: FloatType) -> u8 {
    (intensity / max_intensity * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Rendered intensities, stored row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    size: ScreenSize,
    intensities: Vec<FloatType>,
}

impl Frame {
    pub fn new(size: ScreenSize) -> Self {
        Frame {
            size,
            intensities: vec![0.0; size.x as usize * size.y as usize],
        }
    }

    pub fn size(&self) -> ScreenSize {
        self.size
    }

    pub fn intensities(&self) -> &[FloatType] {
        &self.intensities
    }

    fn index(&self, point: &ScreenPoint) -> usize {
        debug_assert!(point.x < self.size.x && point.y < self.size.y);
        point.y as usize * self.size.x as usize + point.x as usize
    }

    pub fn get(&self, point: &ScreenPoint) -> FloatType {
        self.intensities[self.index(point)]
    }

    pub fn set(&mut self, point: &ScreenPoint, intensity: FloatType) {
        let index = self.index(point);
        self.intensities[index] = intensity;
    }

    /// One string of glyphs per screen row, top to bottom.
    pub fn glyph_rows(&self, max_intensity: FloatType) -> impl Iterator<Item = String> + '_ {
        self.intensities
            .chunks(self.size.x.max(1) as usize)
            .map(move |row| row.iter().map(|i| glyph(*i, max_intensity)).collect())
    }

    pub fn to_image(&self, max_intensity: FloatType) -> GrayImage {
        GrayImage::from_fn(self.size.x, self.size.y, |x, y| {
            Luma([gray_level(self.get(&ScreenPoint::new(x, y)), max_intensity)])
        })
    }
}
