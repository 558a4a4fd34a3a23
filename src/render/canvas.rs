//! Software framebuffer implementing `Surface`.

use super::sprites::SpriteSheet;
use super::surface::{Font, Rect, Surface};
use image::{Rgb, RgbImage};

const CLEAR_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Text drawn this frame. Rasterising text is left to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: Font,
}

/// RGB framebuffer the size of the logical canvas.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    pixels: RgbImage,
    texts: Vec<TextOverlay>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbImage::from_pixel(width.max(1), height.max(1), CLEAR_COLOR),
            texts: Vec::new(),
        }
    }

    pub fn pixel_width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn pixel_height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.pixels.width() || y >= self.pixels.height() {
            return None;
        }
        Some(self.pixels.get_pixel(x, y).0)
    }

    pub fn texts(&self) -> &[TextOverlay] {
        &self.texts
    }
}

/// Pixel indices whose centres fall inside `[start, start + len)`, clipped to
/// `[0, limit)`.
fn covered(start: f64, len: f64, limit: u32) -> std::ops::Range<u32> {
    let first = (start - 0.5).ceil().max(0.0);
    let end = (start + len - 0.5).ceil().min(limit as f64);
    if end <= first {
        return 0..0;
    }
    first as u32..end as u32
}

fn blend(dst: &mut Rgb<u8>, src: [u8; 4]) {
    match src[3] {
        0 => {}
        255 => *dst = Rgb([src[0], src[1], src[2]]),
        a => {
            let alpha = a as u32;
            for c in 0..3 {
                let mixed = src[c] as u32 * alpha + dst.0[c] as u32 * (255 - alpha);
                dst.0[c] = (mixed / 255) as u8;
            }
        }
    }
}

impl Surface for PixelCanvas {
    fn width(&self) -> f64 {
        self.pixels.width() as f64
    }

    fn height(&self) -> f64 {
        self.pixels.height() as f64
    }

    fn begin_frame(&mut self) {
        for px in self.pixels.pixels_mut() {
            *px = CLEAR_COLOR;
        }
        self.texts.clear();
    }

    /// Nearest-neighbour scaled blit with source-over alpha.
    fn draw_image(&mut self, sheet: &SpriteSheet, src: Rect, dest: Rect) {
        if src.is_empty() || dest.is_empty() {
            return;
        }

        let rows = covered(dest.y, dest.h, self.pixels.height());
        let cols = covered(dest.x, dest.w, self.pixels.width());

        for py in rows {
            let v = (py as f64 + 0.5 - dest.y) / dest.h;
            let sy = (src.y + v * src.h).floor() as i64;
            for px in cols.clone() {
                let u = (px as f64 + 0.5 - dest.x) / dest.w;
                let sx = (src.x + u * src.w).floor() as i64;
                if let Some(color) = sheet.pixel(sx, sy) {
                    blend(self.pixels.get_pixel_mut(px, py), color);
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &Font) {
        self.texts.push(TextOverlay {
            text: text.to_string(),
            x,
            y,
            font: *font,
        });
    }
}
