//! Sprite atlas.
//!
//! Layout (pixels):
//! ```text
//! x 0..431    background, full canvas height
//! x 432..483  bird frames, 51x36 each, stacked from y = 0
//! x 432..510  top pipe column, y 108..588, lip at the bottom
//! x 510..588  bottom pipe column, y 108..768, lip at the top
//! ```

use image::{Rgba, RgbaImage};
use std::f64::consts::TAU;
use std::io;
use std::path::Path;

pub const SHEET_WIDTH: u32 = 588;
pub const SHEET_HEIGHT: u32 = 768;

pub const BACKGROUND_WIDTH: u32 = 431;
pub const BIRD_SPRITE_X: f64 = 432.0;
/// Size of one bird frame in the atlas, independent of the in-game bird size.
pub const BIRD_FRAME_WIDTH: f64 = BIRD_W as f64;
pub const BIRD_FRAME_HEIGHT: f64 = BIRD_H as f64;
pub const TOP_PIPE_X: f64 = 432.0;
/// The top pipe column's lip ends here; sources are taken upward from it.
pub const TOP_PIPE_END_Y: f64 = 588.0;
pub const BOTTOM_PIPE_X: f64 = 510.0;
/// The bottom pipe column's lip starts here.
pub const BOTTOM_PIPE_Y: f64 = 108.0;

const BIRD_W: u32 = 51;
const BIRD_H: u32 = 36;
const BIRD_FRAMES: u32 = 3;
const PIPE_W: u32 = 78;
const PIPE_LIP: u32 = 26;
const GROUND_TOP: u32 = 668;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
const OUTLINE: Rgba<u8> = Rgba([84, 56, 71, 255]);

/// RGBA sprite atlas, loaded once at startup.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    image: RgbaImage,
}

impl SpriteSheet {
    /// Decode a PNG atlas. Sheets smaller than the layout are rejected.
    pub fn load(path: &Path) -> io::Result<Self> {
        let image = image::open(path)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
            .to_rgba8();

        if image.width() < SHEET_WIDTH || image.height() < SHEET_HEIGHT {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "sprite sheet is {}x{}, need at least {}x{}",
                    image.width(),
                    image.height(),
                    SHEET_WIDTH,
                    SHEET_HEIGHT
                ),
            ));
        }

        tracing::info!(path = %path.display(), "sprite sheet loaded");
        Ok(Self { image })
    }

    /// Build the atlas from code, same layout as the PNG.
    pub fn procedural() -> Self {
        Self {
            image: RgbaImage::from_fn(SHEET_WIDTH, SHEET_HEIGHT, procedural_pixel),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// RGBA at `(x, y)`, `None` outside the atlas.
    pub fn pixel(&self, x: i64, y: i64) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return None;
        }
        Some(self.image.get_pixel(x as u32, y as u32).0)
    }
}

fn procedural_pixel(x: u32, y: u32) -> Rgba<u8> {
    if x < BACKGROUND_WIDTH {
        return background_pixel(x, y);
    }

    let bird_x = BIRD_SPRITE_X as u32;
    if (bird_x..bird_x + BIRD_W).contains(&x) && y < BIRD_H * BIRD_FRAMES {
        return bird_pixel(y / BIRD_H, x - bird_x, y % BIRD_H);
    }

    let top_x = TOP_PIPE_X as u32;
    let top_end = TOP_PIPE_END_Y as u32;
    let bottom_x = BOTTOM_PIPE_X as u32;
    let bottom_y = BOTTOM_PIPE_Y as u32;

    if (top_x..top_x + PIPE_W).contains(&x) && (bottom_y..top_end).contains(&y) {
        let from_lip = top_end - 1 - y;
        return pipe_pixel(x - top_x, from_lip);
    }
    if (bottom_x..bottom_x + PIPE_W).contains(&x) && y >= bottom_y {
        return pipe_pixel(x - bottom_x, y - bottom_y);
    }

    TRANSPARENT
}

fn rgb(r: f64, g: f64, b: f64) -> Rgba<u8> {
    let c = |v: f64| v.clamp(0.0, 255.0) as u8;
    Rgba([c(r), c(g), c(b), 255])
}

/// `harmonic` whole waves across the background width, so the left and right
/// edges tile.
fn wave(x: u32, harmonic: f64) -> f64 {
    (TAU * harmonic * x as f64 / BACKGROUND_WIDTH as f64).sin()
}

fn background_pixel(x: u32, y: u32) -> Rgba<u8> {
    let fy = y as f64;

    if y >= GROUND_TOP {
        let depth = y - GROUND_TOP;
        if depth < 3 {
            return OUTLINE;
        }
        if depth < 16 {
            // Diagonal grass stripes
            let phase = x as f64 * 27.0 / BACKGROUND_WIDTH as f64 + fy / 16.0;
            return if phase.fract() < 0.5 {
                rgb(156.0, 230.0, 89.0)
            } else {
                rgb(115.0, 191.0, 46.0)
            };
        }
        let shade = 8.0 * wave(x, 31.0) * wave(y, 5.0);
        return rgb(222.0 + shade, 216.0 + shade, 149.0 + shade);
    }

    let bush = 628.0 - 14.0 * wave(x, 11.0).abs() - 6.0 * wave(x, 4.0);
    if fy >= bush {
        return rgb(94.0, 194.0, 84.0);
    }

    let block = x * 12 / BACKGROUND_WIDTH;
    let building = 560.0 + ((block * 37) % 5) as f64 * 12.0;
    if fy >= building {
        let window = (x % 9 < 4) && (y % 12 < 6);
        return if window {
            rgb(198.0, 232.0, 220.0)
        } else {
            rgb(160.0, 210.0, 190.0)
        };
    }

    let cloud = 528.0 - 18.0 * wave(x, 3.0) - 10.0 * wave(x, 7.0).abs();
    if fy >= cloud {
        return rgb(234.0, 250.0, 242.0);
    }

    let t = fy / GROUND_TOP as f64;
    rgb(78.0 + 40.0 * t, 192.0 + 20.0 * t, 202.0 + 10.0 * t)
}

/// Point inside the ellipse at `(cx, cy)` with radii `(rx, ry)`, returned as
/// its normalized radius.
fn ellipse(x: f64, y: f64, cx: f64, cy: f64, rx: f64, ry: f64) -> f64 {
    ((x - cx) / rx).powi(2) + ((y - cy) / ry).powi(2)
}

fn bird_pixel(frame: u32, x: u32, y: u32) -> Rgba<u8> {
    let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);

    // Wing up, level, down
    let wing_dy = [-5.0, 0.0, 5.0][frame.min(2) as usize];
    let wing = ellipse(px, py, 14.0, 18.0 + wing_dy, 10.0, 6.0);
    if wing <= 1.0 {
        return if wing > 0.7 {
            OUTLINE
        } else {
            rgb(255.0, 242.0, 204.0)
        };
    }

    let eye = ellipse(px, py, 34.0, 11.0, 6.0, 6.0);
    if eye <= 1.0 {
        let pupil = ellipse(px, py, 36.0, 11.0, 2.5, 3.0);
        return if pupil <= 1.0 || eye > 0.75 {
            OUTLINE
        } else {
            rgb(255.0, 255.0, 255.0)
        };
    }

    if (38..50).contains(&x) && (18..26).contains(&y) {
        return if y == 18 || y == 25 || x == 49 {
            OUTLINE
        } else {
            rgb(240.0, 100.0, 40.0)
        };
    }

    let body = ellipse(px, py, 24.0, 18.0, 22.0, 16.0);
    if body <= 1.0 {
        if body > 0.82 {
            return OUTLINE;
        }
        return if py > 22.0 {
            rgb(250.0, 230.0, 140.0)
        } else {
            rgb(250.0, 200.0, 50.0)
        };
    }

    TRANSPARENT
}

/// `x` across the column, `from_lip` rows away from the gap end.
fn pipe_pixel(x: u32, from_lip: u32) -> Rgba<u8> {
    if x < 2 || x >= PIPE_W - 2 {
        return OUTLINE;
    }
    if from_lip < 2 || from_lip == PIPE_LIP || from_lip == PIPE_LIP + 1 {
        return OUTLINE;
    }

    let across = x as f64 / PIPE_W as f64;
    let highlight = if (8..16).contains(&x) { 40.0 } else { 0.0 };
    let shade = 1.1 - 0.5 * across;
    let lip_boost = if from_lip < PIPE_LIP { 15.0 } else { 0.0 };

    rgb(
        115.0 * shade + highlight + lip_boost,
        190.0 * shade + highlight + lip_boost,
        45.0 * shade + highlight / 2.0,
    )
}
