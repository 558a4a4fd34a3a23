//! Drawing surface abstraction.

use super::sprites::SpriteSheet;
use std::fmt;

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }
}

/// Text font. Displays in CSS shorthand, e.g. `bold 30px courier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    pub bold: bool,
    pub size_px: u32,
    pub family: &'static str,
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bold {
            write!(f, "bold ")?;
        }
        write!(f, "{}px {}", self.size_px, self.family)
    }
}

/// 2D drawing context the scene is rendered into.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// Called once before each frame is drawn.
    fn begin_frame(&mut self) {}

    /// Copy `src` of the sprite sheet into `dest`, scaling as needed.
    fn draw_image(&mut self, sheet: &SpriteSheet, src: Rect, dest: Rect);

    /// Draw `text` with its baseline-left corner at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &Font);
}

/// One call made on a `RecordingSurface`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Image { src: Rect, dest: Rect },
    Text { text: String, x: f64, y: f64, font: Font },
}

/// Surface that only remembers what was drawn, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn images(&self) -> impl Iterator<Item = (Rect, Rect)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Image { src, dest } => Some((*src, *dest)),
            DrawCommand::Text { .. } => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            DrawCommand::Image { .. } => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn begin_frame(&mut self) {
        self.commands.clear();
    }

    fn draw_image(&mut self, _sheet: &SpriteSheet, src: Rect, dest: Rect) {
        self.commands.push(DrawCommand::Image { src, dest });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &Font) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            font: *font,
        });
    }
}
