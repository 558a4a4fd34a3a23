//! Rendering: sprite atlas, drawing surfaces and the scene drawer.

pub mod canvas;
pub mod scene;
pub mod sprites;
pub mod surface;

pub use canvas::{PixelCanvas, TextOverlay};
pub use scene::{draw_scene, PROMPT_FONT};
pub use sprites::SpriteSheet;
pub use surface::{DrawCommand, Font, Rect, RecordingSurface, Surface};
