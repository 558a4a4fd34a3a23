//! Game configuration.

use crate::constants::*;
use crate::utils::persistence::load_json_or_default;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Tunables for one game instance. Every field falls back to the reference
/// value when missing from the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Canvas width in logical pixels
    pub canvas_width: f64,

    /// Canvas height in logical pixels
    pub canvas_height: f64,

    /// Velocity added to the bird every frame
    pub gravity: f64,

    /// Horizontal pipe movement per frame
    pub scroll_speed: f64,

    /// Velocity the bird is set to on every click (negative = upward)
    pub jump_impulse: f64,

    pub bird_width: f64,
    pub bird_height: f64,

    pub pipe_width: f64,

    /// Height of the passable gap between a pipe pair's segments
    pub pipe_gap: f64,

    /// Display refresh rate the terminal host paces frames at
    pub fps: u32,

    /// PNG sprite sheet; the built-in sheet is used when unset
    pub sprite_sheet: Option<PathBuf>,

    /// Seed for the gap-offset generator (None = random)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            gravity: GRAVITY,
            scroll_speed: SCROLL_SPEED,
            jump_impulse: JUMP_IMPULSE,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            fps: TARGET_FPS,
            sprite_sheet: None,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load `~/.flappy/config.json`, falling back to defaults when the file is
    /// missing or invalid.
    pub fn load() -> Self {
        load_json_or_default::<Self>(CONFIG_FILE).sanitized()
    }

    /// Check that the geometry and physics describe a playable game.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("bird_width", self.bird_width),
            ("bird_height", self.bird_height),
            ("pipe_width", self.pipe_width),
            ("pipe_gap", self.pipe_gap),
            ("scroll_speed", self.scroll_speed),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{} must be a positive number, got {}", name, value));
            }
        }
        for (name, value) in [("gravity", self.gravity), ("jump_impulse", self.jump_impulse)] {
            if !value.is_finite() {
                return Err(format!("{} must be finite, got {}", name, value));
            }
        }

        if self.canvas_width > MAX_CANVAS_SIZE || self.canvas_height > MAX_CANVAS_SIZE {
            return Err(format!(
                "canvas {}x{} exceeds {}x{}",
                self.canvas_width, self.canvas_height, MAX_CANVAS_SIZE, MAX_CANVAS_SIZE
            ));
        }
        if self.bird_height > self.canvas_height || self.bird_width > self.canvas_width {
            return Err("bird does not fit on the canvas".to_string());
        }

        // The gap plus a pipe-width margin on each side must fit vertically
        let (low, high) = self.gap_offset_bounds();
        if high < low {
            return Err(format!(
                "canvas_height {} leaves no room for pipe_gap {} with pipe_width {} margins",
                self.canvas_height, self.pipe_gap, self.pipe_width
            ));
        }
        Ok(())
    }

    /// `self` when valid, otherwise the reference geometry and physics with
    /// this config's frame rate, sprite sheet and seed.
    pub fn sanitized(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(reason) => {
                tracing::warn!(%reason, "unusable game config, using reference geometry");
                Self {
                    fps: self.fps,
                    sprite_sheet: self.sprite_sheet,
                    seed: self.seed,
                    ..Self::default()
                }
            }
        }
    }

    /// Horizontal distance between consecutive pipe pairs at spawn.
    pub fn pipe_interval(&self) -> f64 {
        self.pipe_gap + self.pipe_width
    }

    /// The bird's fixed horizontal slot while playing (one tenth of the width).
    pub fn bird_slot(&self) -> f64 {
        self.canvas_width / 10.0
    }

    /// Lowest allowed bird position (bird resting on the canvas floor).
    pub fn max_bird_y(&self) -> f64 {
        self.canvas_height - self.bird_height
    }

    /// Bird position that centers it vertically.
    pub fn centered_bird_y(&self) -> f64 {
        self.canvas_height / 2.0 - self.bird_height / 2.0
    }

    /// Inclusive bounds a freshly sampled gap offset falls within.
    pub fn gap_offset_bounds(&self) -> (f64, f64) {
        (
            self.pipe_width,
            self.canvas_height - self.pipe_gap - self.pipe_width,
        )
    }

    /// Time between two display refreshes.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }
}
