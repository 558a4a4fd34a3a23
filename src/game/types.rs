//! Flappy game data structures.

use crate::config::GameConfig;
use crate::constants::PIPE_COUNT;
use rand::Rng;
use std::collections::VecDeque;

/// Whether a run is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    /// Bird centered and frozen, pipes hidden, best score shown.
    #[default]
    Idle,
    /// Gravity, scrolling and collision checks active.
    Playing,
}

/// The player's bird. Its horizontal slot and size come from the config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    /// Pixels from the canvas top to the bird's top edge.
    pub y: f64,
    /// Pixels per frame, positive = downward.
    pub velocity: f64,
}

/// One top + one bottom obstacle sharing a horizontal position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipePair {
    /// Left edge, in canvas pixels.
    pub x: f64,
    /// Top of the passable gap.
    pub gap_offset: f64,
}

impl PipePair {
    /// Spawn a pair at `x` with a freshly sampled gap.
    pub fn spawn<R: Rng + ?Sized>(x: f64, config: &GameConfig, rng: &mut R) -> Self {
        Self {
            x,
            gap_offset: random_gap_offset(config, rng),
        }
    }

    /// Right edge of the pair.
    pub fn trailing_edge(&self, config: &GameConfig) -> f64 {
        self.x + config.pipe_width
    }

    /// Bottom of the passable gap.
    pub fn gap_bottom(&self, config: &GameConfig) -> f64 {
        self.gap_offset + config.pipe_gap
    }

    /// Whether the pair has scrolled fully past the left edge of the canvas.
    pub fn is_off_screen(&self, config: &GameConfig) -> bool {
        self.x <= -config.pipe_width
    }
}

/// Sample a gap offset so the gap, with a pipe-width margin on both sides,
/// always fits inside the canvas.
pub fn random_gap_offset<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> f64 {
    let span = config.canvas_height - (config.pipe_gap + config.pipe_width) - config.pipe_width;
    rng.gen::<f64>() * span + config.pipe_width
}

/// Main game state. One value per game instance; nothing is global.
#[derive(Debug, Clone)]
pub struct FlappyGame {
    pub config: GameConfig,
    pub state: PlayState,
    pub bird: Bird,
    /// Always `PIPE_COUNT` pairs, oldest first.
    pub pipes: VecDeque<PipePair>,
    /// Pipes passed in the current run.
    pub score: u32,
    /// Highest score ever reached, including earlier sessions.
    pub best_score: u32,
    /// Monotonic frame counter driving parallax and wing animation.
    pub frame: u64,
}

impl FlappyGame {
    /// Create an idle game, already set up for its first run.
    pub fn new<R: Rng + ?Sized>(config: GameConfig, best_score: u32, rng: &mut R) -> Self {
        let mut game = Self {
            bird: Bird {
                y: config.centered_bird_y(),
                velocity: config.jump_impulse,
            },
            config,
            state: PlayState::Idle,
            pipes: VecDeque::with_capacity(PIPE_COUNT),
            score: 0,
            best_score,
            frame: 0,
        };
        super::logic::setup(&mut game, rng);
        game
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    /// Index of the wing-flap sprite for the current frame.
    pub fn flap_frame(&self) -> u64 {
        use crate::constants::{BIRD_FLAP_FRAMES, BIRD_FLAP_HOLD};
        (self.frame % (BIRD_FLAP_FRAMES * BIRD_FLAP_HOLD)) / BIRD_FLAP_HOLD
    }

    /// Horizontal scroll of the background, in `(-canvas_width, 0]`.
    pub fn background_offset(&self) -> f64 {
        let width = self.config.canvas_width;
        (-(self.frame as f64 * (self.config.scroll_speed / 2.0)) % width).floor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_game_defaults() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let game = FlappyGame::new(GameConfig::default(), 9, &mut rng);
        assert_eq!(game.state, PlayState::Idle);
        assert_eq!(game.score, 0);
        assert_eq!(game.best_score, 9);
        assert_eq!(game.frame, 0);
        assert_eq!(game.pipes.len(), PIPE_COUNT);
        assert_eq!(game.bird.y, 366.0);
        assert_eq!(game.bird.velocity, game.config.jump_impulse);
    }

    #[test]
    fn test_gap_offset_bounds() {
        let config = GameConfig::default();
        let (low, high) = config.gap_offset_bounds();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..10_000 {
            let offset = random_gap_offset(&config, &mut rng);
            assert!(offset >= low, "offset {offset} below {low}");
            assert!(offset <= high, "offset {offset} above {high}");
        }
    }

    #[test]
    fn test_pipe_geometry() {
        let config = GameConfig::default();
        let pipe = PipePair {
            x: 100.0,
            gap_offset: 200.0,
        };
        assert_eq!(pipe.trailing_edge(&config), 178.0);
        assert_eq!(pipe.gap_bottom(&config), 470.0);
        assert!(!pipe.is_off_screen(&config));

        let gone = PipePair { x: -78.0, ..pipe };
        assert!(gone.is_off_screen(&config));
        let almost = PipePair { x: -77.9, ..pipe };
        assert!(!almost.is_off_screen(&config));
    }

    #[test]
    fn test_flap_frame_cycles_every_nine_frames() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut game = FlappyGame::new(GameConfig::default(), 0, &mut rng);
        let frames: Vec<u64> = (0..12)
            .map(|f| {
                game.frame = f;
                game.flap_frame()
            })
            .collect();
        assert_eq!(frames, vec![0, 0, 0, 1, 1, 1, 2, 2, 2, 0, 0, 0]);
    }

    #[test]
    fn test_background_offset_wraps() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut game = FlappyGame::new(GameConfig::default(), 0, &mut rng);
        assert_eq!(game.background_offset(), 0.0);

        game.frame = 10; // 10 * 3.1 = 31
        assert_eq!(game.background_offset(), -31.0);

        for frame in [139, 140, 1_000, 123_457] {
            game.frame = frame;
            let offset = game.background_offset();
            assert!(offset <= 0.0 && offset > -game.config.canvas_width - 1.0);
        }
    }
}
