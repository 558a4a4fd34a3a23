// Canvas (reference configuration)
pub const CANVAS_WIDTH: f64 = 431.0;
pub const CANVAS_HEIGHT: f64 = 768.0;

// Physics, in pixels per frame
pub const GRAVITY: f64 = 0.5;
pub const SCROLL_SPEED: f64 = 6.2;
pub const JUMP_IMPULSE: f64 = -11.5;

// Bird
pub const BIRD_WIDTH: f64 = 51.0;
pub const BIRD_HEIGHT: f64 = 36.0;
/// Number of wing-flap frames in the sprite sheet.
pub const BIRD_FLAP_FRAMES: u64 = 3;
/// Consecutive frames each flap sprite is held for.
pub const BIRD_FLAP_HOLD: u64 = 3;

// Pipes
pub const PIPE_WIDTH: f64 = 78.0;
pub const PIPE_GAP: f64 = 270.0;
pub const PIPE_COUNT: usize = 3;

// Largest canvas side accepted from the config file
pub const MAX_CANVAS_SIZE: f64 = 4096.0;

// Frame pacing
pub const TARGET_FPS: u32 = 60;

// Persistence
pub const BEST_SCORE_KEY: &str = "flappy best";
pub const SAVE_DIR_NAME: &str = ".flappy";
pub const STORAGE_FILE: &str = "storage.json";
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "flappy.log";

// Idle screen text, positioned in canvas pixels
pub const BEST_SCORE_TEXT_POS: (f64, f64) = (55.0, 245.0);
pub const PLAY_PROMPT_TEXT_POS: (f64, f64) = (48.0, 535.0);
pub const PLAY_PROMPT_TEXT: &str = "Click to play";
