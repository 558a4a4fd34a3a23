//! One game session: simulation, input listeners, persistence and drawing.

use crate::config::GameConfig;
use crate::core::{ClickBus, HostEvent, Subscription};
use crate::game::{jump, process_tick, start, FlappyGame, TickOutcome};
use crate::render::{draw_scene, PixelCanvas, SpriteSheet, Surface};
use crate::utils::persistence::{read_best_score, ScoreStore};
use rand::Rng;

/// Owns everything a running game needs. Constructing it requires a loaded
/// sprite sheet, so no frame runs before the assets are ready.
pub struct FlappyApp<R: Rng, S: ScoreStore> {
    game: FlappyGame,
    rng: R,
    store: S,
    sheet: SpriteSheet,
    canvas: PixelCanvas,
    clicks: ClickBus,
    /// Start and jump listeners, registered for the app's lifetime
    _listeners: [Subscription; 2],
}

impl<R: Rng, S: ScoreStore> FlappyApp<R, S> {
    /// An unusable `config` is replaced by the reference geometry.
    pub fn new(config: GameConfig, sheet: SpriteSheet, store: S, mut rng: R) -> Self {
        let config = config.sanitized();
        let best_score = read_best_score(&store);
        tracing::info!(best_score, "session started");

        let canvas = PixelCanvas::new(
            config.canvas_width.round().max(1.0) as u32,
            config.canvas_height.round().max(1.0) as u32,
        );
        let game = FlappyGame::new(config, best_score, &mut rng);

        let clicks = ClickBus::new();
        let listeners = [clicks.subscribe(start), clicks.subscribe(jump)];

        Self {
            game,
            rng,
            store,
            sheet,
            canvas,
            clicks,
            _listeners: listeners,
        }
    }

    /// Deliver one click to the registered listeners.
    pub fn click(&mut self) {
        self.clicks.dispatch(&mut self.game);
    }

    /// Handle the input of one refresh, advance the simulation, redraw.
    pub fn frame(&mut self, events: &[HostEvent]) -> TickOutcome {
        for event in events {
            if *event == HostEvent::Click {
                self.click();
            }
        }

        let outcome = process_tick(&mut self.game, &mut self.rng, &mut self.store);

        self.canvas.begin_frame();
        draw_scene(&mut self.canvas, &self.sheet, &self.game);
        outcome
    }

    pub fn game(&self) -> &FlappyGame {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut FlappyGame {
        &mut self.game
    }

    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
