//! Game logic: state transitions, per-frame physics and collision.

use super::types::{Bird, FlappyGame, PipePair, PlayState};
use crate::config::GameConfig;
use crate::constants::PIPE_COUNT;
use crate::utils::persistence::{write_best_score, ScoreStore};
use rand::Rng;

/// What happened during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Pipe pairs passed (and recycled) this frame
    pub scored: u32,
    /// The bird hit a pipe and the run was reset
    pub lost: bool,
}

/// Reset the run: score, bird and a fresh set of pipes.
pub fn setup<R: Rng + ?Sized>(game: &mut FlappyGame, rng: &mut R) {
    let config = &game.config;
    game.score = 0;
    game.bird = Bird {
        y: config.centered_bird_y(),
        velocity: config.jump_impulse,
    };
    game.pipes = (0..PIPE_COUNT)
        .map(|i| PipePair::spawn(config.canvas_width + i as f64 * config.pipe_interval(), config, rng))
        .collect();
}

/// A pipe pair has been passed: bump the score and recycle the oldest pair.
pub fn on_score<R: Rng + ?Sized>(game: &mut FlappyGame, rng: &mut R) {
    game.score += 1;
    game.best_score = game.best_score.max(game.score);

    let next_x = match game.pipes.back() {
        Some(last) => last.x + game.config.pipe_interval(),
        None => game.config.canvas_width,
    };
    game.pipes.pop_front();
    game.pipes.push_back(PipePair::spawn(next_x, &game.config, rng));

    tracing::debug!(score = game.score, next_x, "pipe recycled");
}

/// The bird crashed: go idle, persist the best score and reset.
///
/// A failed store write is logged; the game carries on either way.
pub fn on_lose<R: Rng + ?Sized, S: ScoreStore + ?Sized>(
    game: &mut FlappyGame,
    rng: &mut R,
    store: &mut S,
) {
    tracing::info!(score = game.score, best = game.best_score, "run lost");
    game.state = PlayState::Idle;
    if let Err(e) = write_best_score(store, game.best_score) {
        tracing::warn!(error = %e, "failed to persist best score");
    }
    setup(game, rng);
}

/// Click listener: start a run.
pub fn start(game: &mut FlappyGame) {
    if game.state == PlayState::Idle {
        tracing::info!(best = game.best_score, "run started");
    }
    game.state = PlayState::Playing;
}

/// Click listener: upward kick.
pub fn jump(game: &mut FlappyGame) {
    game.bird.velocity = game.config.jump_impulse;
}

/// Pure collision test between the bird and one pipe pair.
///
/// Collides when the pair overlaps the bird's slot horizontally AND the bird is
/// not fully inside the gap. Boundary equality counts as a hit.
pub fn collides(
    pipe: &PipePair,
    bird_slot: f64,
    bird_y: f64,
    bird_size: (f64, f64),
    pipe_width: f64,
    pipe_gap: f64,
) -> bool {
    let (bird_width, bird_height) = bird_size;
    [
        pipe.x <= bird_slot + bird_width,
        pipe.x + pipe_width >= bird_slot,
        pipe.gap_offset >= bird_y || pipe.gap_offset + pipe_gap <= bird_y + bird_height,
    ]
    .iter()
    .all(|&cond| cond)
}

/// `collides` with the bird's current position and the game's config.
pub fn bird_hits_pipe(game: &FlappyGame, pipe: &PipePair) -> bool {
    let config: &GameConfig = &game.config;
    collides(
        pipe,
        config.bird_slot(),
        game.bird.y,
        (config.bird_width, config.bird_height),
        config.pipe_width,
        config.pipe_gap,
    )
}

/// Advance the simulation by one display refresh.
///
/// Idle frames only advance the frame counter. Playing frames integrate the
/// bird, scroll the pipes, score pairs that left the canvas and end the run on
/// collision.
pub fn process_tick<R: Rng + ?Sized, S: ScoreStore + ?Sized>(
    game: &mut FlappyGame,
    rng: &mut R,
    store: &mut S,
) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    game.frame += 1;

    if game.state != PlayState::Playing {
        return outcome;
    }

    // Bird physics, clamped to the canvas
    game.bird.velocity += game.config.gravity;
    game.bird.y = (game.bird.y + game.bird.velocity)
        .min(game.config.max_bird_y())
        .max(0.0);

    // Scroll
    let speed = game.config.scroll_speed;
    for pipe in game.pipes.iter_mut() {
        pipe.x -= speed;
    }

    // Recycled pairs were never moved this frame, so at most every current
    // pair can leave the canvas.
    for _ in 0..game.pipes.len() {
        let off_screen = game
            .pipes
            .front()
            .is_some_and(|front| front.is_off_screen(&game.config));
        if !off_screen {
            break;
        }
        on_score(game, rng);
        outcome.scored += 1;
    }

    if game.pipes.iter().any(|pipe| bird_hits_pipe(game, pipe)) {
        on_lose(game, rng, store);
        outcome.lost = true;
    }

    outcome
}
