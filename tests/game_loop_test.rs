//! Integration test: frame loop driving a full game session
//!
//! Runs `FlappyApp` under a scripted scheduler: idle frames, clicks, falls,
//! losses and resets, checking the state invariants on every frame.

use flappy::app::FlappyApp;
use flappy::config::GameConfig;
use flappy::core::{FrameLoop, HostEvent, ScriptedScheduler};
use flappy::game::{FlappyGame, PlayState};
use flappy::render::SpriteSheet;
use flappy::utils::persistence::{read_best_score, write_best_score, MemoryStore};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn new_app(seed: u64, store: MemoryStore) -> FlappyApp<ChaCha8Rng, MemoryStore> {
    FlappyApp::new(
        GameConfig::default(),
        SpriteSheet::procedural(),
        store,
        ChaCha8Rng::seed_from_u64(seed),
    )
}

fn assert_invariants(game: &FlappyGame) {
    let config = &game.config;
    assert_eq!(game.pipes.len(), 3);
    assert!(game.bird.y >= 0.0 && game.bird.y <= config.max_bird_y(), "bird y {}", game.bird.y);

    let (low, high) = config.gap_offset_bounds();
    for pair in game.pipes.iter().zip(game.pipes.iter().skip(1)) {
        let spacing = pair.1.x - pair.0.x;
        assert!((spacing - config.pipe_interval()).abs() < 1e-6, "spacing {spacing}");
    }
    for pipe in &game.pipes {
        assert!(pipe.gap_offset >= low && pipe.gap_offset <= high);
    }
}

/// Flap whenever the bird sinks below the gap of the next pipe.
fn autopilot_wants_flap(game: &FlappyGame) -> bool {
    let config = &game.config;
    let target = game
        .pipes
        .iter()
        .find(|pipe| pipe.trailing_edge(config) >= config.bird_slot())
        .map(|pipe| pipe.gap_bottom(config) - config.bird_height - 40.0)
        .unwrap_or(config.centered_bird_y());
    game.bird.y > target && game.bird.velocity >= 0.0
}

// =============================================================================
// Idle
// =============================================================================

#[test]
fn test_idle_frames_only_advance_counter() {
    let mut app = new_app(1, MemoryStore::new());
    let start_pipes = app.game().pipes.clone();

    let mut frame_loop = FrameLoop::new();
    let mut scheduler = ScriptedScheduler::idle(120);
    let ran = frame_loop
        .run(&mut scheduler, |events| {
            app.frame(events);
            Ok(())
        })
        .unwrap();

    assert_eq!(ran, 120);
    let game = app.game();
    assert_eq!(game.frame, 120);
    assert_eq!(game.state, PlayState::Idle);
    assert_eq!(game.bird.y, 366.0);
    assert_eq!(game.pipes, start_pipes);
}

#[test]
fn test_fresh_session_layout() {
    let app = new_app(2, MemoryStore::new());
    let xs: Vec<f64> = app.game().pipes.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![431.0, 779.0, 1127.0]);
    assert_eq!(app.game().bird.y, 366.0);
}

// =============================================================================
// Loss and reset
// =============================================================================

#[test]
fn test_single_click_falls_and_resets() {
    let mut store = MemoryStore::new();
    write_best_score(&mut store, 7).unwrap();
    let mut app = new_app(3, store);

    let mut script = vec![vec![HostEvent::Click]];
    script.extend(std::iter::repeat_with(Vec::new).take(300));
    let mut scheduler = ScriptedScheduler::new(script);

    let mut losses = 0;
    let mut frame_loop = FrameLoop::new();
    frame_loop
        .run(&mut scheduler, |events| {
            if app.frame(events).lost {
                losses += 1;
            }
            assert_invariants(app.game());
            Ok(())
        })
        .unwrap();

    // The bird ends up on the floor, below every possible gap
    assert_eq!(losses, 1);

    let game = app.game();
    assert_eq!(game.state, PlayState::Idle);
    assert_eq!(game.score, 0);
    assert_eq!(game.bird.y, 366.0);
    assert_eq!(game.best_score, 7);
    let xs: Vec<f64> = game.pipes.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![431.0, 779.0, 1127.0]);
    assert_eq!(read_best_score(app.store()), 7);
}

#[test]
fn test_click_after_loss_starts_new_run() {
    let mut app = new_app(4, MemoryStore::new());
    app.frame(&[HostEvent::Click]);
    while app.game().is_playing() {
        app.frame(&[]);
    }

    app.frame(&[HostEvent::Click]);
    assert_eq!(app.game().state, PlayState::Playing);
    assert_eq!(app.game().bird.velocity, -11.0);
}

// =============================================================================
// Long runs
// =============================================================================

#[test]
fn test_autopilot_run_keeps_invariants() {
    let mut app = new_app(5, MemoryStore::new());
    let mut frame_loop = FrameLoop::new();
    let mut scheduler = ScriptedScheduler::idle(5_000);

    let mut best_seen = 0;
    let mut scored = 0;
    let mut losses = 0;
    frame_loop
        .run(&mut scheduler, |events| {
            if !app.game().is_playing() || autopilot_wants_flap(app.game()) {
                app.click();
            }
            let outcome = app.frame(events);
            scored += outcome.scored;
            losses += outcome.lost as u32;

            let game = app.game();
            assert_invariants(game);
            assert!(game.best_score >= best_seen, "best score went down");
            best_seen = game.best_score;
            Ok(())
        })
        .unwrap();

    assert!(best_seen <= scored);
    if losses > 0 {
        assert_eq!(read_best_score(app.store()), app.game().best_score);
    }
}

#[test]
fn test_separate_sessions_do_not_interfere() {
    let mut a = new_app(6, MemoryStore::new());
    let mut b = new_app(6, MemoryStore::new());

    a.frame(&[HostEvent::Click]);
    for _ in 0..10 {
        a.frame(&[]);
        b.frame(&[]);
    }

    assert_eq!(a.game().state, PlayState::Playing);
    assert_eq!(b.game().state, PlayState::Idle);
    assert_eq!(b.game().bird.y, 366.0);
    assert_ne!(a.game().pipes[0].x, b.game().pipes[0].x);
}

#[test]
fn test_stop_token_ends_session() {
    let mut app = new_app(7, MemoryStore::new());
    let mut frame_loop = FrameLoop::new();
    let stop = frame_loop.stop_token();
    let mut scheduler = ScriptedScheduler::idle(1_000);

    let ran = frame_loop
        .run(&mut scheduler, |events| {
            app.frame(events);
            if app.game().frame == 30 {
                stop.stop();
            }
            Ok(())
        })
        .unwrap();

    assert_eq!(ran, 30);
    assert_eq!(scheduler.remaining(), 970);
}
