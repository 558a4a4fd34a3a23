//! Integration test: best score persistence across sessions
//!
//! Each test uses its own JSON store file under the system temp directory.

use flappy::app::FlappyApp;
use flappy::config::GameConfig;
use flappy::constants::BEST_SCORE_KEY;
use flappy::core::HostEvent;
use flappy::game::{on_score, PlayState};
use flappy::render::SpriteSheet;
use flappy::utils::persistence::{read_best_score, JsonFileStore, ScoreStore};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::{Path, PathBuf};

fn temp_store(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("flappy-it-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::remove_file(&path).ok();
    path
}

fn session(path: &Path, seed: u64) -> FlappyApp<ChaCha8Rng, JsonFileStore> {
    FlappyApp::new(
        GameConfig::default(),
        SpriteSheet::procedural(),
        JsonFileStore::open(path),
        ChaCha8Rng::seed_from_u64(seed),
    )
}

/// Start a run, pass `points` pipes, then crash into the floor.
fn play_and_lose(app: &mut FlappyApp<ChaCha8Rng, JsonFileStore>, points: u32) {
    app.frame(&[HostEvent::Click]);
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..points {
        on_score(app.game_mut(), &mut rng);
    }
    while app.game().is_playing() {
        app.frame(&[]);
    }
}

#[test]
fn test_best_score_survives_reload() {
    let path = temp_store("reload.json");

    let mut first = session(&path, 1);
    assert_eq!(first.game().best_score, 0);
    play_and_lose(&mut first, 4);
    assert_eq!(first.game().state, PlayState::Idle);
    assert_eq!(first.game().score, 0);
    assert_eq!(first.game().pipes.len(), 3);

    let reopened = JsonFileStore::open(&path);
    assert_eq!(reopened.get(BEST_SCORE_KEY).as_deref(), Some("4"));

    let second = session(&path, 2);
    assert_eq!(second.game().best_score, 4);

    fs::remove_file(&path).ok();
}

#[test]
fn test_best_score_never_decreases_across_sessions() {
    let path = temp_store("monotonic.json");

    let mut first = session(&path, 1);
    play_and_lose(&mut first, 6);
    drop(first);

    let mut second = session(&path, 2);
    play_and_lose(&mut second, 2);
    assert_eq!(second.game().best_score, 6);
    drop(second);

    let third = session(&path, 3);
    assert_eq!(read_best_score(third.store()), 6);

    fs::remove_file(&path).ok();
}

#[test]
fn test_garbage_value_reads_as_zero() {
    let path = temp_store("garbage.json");
    fs::write(&path, r#"{ "flappy best": "lots" }"#).unwrap();

    let mut app = session(&path, 1);
    assert_eq!(app.game().best_score, 0);

    play_and_lose(&mut app, 1);
    assert_eq!(
        JsonFileStore::open(&path).get(BEST_SCORE_KEY).as_deref(),
        Some("1")
    );

    fs::remove_file(&path).ok();
}

#[test]
fn test_unwritable_store_does_not_stop_play() {
    // The store path is a directory, so every write fails
    let dir = temp_store("as-dir.json");
    fs::create_dir_all(&dir).unwrap();

    let mut app = session(&dir, 1);
    play_and_lose(&mut app, 3);
    assert_eq!(app.game().state, PlayState::Idle);
    assert_eq!(app.game().best_score, 3);

    app.frame(&[HostEvent::Click]);
    assert!(app.game().is_playing());

    fs::remove_dir_all(&dir).ok();
}
