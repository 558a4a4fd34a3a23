//! Flappy - terminal side-scroller library
//!
//! This module exposes the game loop, rendering and persistence for the
//! binary and for testing.

pub mod app;
pub mod config;
pub mod constants;
pub mod core;
pub mod game;
pub mod input;
pub mod render;
pub mod ui;
pub mod utils;
