//! Draws one frame of the game onto a `Surface`.

use super::sprites::{
    SpriteSheet, BACKGROUND_WIDTH, BIRD_FRAME_HEIGHT, BIRD_FRAME_WIDTH, BIRD_SPRITE_X,
    BOTTOM_PIPE_X, BOTTOM_PIPE_Y, SHEET_HEIGHT, TOP_PIPE_END_Y, TOP_PIPE_X,
};
use super::surface::{Font, Rect, Surface};
use crate::constants::{BEST_SCORE_TEXT_POS, PLAY_PROMPT_TEXT, PLAY_PROMPT_TEXT_POS};
use crate::game::{FlappyGame, PipePair};

/// Font of the idle screen text.
pub const PROMPT_FONT: Font = Font {
    bold: true,
    size_px: 30,
    family: "courier",
};

pub fn best_score_text(best: u32) -> String {
    format!("Best score: {}", best)
}

/// Background, bird, then either the idle text or the pipes.
pub fn draw_scene<S: Surface + ?Sized>(surface: &mut S, sheet: &SpriteSheet, game: &FlappyGame) {
    let config = &game.config;
    let (width, height) = (config.canvas_width, config.canvas_height);

    // Two copies side by side cover the canvas at any scroll offset
    let offset = game.background_offset();
    let background = Rect::new(0.0, 0.0, BACKGROUND_WIDTH as f64, SHEET_HEIGHT as f64);
    for x in [offset, offset + width] {
        surface.draw_image(sheet, background, Rect::new(x, 0.0, width, height));
    }

    // Atlas frames have a fixed size; the config only scales the destination
    let bird_src = Rect::new(
        BIRD_SPRITE_X,
        game.flap_frame() as f64 * BIRD_FRAME_HEIGHT,
        BIRD_FRAME_WIDTH,
        BIRD_FRAME_HEIGHT,
    );
    let bird_x = if game.is_playing() {
        config.bird_slot() - config.bird_width / 2.0
    } else {
        width / 2.0 - config.bird_width / 2.0
    };
    surface.draw_image(
        sheet,
        bird_src,
        Rect::new(bird_x, game.bird.y, config.bird_width, config.bird_height),
    );

    if !game.is_playing() {
        let (bx, by) = BEST_SCORE_TEXT_POS;
        surface.fill_text(&best_score_text(game.best_score), bx, by, &PROMPT_FONT);
        let (px, py) = PLAY_PROMPT_TEXT_POS;
        surface.fill_text(PLAY_PROMPT_TEXT, px, py, &PROMPT_FONT);
        return;
    }

    for pipe in &game.pipes {
        draw_pipe_pair(surface, sheet, game, pipe);
    }
}

fn draw_pipe_pair<S: Surface + ?Sized>(
    surface: &mut S,
    sheet: &SpriteSheet,
    game: &FlappyGame,
    pipe: &PipePair,
) {
    let config = &game.config;
    let pipe_width = config.pipe_width;

    // Top pipe: the lower end of the column, as tall as the gap offset
    surface.draw_image(
        sheet,
        Rect::new(TOP_PIPE_X, TOP_PIPE_END_Y - pipe.gap_offset, pipe_width, pipe.gap_offset),
        Rect::new(pipe.x, 0.0, pipe_width, pipe.gap_offset),
    );

    // Bottom pipe: the upper end of the column, down to the canvas bottom
    let gap_bottom = pipe.gap_bottom(config);
    let bottom_height = config.canvas_height - gap_bottom;
    surface.draw_image(
        sheet,
        Rect::new(BOTTOM_PIPE_X, BOTTOM_PIPE_Y, pipe_width, bottom_height),
        Rect::new(pipe.x, gap_bottom, pipe_width, bottom_height),
    );
}
