pub mod canvas_view;
pub mod game_common;

use crate::game::{FlappyGame, PlayState};
use crate::render::PixelCanvas;
use game_common::{create_game_layout, render_info_panel_frame, render_status_bar};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const CONTROLS: [(&str, &str); 2] = [("[Click/Space]", "Flap"), ("[Esc/Q]", "Quit")];

/// Draw the whole screen: canvas, status bar and info panel.
pub fn draw_ui(frame: &mut Frame, game: &FlappyGame, canvas: &PixelCanvas) {
    let layout = create_game_layout(frame, frame.size(), " Flappy ", Color::Cyan, 10, 22);

    canvas_view::render_canvas(frame, layout.content, canvas);
    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game);
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &FlappyGame) {
    match game.state {
        PlayState::Idle => render_status_bar(
            frame,
            area,
            "Click to play",
            Color::Yellow,
            &CONTROLS,
        ),
        PlayState::Playing => render_status_bar(
            frame,
            area,
            &format!("Score: {}", game.score),
            Color::Green,
            &CONTROLS,
        ),
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &FlappyGame) {
    let inner = render_info_panel_frame(frame, area);

    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let (state_text, state_color) = match game.state {
        PlayState::Idle => ("Idle", Color::Yellow),
        PlayState::Playing => ("Playing", Color::Green),
    };

    let lines = vec![
        Line::from(Span::styled(
            " Flappy ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", game.score),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Best: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", game.best_score),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" State: ", Style::default().fg(Color::DarkGray)),
            Span::styled(state_text, Style::default().fg(state_color)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::render::{draw_scene, SpriteSheet, Surface};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(game: &FlappyGame) -> String {
        let mut canvas = PixelCanvas::new(431, 768);
        canvas.begin_frame();
        draw_scene(&mut canvas, &SpriteSheet::procedural(), game);

        let mut terminal = Terminal::new(TestBackend::new(100, 45)).unwrap();
        terminal.draw(|frame| draw_ui(frame, game, &canvas)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_idle_screen_shows_prompt_and_best() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let game = FlappyGame::new(GameConfig::default(), 23, &mut rng);
        let text = screen_text(&game);

        assert!(text.contains("Best score: 23"));
        assert!(text.contains("Click to play"));
        assert!(text.contains(" Best: 23"));
        assert!(text.contains("Idle"));
    }

    #[test]
    fn test_playing_screen_shows_score() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut game = FlappyGame::new(GameConfig::default(), 3, &mut rng);
        game.state = PlayState::Playing;
        game.score = 7;
        let text = screen_text(&game);

        assert!(text.contains("Score: 7"));
        assert!(text.contains("Playing"));
        assert!(!text.contains("Best score:"));
    }
}
