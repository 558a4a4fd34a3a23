//! Shows the pixel canvas in the terminal.
//!
//! Two vertical pixels share one terminal cell via `▀` (fg = top pixel,
//! bg = bottom pixel), which also makes the pixels roughly square. The canvas
//! is box-filtered down to the cell grid, keeping its aspect ratio.

use crate::render::{PixelCanvas, TextOverlay};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const HALF_TOP: char = '\u{2580}';
/// Samples per cell half, along each axis.
const SUBSAMPLES: u32 = 2;

/// Largest area inside `area` with the canvas aspect ratio, centered.
pub fn fit_viewport(area: Rect, canvas_width: u32, canvas_height: u32) -> Rect {
    if area.width == 0 || area.height == 0 || canvas_width == 0 || canvas_height == 0 {
        return Rect::new(area.x, area.y, 0, 0);
    }

    // One cell is one pixel wide and two pixels tall
    let scale = (area.width as f64 / canvas_width as f64)
        .min(area.height as f64 * 2.0 / canvas_height as f64);
    let cols = ((canvas_width as f64 * scale).round() as u16).clamp(1, area.width);
    let rows = ((canvas_height as f64 * scale / 2.0).round() as u16).clamp(1, area.height);

    Rect::new(
        area.x + (area.width - cols) / 2,
        area.y + (area.height - rows) / 2,
        cols,
        rows,
    )
}

/// Average color of the canvas pixels in `[x0, x1) x [y0, y1)`.
fn sample_box(canvas: &PixelCanvas, x0: f64, x1: f64, y0: f64, y1: f64) -> Color {
    let mut sum = [0u32; 3];
    let mut count = 0u32;
    for j in 0..SUBSAMPLES {
        let y = y0 + (j as f64 + 0.5) / SUBSAMPLES as f64 * (y1 - y0);
        for i in 0..SUBSAMPLES {
            let x = x0 + (i as f64 + 0.5) / SUBSAMPLES as f64 * (x1 - x0);
            if let Some(px) = canvas.pixel(x as u32, y as u32) {
                for c in 0..3 {
                    sum[c] += px[c] as u32;
                }
                count += 1;
            }
        }
    }
    if count == 0 {
        return Color::Rgb(0, 0, 0);
    }
    Color::Rgb(
        (sum[0] / count) as u8,
        (sum[1] / count) as u8,
        (sum[2] / count) as u8,
    )
}

/// Downsample the canvas to `cols x rows` cells of (top, bottom) colors.
pub fn rasterize(canvas: &PixelCanvas, cols: u16, rows: u16) -> Vec<Vec<(Color, Color)>> {
    let cw = canvas.pixel_width() as f64;
    let ch = canvas.pixel_height() as f64;
    let cell_w = cw / cols.max(1) as f64;
    let half_h = ch / (rows.max(1) as f64 * 2.0);

    (0..rows)
        .map(|row| {
            let top_y = row as f64 * 2.0 * half_h;
            let bottom_y = top_y + half_h;
            (0..cols)
                .map(|col| {
                    let x0 = col as f64 * cell_w;
                    let x1 = x0 + cell_w;
                    (
                        sample_box(canvas, x0, x1, top_y, bottom_y),
                        sample_box(canvas, x0, x1, bottom_y, bottom_y + half_h),
                    )
                })
                .collect()
        })
        .collect()
}

/// Cell where an overlay's text starts. Canvas text is positioned by its
/// baseline, so the text sits on the row just above it.
pub fn overlay_cell(viewport: Rect, canvas: &PixelCanvas, overlay: &TextOverlay) -> (u16, u16) {
    let sx = viewport.width as f64 / canvas.pixel_width() as f64;
    let sy = viewport.height as f64 / canvas.pixel_height() as f64;
    let col = (overlay.x * sx).floor().max(0.0) as u16;
    let row = ((overlay.y * sy).ceil() as u16).saturating_sub(1);
    (
        viewport.x + col.min(viewport.width.saturating_sub(1)),
        viewport.y + row.min(viewport.height.saturating_sub(1)),
    )
}

pub fn render_canvas(frame: &mut Frame, area: Rect, canvas: &PixelCanvas) {
    let viewport = fit_viewport(area, canvas.pixel_width(), canvas.pixel_height());
    if viewport.width == 0 || viewport.height == 0 {
        return;
    }

    for (row, cells) in rasterize(canvas, viewport.width, viewport.height)
        .into_iter()
        .enumerate()
    {
        // Batch consecutive cells with the same colors
        let mut spans: Vec<Span> = Vec::new();
        let mut cur: Option<(Color, Color)> = None;
        let mut text = String::new();
        for cell in cells {
            if cur != Some(cell) {
                if let Some((fg, bg)) = cur {
                    spans.push(Span::styled(
                        std::mem::take(&mut text),
                        Style::default().fg(fg).bg(bg),
                    ));
                }
                cur = Some(cell);
            }
            text.push(HALF_TOP);
        }
        if let Some((fg, bg)) = cur {
            spans.push(Span::styled(text, Style::default().fg(fg).bg(bg)));
        }

        let line = Paragraph::new(Line::from(spans));
        frame.render_widget(
            line,
            Rect::new(viewport.x, viewport.y + row as u16, viewport.width, 1),
        );
    }

    for overlay in canvas.texts() {
        let (x, y) = overlay_cell(viewport, canvas, overlay);
        let width = (viewport.x + viewport.width).saturating_sub(x);
        let mut style = Style::default().fg(Color::White).bg(Color::Black);
        if overlay.font.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        let text = Paragraph::new(Span::styled(overlay.text.as_str(), style));
        frame.render_widget(text, Rect::new(x, y, width, 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Font, Surface};

    #[test]
    fn test_fit_viewport_keeps_aspect() {
        // Height-bound: 40 rows hold 80 pixel rows
        let vp = fit_viewport(Rect::new(0, 0, 100, 40), 431, 768);
        assert_eq!(vp.height, 40);
        assert_eq!(vp.width, 45);
        assert_eq!(vp.x, 27);

        // Width-bound
        let vp = fit_viewport(Rect::new(2, 3, 20, 100), 431, 768);
        assert_eq!(vp.width, 20);
        assert_eq!(vp.height, 18);
        assert_eq!(vp.x, 2);
    }

    #[test]
    fn test_fit_viewport_empty_area() {
        let vp = fit_viewport(Rect::new(5, 5, 0, 10), 431, 768);
        assert_eq!((vp.width, vp.height), (0, 0));
    }

    #[test]
    fn test_rasterize_averages_halves() {
        // 2x4 canvas, blank; one cell covers it, top and bottom halves 2x2 each
        let canvas = PixelCanvas::new(2, 4);
        let cells = rasterize(&canvas, 1, 1);
        assert_eq!(cells, vec![vec![(Color::Rgb(0, 0, 0), Color::Rgb(0, 0, 0))]]);
    }

    #[test]
    fn test_overlay_cell_scales() {
        let mut canvas = PixelCanvas::new(431, 768);
        let font = Font {
            bold: true,
            size_px: 30,
            family: "courier",
        };
        canvas.fill_text("Click to play", 48.0, 535.0, &font);
        let vp = Rect::new(10, 2, 43, 38);

        let (x, y) = overlay_cell(vp, &canvas, &canvas.texts()[0]);
        // 48 * 43/431 = 4.79; 535 * 38/768 = 26.47 -> row 26
        assert_eq!((x, y), (14, 28));
    }
}
