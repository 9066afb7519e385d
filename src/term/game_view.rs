//! GameView: maps `core::GameState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameState;
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal view of the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell compensates for terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self { cell_w }
    }

    /// Render the current game state into a framebuffer.
    pub fn render(&self, state: &GameState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let field_w = (BOARD_WIDTH as u16) * self.cell_w;
        let field_h = BOARD_HEIGHT as u16;
        let frame_w = field_w + 2;
        let frame_h = field_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w + SIDE_PANEL_W) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let field_bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(25, 25, 35),
            bold: false,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        };

        fb.fill_rect(start_x + 1, start_y + 1, field_w, field_h, ' ', field_bg);
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        // Locked cells.
        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                if let Some(Some(kind)) = state.board().get(x, y) {
                    self.draw_board_cell(&mut fb, start_x, start_y, x as u16, y as u16, kind);
                }
            }
        }

        // Active piece; blocks still in the spawn buffer are not visible.
        let active = state.active();
        for (x, y) in active.absolute_cells() {
            if y >= 0 && y < BOARD_HEIGHT as i8 && x >= 0 && x < BOARD_WIDTH as i8 {
                self.draw_board_cell(&mut fb, start_x, start_y, x as u16, y as u16, active.kind());
            }
        }

        self.draw_side_panel(&mut fb, state, start_x + frame_w + 2, start_y);

        if state.paused() {
            self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        } else if state.game_over() {
            self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }

        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle {
            fg: kind_color(kind),
            bg: Rgb::new(25, 25, 35),
            bold: true,
        };
        let px = start_x + 1 + x * self.cell_w;
        let py = start_y + 1 + y;
        fb.fill_rect(px, py, self.cell_w, 1, '█', style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, state: &GameState, panel_x: u16, start_y: u16) {
        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        };

        let mut y = start_y + 1;
        fb.put_str(panel_x, y, "NEXT", label);
        y += 2;

        // The preview draws the piece's own offsets around a fixed anchor;
        // offsets range over -1..=2 horizontally and -2..=0 vertically.
        let next = state.next();
        let next_style = CellStyle {
            fg: kind_color(next.kind()),
            bg: Rgb::new(0, 0, 0),
            bold: true,
        };
        for &(dx, dy) in next.cells() {
            let px = panel_x as i32 + (dx as i32 + 1) * self.cell_w as i32;
            let py = y as i32 + dy as i32 + 2;
            if px >= 0 && py >= 0 {
                fb.fill_rect(px as u16, py as u16, self.cell_w, 1, '█', next_style);
            }
        }
        y += 4;

        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_str(panel_x, y + 1, &format!("{}", state.score()), value);
        y += 3;

        fb.put_str(panel_x, y, "LEVEL", label);
        fb.put_str(panel_x, y + 1, &format!("{}", state.level()), value);
        y += 3;

        fb.put_str(panel_x, y, "LINES", label);
        fb.put_str(
            panel_x,
            y + 1,
            &format!("{}", state.lines_cleared_total()),
            value,
        );
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

/// Width reserved for the side panel when centering the layout.
const SIDE_PANEL_W: u16 = 14;

/// Canonical display color per kind.
fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::Z => Rgb::new(220, 80, 80),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Action;

    fn contains_text(fb: &FrameBuffer, text: &str) -> bool {
        let chars: Vec<char> = text.chars().collect();
        for y in 0..fb.height() {
            'col: for x in 0..fb.width() {
                for (i, &ch) in chars.iter().enumerate() {
                    match fb.get(x + i as u16, y) {
                        Some(cell) if cell.ch == ch => {}
                        _ => continue 'col,
                    }
                }
                return true;
            }
        }
        false
    }

    fn block_count(fb: &FrameBuffer) -> usize {
        (0..fb.height())
            .flat_map(|y| (0..fb.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.get(x, y).map(|c| c.ch == '█').unwrap_or(false))
            .count()
    }

    #[test]
    fn renders_labels_and_next_preview() {
        let state = GameState::new(3);
        let fb = GameView::default().render(&state, Viewport::new(80, 24));

        assert!(contains_text(&fb, "NEXT"));
        assert!(contains_text(&fb, "SCORE"));
        assert!(contains_text(&fb, "LEVEL"));
        assert!(contains_text(&fb, "LINES"));
        // The next-piece preview always shows four blocks (two columns each).
        assert_eq!(block_count(&fb), 8);
    }

    #[test]
    fn locked_cells_show_up_on_the_field() {
        let mut state = GameState::new(3);
        state.apply_action(Action::HardDrop);
        let fb = GameView::default().render(&state, Viewport::new(80, 24));

        // Four locked blocks plus the preview's four, two columns each.
        assert!(block_count(&fb) >= 16);
    }

    #[test]
    fn paused_overlay_is_drawn() {
        let mut state = GameState::new(3);
        state.toggle_pause();
        let fb = GameView::default().render(&state, Viewport::new(80, 24));

        assert!(contains_text(&fb, "PAUSED"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let state = GameState::new(3);
        let fb = GameView::default().render(&state, Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
