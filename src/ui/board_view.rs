//! Board rendering for the Gomoku GUI

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::board::{Board, Pos, Stone};

use super::theme::*;

/// What to draw on top of the stones
pub struct Overlay<'a> {
    pub current_turn: Stone,
    pub last_move: Option<Pos>,
    pub suggested_move: Option<Pos>,
    pub winning_line: Option<&'a [Pos]>,
    pub accepts_input: bool,
    pub show_coordinates: bool,
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
    rows: usize,
    cols: usize,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 30.0,
            board_rect: Rect::NOTHING,
            rows: 0,
            cols: 0,
        }
    }
}

impl BoardView {
    /// Render the board and return click position if any
    pub fn show(&mut self, ui: &mut egui::Ui, board: &Board, overlay: &Overlay<'_>) -> Option<Pos> {
        self.rows = board.rows();
        self.cols = board.cols();

        // Fit the grid into the available space, keeping cells square
        let available = ui.available_size() - Vec2::splat(20.0);
        let span_x = (self.cols - 1) as f32;
        let span_y = (self.rows - 1) as f32;
        self.cell_size = ((available.x - 2.0 * BOARD_MARGIN) / span_x)
            .min((available.y - 2.0 * BOARD_MARGIN) / span_y)
            .max(MIN_CELL_SIZE);
        let size = Vec2::new(
            span_x * self.cell_size + 2.0 * BOARD_MARGIN,
            span_y * self.cell_size + 2.0 * BOARD_MARGIN,
        );

        let (response, painter) = ui.allocate_painter(size, Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);
        self.draw_grid(&painter);
        if overlay.show_coordinates {
            self.draw_coordinates(&painter);
        }
        self.draw_stones(&painter, board);

        if let Some(pos) = overlay.last_move {
            self.draw_last_move_marker(&painter, pos);
        }
        if let Some(line) = overlay.winning_line {
            self.draw_winning_line(&painter, line);
        }
        if let Some(pos) = overlay.suggested_move {
            self.draw_suggestion(&painter, pos, overlay.current_turn);
        }

        // Handle hover preview and click
        let mut clicked_pos = None;

        if overlay.accepts_input {
            if let Some(board_pos) = response.hover_pos().and_then(|p| self.screen_to_board(p)) {
                let is_valid = board.is_empty(board_pos);
                self.draw_hover_preview(&painter, board_pos, overlay.current_turn, is_valid);

                if response.clicked() && is_valid {
                    clicked_pos = Some(board_pos);
                }
            }
        }

        clicked_pos
    }

    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let width = (self.cols - 1) as f32 * self.cell_size;
        let height = (self.rows - 1) as f32 * self.cell_size;

        for col in 0..self.cols {
            let x = BOARD_MARGIN + col as f32 * self.cell_size;
            let start = self.board_rect.min + Vec2::new(x, BOARD_MARGIN);
            painter.line_segment([start, start + Vec2::new(0.0, height)], stroke);
        }
        for row in 0..self.rows {
            let y = BOARD_MARGIN + row as f32 * self.cell_size;
            let start = self.board_rect.min + Vec2::new(BOARD_MARGIN, y);
            painter.line_segment([start, start + Vec2::new(width, 0.0)], stroke);
        }
    }

    /// Row and column numbers, matching the text front end's coordinates
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);

        for col in 0..self.cols {
            let x = self.board_rect.min.x + BOARD_MARGIN + col as f32 * self.cell_size;
            let pos = Pos2::new(x, self.board_rect.min.y + BOARD_MARGIN * 0.4);
            painter.text(pos, egui::Align2::CENTER_CENTER, col, font.clone(), GRID_LINE);
        }
        for row in 0..self.rows {
            let y = self.board_rect.min.y + BOARD_MARGIN + row as f32 * self.cell_size;
            let pos = Pos2::new(self.board_rect.min.x + BOARD_MARGIN * 0.4, y);
            painter.text(pos, egui::Align2::CENTER_CENTER, row, font.clone(), GRID_LINE);
        }
    }

    fn draw_stones(&self, painter: &Painter, board: &Board) {
        for pos in board.occupied() {
            self.draw_stone(painter, pos, board.get(pos));
        }
    }

    /// Draw a single stone with visual polish
    fn draw_stone(&self, painter: &Painter, pos: Pos, stone: Stone) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * STONE_RADIUS_RATIO;
        let shadow_offset = Vec2::new(2.0, 2.0);

        match stone {
            Stone::Black => {
                painter.circle_filled(
                    center + shadow_offset,
                    radius,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 60),
                );
                painter.circle_filled(center, radius, BLACK_STONE);

                // Highlight
                let highlight_offset = Vec2::new(-radius * 0.3, -radius * 0.3);
                painter.circle_filled(center + highlight_offset, radius * 0.2, BLACK_STONE_HIGHLIGHT);
            }
            Stone::White => {
                painter.circle_filled(
                    center + shadow_offset,
                    radius,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 40),
                );
                painter.circle_filled(center, radius, WHITE_STONE);
                painter.circle_stroke(
                    center,
                    radius * 0.85,
                    Stroke::new(radius * 0.1, WHITE_STONE_SHADOW),
                );
            }
            Stone::Empty => {}
        }
    }

    fn draw_last_move_marker(&self, painter: &Painter, pos: Pos) {
        let center = self.board_to_screen(pos);
        let radius = LAST_MOVE_MARKER_RADIUS.min(self.cell_size * 0.2);
        painter.circle_filled(center, radius, LAST_MOVE_MARKER);
    }

    /// Connect the winning stones and ring each one
    fn draw_winning_line(&self, painter: &Painter, line: &[Pos]) {
        let stroke = Stroke::new(4.0, WIN_HIGHLIGHT);

        for pair in line.windows(2) {
            let start = self.board_to_screen(pair[0]);
            let end = self.board_to_screen(pair[1]);
            painter.line_segment([start, end], stroke);
        }

        let radius = self.cell_size * STONE_RADIUS_RATIO + 3.0;
        for &pos in line {
            painter.circle_stroke(self.board_to_screen(pos), radius, stroke);
        }
    }

    fn draw_suggestion(&self, painter: &Painter, pos: Pos, turn: Stone) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * STONE_RADIUS_RATIO;

        let color = match turn {
            Stone::Black => Color32::from_rgba_unmultiplied(20, 20, 20, 100),
            Stone::White => Color32::from_rgba_unmultiplied(240, 240, 240, 100),
            Stone::Empty => return,
        };

        painter.circle_filled(center, radius, color);
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            "?",
            egui::FontId::proportional(14.0),
            if turn == Stone::Black { WHITE_STONE } else { BLACK_STONE },
        );
    }

    fn draw_hover_preview(&self, painter: &Painter, pos: Pos, turn: Stone, is_valid: bool) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * STONE_RADIUS_RATIO;

        let color = if is_valid {
            match turn {
                Stone::Black => Color32::from_rgba_unmultiplied(20, 20, 20, 80),
                Stone::White => Color32::from_rgba_unmultiplied(240, 240, 240, 80),
                Stone::Empty => return,
            }
        } else {
            hover_invalid()
        };

        painter.circle_filled(center, radius, color);
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min;
        let col = ((relative.x - BOARD_MARGIN) / self.cell_size + 0.5).floor() as i32;
        let row = ((relative.y - BOARD_MARGIN) / self.cell_size + 0.5).floor() as i32;

        let on_board = (0..self.rows as i32).contains(&row) && (0..self.cols as i32).contains(&col);
        on_board.then(|| Pos::new(row as u8, col as u8))
    }

    /// Convert board position to screen coordinates
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        let x = self.board_rect.min.x + BOARD_MARGIN + f32::from(pos.col) * self.cell_size;
        let y = self.board_rect.min.y + BOARD_MARGIN + f32::from(pos.row) * self.cell_size;
        Pos2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(rows: usize, cols: usize) -> BoardView {
        BoardView {
            cell_size: 20.0,
            board_rect: Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(400.0, 400.0)),
            rows,
            cols,
        }
    }

    #[test]
    fn test_screen_board_roundtrip() {
        let view = view(9, 13);
        for pos in [Pos::new(0, 0), Pos::new(4, 7), Pos::new(8, 12)] {
            let screen = view.board_to_screen(pos);
            assert_eq!(view.screen_to_board(screen), Some(pos));
            // Snaps to the nearest intersection
            assert_eq!(view.screen_to_board(screen + Vec2::new(6.0, -6.0)), Some(pos));
        }
    }

    #[test]
    fn test_outside_grid_is_none() {
        let view = view(9, 13);
        assert_eq!(view.screen_to_board(Pos2::new(0.0, 0.0)), None);
        let past_last = view.board_to_screen(Pos::new(8, 12)) + Vec2::new(15.0, 0.0);
        assert_eq!(view.screen_to_board(past_last), None);
    }
}
