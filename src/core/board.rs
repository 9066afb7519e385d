//! Board module - the authoritative occupancy grid
//!
//! A 10x20 grid of cells, row-major with row 0 at the top, stored as a flat
//! array. Every collision and locking decision routes through this type:
//! `is_valid_position` is the single source of truth for legality.
//! Rows above the board (negative y) form the spawn buffer - they are never
//! stored, only tolerated by the collision math.

use crate::core::piece::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check whether every block of the piece sits on a legal cell.
    ///
    /// A block fails if it leaves the board horizontally or through the
    /// bottom, or if it overlaps a filled cell. Blocks with `y < 0` are in
    /// the spawn buffer: exempt from the vertical bound and the occupancy
    /// check, but still held to the x bounds.
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        for (x, y) in piece.absolute_cells() {
            if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
                return false;
            }
            if y >= 0 && self.cells[(y as usize) * (BOARD_WIDTH as usize) + (x as usize)].is_some()
            {
                return false;
            }
        }
        true
    }

    /// Write the piece's blocks into the grid as filled cells.
    ///
    /// Blocks still in the spawn buffer are dropped silently; that only
    /// happens when the stack has grown to the top of the board. Validity is
    /// the caller's responsibility.
    pub fn lock_piece(&mut self, piece: &Piece) {
        let kind = piece.kind();
        for (x, y) in piece.absolute_cells() {
            self.set(x, y, Some(kind));
        }
    }

    /// Check if a row is completely filled
    fn is_row_full(&self, y: usize) -> bool {
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Drop every row above `y` down by one, leaving row 0 empty.
    ///
    /// `copy_within` handles the overlapping ranges safely.
    fn shift_rows_down(&mut self, y: usize) {
        let width = BOARD_WIDTH as usize;
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells.copy_within(src_start..src_start + width, row * width);
        }
        for cell in &mut self.cells[0..width] {
            *cell = None;
        }
    }

    /// Clear every completed row and return how many were cleared.
    ///
    /// Scans bottom-to-top. After a row clears and the rows above shift
    /// down, the same row index is examined again: a different row now
    /// occupies it, and it may itself be complete.
    pub fn clear_completed_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT as usize;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.shift_rows_down(row);
                cleared += 1;
                // Re-examine the same index before moving up.
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Fill an entire row, leaving out the given columns (for testing)
    #[cfg(test)]
    pub fn fill_row_except(&mut self, y: i8, skip: &[i8], kind: crate::types::PieceKind) {
        for x in 0..BOARD_WIDTH as i8 {
            if !skip.contains(&x) {
                self.set(x, y, Some(kind));
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::factory;
    use crate::types::PieceKind;

    fn piece_at(kind: PieceKind, x: i8, y: i8) -> Piece {
        let mut piece = factory::create(kind);
        let (sx, sy) = piece.position();
        piece.move_by(x - sx, y - sy);
        piece
    }

    fn filled_count(board: &Board) -> usize {
        board.cells().iter().filter(|c| c.is_some()).count()
    }

    #[test]
    fn index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn interior_position_on_empty_board_is_valid() {
        let board = Board::new();
        assert!(board.is_valid_position(&piece_at(PieceKind::I, 5, 5)));
    }

    #[test]
    fn position_crossing_the_right_edge_is_invalid() {
        let board = Board::new();
        // I extends to x+2, so a pivot at x=9 reaches x=11.
        assert!(!board.is_valid_position(&piece_at(PieceKind::I, 9, 5)));
        assert!(board.is_valid_position(&piece_at(PieceKind::I, 7, 5)));
    }

    #[test]
    fn position_crossing_the_left_edge_is_invalid() {
        let board = Board::new();
        assert!(!board.is_valid_position(&piece_at(PieceKind::I, 0, 5)));
        assert!(board.is_valid_position(&piece_at(PieceKind::I, 1, 5)));
    }

    #[test]
    fn position_below_the_bottom_is_invalid() {
        let board = Board::new();
        assert!(!board.is_valid_position(&piece_at(PieceKind::I, 5, 20)));
        assert!(board.is_valid_position(&piece_at(PieceKind::I, 5, 19)));
    }

    #[test]
    fn spawn_buffer_cells_are_exempt_from_vertical_bounds() {
        let board = Board::new();
        // All four blocks above the board; only x bounds apply.
        assert!(board.is_valid_position(&piece_at(PieceKind::I, 5, -3)));
        assert!(!board.is_valid_position(&piece_at(PieceKind::I, 9, -3)));
    }

    #[test]
    fn overlap_with_filled_cell_is_invalid() {
        let mut board = Board::new();
        board.set(5, 10, Some(PieceKind::Z));

        assert!(!board.is_valid_position(&piece_at(PieceKind::I, 5, 10)));
        assert!(board.is_valid_position(&piece_at(PieceKind::I, 5, 9)));
    }

    #[test]
    fn buffer_cells_never_trigger_the_occupancy_check() {
        let mut board = Board::new();
        // Fill the whole top row; a piece fully in the buffer still fits.
        board.fill_row_except(0, &[], PieceKind::J);
        assert!(board.is_valid_position(&piece_at(PieceKind::O, 4, -1)));
    }

    #[test]
    fn lock_writes_exactly_the_four_cells_with_the_kind() {
        let mut board = Board::new();
        let piece = piece_at(PieceKind::T, 5, 10);
        board.lock_piece(&piece);

        assert_eq!(filled_count(&board), 4);
        for (x, y) in piece.absolute_cells() {
            assert_eq!(board.get(x, y), Some(Some(PieceKind::T)));
        }
    }

    #[test]
    fn lock_drops_spawn_buffer_cells_silently() {
        let mut board = Board::new();
        // T at y=0 keeps its (0,-1) block in the buffer.
        board.lock_piece(&piece_at(PieceKind::T, 5, 0));

        assert_eq!(filled_count(&board), 3);
        assert_eq!(board.get(4, 0), Some(Some(PieceKind::T)));
        assert_eq!(board.get(5, 0), Some(Some(PieceKind::T)));
        assert_eq!(board.get(6, 0), Some(Some(PieceKind::T)));
    }

    #[test]
    fn clear_returns_zero_on_an_incomplete_board() {
        let mut board = Board::new();
        board.fill_row_except(19, &[4], PieceKind::S);
        assert_eq!(board.clear_completed_lines(), 0);
        assert_eq!(filled_count(&board), 9);
    }

    #[test]
    fn clear_removes_a_single_full_row() {
        let mut board = Board::new();
        board.fill_row_except(18, &[], PieceKind::I);

        assert_eq!(board.clear_completed_lines(), 1);
        assert_eq!(filled_count(&board), 0);
    }

    #[test]
    fn clear_shifts_rows_above_down_by_one() {
        let mut board = Board::new();
        board.set(5, 17, Some(PieceKind::L));
        board.fill_row_except(18, &[], PieceKind::I);

        assert_eq!(board.clear_completed_lines(), 1);

        // The lone block from row 17 lands on row 18; row 0 stays empty.
        assert_eq!(board.get(5, 18), Some(Some(PieceKind::L)));
        assert_eq!(board.get(5, 17), Some(None));
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, 0), Some(None));
        }
    }

    #[test]
    fn adjacent_full_rows_clear_together() {
        let mut board = Board::new();
        board.fill_row_except(18, &[], PieceKind::O);
        board.fill_row_except(19, &[], PieceKind::O);

        assert_eq!(board.clear_completed_lines(), 2);
        assert_eq!(filled_count(&board), 0);
    }

    #[test]
    fn multi_gap_clears_compound_under_rescan() {
        let mut board = Board::new();
        // Two separated full rows with partial rows between and above them.
        board.set(7, 15, Some(PieceKind::S));
        board.fill_row_except(16, &[], PieceKind::I);
        board.set(2, 17, Some(PieceKind::J));
        board.fill_row_except(18, &[], PieceKind::I);

        assert_eq!(board.clear_completed_lines(), 2);

        // Row 18 clears first; the full row from 16 shifts to 17 and is
        // found there on the way up.
        assert_eq!(board.get(2, 18), Some(Some(PieceKind::J)));
        assert_eq!(board.get(7, 17), Some(Some(PieceKind::S)));
        assert_eq!(filled_count(&board), 2);
    }

    #[test]
    fn rows_below_a_cleared_row_are_untouched() {
        let mut board = Board::new();
        board.fill_row_except(19, &[0], PieceKind::Z);
        board.fill_row_except(18, &[], PieceKind::Z);
        board.set(0, 17, Some(PieceKind::Z));

        // Clearing row 18 shifts (0,17) onto (0,18); the incomplete row 19
        // below it must not move or gain cells.
        assert_eq!(board.clear_completed_lines(), 1);
        assert_eq!(board.get(0, 18), Some(Some(PieceKind::Z)));
        assert_eq!(board.get(0, 19), Some(None));
        assert_eq!(board.get(1, 19), Some(Some(PieceKind::Z)));
    }
}
