//! Piece module - a typed shape with position and rotation state
//!
//! A piece is four cell offsets around a pivot at the origin, plus an
//! absolute board position. Movement and rotation are unconditional
//! transforms; legality is always the caller's job, checked against the
//! board immediately afterward and reverted on failure.

use crate::types::{PieceKind, SPAWN_X, SPAWN_Y};

/// Offset of a single block relative to the piece pivot.
pub type BlockOffset = (i8, i8);

/// The four pivot-relative offsets making up a piece.
pub type Shape = [BlockOffset; 4];

/// Active falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    x: i8,
    y: i8,
    cells: Shape,
    rotation_index: u8,
}

impl Piece {
    /// Create a piece of the given kind and shape at the spawn position.
    pub fn new(kind: PieceKind, cells: Shape) -> Self {
        Self {
            kind,
            x: SPAWN_X,
            y: SPAWN_Y,
            cells,
            rotation_index: 0,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Pivot position on the board.
    pub fn position(&self) -> (i8, i8) {
        (self.x, self.y)
    }

    /// Pivot-relative offsets.
    pub fn cells(&self) -> &Shape {
        &self.cells
    }

    /// Rotation state, informational only: the rotation transform is
    /// algebraic and never consults this. Kept consistent mod 4 so external
    /// inspectors can rely on it.
    pub fn rotation_index(&self) -> u8 {
        self.rotation_index
    }

    /// Absolute board coordinates of the four blocks.
    pub fn absolute_cells(&self) -> [(i8, i8); 4] {
        let mut out = [(0, 0); 4];
        for (slot, &(dx, dy)) in out.iter_mut().zip(self.cells.iter()) {
            *slot = (self.x + dx, self.y + dy);
        }
        out
    }

    /// Translate the pivot unconditionally.
    pub fn move_by(&mut self, dx: i8, dy: i8) {
        self.x += dx;
        self.y += dy;
    }

    /// Rotate 90 degrees about the pivot: `(dx, dy) -> (dy, -dx)`.
    pub fn rotate(&mut self) {
        for cell in &mut self.cells {
            *cell = (cell.1, -cell.0);
        }
        self.rotation_index = (self.rotation_index + 1) % 4;
    }

    /// Exact inverse of `rotate`: `(dx, dy) -> (-dy, dx)`.
    pub fn rotate_back(&mut self) {
        for cell in &mut self.cells {
            *cell = (-cell.1, cell.0);
        }
        self.rotation_index = (self.rotation_index + 3) % 4;
    }
}
