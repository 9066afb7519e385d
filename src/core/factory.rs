//! Factory module - canonical shapes and random piece selection
//!
//! The shape table is the single place the seven layouts are defined.
//! Random selection draws uniformly from all seven kinds using an injected
//! source, so tests can seed the sequence.

use crate::core::piece::{Piece, Shape};
use crate::core::rng::SimpleRng;
use crate::types::PieceKind;

/// Pivot-relative offsets for a piece kind in its spawn orientation.
pub fn shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => [(-1, 0), (0, 0), (1, 0), (2, 0)],
        PieceKind::J => [(-1, -1), (-1, 0), (0, 0), (1, 0)],
        PieceKind::L => [(-1, 0), (0, 0), (1, 0), (1, -1)],
        PieceKind::O => [(0, 0), (1, 0), (0, -1), (1, -1)],
        PieceKind::S => [(-1, 0), (0, 0), (0, -1), (1, -1)],
        PieceKind::T => [(-1, 0), (0, 0), (1, 0), (0, -1)],
        PieceKind::Z => [(-1, -1), (0, -1), (0, 0), (1, 0)],
    }
}

/// Build a piece of the given kind at the spawn position.
pub fn create(kind: PieceKind) -> Piece {
    Piece::new(kind, shape(kind))
}

/// Build a uniformly random piece at the spawn position.
pub fn create_random(rng: &mut SimpleRng) -> Piece {
    let index = rng.next_range(PieceKind::ALL.len() as u32) as usize;
    create(PieceKind::ALL[index])
}
