//! Core module - pure game logic with no external dependencies
//!
//! This module contains all the game rules, state management, and logic.
//! It has zero dependencies on UI or I/O; collaborators observe it through
//! the accessor surface on `GameState`.

pub mod board;
pub mod factory;
pub mod game_state;
pub mod piece;
pub mod rng;

// Re-export commonly used types
pub use board::Board;
pub use game_state::GameState;
pub use piece::Piece;
pub use rng::SimpleRng;
