//! Terminal falling-block puzzle.
//!
//! The game-state core lives in [`core`] and is free of I/O; [`term`] maps
//! state to a terminal framebuffer, [`input`] maps key events to actions,
//! and the binary wires them to a gravity timer.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
