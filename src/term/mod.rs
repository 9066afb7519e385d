//! Terminal collaborator layer: framebuffer, view, and renderer.
//!
//! Everything here consumes the core through its read-only accessors; the
//! core never calls back into this module.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::FrameBuffer;
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
