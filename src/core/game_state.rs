//! Game state module - the tick/action state machine
//!
//! Ties the board, pieces, factory, and scoring into one consistent model.
//! An external driver feeds it exactly two event types: `tick()` once per
//! gravity period and `apply_action()` per user input, never concurrently.
//! The machine consults the board for every legality decision and reports
//! the desired tick period; it never owns a timer itself.

use crate::core::board::Board;
use crate::core::factory;
use crate::core::piece::Piece;
use crate::core::rng::SimpleRng;
use crate::types::{
    Action, BASE_TICK_MS, LINES_PER_LEVEL, LINE_SCORES, MAX_LEVEL, MIN_TICK_MS, START_LEVEL,
    TICK_SPEEDUP_PER_LEVEL_MS,
};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Piece,
    next: Piece,
    rng: SimpleRng,
    score: u32,
    level: u32,
    lines_cleared_total: u32,
    paused: bool,
    game_over: bool,
}

impl GameState {
    /// Create a new game: empty board, level 1, two freshly spawned pieces.
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let active = factory::create_random(&mut rng);
        let next = factory::create_random(&mut rng);

        Self {
            board: Board::new(),
            active,
            next,
            rng,
            score: 0,
            level: START_LEVEL,
            lines_cleared_total: 0,
            paused: false,
            game_over: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared_total(&self) -> u32 {
        self.lines_cleared_total
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Desired gravity period for the current level, in milliseconds.
    ///
    /// The driver re-reads this after every call that may change the level.
    pub fn tick_interval_ms(&self) -> u32 {
        BASE_TICK_MS
            .saturating_sub((self.level - 1) * TICK_SPEEDUP_PER_LEVEL_MS)
            .max(MIN_TICK_MS)
    }

    /// Toggle between Running and Paused. No-op once the game is over.
    pub fn toggle_pause(&mut self) {
        if self.game_over {
            return;
        }
        self.paused = !self.paused;
    }

    /// Advance gravity by one step.
    ///
    /// If the active piece can descend, that is all that happens. If it
    /// cannot, it locks into the board, completed lines clear and score, the
    /// next piece is promoted, and a blocked spawn ends the game.
    pub fn tick(&mut self) {
        if self.paused || self.game_over {
            return;
        }

        if !self.try_move(0, 1) {
            self.lock_active();
        }
    }

    /// Dispatch a user action. No-op while paused or after game over.
    pub fn apply_action(&mut self, action: Action) {
        if self.paused || self.game_over {
            return;
        }

        match action {
            Action::MoveLeft => {
                self.try_move(-1, 0);
            }
            Action::MoveRight => {
                self.try_move(1, 0);
            }
            Action::Rotate => {
                self.try_rotate();
            }
            Action::SoftDrop => {
                // One attempted descent; a failed one never locks here -
                // locking is gravity's job.
                if self.try_move(0, 1) {
                    self.score += 1;
                }
            }
            Action::HardDrop => {
                let mut dropped: u32 = 0;
                while self.try_move(0, 1) {
                    dropped += 1;
                }
                self.score += 2 * dropped;
                self.lock_active();
            }
        }
    }

    /// Attempt a translation, reverting if the board rejects it.
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        self.active.move_by(dx, dy);
        if self.board.is_valid_position(&self.active) {
            true
        } else {
            self.active.move_by(-dx, -dy);
            false
        }
    }

    /// Attempt a rotation, reverting via the inverse transform on rejection.
    /// No wall-kick search: a single trial.
    fn try_rotate(&mut self) -> bool {
        self.active.rotate();
        if self.board.is_valid_position(&self.active) {
            true
        } else {
            self.active.rotate_back();
            false
        }
    }

    /// Lock the active piece, clear lines, and promote the next piece.
    ///
    /// Shared by the gravity-exhaustion branch of `tick` and by hard drop.
    fn lock_active(&mut self) {
        self.board.lock_piece(&self.active);

        let cleared = self.board.clear_completed_lines();
        if cleared > 0 {
            self.apply_line_clears(cleared);
        }

        let spawned = factory::create_random(&mut self.rng);
        self.active = std::mem::replace(&mut self.next, spawned);

        if !self.board.is_valid_position(&self.active) {
            self.game_over = true;
        }
    }

    /// Score cleared lines and advance the level.
    fn apply_line_clears(&mut self, cleared: usize) {
        self.score += LINE_SCORES[cleared] * self.level;
        self.lines_cleared_total += cleared as u32;

        // Level only ever increases, one step per 10-line boundary, and
        // stops moving entirely past the cap.
        let new_level = self.lines_cleared_total / LINES_PER_LEVEL + 1;
        if new_level > self.level && new_level <= MAX_LEVEL {
            self.level = new_level;
        }
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
