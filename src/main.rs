//! Terminal runner for the falling-block game.
//!
//! The binary owns everything the core does not: the gravity timer, keyboard
//! polling, and rendering. Input events and gravity ticks are serialized
//! into single-threaded calls on `GameState`, and the gravity period is
//! re-read from the core after every call that may have changed the level.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use arrayvec::ArrayVec;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::GameState;
use blockfall::input::{handle_key_event, is_pause_key, should_quit};
use blockfall::term::{GameView, TerminalRenderer, Viewport};
use blockfall::types::Action;

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut game = GameState::new(clock_seed());
    let view = GameView::default();

    let mut last_drop = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&game, Viewport::new(w, h));
        term.draw(&fb)?;

        // The desired period can change whenever the level does.
        let period = Duration::from_millis(game.tick_interval_ms() as u64);
        let timeout = period
            .checked_sub(last_drop.elapsed())
            .unwrap_or(Duration::ZERO);

        // Drain whatever arrived into a queue, then apply in order: input
        // and gravity never interleave mid-mutation.
        let mut pending: ArrayVec<Action, 32> = ArrayVec::new();
        let mut deadline_hit = !event::poll(timeout)?;
        while !deadline_hit {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if is_pause_key(key) {
                        game.toggle_pause();
                    } else if let Some(action) = handle_key_event(key) {
                        let _ = pending.try_push(action);
                    }
                }
            }
            deadline_hit = !event::poll(Duration::ZERO)?;
        }

        for action in pending {
            game.apply_action(action);
        }

        // Gravity. Once the game is over the tick source stops; the loop
        // keeps rendering until the player quits.
        if last_drop.elapsed() >= period {
            last_drop = Instant::now();
            if !game.game_over() {
                game.tick();
            }
        }
    }
}

/// Seed the piece sequence from the wall clock; everything below the binary
/// treats the seed as data.
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
