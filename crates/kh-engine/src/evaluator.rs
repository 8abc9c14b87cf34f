//! Win condition and progressive-hint eligibility.

use chrono::{DateTime, Utc};
use kh_world::{HintTrigger, ProgressiveHint, World};

use crate::state::GameState;

/// Set the won flag once every puzzle is solved. Returns the flag.
///
/// The flag is never cleared.
pub fn check_win(world: &World, state: &mut GameState) -> bool {
    if !state.won && state.solved_puzzles.len() >= world.puzzle_count() {
        state.won = true;
        log::info!(
            "game won after {} moves ({} puzzles)",
            state.moves,
            state.solved_puzzles.len()
        );
    }
    state.won
}

/// All progressive hints that are eligible right now, in document order.
///
/// A hint is in context when its context is the current room, or an unsolved
/// puzzle located in the current room. It is eligible when any one of its
/// triggers is satisfied. Priority is not used to filter.
pub fn eligible_hints<'w>(
    world: &'w World,
    state: &GameState,
    now: DateTime<Utc>,
) -> Vec<&'w ProgressiveHint> {
    let minutes = state.minutes_elapsed(now);
    world
        .progressive_hints()
        .iter()
        .filter(|h| in_context(world, state, &h.context))
        .filter(|h| h.triggers.iter().any(|t| satisfied(t, state, &h.context, minutes)))
        .collect()
}

fn in_context(world: &World, state: &GameState, context: &str) -> bool {
    if context == state.current_room {
        return true;
    }
    world.room(&state.current_room).is_some_and(|room| {
        room.puzzles
            .iter()
            .any(|p| p == context && !state.is_solved(p))
    })
}

fn satisfied(trigger: &HintTrigger, state: &GameState, context: &str, minutes: u32) -> bool {
    match *trigger {
        HintTrigger::FailedAttempts(n) => state.failures(context) >= n,
        HintTrigger::TimeSpent(n) => minutes >= n,
        HintTrigger::CommandsTried(n) => state.command_attempts >= n,
    }
}
