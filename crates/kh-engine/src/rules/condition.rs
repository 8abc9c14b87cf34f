//! Guard evaluation for declarative actions.

use kh_world::Condition;

use crate::state::GameState;

/// Evaluate one condition against the session state.
pub fn holds(condition: &Condition, state: &GameState) -> bool {
    match condition {
        Condition::HasItem(id) => state.has_item(id),
        Condition::InRoom(id) => state.current_room == *id,
        Condition::PuzzleSolved(id) => state.is_solved(id),
        Condition::ActionPerformed(id) => state.has_performed(id),
    }
}

/// Whether every condition holds. An empty list always holds.
pub fn all_hold(conditions: &[Condition], state: &GameState) -> bool {
    conditions.iter().all(|c| holds(c, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_condition_kind() {
        let mut state = GameState::new("study");
        state.add_item("compass");
        state.mark_solved("clock");
        state.record_performed("open_desk");

        assert!(holds(&Condition::HasItem("compass".into()), &state));
        assert!(!holds(&Condition::HasItem("key".into()), &state));
        assert!(holds(&Condition::InRoom("study".into()), &state));
        assert!(!holds(&Condition::InRoom("cellar".into()), &state));
        assert!(holds(&Condition::PuzzleSolved("clock".into()), &state));
        assert!(!holds(&Condition::PuzzleSolved("chest".into()), &state));
        assert!(holds(&Condition::ActionPerformed("open_desk".into()), &state));
        assert!(!holds(&Condition::ActionPerformed("pry".into()), &state));
    }

    #[test]
    fn conditions_are_anded() {
        let mut state = GameState::new("study");
        state.add_item("compass");

        assert!(all_hold(&[], &state));
        assert!(all_hold(
            &[
                Condition::HasItem("compass".into()),
                Condition::InRoom("study".into())
            ],
            &state
        ));
        assert!(!all_hold(
            &[
                Condition::HasItem("compass".into()),
                Condition::InRoom("cellar".into())
            ],
            &state
        ));
    }
}
