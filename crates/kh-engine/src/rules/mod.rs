//! Declarative action engine.
//!
//! Every action whose trigger matches the command is considered; each one that
//! is not spent and whose conditions all hold fires. Several actions can fire
//! from one command, and the last message written wins.

mod condition;
mod effect;

pub use condition::{all_hold, holds};
pub use effect::apply;

use kh_world::{Action, TriggerKind, World};

use crate::state::GameState;

/// Fire every matching action. Returns true if at least one fired.
pub fn fire_actions(
    world: &mut World,
    state: &mut GameState,
    kind: TriggerKind,
    target: &str,
    with: &str,
) -> bool {
    // Effects mutate the world, so take the candidates out first.
    let candidates: Vec<Action> = world
        .actions()
        .iter()
        .filter(|a| a.trigger.matches(kind, target, with))
        .cloned()
        .collect();

    let mut fired = false;
    for action in &candidates {
        if action.one_time_only && state.has_performed(&action.id) {
            continue;
        }
        if !all_hold(&action.conditions, state) {
            continue;
        }

        log::debug!("action `{}` fired on {kind} `{target}`", action.id);
        for effect in &action.effects {
            apply(effect, world, state);
        }
        if !action.message.is_empty() {
            state.last_result = action.message.clone();
        }
        if action.one_time_only {
            state.record_performed(action.id.clone());
        }
        fired = true;
    }
    fired
}

#[cfg(test)]
mod tests {
    use super::*;
    use kh_world::{Condition, Effect, Item, Room, Trigger, WorldDocument};

    fn world(actions: Vec<Action>) -> World {
        World::from_document(WorldDocument {
            rooms: vec![Room::new("cell", "Cell").with_item("brick")],
            items: vec![
                Item::new("brick", "loose brick").hidden_until("knock"),
                Item::new("spoon", "bent spoon"),
            ],
            actions,
            ..WorldDocument::default()
        })
        .unwrap()
    }

    #[test]
    fn matching_action_fires() {
        let mut world = world(vec![
            Action::new("knock", Trigger::new(TriggerKind::Examine, "wall"))
                .with_effect(Effect::RevealItem("brick".into()))
                .with_message("A brick wobbles."),
        ]);
        let mut state = GameState::new("cell");

        assert!(fire_actions(&mut world, &mut state, TriggerKind::Examine, "north wall", ""));
        assert_eq!(state.last_result, "A brick wobbles.");
        assert!(!world.item("brick").unwrap().hidden);
    }

    #[test]
    fn wrong_kind_does_not_fire() {
        let mut world = world(vec![Action::new(
            "knock",
            Trigger::new(TriggerKind::Examine, "wall"),
        )]);
        let mut state = GameState::new("cell");
        assert!(!fire_actions(&mut world, &mut state, TriggerKind::Use, "wall", ""));
    }

    #[test]
    fn one_time_action_fires_once() {
        let mut world = world(vec![
            Action::new("knock", Trigger::new(TriggerKind::Examine, "wall"))
                .with_message("A brick wobbles.")
                .once(),
        ]);
        let mut state = GameState::new("cell");

        assert!(fire_actions(&mut world, &mut state, TriggerKind::Examine, "wall", ""));
        assert!(state.has_performed("knock"));

        state.last_result.clear();
        assert!(!fire_actions(&mut world, &mut state, TriggerKind::Examine, "wall", ""));
        assert!(state.last_result.is_empty());
    }

    #[test]
    fn repeatable_action_refires() {
        let mut world = world(vec![
            Action::new("knock", Trigger::new(TriggerKind::Examine, "wall"))
                .with_message("Knock knock."),
        ]);
        let mut state = GameState::new("cell");

        assert!(fire_actions(&mut world, &mut state, TriggerKind::Examine, "wall", ""));
        assert!(fire_actions(&mut world, &mut state, TriggerKind::Examine, "wall", ""));
        assert!(state.performed_actions.is_empty());
    }

    #[test]
    fn failing_condition_blocks() {
        let mut world = world(vec![
            Action::new("dig", Trigger::new(TriggerKind::Use, "spoon"))
                .with_condition(Condition::HasItem("spoon".into()))
                .with_effect(Effect::RevealItem("brick".into()))
                .once(),
        ]);
        let mut state = GameState::new("cell");

        assert!(!fire_actions(&mut world, &mut state, TriggerKind::Use, "spoon", ""));
        assert!(world.item("brick").unwrap().hidden);
        assert!(!state.has_performed("dig"));

        state.add_item("spoon");
        assert!(fire_actions(&mut world, &mut state, TriggerKind::Use, "spoon", ""));
        assert!(!world.item("brick").unwrap().hidden);
    }

    #[test]
    fn all_matching_actions_fire_in_order() {
        let mut world = world(vec![
            Action::new("first", Trigger::new(TriggerKind::Examine, "wall"))
                .with_effect(Effect::AddInventory("spoon".into()))
                .with_message("First."),
            Action::new("second", Trigger::new(TriggerKind::Examine, "wall"))
                .with_condition(Condition::HasItem("spoon".into()))
                .with_message("Second."),
        ]);
        let mut state = GameState::new("cell");

        assert!(fire_actions(&mut world, &mut state, TriggerKind::Examine, "wall", ""));
        // the second sees the first's effect
        assert_eq!(state.last_result, "Second.");
        assert!(state.has_item("spoon"));
    }

    #[test]
    fn empty_message_keeps_result() {
        let mut world = world(vec![
            Action::new("quiet", Trigger::new(TriggerKind::Take, "spoon"))
                .with_effect(Effect::RevealItem("brick".into())),
        ]);
        let mut state = GameState::new("cell");
        state.last_result = "You take the bent spoon.".into();

        assert!(fire_actions(&mut world, &mut state, TriggerKind::Take, "spoon", ""));
        assert_eq!(state.last_result, "You take the bent spoon.");
    }

    #[test]
    fn effects_apply_in_order() {
        let mut world = world(vec![
            Action::new("swap", Trigger::new(TriggerKind::Use, "spoon"))
                .with_effect(Effect::AddInventory("brick".into()))
                .with_effect(Effect::RemoveInventory("brick".into())),
        ]);
        let mut state = GameState::new("cell");
        fire_actions(&mut world, &mut state, TriggerKind::Use, "spoon", "");
        assert!(!state.has_item("brick"));
    }
}
