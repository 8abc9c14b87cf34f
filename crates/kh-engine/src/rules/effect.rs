//! Effect application for declarative actions.

use kh_world::{Effect, World};

use crate::state::GameState;

/// Apply one effect. Dangling ids are logged and skipped.
pub fn apply(effect: &Effect, world: &mut World, state: &mut GameState) {
    match effect {
        Effect::RevealItem(id) => {
            if world.reveal_item(id) {
                state.discover(id.clone());
            } else {
                log::warn!("reveal_item: unknown item `{id}`");
            }
        }
        Effect::HideItem(id) => {
            if !world.hide_item(id) {
                log::warn!("hide_item: unknown item `{id}`");
            }
        }
        Effect::UnlockRoom(id) => {
            if !world.unlock_room(id) {
                log::warn!("unlock_room: unknown room `{id}`");
            }
        }
        Effect::AddInventory(id) => {
            state.add_item(id.clone());
        }
        Effect::RemoveInventory(id) => {
            state.remove_item(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kh_world::{Item, Room, WorldDocument};

    fn world() -> World {
        World::from_document(WorldDocument {
            rooms: vec![Room::new("cell", "Cell"), Room::new("yard", "Yard").locked_by("key")],
            items: vec![Item::new("key", "iron key").hidden_until("dig")],
            ..WorldDocument::default()
        })
        .unwrap()
    }

    #[test]
    fn reveal_marks_discovered() {
        let mut world = world();
        let mut state = GameState::new("cell");

        apply(&Effect::RevealItem("key".into()), &mut world, &mut state);
        assert!(!world.item("key").unwrap().hidden);
        assert!(state.discovered_items.contains("key"));

        apply(&Effect::HideItem("key".into()), &mut world, &mut state);
        assert!(world.item("key").unwrap().hidden);
    }

    #[test]
    fn unlock_room() {
        let mut world = world();
        let mut state = GameState::new("cell");
        apply(&Effect::UnlockRoom("yard".into()), &mut world, &mut state);
        assert!(!world.room("yard").unwrap().locked);
    }

    #[test]
    fn inventory_effects() {
        let mut world = world();
        let mut state = GameState::new("cell");

        apply(&Effect::AddInventory("key".into()), &mut world, &mut state);
        apply(&Effect::AddInventory("key".into()), &mut world, &mut state);
        assert_eq!(state.inventory, vec!["key"]);

        apply(&Effect::RemoveInventory("key".into()), &mut world, &mut state);
        assert!(state.inventory.is_empty());
    }

    #[test]
    fn dangling_ids_are_ignored() {
        let mut world = world();
        let mut state = GameState::new("cell");
        apply(&Effect::RevealItem("ghost".into()), &mut world, &mut state);
        apply(&Effect::UnlockRoom("nowhere".into()), &mut world, &mut state);
        assert!(state.discovered_items.is_empty());
    }
}
