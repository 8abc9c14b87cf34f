use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::{Action, Condition, Effect};
use crate::error::{WorldError, WorldResult};
use crate::hint::ProgressiveHint;
use crate::model::{Item, Puzzle, Room};

/// Descriptive metadata about the scenario itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldMeta {
    /// Theme the scenario was built around.
    pub theme: String,
    /// Where the escape room takes place.
    pub setting: String,
    /// Why the player is trapped.
    pub backstory: String,
    /// How the player escapes, in prose.
    pub win_condition: String,
}

/// The serialized form of a world, as stored on disk or produced by a
/// scenario generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldDocument {
    /// Theme the scenario was built around.
    #[serde(default)]
    pub theme: String,
    /// Where the escape room takes place.
    #[serde(default)]
    pub setting: String,
    /// Why the player is trapped.
    #[serde(default)]
    pub backstory: String,
    /// All rooms; the first one is the starting room.
    #[serde(default)]
    pub rooms: Vec<Room>,
    /// All items.
    #[serde(default)]
    pub items: Vec<Item>,
    /// All puzzles.
    #[serde(default)]
    pub puzzles: Vec<Puzzle>,
    /// Declarative actions.
    #[serde(default)]
    pub actions: Vec<Action>,
    /// How the player escapes, in prose.
    #[serde(default)]
    pub win_condition: String,
    /// Flat per-room hints, keyed by room id.
    #[serde(default)]
    pub hints: HashMap<String, String>,
    /// Counter-gated hints.
    #[serde(default)]
    pub progressive_hints: Vec<ProgressiveHint>,
}

/// A dangling reference or other integrity problem found in a world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldIssue {
    /// Two entities of the same kind share an id; only the first is reachable.
    DuplicateId {
        /// Entity kind ("room", "item", "puzzle", "action").
        kind: &'static str,
        /// The repeated id.
        id: String,
    },
    /// An id that resolves to nothing.
    Dangling {
        /// Where the reference was found, e.g. "room `study` item".
        owner: String,
        /// The unresolved id.
        id: String,
    },
    /// The document lacks actions or progressive hints.
    Stale,
}

impl fmt::Display for WorldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId { kind, id } => write!(f, "duplicate {kind} id `{id}`"),
            Self::Dangling { owner, id } => write!(f, "{owner} refers to unknown id `{id}`"),
            Self::Stale => f.write_str("document has no actions or no progressive hints"),
        }
    }
}

/// The world definition for one playthrough, indexed by id.
///
/// Entities keep their document order (the first room is the start room, the
/// order of a room's items decides which one a substring picks). Lookups go
/// through id indexes; when ids repeat, the first entity wins.
#[derive(Debug, Clone)]
pub struct World {
    /// Scenario metadata.
    pub meta: WorldMeta,
    rooms: Vec<Room>,
    items: Vec<Item>,
    puzzles: Vec<Puzzle>,
    actions: Vec<Action>,
    hints: HashMap<String, String>,
    progressive_hints: Vec<ProgressiveHint>,

    // Indexes
    room_index: HashMap<String, usize>,
    item_index: HashMap<String, usize>,
    puzzle_index: HashMap<String, usize>,
}

impl World {
    /// Build an indexed world from a document.
    ///
    /// Fails only when the document has no rooms.
    pub fn from_document(doc: WorldDocument) -> WorldResult<Self> {
        if doc.rooms.is_empty() {
            return Err(WorldError::NoRooms);
        }
        Ok(Self::build(doc))
    }

    /// Index a document that is known to have at least one room.
    pub(crate) fn build(doc: WorldDocument) -> Self {
        let room_index = index_by("room", &doc.rooms, |r| &r.id);
        let item_index = index_by("item", &doc.items, |i| &i.id);
        let puzzle_index = index_by("puzzle", &doc.puzzles, |p| &p.id);
        log::debug!(
            "indexed world `{}`: {} rooms, {} items, {} puzzles, {} actions",
            doc.theme,
            doc.rooms.len(),
            doc.items.len(),
            doc.puzzles.len(),
            doc.actions.len()
        );

        Self {
            meta: WorldMeta {
                theme: doc.theme,
                setting: doc.setting,
                backstory: doc.backstory,
                win_condition: doc.win_condition,
            },
            rooms: doc.rooms,
            items: doc.items,
            puzzles: doc.puzzles,
            actions: doc.actions,
            hints: doc.hints,
            progressive_hints: doc.progressive_hints,
            room_index,
            item_index,
            puzzle_index,
        }
    }

    /// Decode a JSON world document.
    pub fn from_json(bytes: &[u8]) -> WorldResult<Self> {
        let doc: WorldDocument = serde_json::from_slice(bytes)?;
        Self::from_document(doc)
    }

    /// Snapshot the world, including its current flags, as a document.
    pub fn to_document(&self) -> WorldDocument {
        WorldDocument {
            theme: self.meta.theme.clone(),
            setting: self.meta.setting.clone(),
            backstory: self.meta.backstory.clone(),
            rooms: self.rooms.clone(),
            items: self.items.clone(),
            puzzles: self.puzzles.clone(),
            actions: self.actions.clone(),
            win_condition: self.meta.win_condition.clone(),
            hints: self.hints.clone(),
            progressive_hints: self.progressive_hints.clone(),
        }
    }

    /// Encode the world as pretty-printed JSON.
    pub fn to_json(&self) -> WorldResult<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.to_document())?)
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// The room the player starts in.
    pub fn start_room(&self) -> &Room {
        // from_document guarantees at least one room
        &self.rooms[0]
    }

    /// Get a room by id.
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.room_index.get(id).map(|&i| &self.rooms[i])
    }

    /// Get an item by id.
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.item_index.get(id).map(|&i| &self.items[i])
    }

    /// Get a puzzle by id.
    pub fn puzzle(&self, id: &str) -> Option<&Puzzle> {
        self.puzzle_index.get(id).map(|&i| &self.puzzles[i])
    }

    /// All rooms in document order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// All items in document order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// All puzzles in document order.
    pub fn puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }

    /// All actions in document order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// All progressive hints in document order.
    pub fn progressive_hints(&self) -> &[ProgressiveHint] {
        &self.progressive_hints
    }

    /// The flat hint for a room, if any.
    pub fn hint_for(&self, room_id: &str) -> Option<&str> {
        self.hints.get(room_id).map(String::as_str)
    }

    /// Number of puzzles the player has to solve to win.
    pub fn puzzle_count(&self) -> usize {
        self.puzzles.len()
    }

    /// Whether the document carries the action and progressive-hint systems.
    pub fn is_current_format(&self) -> bool {
        !self.actions.is_empty() && !self.progressive_hints.is_empty()
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Make a hidden item visible. Returns false for unknown ids.
    pub fn reveal_item(&mut self, id: &str) -> bool {
        self.set_hidden(id, false)
    }

    /// Hide an item. Returns false for unknown ids.
    pub fn hide_item(&mut self, id: &str) -> bool {
        self.set_hidden(id, true)
    }

    /// Reveal every item whose `revealed_by` equals `tag`. Returns the ids.
    pub fn reveal_items_tagged(&mut self, tag: &str) -> Vec<String> {
        self.items
            .iter_mut()
            .filter(|i| i.revealed_by.as_deref() == Some(tag))
            .map(|i| {
                i.hidden = false;
                i.id.clone()
            })
            .collect()
    }

    /// Clear a room's locked flag. Returns false for unknown ids.
    pub fn unlock_room(&mut self, id: &str) -> bool {
        match self.room_index.get(id) {
            Some(&i) => {
                self.rooms[i].locked = false;
                true
            }
            None => false,
        }
    }

    /// Set a puzzle's solved flag. Returns false for unknown ids.
    pub fn mark_puzzle_solved(&mut self, id: &str) -> bool {
        match self.puzzle_index.get(id) {
            Some(&i) => {
                self.puzzles[i].solved = true;
                true
            }
            None => false,
        }
    }

    fn set_hidden(&mut self, id: &str, hidden: bool) -> bool {
        match self.item_index.get(id) {
            Some(&i) => {
                self.items[i].hidden = hidden;
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// List integrity problems. The engine tolerates all of them; this is for
    /// authors and generated documents.
    pub fn validate(&self) -> Vec<WorldIssue> {
        let mut issues = Vec::new();

        duplicates(&mut issues, "room", self.rooms.iter().map(|r| &r.id));
        duplicates(&mut issues, "item", self.items.iter().map(|i| &i.id));
        duplicates(&mut issues, "puzzle", self.puzzles.iter().map(|p| &p.id));
        duplicates(&mut issues, "action", self.actions.iter().map(|a| &a.id));

        for room in &self.rooms {
            for id in &room.items {
                self.check_item(&mut issues, format!("room `{}` item", room.id), id);
            }
            for id in &room.puzzles {
                if self.puzzle(id).is_none() {
                    dangling(&mut issues, format!("room `{}` puzzle", room.id), id);
                }
            }
            for id in &room.exits {
                if self.room(id).is_none() {
                    dangling(&mut issues, format!("room `{}` exit", room.id), id);
                }
            }
            if let Some(key) = &room.unlock_key {
                self.check_item(&mut issues, format!("room `{}` unlock key", room.id), key);
            }
        }

        for puzzle in &self.puzzles {
            for id in &puzzle.required_items {
                self.check_item(&mut issues, format!("puzzle `{}` requirement", puzzle.id), id);
            }
        }

        for action in &self.actions {
            let owner = format!("action `{}`", action.id);
            for condition in &action.conditions {
                match condition {
                    Condition::HasItem(id) => self.check_item(&mut issues, owner.clone(), id),
                    Condition::InRoom(id) if self.room(id).is_none() => {
                        dangling(&mut issues, owner.clone(), id)
                    }
                    Condition::PuzzleSolved(id) if self.puzzle(id).is_none() => {
                        dangling(&mut issues, owner.clone(), id)
                    }
                    Condition::ActionPerformed(id)
                        if !self.actions.iter().any(|a| &a.id == id) =>
                    {
                        dangling(&mut issues, owner.clone(), id)
                    }
                    _ => {}
                }
            }
            for effect in &action.effects {
                match effect {
                    Effect::RevealItem(id)
                    | Effect::HideItem(id)
                    | Effect::AddInventory(id)
                    | Effect::RemoveInventory(id) => {
                        self.check_item(&mut issues, owner.clone(), id)
                    }
                    Effect::UnlockRoom(id) if self.room(id).is_none() => {
                        dangling(&mut issues, owner.clone(), id)
                    }
                    Effect::UnlockRoom(_) => {}
                }
            }
        }

        for hint in &self.progressive_hints {
            if self.room(&hint.context).is_none() && self.puzzle(&hint.context).is_none() {
                dangling(&mut issues, "progressive hint".to_string(), &hint.context);
            }
        }

        if !self.is_current_format() {
            issues.push(WorldIssue::Stale);
        }

        issues
    }

    fn check_item(&self, issues: &mut Vec<WorldIssue>, owner: String, id: &str) {
        if self.item(id).is_none() {
            dangling(issues, owner, id);
        }
    }
}

/// First occurrence of an id wins.
fn index_by<T>(
    kind: &str,
    entries: &[T],
    key: impl Fn(&T) -> &String,
) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        match index.entry(key(entry).clone()) {
            Entry::Occupied(slot) => log::warn!("duplicate {kind} id `{}` ignored", slot.key()),
            Entry::Vacant(slot) => {
                slot.insert(i);
            }
        }
    }
    index
}

fn duplicates<'a>(
    issues: &mut Vec<WorldIssue>,
    kind: &'static str,
    ids: impl Iterator<Item = &'a String>,
) {
    let mut seen = std::collections::HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            issues.push(WorldIssue::DuplicateId {
                kind,
                id: id.clone(),
            });
        }
    }
}

fn dangling(issues: &mut Vec<WorldIssue>, owner: String, id: &str) {
    issues.push(WorldIssue::Dangling {
        owner,
        id: id.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Trigger, TriggerKind};
    use crate::hint::HintTrigger;

    fn test_document() -> WorldDocument {
        WorldDocument {
            theme: "Test".into(),
            rooms: vec![
                Room::new("cell", "Cell")
                    .with_item("spoon")
                    .with_item("ghost")
                    .with_exit("yard"),
                Room::new("yard", "Yard").locked_by("spoon"),
            ],
            items: vec![
                Item::new("spoon", "bent spoon"),
                Item::new("loose_brick", "loose brick").hidden_until("dig"),
            ],
            puzzles: vec![Puzzle::new("tally", "Tally Marks", "forty")],
            actions: vec![
                Action::new("dig", Trigger::new(TriggerKind::Use, "spoon"))
                    .with_effect(Effect::RevealItem("loose_brick".into())),
            ],
            progressive_hints: vec![
                ProgressiveHint::new("cell", "Dig.").with_trigger(HintTrigger::CommandsTried(5)),
            ],
            ..WorldDocument::default()
        }
    }

    #[test]
    fn lookups_by_id() {
        let world = World::from_document(test_document()).unwrap();
        assert_eq!(world.start_room().id, "cell");
        assert_eq!(world.room("yard").unwrap().name, "Yard");
        assert_eq!(world.item("spoon").unwrap().name, "bent spoon");
        assert!(world.item("ghost").is_none());
        assert_eq!(world.puzzle_count(), 1);
    }

    #[test]
    fn empty_world_is_rejected() {
        let result = World::from_document(WorldDocument::default());
        assert!(matches!(result, Err(WorldError::NoRooms)));
    }

    #[test]
    fn duplicate_ids_resolve_to_first() {
        let mut doc = test_document();
        doc.items.push(Item::new("spoon", "silver spoon"));
        let world = World::from_document(doc).unwrap();

        assert_eq!(world.item("spoon").unwrap().name, "bent spoon");
        assert!(world.validate().contains(&WorldIssue::DuplicateId {
            kind: "item",
            id: "spoon".into()
        }));
    }

    #[test]
    fn transitions_flip_flags() {
        let mut world = World::from_document(test_document()).unwrap();

        assert!(world.item("loose_brick").unwrap().hidden);
        assert!(world.reveal_item("loose_brick"));
        assert!(!world.item("loose_brick").unwrap().hidden);
        assert!(world.hide_item("loose_brick"));
        assert!(world.item("loose_brick").unwrap().hidden);

        assert!(world.unlock_room("yard"));
        assert!(!world.room("yard").unwrap().locked);

        assert!(world.mark_puzzle_solved("tally"));
        assert!(world.puzzle("tally").unwrap().solved);

        assert!(!world.reveal_item("nope"));
        assert!(!world.unlock_room("nope"));
        assert!(!world.mark_puzzle_solved("nope"));
    }

    #[test]
    fn reveal_by_tag() {
        let mut world = World::from_document(test_document()).unwrap();
        assert_eq!(world.reveal_items_tagged("dig"), vec!["loose_brick".to_string()]);
        assert!(world.reveal_items_tagged("nothing").is_empty());
    }

    #[test]
    fn validate_reports_dangling_item() {
        let world = World::from_document(test_document()).unwrap();
        let issues = world.validate();

        assert_eq!(issues.len(), 1);
        insta::assert_snapshot!(issues[0].to_string(), @"room `cell` item refers to unknown id `ghost`");
    }

    #[test]
    fn current_format_needs_actions_and_hints() {
        let mut doc = test_document();
        assert!(World::from_document(doc.clone()).unwrap().is_current_format());

        doc.progressive_hints.clear();
        let world = World::from_document(doc).unwrap();
        assert!(!world.is_current_format());
        assert!(world.validate().contains(&WorldIssue::Stale));
    }

    #[test]
    fn json_keeps_flags() {
        let mut world = World::from_document(test_document()).unwrap();
        world.reveal_item("loose_brick");

        let bytes = world.to_json().unwrap();
        let reloaded = World::from_json(&bytes).unwrap();
        assert!(!reloaded.item("loose_brick").unwrap().hidden);
        assert_eq!(reloaded.meta.theme, "Test");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            World::from_json(b"{ not json"),
            Err(WorldError::Json(_))
        ));
    }
}
