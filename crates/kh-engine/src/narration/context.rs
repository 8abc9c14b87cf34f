use kh_world::World;

use crate::state::GameState;

/// Everything a narrator may know about the current turn.
///
/// Only facts the player has already seen go in here: no puzzle solutions, no
/// required-item lists, no hidden items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NarrationContext {
    /// Scenario theme.
    pub theme: String,
    /// Scenario setting.
    pub setting: String,
    /// Current room display name.
    pub room_name: String,
    /// Current room description.
    pub room_description: String,
    /// Names of the visible items in the current room.
    pub visible_items: Vec<String>,
    /// The raw text of the last command.
    pub last_command: String,
    /// The authoritative result of the last command.
    pub last_result: String,
    /// Display names of held items that are not hidden.
    pub inventory: Vec<String>,
    /// Puzzles solved so far.
    pub puzzles_solved: usize,
    /// Puzzles in the world.
    pub puzzles_total: usize,
    /// Commands processed this session.
    pub commands_tried: u32,
    /// Moves made this session.
    pub moves: u32,
    /// What the player typed this turn.
    pub player_input: String,
    /// Eligible progressive hint texts, to be woven in subtly.
    pub hints: Vec<String>,
}

impl NarrationContext {
    /// Capture the narration context from a world and its session state.
    pub fn capture(
        world: &World,
        state: &GameState,
        player_input: &str,
        hints: Vec<String>,
    ) -> Self {
        let room = world.room(&state.current_room);

        let visible_items = room
            .map(|r| {
                r.items
                    .iter()
                    .filter_map(|id| world.item(id))
                    .filter(|item| !item.hidden)
                    .map(|item| item.name.clone())
                    .collect()
            })
            .unwrap_or_default();

        let inventory = state
            .inventory
            .iter()
            .filter_map(|id| world.item(id))
            .filter(|item| !item.hidden)
            .map(|item| item.name.clone())
            .collect();

        Self {
            theme: world.meta.theme.clone(),
            setting: world.meta.setting.clone(),
            room_name: room.map(|r| r.name.clone()).unwrap_or_default(),
            room_description: room.map(|r| r.description.clone()).unwrap_or_default(),
            visible_items,
            last_command: state.last_command.clone(),
            last_result: state.last_result.clone(),
            inventory,
            puzzles_solved: state.solved_puzzles.len(),
            puzzles_total: world.puzzle_count(),
            commands_tried: state.command_attempts,
            moves: state.moves,
            player_input: player_input.to_string(),
            hints,
        }
    }
}
