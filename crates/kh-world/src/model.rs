use serde::{Deserialize, Serialize};

/// A room the player can stand in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier.
    pub id: String,
    /// Display name, also matched by `go`.
    pub name: String,
    /// Long-form text shown by a bare `look`.
    #[serde(default)]
    pub description: String,
    /// Item ids present in this room.
    #[serde(default)]
    pub items: Vec<String>,
    /// Puzzle ids located in this room, in solve order.
    #[serde(default)]
    pub puzzles: Vec<String>,
    /// Room ids reachable from here.
    #[serde(default)]
    pub exits: Vec<String>,
    /// Whether entering requires the unlock key.
    #[serde(default)]
    pub locked: bool,
    /// Item id that opens this room while it is locked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock_key: Option<String>,
}

impl Room {
    /// Create an unlocked, empty room.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            items: Vec::new(),
            puzzles: Vec::new(),
            exits: Vec::new(),
            locked: false,
            unlock_key: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Place an item in the room.
    pub fn with_item(mut self, item_id: impl Into<String>) -> Self {
        self.items.push(item_id.into());
        self
    }

    /// Locate a puzzle in the room.
    pub fn with_puzzle(mut self, puzzle_id: impl Into<String>) -> Self {
        self.puzzles.push(puzzle_id.into());
        self
    }

    /// Add an exit to another room.
    pub fn with_exit(mut self, room_id: impl Into<String>) -> Self {
        self.exits.push(room_id.into());
        self
    }

    /// Lock the room behind a key item.
    pub fn locked_by(mut self, key_item: impl Into<String>) -> Self {
        self.locked = true;
        self.unlock_key = Some(key_item.into());
        self
    }
}

/// An object the player can look at, carry, and use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier.
    pub id: String,
    /// Display name, matched by substring in commands.
    pub name: String,
    /// Text shown when the item is looked at.
    #[serde(default)]
    pub description: String,
    /// Whether a plain `use` accepts this item.
    #[serde(default)]
    pub usable: bool,
    /// Item id this item is meant to be combined with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_with: Option<String>,
    /// Hidden items cannot be seen or taken until revealed.
    #[serde(default)]
    pub hidden: bool,
    /// Action, puzzle, or combination tag that reveals this item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revealed_by: Option<String>,
}

impl Item {
    /// Create a visible, unusable item.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            usable: false,
            use_with: None,
            hidden: false,
            revealed_by: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the item as usable.
    pub fn usable(mut self) -> Self {
        self.usable = true;
        self
    }

    /// Declare the canonical combination target.
    pub fn with_use_with(mut self, item_id: impl Into<String>) -> Self {
        self.use_with = Some(item_id.into());
        self
    }

    /// Hide the item until something reveals it.
    pub fn hidden_until(mut self, revealed_by: impl Into<String>) -> Self {
        self.hidden = true;
        self.revealed_by = Some(revealed_by.into());
        self
    }

    /// Whether the item's display name contains `needle` (case-insensitive).
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// A riddle or lock that needs an answer and possibly some items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// What the player is told about the puzzle.
    #[serde(default)]
    pub description: String,
    /// Answer, compared case-insensitively.
    pub solution: String,
    /// Item ids that must all be held to attempt the puzzle.
    #[serde(default)]
    pub required_items: Vec<String>,
    /// Text appended to the result when solved.
    #[serde(default)]
    pub reward: String,
    /// Mirror of the session's solved set; only set via [`crate::World::mark_puzzle_solved`].
    #[serde(default)]
    pub solved: bool,
}

impl Puzzle {
    /// Create an unsolved puzzle with no required items.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        solution: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            solution: solution.into(),
            required_items: Vec::new(),
            reward: String::new(),
            solved: false,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Require an item to attempt the puzzle.
    pub fn requires(mut self, item_id: impl Into<String>) -> Self {
        self.required_items.push(item_id.into());
        self
    }

    /// Set the reward text.
    pub fn with_reward(mut self, reward: impl Into<String>) -> Self {
        self.reward = reward.into();
        self
    }

    /// Whether `answer` matches the solution, ignoring case.
    pub fn accepts(&self, answer: &str) -> bool {
        self.solution.trim().to_lowercase() == answer.trim().to_lowercase()
    }
}
