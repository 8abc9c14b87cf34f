//! Per-session game state.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};

/// The player's progress through one session.
///
/// Owned by the [`crate::Session`]; callers only ever see it by reference.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Id of the room the player is in.
    pub current_room: String,
    /// Held item ids, in pickup order, without duplicates.
    pub inventory: Vec<String>,
    /// Solved puzzle ids.
    pub solved_puzzles: BTreeSet<String>,
    /// Item ids the player has seen: looked at, taken, revealed, or produced.
    pub discovered_items: BTreeSet<String>,
    /// One-time action ids that have fired.
    pub performed_actions: BTreeSet<String>,
    /// Failed attempts keyed by room id or puzzle id.
    pub failed_attempts: HashMap<String, u32>,
    /// Commands processed this session.
    pub command_attempts: u32,
    /// Moves made this session (every processed command counts).
    pub moves: u32,
    /// When the session started.
    pub started_at: DateTime<Utc>,
    /// Set once every puzzle is solved; never cleared.
    pub won: bool,
    /// The raw text of the last command.
    pub last_command: String,
    /// The authoritative result text of the last command.
    pub last_result: String,
}

impl GameState {
    /// Create a fresh state in the given room, starting the clock now.
    pub fn new(start_room: impl Into<String>) -> Self {
        Self::started_at(start_room, Utc::now())
    }

    /// Create a fresh state with an explicit start time.
    pub fn started_at(start_room: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            current_room: start_room.into(),
            inventory: Vec::new(),
            solved_puzzles: BTreeSet::new(),
            discovered_items: BTreeSet::new(),
            performed_actions: BTreeSet::new(),
            failed_attempts: HashMap::new(),
            command_attempts: 0,
            moves: 0,
            started_at,
            won: false,
            last_command: String::new(),
            last_result: String::new(),
        }
    }

    /// Check if the player holds an item.
    pub fn has_item(&self, item_id: &str) -> bool {
        self.inventory.iter().any(|i| i == item_id)
    }

    /// Add an item to the inventory. Returns false if it was already held.
    pub fn add_item(&mut self, item_id: impl Into<String>) -> bool {
        let item_id = item_id.into();
        if self.has_item(&item_id) {
            return false;
        }
        self.discovered_items.insert(item_id.clone());
        self.inventory.push(item_id);
        true
    }

    /// Remove the first occurrence of an item. Returns false if not held.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        if let Some(pos) = self.inventory.iter().position(|i| i == item_id) {
            self.inventory.remove(pos);
            true
        } else {
            false
        }
    }

    /// Check if a puzzle is solved.
    pub fn is_solved(&self, puzzle_id: &str) -> bool {
        self.solved_puzzles.contains(puzzle_id)
    }

    /// Record a puzzle as solved. Returns false if it already was.
    pub fn mark_solved(&mut self, puzzle_id: impl Into<String>) -> bool {
        self.solved_puzzles.insert(puzzle_id.into())
    }

    /// Check if a one-time action has fired.
    pub fn has_performed(&self, action_id: &str) -> bool {
        self.performed_actions.contains(action_id)
    }

    /// Record a one-time action as fired.
    pub fn record_performed(&mut self, action_id: impl Into<String>) {
        self.performed_actions.insert(action_id.into());
    }

    /// Record that the player has seen an item.
    pub fn discover(&mut self, item_id: impl Into<String>) {
        self.discovered_items.insert(item_id.into());
    }

    /// Count one failed attempt against a context.
    pub fn record_failure(&mut self, context: impl Into<String>) {
        *self.failed_attempts.entry(context.into()).or_insert(0) += 1;
    }

    /// Failed attempts recorded against a context.
    pub fn failures(&self, context: &str) -> u32 {
        self.failed_attempts.get(context).copied().unwrap_or(0)
    }

    /// Whole minutes elapsed between the session start and `now`.
    pub fn minutes_elapsed(&self, now: DateTime<Utc>) -> u32 {
        let minutes = (now - self.started_at).num_minutes().max(0);
        u32::try_from(minutes).unwrap_or(u32::MAX)
    }
}

/// Format an elapsed number of seconds as `42s`, `3m12s`, or `1h2m3s`.
pub fn format_elapsed(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let (h, m, s) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
    if h > 0 {
        format!("{h}h{m}m{s}s")
    } else if m > 0 {
        format!("{m}m{s}s")
    } else {
        format!("{s}s")
    }
}
