//! Configuration for a play session.

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Room id to start in; `None` starts in the world's first room.
    pub start_room: Option<String>,
    /// Apply the hard-coded combination table before `use_with`.
    pub builtin_combinations: bool,
    /// Count "missing required items" as a failed puzzle attempt.
    pub count_missing_items: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_room: None,
            builtin_combinations: true,
            count_missing_items: true,
        }
    }
}

impl SessionConfig {
    /// Start in a specific room.
    pub fn with_start_room(mut self, room_id: impl Into<String>) -> Self {
        self.start_room = Some(room_id.into());
        self
    }

    /// Enable or disable the hard-coded combination table.
    pub fn with_builtin_combinations(mut self, enabled: bool) -> Self {
        self.builtin_combinations = enabled;
        self
    }

    /// Enable or disable counting missing items as failures.
    pub fn with_missing_items_counted(mut self, enabled: bool) -> Self {
        self.count_missing_items = enabled;
        self
    }
}
