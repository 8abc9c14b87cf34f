use serde::{Deserialize, Serialize};

/// A counter threshold that makes a progressive hint eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "threshold", rename_all = "snake_case")]
pub enum HintTrigger {
    /// Failed attempts recorded against the hint's context.
    FailedAttempts(u32),
    /// Whole minutes since the session started.
    TimeSpent(u32),
    /// Commands processed this session.
    CommandsTried(u32),
}

/// A hint that surfaces once the player has struggled long enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressiveHint {
    /// Room id or puzzle id the hint belongs to.
    pub context: String,
    /// Any one satisfied trigger makes the hint eligible.
    #[serde(default)]
    pub triggers: Vec<HintTrigger>,
    /// Text offered to the player.
    pub hint_text: String,
    /// Advisory ranking; higher is more specific.
    #[serde(default)]
    pub priority: i32,
}

impl ProgressiveHint {
    /// Create a hint with no triggers.
    pub fn new(context: impl Into<String>, hint_text: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            triggers: Vec::new(),
            hint_text: hint_text.into(),
            priority: 0,
        }
    }

    /// Add a trigger.
    pub fn with_trigger(mut self, trigger: HintTrigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}
