use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of player command an action listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// `look <target>` / `examine <target>`.
    Examine,
    /// `take <target>`.
    Take,
    /// `use <target>`.
    Use,
    /// `use <target> with <with>` / `use <target> on <with>`.
    UseWith,
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Examine => "examine",
            Self::Take => "take",
            Self::Use => "use",
            Self::UseWith => "use_with",
        };
        f.write_str(s)
    }
}

/// What a player command must look like for an action to be considered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    /// Command kind.
    #[serde(rename = "type")]
    pub kind: TriggerKind,
    /// Text that must appear inside the command's target.
    pub target: String,
    /// Text that must appear inside the secondary target, for `use_with`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with: Option<String>,
}

impl Trigger {
    /// Create a trigger without a secondary target.
    pub fn new(kind: TriggerKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            with: None,
        }
    }

    /// Create a `use_with` trigger.
    pub fn use_with(target: impl Into<String>, with: impl Into<String>) -> Self {
        Self {
            kind: TriggerKind::UseWith,
            target: target.into(),
            with: Some(with.into()),
        }
    }

    /// Whether a command of `kind` on `target` (and `with`) matches.
    ///
    /// Matching is containment, not equality: the declared target only has to
    /// appear somewhere in the player's text, ignoring case, so the trigger
    /// target `desk` matches `examine desk drawer`. An empty `with` on the
    /// trigger accepts any secondary target.
    pub fn matches(&self, kind: TriggerKind, target: &str, with: &str) -> bool {
        if self.kind != kind {
            return false;
        }
        if !contains_ignore_case(target, &self.target) {
            return false;
        }
        match self.with.as_deref() {
            Some(w) if !w.is_empty() => contains_ignore_case(with, w),
            _ => true,
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// A guard that must hold for an action to fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Condition {
    /// The item id is in the inventory.
    HasItem(String),
    /// The player is in the room id.
    InRoom(String),
    /// The puzzle id has been solved.
    PuzzleSolved(String),
    /// The one-time action id has already fired.
    ActionPerformed(String),
}

/// A state change applied when an action fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "target", rename_all = "snake_case")]
pub enum Effect {
    /// Clear an item's hidden flag.
    RevealItem(String),
    /// Set an item's hidden flag.
    HideItem(String),
    /// Clear a room's locked flag.
    UnlockRoom(String),
    /// Add an item to the inventory unless already held.
    AddInventory(String),
    /// Remove the first occurrence of an item from the inventory.
    RemoveInventory(String),
}

/// A declarative rule: when the trigger matches and every condition holds,
/// apply the effects and show the message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Unique identifier, recorded once a one-time action fires.
    pub id: String,
    /// Command pattern.
    pub trigger: Trigger,
    /// Guards, all of which must hold.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Effects, applied in order.
    #[serde(default)]
    pub effects: Vec<Effect>,
    /// Replaces the turn's result text when non-empty.
    #[serde(default)]
    pub message: String,
    /// Fire at most once per session.
    #[serde(default)]
    pub one_time_only: bool,
}

impl Action {
    /// Create a repeatable action with no conditions or effects.
    pub fn new(id: impl Into<String>, trigger: Trigger) -> Self {
        Self {
            id: id.into(),
            trigger,
            conditions: Vec::new(),
            effects: Vec::new(),
            message: String::new(),
            one_time_only: false,
        }
    }

    /// Add a condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add an effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Set the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Make the action fire at most once.
    pub fn once(mut self) -> Self {
        self.one_time_only = true;
        self
    }
}
