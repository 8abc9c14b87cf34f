//! World definition for Keyhole: rooms, items, puzzles, actions, and hints.
//!
//! This crate defines the scripted data an escape room is made of. It is
//! independent of the engine: you can construct a [`World`] programmatically
//! or decode one from a JSON world document. During play only the `hidden`
//! flag of items, the `locked` flag of rooms, and the `solved` flag of puzzles
//! change, and only through the named transitions on [`World`].

/// Declarative actions: triggers, conditions, and effects.
pub mod action;
/// The built-in "uncle's study" scenario.
pub mod builtin;
/// Error types used throughout the crate.
pub mod error;
/// Progressive hints and their triggers.
pub mod hint;
/// Rooms, items, and puzzles.
pub mod model;
/// The indexed world store and its JSON document form.
pub mod world;

/// Re-export action types.
pub use action::{Action, Condition, Effect, Trigger, TriggerKind};
/// Re-export error types.
pub use error::{WorldError, WorldResult};
/// Re-export hint types.
pub use hint::{HintTrigger, ProgressiveHint};
/// Re-export the core model types.
pub use model::{Item, Puzzle, Room};
/// Re-export world model types.
pub use world::{World, WorldDocument, WorldIssue, WorldMeta};
