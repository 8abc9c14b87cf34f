//! Escape-room engine for Keyhole.
//!
//! Turns free-text player commands into changes to a [`kh_world::World`] and a
//! per-session [`GameState`]. The engine is synchronous and has no I/O: one
//! command is interpreted, dispatched, and settled before the next one, and
//! the optional narration layer is an injectable [`narration::Narrator`] held
//! by the caller.

/// Hard-coded item combinations that sit beside the declarative `use_with`.
pub mod combos;
/// Session configuration.
pub mod config;
/// Error types for the engine.
pub mod error;
/// Win condition and progressive-hint eligibility.
pub mod evaluator;
/// Narration seam: context, narrator trait, filler fallback.
pub mod narration;
/// Command interpretation.
pub mod parser;
/// Declarative action firing: conditions and effects.
pub mod rules;
/// The play session and its verb handlers.
pub mod session;
/// Per-session game state.
pub mod state;

pub use config::SessionConfig;
pub use error::{EngineError, EngineResult};
pub use parser::{Command, Verb, parse_command};
pub use session::Session;
pub use state::GameState;
