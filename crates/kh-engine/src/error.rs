//! Error types for the engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while setting up or driving a session.
///
/// Player mistakes are never errors; they become the turn's result text.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The input was blank after trimming.
    #[error("empty command")]
    EmptyCommand,

    /// The configured start room does not exist in the world.
    #[error("start room not found: {0}")]
    UnknownStartRoom(String),
}
