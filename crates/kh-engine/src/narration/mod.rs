//! Narration seam.
//!
//! The engine never calls a narrator itself. After a turn settles, the caller
//! builds a [`NarrationContext`] from the session and hands it to whatever
//! [`Narrator`] it holds. A failed narrator never changes the game; callers
//! fall back to [`FillerNarrator`] or to silence.

mod config;
mod context;
mod filler;

pub use config::{NarratorConfig, NarratorTone};
pub use context::NarrationContext;
pub use filler::FillerNarrator;

use thiserror::Error;

/// Why a narrator produced no text.
#[derive(Debug, Error)]
pub enum NarrationError {
    /// No backend is configured (for example, no API key).
    #[error("narration unavailable: {0}")]
    Unavailable(String),

    /// The backend request failed.
    #[error("narration request failed: {0}")]
    Request(String),

    /// The backend answered with no usable text.
    #[error("narration response was empty")]
    EmptyResponse,
}

/// Something that turns a settled turn into atmospheric text.
pub trait Narrator {
    /// Produce one or two sentences of atmosphere for the turn.
    fn narrate(&self, context: &NarrationContext) -> Result<String, NarrationError>;
}
