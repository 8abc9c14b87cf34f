use super::{NarrationContext, NarrationError, Narrator};

const PHRASES: &[&str] = &[
    "The air feels thick with mystery.",
    "Something important must be nearby.",
    "You sense you're getting closer to the truth.",
    "The silence is almost deafening.",
    "Every detail might be crucial.",
];

/// Offline narrator that picks one of a few fixed phrases.
///
/// The choice is stable for a given command and move count.
#[derive(Debug, Clone, Copy, Default)]
pub struct FillerNarrator;

impl FillerNarrator {
    /// Pick the phrase for a context.
    pub fn phrase(context: &NarrationContext) -> &'static str {
        let index = (context.last_command.len() + context.moves as usize) % PHRASES.len();
        PHRASES[index]
    }
}

impl Narrator for FillerNarrator {
    fn narrate(&self, context: &NarrationContext) -> Result<String, NarrationError> {
        Ok(Self::phrase(context).to_string())
    }
}
