//! Narrator persona and prompt rendering.

use std::str::FromStr;

use super::NarrationContext;

/// Narrator tone - colours the persona handed to the text generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NarratorTone {
    /// Mysterious, slightly ominous.
    #[default]
    Ominous,
    /// Playful and light.
    Whimsical,
    /// Hard-boiled detective.
    Noir,
    /// Understated, wry.
    Dry,
}

impl NarratorTone {
    /// All tones, in display order.
    pub const ALL: [Self; 4] = [Self::Ominous, Self::Whimsical, Self::Noir, Self::Dry];

    /// Lowercase name, as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ominous => "ominous",
            Self::Whimsical => "whimsical",
            Self::Noir => "noir",
            Self::Dry => "dry",
        }
    }

    fn persona(&self) -> &'static str {
        match self {
            Self::Ominous => "a mysterious, slightly ominous AI narrator",
            Self::Whimsical => "a playful, whimsical narrator with a fondness for odd details",
            Self::Noir => "a world-weary noir narrator who has seen too many locked rooms",
            Self::Dry => "a dry, understated narrator",
        }
    }
}

impl FromStr for NarratorTone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tone: {s}"))
    }
}

/// Configuration for a text-generating narrator.
#[derive(Debug, Clone)]
pub struct NarratorConfig {
    /// The tone of narration.
    pub tone: NarratorTone,
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            tone: NarratorTone::default(),
            temperature: 0.7,
            max_tokens: 150,
        }
    }
}

impl NarratorConfig {
    /// Create a new narrator config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tone.
    pub fn with_tone(mut self, tone: NarratorTone) -> Self {
        self.tone = tone;
        self
    }

    /// Set the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the token limit.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// The system message for the narrator.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {} for an escape room. Be atmospheric and engaging, but don't give away \
             solutions directly.",
            self.tone.persona()
        )
    }

    /// The user message describing the turn.
    pub fn render_prompt(&self, ctx: &NarrationContext) -> String {
        let mut lines = vec![
            "The game engine has already shown the player the factual result of their \
             command. Your job is ONLY to add immersive atmosphere."
                .to_string(),
            String::new(),
            format!("Theme: {}", ctx.theme),
            format!("Setting: {}", ctx.setting),
            format!("Current room: {} - {}", ctx.room_name, ctx.room_description),
        ];
        if !ctx.visible_items.is_empty() {
            lines.push(format!("Visible here: {}", ctx.visible_items.join(", ")));
        }
        lines.extend([
            format!("Current situation: {}", ctx.last_result),
            String::new(),
            format!("Player's last action: {}", ctx.player_input),
            format!("Inventory: {}", list_or_nothing(&ctx.inventory)),
            format!(
                "Progress: {}/{} puzzles solved",
                ctx.puzzles_solved, ctx.puzzles_total
            ),
            format!("Commands tried: {}", ctx.commands_tried),
        ]);

        if !ctx.hints.is_empty() {
            lines.push(String::new());
            lines.push("Progressive hints (weave these in subtly, never verbatim):".to_string());
            lines.extend(ctx.hints.iter().map(|hint| format!("- {hint}")));
        }

        lines.push(String::new());
        lines.push(
            "Write 1-2 sentences of atmospheric narration. Focus on mood, senses, and \
             tension. Never repeat the items, room details, or action result above."
                .to_string(),
        );
        lines.join("\n")
    }
}

fn list_or_nothing(names: &[String]) -> String {
    if names.is_empty() {
        "nothing".to_string()
    } else {
        names.join(", ")
    }
}
