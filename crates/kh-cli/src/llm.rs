//! OpenAI-compatible chat client for narration and scenario generation.

use std::time::Duration;

use kh_engine::narration::{NarrationContext, NarrationError, Narrator, NarratorConfig};
use kh_world::{World, builtin};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

/// Connection settings, usually from flags and environment.
pub struct ChatSettings {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub timeout: Duration,
}

/// A blocking chat-completions client.
pub struct ChatClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    /// Build a client, or `None` when no API key is configured.
    pub fn from_settings(settings: &ChatSettings) -> Result<Option<Self>, String> {
        let Some(api_key) = settings.api_key.clone().filter(|k| !k.trim().is_empty()) else {
            log::info!("no API key set; narration and scenario generation are offline");
            return Ok(None);
        };

        let http = reqwest::blocking::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| format!("cannot build HTTP client: {e}"))?;

        Ok(Some(Self {
            http,
            endpoint: format!("{}/chat/completions", settings.api_base.trim_end_matches('/')),
            api_key,
            model: settings.model.clone(),
        }))
    }

    /// Send a system and a user message, return the first choice's text.
    pub fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> Result<String, NarrationError> {
        let req = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature,
            max_tokens,
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| NarrationError::Request(e.to_string()))?
            .json::<ChatCompletionResponse>()
            .map_err(|e| NarrationError::Request(e.to_string()))?;

        resp.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(NarrationError::EmptyResponse)
    }
}

/// Narrator backed by the chat service.
pub struct ChatNarrator {
    client: ChatClient,
    config: NarratorConfig,
}

impl ChatNarrator {
    pub fn new(client: ChatClient, config: NarratorConfig) -> Self {
        Self { client, config }
    }
}

impl Narrator for ChatNarrator {
    fn narrate(&self, context: &NarrationContext) -> Result<String, NarrationError> {
        self.client.complete(
            &self.config.system_prompt(),
            &self.config.render_prompt(context),
            self.config.temperature,
            Some(self.config.max_tokens),
        )
    }
}

const DESIGNER_SYSTEM: &str = "You are a creative escape room designer. Generate detailed, \
    immersive scenarios with logical puzzles and interconnected elements. Always respond with \
    valid JSON only.";

fn designer_prompt(theme: &str) -> String {
    format!(
        r#"Generate a complete escape room scenario with the theme: {theme}

Respond with one JSON object with these fields:
- theme, setting, backstory, win_condition: strings
- rooms: 3-5 rooms, each {{"id", "name", "description", "items": [item ids], "puzzles": [puzzle ids], "exits": [room ids], "locked": bool, "unlock_key": item id or omitted}}. The first room is the start.
- items: each {{"id", "name", "description", "usable": bool, "use_with": item id or omitted, "hidden": bool, "revealed_by": action id or omitted}}
- puzzles: each {{"id", "name", "description", "solution", "required_items": [item ids], "reward"}}
- actions: each {{"id", "trigger": {{"type": "examine"|"take"|"use"|"use_with", "target", "with"}}, "conditions": [{{"type": "has_item"|"in_room"|"puzzle_solved"|"action_performed", "value"}}], "effects": [{{"type": "reveal_item"|"hide_item"|"unlock_room"|"add_inventory"|"remove_inventory", "target"}}], "message", "one_time_only": bool}}
- hints: object mapping room ids to a helpful hint
- progressive_hints: each {{"context": room or puzzle id, "triggers": [{{"type": "failed_attempts"|"time_spent"|"commands_tried", "threshold": number}}], "hint_text", "priority": number}}

Every id you reference must be defined. Include at least 3 puzzles, 5 items, 3 actions, and 3 progressive hints. Some items should start hidden and be revealed by actions. Make it challenging but solvable."#
    )
}

/// Ask the chat service for a world, falling back to the built-in scenario.
pub fn generate_world(client: Option<&ChatClient>, theme: &str) -> World {
    let Some(client) = client else {
        return builtin::uncles_study(theme);
    };

    match request_world(client, theme) {
        Ok(world) => {
            log::info!("generated scenario for theme `{theme}`");
            world
        }
        Err(e) => {
            log::warn!("scenario generation failed, using the built-in scenario: {e}");
            builtin::uncles_study(theme)
        }
    }
}

fn request_world(client: &ChatClient, theme: &str) -> Result<World, String> {
    let text = client
        .complete(DESIGNER_SYSTEM, &designer_prompt(theme), 0.8, None)
        .map_err(|e| e.to_string())?;

    let world = World::from_json(strip_code_fence(&text).as_bytes()).map_err(|e| e.to_string())?;
    if !world.is_current_format() {
        return Err("generated scenario has no actions or progressive hints".into());
    }
    for issue in world.validate() {
        log::warn!("generated scenario: {issue}");
    }
    Ok(world)
}

/// Models often wrap JSON in a markdown fence.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
