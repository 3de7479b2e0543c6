// SPDX-License-Identifier: MIT

//! Groq completion API client for AI vibe generation.
//!
//! Calls the OpenAI-compatible chat completions endpoint and parses the
//! model's JSON reply into an [`AiVibe`]. Every failure mode (network,
//! non-2xx, malformed payload) surfaces as a typed error so the engine can
//! fall back to local generation.

use crate::error::AppError;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The prompt asks for exactly this many colors; anything else means the
/// model ignored the schema and the reply is treated as malformed.
const EXPECTED_COLORS: usize = 3;

/// Groq chat completions client.
#[derive(Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

/// Narrative fields produced by the AI for one vibe.
///
/// The luck score is chosen by the engine before the call and is not part
/// of the response; the model only writes text consistent with it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AiVibe {
    pub fortune_text: String,
    pub colors: Vec<String>,
    pub song: String,
}

/// Chat completions response envelope (the part we read).
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

impl CompletionClient {
    /// Create a new client with API credentials.
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key,
            model,
        }
    }

    /// Override the API base URL (tests).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Generate narrative fields for a mood and a pre-chosen luck score.
    pub async fn complete(&self, mood: &str, luck_score: u8) -> Result<AiVibe, AppError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = serde_json::json!({
            "model": self.model,
            "temperature": 0.9,
            "response_format": { "type": "json_object" },
            "messages": [
                {
                    "role": "system",
                    "content": "You write playful daily fortunes. Reply with a single JSON \
                                object: {\"fortune_text\": string (one or two teasing \
                                sentences matching the luck score), \"colors\": array of \
                                exactly 3 hex color strings matching the mood, \"song\": \
                                string (one song recommendation as \"Title - Artist\")}."
                },
                {
                    "role": "user",
                    "content": format!(
                        "Mood: {}\nLuck score (0-100, already decided, do not change it): {}",
                        mood, luck_score
                    )
                }
            ]
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::CompletionApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::CompletionApi(format!("HTTP {}: {}", status, body)));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::CompletionApi(format!("JSON parse error: {}", e)))?;

        let content = chat
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| AppError::CompletionApi("Empty choices in response".to_string()))?;

        parse_ai_payload(content)
    }
}

/// Parse and validate the model's JSON payload.
fn parse_ai_payload(content: &str) -> Result<AiVibe, AppError> {
    let vibe: AiVibe = serde_json::from_str(content)
        .map_err(|e| AppError::CompletionApi(format!("Malformed AI payload: {}", e)))?;

    if vibe.fortune_text.trim().is_empty() {
        return Err(AppError::CompletionApi(
            "AI payload has empty fortune_text".to_string(),
        ));
    }
    if vibe.colors.len() != EXPECTED_COLORS {
        return Err(AppError::CompletionApi(format!(
            "AI payload has {} colors, expected {}",
            vibe.colors.len(),
            EXPECTED_COLORS
        )));
    }
    if vibe.song.trim().is_empty() {
        return Err(AppError::CompletionApi(
            "AI payload has empty song".to_string(),
        ));
    }

    Ok(vibe)
}
