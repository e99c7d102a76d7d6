//! Gemini `generateContent` client

use super::types::{
    Content, FunctionDeclaration, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, Part, ThinkingConfig, ToolDeclarations,
};
use crate::{Error, Result};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// System instruction sent with every request
pub const SYSTEM_INSTRUCTION: &str = "You are a presentation assistant controlling a slide deck. \
     Listen to the presenter and call the matching tool when they ask to \
     navigate slides, add content, inject images, or summarize. When no tool \
     matches, stay silent. Keep any spoken acknowledgement to one short sentence.";

/// Detects intents in captured utterances via the hosted Gemini API
pub struct IntentClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    include_thoughts: bool,
}

impl IntentClient {
    /// Create a new intent client
    ///
    /// # Errors
    ///
    /// Returns error if the API key is empty
    pub fn new(api_key: String, model: String, include_thoughts: bool) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "GEMINI_API_KEY required for intent detection".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            include_thoughts,
        })
    }

    /// The configured model identifier
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one turn and return the model's response parts
    ///
    /// `contents` is the conversation so far: the utterance audio, then any
    /// model function calls and their responses from earlier iterations of
    /// the same turn.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API responds with a
    /// non-success status
    pub async fn detect(
        &self,
        contents: &[Content],
        declarations: Vec<FunctionDeclaration>,
    ) -> Result<Vec<Part>> {
        let request = GenerateContentRequest {
            contents,
            system_instruction: Some(Content::system(SYSTEM_INSTRUCTION)),
            tools: if declarations.is_empty() {
                Vec::new()
            } else {
                vec![ToolDeclarations {
                    function_declarations: declarations,
                }]
            },
            generation_config: Some(GenerationConfig {
                // Low temperature for consistent intent matching
                temperature: Some(0.0),
                thinking_config: self.include_thoughts.then_some(ThinkingConfig {
                    include_thoughts: true,
                }),
            }),
        };

        tracing::debug!(model = %self.model, turns = contents.len(), "sending intent request");

        let url = format!(
            "{API_BASE}/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "intent request failed");
                e
            })?;

        let status = response.status();
        tracing::debug!(status = %status, "received response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "intent API error");
            return Err(Error::Intent(format!("API error {status}: {body}")));
        }

        let result: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse intent response");
            e
        })?;

        let parts = result
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default();

        tracing::debug!(parts = parts.len(), "intent response parsed");
        Ok(parts)
    }
}
