//! Daemon - the main client loop
//!
//! Orchestrates audio capture, utterance segmentation, intent detection,
//! tool execution, and execution logging.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::audit::{AuditEvent, ExecutionLog};
use crate::deck::DeckState;
use crate::intent::{Content, FunctionCall, IntentClient, Part};
use crate::tools::{ToolExecutor, register_slide_tools};
use crate::voice::{AudioCapture, UtteranceSegmenter, encode_wav};
use crate::{Config, Error, Result};

/// Capture drain interval
const TICK: Duration = Duration::from_millis(100);

/// Max intent/execute rounds per utterance
const MAX_TURN_ITERATIONS: usize = 5;

/// The podium daemon - capture, detect, execute, log
pub struct Daemon {
    config: Config,
    client: IntentClient,
    executor: Arc<ToolExecutor>,
    deck: Arc<DeckState>,
    log: ExecutionLog,
}

impl Daemon {
    /// Create a new daemon instance
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing or tool registration fails
    pub fn new(config: Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::Config("GEMINI_API_KEY not set".to_string()))?;

        let client = IntentClient::new(api_key, config.model.clone(), config.show_thinking)?;

        let deck = Arc::new(DeckState::new(config.total_slides));
        let mut executor = ToolExecutor::new();
        register_slide_tools(&mut executor, Arc::clone(&deck))?;

        let log = ExecutionLog::new(config.log_path.clone());

        tracing::info!(
            model = %config.model,
            total_slides = config.total_slides,
            tools = ?executor.tool_names(),
            "daemon initialized"
        );

        Ok(Self {
            config,
            client,
            executor: Arc::new(executor),
            deck,
            log,
        })
    }

    /// The shared deck state
    #[must_use]
    pub fn deck(&self) -> Arc<DeckState> {
        Arc::clone(&self.deck)
    }

    /// Run the client until interrupted
    ///
    /// # Errors
    ///
    /// Returns error if audio capture cannot be started
    #[allow(clippy::future_not_send)]
    pub async fn run(self) -> Result<()> {
        let session = self.deck.context().await;
        self.log.append(
            AuditEvent::SessionStart,
            &format!("session {}", session.session_id),
        );

        let capture = AudioCapture::open()?;
        let mut segmenter = UtteranceSegmenter::new();

        tracing::info!(
            log = %self.config.log_path.display(),
            "listening - speak to control the deck"
        );

        loop {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    if result.is_ok() {
                        tracing::info!("shutdown requested");
                    }
                    break;
                }
                () = tokio::time::sleep(TICK) => {
                    let Some(samples) = capture.drain_chunk() else {
                        continue;
                    };

                    if segmenter.process(&samples) {
                        let utterance = segmenter.take_utterance();
                        if let Err(e) = self.run_turn(&utterance).await {
                            tracing::error!(error = %e, "turn failed");
                        }
                    }
                }
            }
        }

        drop(capture);
        self.log.append(
            AuditEvent::SessionEnd,
            &format!("session {}", session.session_id),
        );

        Ok(())
    }

    /// Run one intent turn for a captured utterance
    ///
    /// Iterates until the model stops calling tools or the iteration cap is
    /// reached; every execution is appended to the log.
    async fn run_turn(&self, utterance: &[f32]) -> Result<()> {
        tracing::debug!(samples = utterance.len(), "processing utterance");

        let wav = encode_wav(utterance)?;
        let audio_b64 = STANDARD.encode(&wav);

        let mut contents = vec![Content::user(vec![Part::audio_wav(audio_b64)])];

        for _round in 0..MAX_TURN_ITERATIONS {
            let parts = self
                .client
                .detect(&contents, self.executor.declarations())
                .await?;

            let mut calls: Vec<FunctionCall> = Vec::new();

            for part in &parts {
                if part.thought {
                    if self.config.show_thinking {
                        if let Some(text) = &part.text {
                            println!("[thinking] {text}");
                        }
                    }
                    continue;
                }

                if let Some(text) = &part.text {
                    self.deck.add_transcript_entry("assistant", text).await;
                    println!("{text}");
                }

                if let Some(call) = &part.function_call {
                    calls.push(call.clone());
                }
            }

            if calls.is_empty() {
                break;
            }

            contents.push(Content::model(
                calls
                    .iter()
                    .map(|c| Part::function_call(c.clone()))
                    .collect(),
            ));

            let mut responses = Vec::with_capacity(calls.len());
            for call in &calls {
                responses.push(Part::function_response(self.execute_call(call).await));
            }
            contents.push(Content::user(responses));
        }

        Ok(())
    }

    /// Execute one detected intent with audit logging
    async fn execute_call(&self, call: &FunctionCall) -> crate::intent::FunctionResponse {
        self.log.append(
            AuditEvent::IntentDetected,
            &format!(
                "function: {} (id: {})",
                call.name,
                call.id.as_deref().unwrap_or("-")
            ),
        );

        let args_display = call
            .args
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "{}".to_string());
        self.log.append(
            AuditEvent::Executing,
            &format!("{}({args_display})", call.name),
        );

        let response = self.executor.execute(call).await;

        if response.response["result"] == "success" {
            self.log
                .append(AuditEvent::Success, &format!("{} completed", call.name));
        } else {
            let error = response.response["error"].as_str().unwrap_or("unknown");
            self.log
                .append(AuditEvent::Error, &format!("{}: {error}", call.name));
        }

        response
    }
}
