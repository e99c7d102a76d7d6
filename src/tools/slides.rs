//! Slide-deck control tools
//!
//! The built-in tools the daemon registers: navigation, content injection,
//! image injection (recorded, not yet generated), transcript summaries, and
//! a state snapshot.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::deck::{ContentKind, DeckState, NavDirection};
use crate::intent::FunctionDeclaration;
use crate::{Error, Result};

use super::executor::{ToolExecutor, ToolHandler};

/// Default placeholder for injected text content
const CONTENT_PLACEHOLDER: &str = "AI:CONTENT";

/// Default placeholder for injected images
const IMAGE_PLACEHOLDER: &str = "AI:IMAGE";

/// Placeholder for the generated summary
const SUMMARY_PLACEHOLDER: &str = "AI:SUMMARY";

/// Transcript entries considered when summarizing
const SUMMARY_WINDOW: usize = 20;

/// Register all slide tools on the executor
///
/// # Errors
///
/// Returns error if a tool name collides with an existing registration
pub fn register_slide_tools(executor: &mut ToolExecutor, deck: Arc<DeckState>) -> Result<()> {
    executor.register(navigate_declaration(), Arc::new(NavigateSlide::new(&deck)))?;
    executor.register(add_content_declaration(), Arc::new(AddContent::new(&deck)))?;
    executor.register(inject_image_declaration(), Arc::new(InjectImage::new(&deck)))?;
    executor.register(
        generate_summary_declaration(),
        Arc::new(GenerateSummary::new(&deck)),
    )?;
    executor.register(context_declaration(), Arc::new(PresentationContext::new(&deck)))?;
    Ok(())
}

fn navigate_declaration() -> FunctionDeclaration {
    FunctionDeclaration {
        name: "navigate_slide".to_string(),
        description: "Navigate the slide deck: move to the next or previous slide, \
                      or jump to a specific slide number."
            .to_string(),
        parameters: Some(serde_json::json!({
            "type": "object",
            "properties": {
                "direction": {
                    "type": "string",
                    "enum": ["next", "prev", "jump"],
                    "description": "Navigation direction"
                },
                "index": {
                    "type": "integer",
                    "description": "Target slide index (0-based), required for jump"
                }
            },
            "required": ["direction"]
        })),
    }
}

fn add_content_declaration() -> FunctionDeclaration {
    FunctionDeclaration {
        name: "add_content".to_string(),
        description: "Add bullet points, notes, or other text to the current slide."
            .to_string(),
        parameters: Some(serde_json::json!({
            "type": "object",
            "properties": {
                "content": {
                    "type": "string",
                    "description": "The text content to add"
                },
                "placeholder": {
                    "type": "string",
                    "description": "Placeholder identifier in the slide markup"
                }
            },
            "required": ["content"]
        })),
    }
}

fn inject_image_declaration() -> FunctionDeclaration {
    FunctionDeclaration {
        name: "inject_image".to_string(),
        description: "Generate an image from a description and place it on the \
                      current slide."
            .to_string(),
        parameters: Some(serde_json::json!({
            "type": "object",
            "properties": {
                "prompt": {
                    "type": "string",
                    "description": "Description of the image to generate"
                },
                "placeholder": {
                    "type": "string",
                    "description": "Placeholder identifier in the slide markup"
                }
            },
            "required": ["prompt"]
        })),
    }
}

fn generate_summary_declaration() -> FunctionDeclaration {
    FunctionDeclaration {
        name: "generate_summary".to_string(),
        description: "Summarize what has been said so far into bullet points on \
                      the current slide."
            .to_string(),
        parameters: None,
    }
}

fn context_declaration() -> FunctionDeclaration {
    FunctionDeclaration {
        name: "get_presentation_context".to_string(),
        description: "Get the current presentation state: slide position, \
                      transcript and injection counts."
            .to_string(),
        parameters: None,
    }
}

/// `navigate_slide`
struct NavigateSlide {
    deck: Arc<DeckState>,
}

impl NavigateSlide {
    fn new(deck: &Arc<DeckState>) -> Self {
        Self {
            deck: Arc::clone(deck),
        }
    }
}

#[derive(Deserialize)]
struct NavigateArgs {
    direction: String,
    index: Option<usize>,
}

#[async_trait]
impl ToolHandler for NavigateSlide {
    async fn call(&self, args: serde_json::Value) -> Result<serde_json::Value> {
        let args: NavigateArgs =
            serde_json::from_value(args).map_err(|e| Error::Tool(e.to_string()))?;

        let direction = NavDirection::from_str(&args.direction)?;
        let new_index = self.deck.navigate(direction, args.index).await?;
        let total = self.deck.total_slides().await;

        Ok(serde_json::json!({
            "action": "navigate",
            "success": true,
            "direction": args.direction,
            "current_slide": new_index,
            "total_slides": total,
        }))
    }
}

/// `add_content`
struct AddContent {
    deck: Arc<DeckState>,
}

impl AddContent {
    fn new(deck: &Arc<DeckState>) -> Self {
        Self {
            deck: Arc::clone(deck),
        }
    }
}

#[derive(Deserialize)]
struct AddContentArgs {
    content: String,
    placeholder: Option<String>,
}

#[async_trait]
impl ToolHandler for AddContent {
    async fn call(&self, args: serde_json::Value) -> Result<serde_json::Value> {
        let args: AddContentArgs =
            serde_json::from_value(args).map_err(|e| Error::Tool(e.to_string()))?;

        let placeholder = args
            .placeholder
            .unwrap_or_else(|| CONTENT_PLACEHOLDER.to_string());
        let slide_index = self.deck.current_slide().await;

        self.deck
            .track_injection(
                &placeholder,
                ContentKind::Text,
                serde_json::Value::String(args.content.clone()),
                Some(slide_index),
            )
            .await;

        Ok(serde_json::json!({
            "action": "add_content",
            "success": true,
            "placeholder": placeholder,
            "content": args.content,
            "slide_index": slide_index,
        }))
    }
}

/// `inject_image`
///
/// Records the generation request; the image itself is produced by a later
/// render pass outside this client.
struct InjectImage {
    deck: Arc<DeckState>,
}

impl InjectImage {
    fn new(deck: &Arc<DeckState>) -> Self {
        Self {
            deck: Arc::clone(deck),
        }
    }
}

#[derive(Deserialize)]
struct InjectImageArgs {
    prompt: String,
    placeholder: Option<String>,
}

#[async_trait]
impl ToolHandler for InjectImage {
    async fn call(&self, args: serde_json::Value) -> Result<serde_json::Value> {
        let args: InjectImageArgs =
            serde_json::from_value(args).map_err(|e| Error::Tool(e.to_string()))?;

        let placeholder = args
            .placeholder
            .unwrap_or_else(|| IMAGE_PLACEHOLDER.to_string());
        let slide_index = self.deck.current_slide().await;

        self.deck
            .track_injection(
                &placeholder,
                ContentKind::Image,
                serde_json::json!({ "prompt": args.prompt }),
                Some(slide_index),
            )
            .await;

        Ok(serde_json::json!({
            "action": "inject_image",
            "success": true,
            "placeholder": placeholder,
            "prompt": args.prompt,
            "slide_index": slide_index,
        }))
    }
}

/// `generate_summary`
struct GenerateSummary {
    deck: Arc<DeckState>,
}

impl GenerateSummary {
    fn new(deck: &Arc<DeckState>) -> Self {
        Self {
            deck: Arc::clone(deck),
        }
    }
}

#[async_trait]
impl ToolHandler for GenerateSummary {
    async fn call(&self, _args: serde_json::Value) -> Result<serde_json::Value> {
        let recent = self.deck.recent_transcript(SUMMARY_WINDOW).await;

        if recent.is_empty() {
            return Err(Error::Tool(
                "no transcript available to summarize".to_string(),
            ));
        }

        let summary = summarize(recent.iter().map(|e| e.text.as_str()));

        let slide_index = self.deck.current_slide().await;
        self.deck
            .track_injection(
                SUMMARY_PLACEHOLDER,
                ContentKind::Summary,
                serde_json::Value::String(summary.clone()),
                Some(slide_index),
            )
            .await;

        Ok(serde_json::json!({
            "action": "generate_summary",
            "success": true,
            "summary": summary,
            "slide_index": slide_index,
        }))
    }
}

/// Build bullet points from transcript texts
///
/// Takes the first five substantial entries, truncating long ones.
fn summarize<'a>(texts: impl Iterator<Item = &'a str>) -> String {
    let bullets: Vec<String> = texts
        .filter(|t| t.len() > 10)
        .take(5)
        .map(|t| {
            let truncated: String = t.chars().take(100).collect();
            if truncated.len() < t.len() {
                format!("- {truncated}...")
            } else {
                format!("- {truncated}")
            }
        })
        .collect();

    bullets.join("\n")
}

/// `get_presentation_context`
struct PresentationContext {
    deck: Arc<DeckState>,
}

impl PresentationContext {
    fn new(deck: &Arc<DeckState>) -> Self {
        Self {
            deck: Arc::clone(deck),
        }
    }
}

#[async_trait]
impl ToolHandler for PresentationContext {
    async fn call(&self, _args: serde_json::Value) -> Result<serde_json::Value> {
        let context = self.deck.context().await;

        // Flatten the snapshot fields into the result object
        let mut result = match serde_json::to_value(&context)? {
            serde_json::Value::Object(fields) => fields,
            _ => serde_json::Map::new(),
        };
        result.insert("action".to_string(), "get_context".into());
        result.insert("success".to_string(), true.into());

        Ok(serde_json::Value::Object(result))
    }
}
