//! Podium - Voice-controlled presentation assistant
//!
//! This library provides the core functionality for the podium client:
//! - Audio capture and utterance segmentation
//! - Intent detection via the hosted Gemini API
//! - Tool registry mapping detected intents to slide-deck operations
//! - Append-only execution logging
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   Microphone                         │
//! └────────────────────┬────────────────────────────────┘
//!                      │ 16kHz PCM
//! ┌────────────────────▼────────────────────────────────┐
//! │                 Podium Daemon                        │
//! │   Capture  │  Segmenter  │  Executor  │  Deck       │
//! └────────────────────┬────────────────────────────────┘
//!                      │ audio + tool declarations
//! ┌────────────────────▼────────────────────────────────┐
//! │            Gemini API (intent detection)             │
//! │   function calls  │  text  │  thinking logs         │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod audit;
pub mod config;
pub mod daemon;
pub mod deck;
pub mod error;
pub mod intent;
pub mod tools;
pub mod voice;

pub use audit::{AuditEvent, ExecutionLog};
pub use config::Config;
pub use daemon::Daemon;
pub use deck::{ContentKind, DeckState, InjectionRecord, NavDirection, TranscriptEntry};
pub use error::{Error, Result};
pub use intent::{FunctionCall, FunctionDeclaration, FunctionResponse, IntentClient, Part};
pub use tools::{ToolExecutor, ToolHandler};
