//! Intent detection via the hosted Gemini API
//!
//! Each captured utterance is sent with the registered tool declarations;
//! the model's function-call parts are the detected intents.

mod client;
mod types;

pub use client::{IntentClient, SYSTEM_INSTRUCTION};
pub use types::{
    Content, FunctionCall, FunctionDeclaration, FunctionResponse, GenerationConfig, InlineData,
    Part, ThinkingConfig,
};
