//! Tool registry and the built-in slide tools

mod executor;
pub mod slides;

pub use executor::{ToolExecutor, ToolHandler};
pub use slides::register_slide_tools;
