//! Tool executor — dispatches detected intents to registered handlers

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::intent::{FunctionCall, FunctionDeclaration, FunctionResponse};
use crate::{Error, Result};

/// A registered tool implementation
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with the given JSON arguments
    ///
    /// # Errors
    ///
    /// Returns error if the arguments are malformed or the operation fails;
    /// the executor converts it into an error-shaped response for the model
    async fn call(&self, args: serde_json::Value) -> Result<serde_json::Value>;
}

struct RegisteredTool {
    declaration: FunctionDeclaration,
    handler: Arc<dyn ToolHandler>,
}

/// Registry mapping intent names to handlers
///
/// Execution never returns a crate error: unknown names and handler failures
/// become error-shaped [`FunctionResponse`]s so the model always receives a
/// response for every call it made.
#[derive(Default)]
pub struct ToolExecutor {
    tools: HashMap<String, RegisteredTool>,
}

impl ToolExecutor {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    ///
    /// # Errors
    ///
    /// Returns error if a tool with the same name is already registered
    pub fn register(
        &mut self,
        declaration: FunctionDeclaration,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<()> {
        let name = declaration.name.clone();
        if self.tools.contains_key(&name) {
            return Err(Error::Tool(format!("tool already registered: {name}")));
        }

        tracing::debug!(tool = %name, "tool registered");
        self.tools.insert(
            name,
            RegisteredTool {
                declaration,
                handler,
            },
        );
        Ok(())
    }

    /// All registered declarations, for the intent request
    #[must_use]
    pub fn declarations(&self) -> Vec<FunctionDeclaration> {
        self.tools.values().map(|t| t.declaration.clone()).collect()
    }

    /// Names of all registered tools
    #[must_use]
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a tool is registered
    #[must_use]
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Execute a detected intent and build the response for the model
    pub async fn execute(&self, call: &FunctionCall) -> FunctionResponse {
        let args = call.args.clone().unwrap_or_else(|| {
            serde_json::Value::Object(serde_json::Map::new())
        });

        let Some(tool) = self.tools.get(&call.name) else {
            tracing::warn!(tool = %call.name, "unknown function");
            return FunctionResponse {
                id: call.id.clone(),
                name: call.name.clone(),
                response: serde_json::json!({
                    "result": "error",
                    "error": format!("unknown function: {}", call.name),
                }),
            };
        };

        match tool.handler.call(args).await {
            Ok(data) => FunctionResponse {
                id: call.id.clone(),
                name: call.name.clone(),
                response: serde_json::json!({
                    "result": "success",
                    "data": data,
                }),
            },
            Err(e) => {
                tracing::warn!(tool = %call.name, error = %e, "tool execution failed");
                FunctionResponse {
                    id: call.id.clone(),
                    name: call.name.clone(),
                    response: serde_json::json!({
                        "result": "error",
                        "error": e.to_string(),
                    }),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl ToolHandler for Echo {
        async fn call(&self, args: serde_json::Value) -> Result<serde_json::Value> {
            Ok(args)
        }
    }

    fn echo_declaration() -> FunctionDeclaration {
        FunctionDeclaration {
            name: "echo".to_string(),
            description: "Echo the arguments back".to_string(),
            parameters: None,
        }
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut executor = ToolExecutor::new();
        executor.register(echo_declaration(), Arc::new(Echo)).unwrap();
        let err = executor.register(echo_declaration(), Arc::new(Echo));
        assert!(matches!(err, Err(Error::Tool(_))));
    }

    #[tokio::test]
    async fn unknown_function_yields_error_response() {
        let executor = ToolExecutor::new();
        let call = FunctionCall {
            id: Some("call-1".to_string()),
            name: "missing".to_string(),
            args: None,
        };
        let response = executor.execute(&call).await;
        assert_eq!(response.name, "missing");
        assert_eq!(response.response["result"], "error");
    }

    #[tokio::test]
    async fn missing_args_default_to_empty_object() {
        let mut executor = ToolExecutor::new();
        executor.register(echo_declaration(), Arc::new(Echo)).unwrap();
        let call = FunctionCall {
            id: None,
            name: "echo".to_string(),
            args: None,
        };
        let response = executor.execute(&call).await;
        assert_eq!(response.response["result"], "success");
        assert_eq!(response.response["data"], serde_json::json!({}));
    }
}
