//! Wire types for the Gemini `generateContent` API

use serde::{Deserialize, Serialize};

/// A conversation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A user turn with the given parts
    #[must_use]
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts,
        }
    }

    /// A model turn with the given parts
    #[must_use]
    pub fn model(parts: Vec<Part>) -> Self {
        Self {
            role: Some("model".to_string()),
            parts,
        }
    }

    /// A system instruction (no role)
    #[must_use]
    pub fn system(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

/// One part of a turn
///
/// The API uses a field-per-kind encoding rather than a tagged union, so all
/// kinds are optional fields on one struct. `thought` marks model reasoning
/// parts (thinking logs).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub thought: bool,
}

impl Part {
    /// A plain text part
    #[must_use]
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::default()
        }
    }

    /// An inline audio part (base64-encoded WAV)
    #[must_use]
    pub fn audio_wav(data_b64: String) -> Self {
        Self {
            inline_data: Some(InlineData {
                mime_type: "audio/wav".to_string(),
                data: data_b64,
            }),
            ..Self::default()
        }
    }

    /// A function response part
    #[must_use]
    pub fn function_response(response: FunctionResponse) -> Self {
        Self {
            function_response: Some(response),
            ..Self::default()
        }
    }

    /// A function call part
    #[must_use]
    pub fn function_call(call: FunctionCall) -> Self {
        Self {
            function_call: Some(call),
            ..Self::default()
        }
    }
}

/// Base64-encoded media payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// A function call requested by the model (a detected intent)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Call ID assigned by the API; absent in some responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<serde_json::Value>,
}

/// The result of executing a function call, sent back to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub response: serde_json::Value,
}

/// A registered tool's declaration, used for intent matching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    /// JSON-schema object describing the arguments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

/// Generation tuning for the request
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,
}

/// Thinking-log control
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    pub include_thoughts: bool,
}

/// Request body for `generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest<'a> {
    pub contents: &'a [Content],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDeclarations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Tool wrapper in the request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ToolDeclarations {
    pub function_declarations: Vec<FunctionDeclaration>,
}

/// Response body for `generateContent`
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: Option<Content>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_serializes_only_set_fields() {
        let part = Part::text("next slide");
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json, serde_json::json!({"text": "next slide"}));
    }

    #[test]
    fn audio_part_uses_camel_case_mime_type() {
        let part = Part::audio_wav("QUJD".to_string());
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["inlineData"]["mimeType"], "audio/wav");
        assert_eq!(json["inlineData"]["data"], "QUJD");
    }

    #[test]
    fn function_call_part_deserializes() {
        let json = serde_json::json!({
            "functionCall": {
                "id": "call-1",
                "name": "navigate_slide",
                "args": {"direction": "next"}
            }
        });
        let part: Part = serde_json::from_value(json).unwrap();
        let call = part.function_call.unwrap();
        assert_eq!(call.name, "navigate_slide");
        assert_eq!(call.id.as_deref(), Some("call-1"));
        assert_eq!(call.args.unwrap()["direction"], "next");
        assert!(!part.thought);
    }

    #[test]
    fn thought_part_deserializes() {
        let json = serde_json::json!({"text": "the user wants slide 3", "thought": true});
        let part: Part = serde_json::from_value(json).unwrap();
        assert!(part.thought);
        assert_eq!(part.text.as_deref(), Some("the user wants slide 3"));
    }

    #[test]
    fn request_omits_empty_tools() {
        let contents = vec![Content::user(vec![Part::text("hi")])];
        let request = GenerateContentRequest {
            contents: &contents,
            system_instruction: None,
            tools: Vec::new(),
            generation_config: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("tools").is_none());
        assert!(json.get("systemInstruction").is_none());
    }

    #[test]
    fn thinking_config_serializes_camel_case() {
        let config = GenerationConfig {
            temperature: Some(0.0),
            thinking_config: Some(ThinkingConfig {
                include_thoughts: true,
            }),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["thinkingConfig"]["includeThoughts"], true);
    }
}
