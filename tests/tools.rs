//! Tool executor and slide tool integration tests

use std::sync::Arc;

use podium::intent::FunctionCall;
use podium::tools::register_slide_tools;
use podium::{ContentKind, DeckState, ToolExecutor};

fn setup() -> (ToolExecutor, Arc<DeckState>) {
    let deck = Arc::new(DeckState::new(5));
    let mut executor = ToolExecutor::new();
    register_slide_tools(&mut executor, Arc::clone(&deck)).unwrap();
    (executor, deck)
}

fn call(name: &str, args: serde_json::Value) -> FunctionCall {
    FunctionCall {
        id: Some("call-1".to_string()),
        name: name.to_string(),
        args: Some(args),
    }
}

#[test]
fn test_all_slide_tools_registered() {
    let (executor, _deck) = setup();

    assert_eq!(
        executor.tool_names(),
        vec![
            "add_content",
            "generate_summary",
            "get_presentation_context",
            "inject_image",
            "navigate_slide",
        ]
    );
    assert!(executor.has_tool("navigate_slide"));
    assert!(!executor.has_tool("order_pizza"));
}

#[test]
fn test_declarations_describe_parameters() {
    let (executor, _deck) = setup();

    let declarations = executor.declarations();
    let navigate = declarations
        .iter()
        .find(|d| d.name == "navigate_slide")
        .unwrap();

    let params = navigate.parameters.as_ref().unwrap();
    assert_eq!(params["required"], serde_json::json!(["direction"]));
    assert_eq!(
        params["properties"]["direction"]["enum"],
        serde_json::json!(["next", "prev", "jump"])
    );
}

#[tokio::test]
async fn test_navigate_via_executor() {
    let (executor, deck) = setup();

    let response = executor
        .execute(&call("navigate_slide", serde_json::json!({"direction": "next"})))
        .await;

    assert_eq!(response.response["result"], "success");
    assert_eq!(response.response["data"]["success"], true);
    assert_eq!(response.response["data"]["current_slide"], 1);
    assert_eq!(response.response["data"]["total_slides"], 5);
    assert_eq!(deck.current_slide().await, 1);
}

#[tokio::test]
async fn test_results_carry_action_and_success() {
    let (executor, deck) = setup();
    deck.add_transcript_entry("assistant", "a substantial point for the summary")
        .await;

    let cases = [
        (
            "navigate_slide",
            serde_json::json!({"direction": "next"}),
            "navigate",
        ),
        (
            "add_content",
            serde_json::json!({"content": "- point"}),
            "add_content",
        ),
        (
            "inject_image",
            serde_json::json!({"prompt": "a chart"}),
            "inject_image",
        ),
        ("generate_summary", serde_json::json!({}), "generate_summary"),
        ("get_presentation_context", serde_json::json!({}), "get_context"),
    ];

    for (name, args, action) in cases {
        let response = executor.execute(&call(name, args)).await;
        assert_eq!(response.response["data"]["action"], action, "{name}");
        assert_eq!(response.response["data"]["success"], true, "{name}");
    }
}

#[tokio::test]
async fn test_navigate_jump_out_of_range_is_error_response() {
    let (executor, deck) = setup();

    let response = executor
        .execute(&call(
            "navigate_slide",
            serde_json::json!({"direction": "jump", "index": 12}),
        ))
        .await;

    assert_eq!(response.response["result"], "error");
    assert_eq!(deck.current_slide().await, 0);
}

#[tokio::test]
async fn test_navigate_invalid_direction() {
    let (executor, _deck) = setup();

    let response = executor
        .execute(&call(
            "navigate_slide",
            serde_json::json!({"direction": "sideways"}),
        ))
        .await;

    assert_eq!(response.response["result"], "error");
}

#[tokio::test]
async fn test_add_content_tracks_injection() {
    let (executor, deck) = setup();

    let response = executor
        .execute(&call(
            "add_content",
            serde_json::json!({"content": "- ship it"}),
        ))
        .await;

    assert_eq!(response.response["result"], "success");
    assert_eq!(response.response["data"]["placeholder"], "AI:CONTENT");

    let injections = deck.injections_for_slide(0).await;
    assert_eq!(injections.len(), 1);
    assert_eq!(injections[0].kind, ContentKind::Text);
    assert_eq!(injections[0].content, serde_json::json!("- ship it"));
}

#[tokio::test]
async fn test_add_content_custom_placeholder() {
    let (executor, deck) = setup();

    executor
        .execute(&call(
            "add_content",
            serde_json::json!({"content": "note", "placeholder": "AI:NOTES"}),
        ))
        .await;

    let injections = deck.injections_for_slide(0).await;
    assert_eq!(injections[0].placeholder, "AI:NOTES");
}

#[tokio::test]
async fn test_inject_image_records_prompt() {
    let (executor, deck) = setup();

    let response = executor
        .execute(&call(
            "inject_image",
            serde_json::json!({"prompt": "a bar chart of revenue"}),
        ))
        .await;

    assert_eq!(response.response["result"], "success");
    assert_eq!(response.response["data"]["placeholder"], "AI:IMAGE");

    let injections = deck.injections_for_slide(0).await;
    assert_eq!(injections[0].kind, ContentKind::Image);
    assert_eq!(
        injections[0].content["prompt"],
        "a bar chart of revenue"
    );
}

#[tokio::test]
async fn test_summary_with_empty_transcript_is_error() {
    let (executor, _deck) = setup();

    let response = executor
        .execute(&call("generate_summary", serde_json::json!({})))
        .await;

    assert_eq!(response.response["result"], "error");
}

#[tokio::test]
async fn test_summary_builds_bullets_and_tracks_injection() {
    let (executor, deck) = setup();

    deck.add_transcript_entry("assistant", "we grew revenue forty percent this quarter")
        .await;
    deck.add_transcript_entry("assistant", "churn is down to two percent")
        .await;

    let response = executor
        .execute(&call("generate_summary", serde_json::json!({})))
        .await;

    assert_eq!(response.response["result"], "success");
    let summary = response.response["data"]["summary"].as_str().unwrap();
    assert!(summary.contains("- we grew revenue"));
    assert!(summary.contains("- churn is down"));

    let injections = deck.injections_for_slide(0).await;
    assert_eq!(injections.len(), 1);
    assert_eq!(injections[0].kind, ContentKind::Summary);
    assert_eq!(injections[0].placeholder, "AI:SUMMARY");
}

#[tokio::test]
async fn test_presentation_context_snapshot() {
    let (executor, deck) = setup();

    deck.add_transcript_entry("assistant", "hello").await;

    let response = executor
        .execute(&call("get_presentation_context", serde_json::json!({})))
        .await;

    assert_eq!(response.response["result"], "success");
    assert_eq!(response.response["data"]["action"], "get_context");
    assert_eq!(response.response["data"]["success"], true);
    assert_eq!(response.response["data"]["current_slide"], 0);
    assert_eq!(response.response["data"]["total_slides"], 5);
    assert_eq!(response.response["data"]["transcript_entries"], 1);
}

#[tokio::test]
async fn test_missing_required_argument_is_error_response() {
    let (executor, _deck) = setup();

    let response = executor
        .execute(&call("add_content", serde_json::json!({})))
        .await;

    assert_eq!(response.response["result"], "error");
}

#[tokio::test]
async fn test_response_echoes_call_id() {
    let (executor, _deck) = setup();

    let response = executor
        .execute(&call("get_presentation_context", serde_json::json!({})))
        .await;

    assert_eq!(response.id.as_deref(), Some("call-1"));
    assert_eq!(response.name, "get_presentation_context");
}
