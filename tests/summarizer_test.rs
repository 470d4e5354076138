use std::sync::Arc;

use bionews::ai::{AiClient, Summarizer, SummaryCache};
use bionews::config::AiConfig;
use bionews::AppError;
use mockito::Matcher;
use serde_json::json;

const CHAT_PATH: &str = "/v1/chat/completions";

fn ai_config(server: &mockito::ServerGuard, api_key: Option<&str>) -> AiConfig {
    AiConfig {
        api_key: api_key.map(str::to_string),
        api_key_env: "BIONEWS_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
        api_url: format!("{}{}", server.url(), CHAT_PATH),
        model: "gpt-4o-mini".to_string(),
        timeout_seconds: 10,
        ..AiConfig::default()
    }
}

fn summarizer(server: &mockito::ServerGuard) -> Summarizer {
    let client = AiClient::new(&ai_config(server, Some("test-key"))).unwrap();
    Summarizer::new(Arc::new(client), Arc::new(SummaryCache::new()))
}

fn chat_envelope(content: &str) -> String {
    json!({
        "id": "chatcmpl-1",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

const SUMMARY_JSON: &str =
    r#"{"summary":"Tardigrades survive extremes.","keyPoints":["Cryptobiosis","Radiation tolerance"]}"#;

#[tokio::test]
async fn second_call_is_served_from_cache() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", CHAT_PATH)
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_envelope(SUMMARY_JSON))
        .expect(1)
        .create_async()
        .await;

    let summarizer = summarizer(&server);

    let first = summarizer
        .get_summary("post-1", "Tardigrades", "<p>Water bears are tiny.</p>")
        .await
        .unwrap();
    let second = summarizer
        .get_summary("post-1", "Tardigrades", "<p>Water bears are tiny.</p>")
        .await
        .unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(*first, *second);
    assert_eq!(first.summary, "Tardigrades survive extremes.");
    assert_eq!(first.key_points, vec!["Cryptobiosis", "Radiation tolerance"]);
    assert_eq!(first.estimated_read_time, "1 min read");

    mock.assert_async().await;
}

#[tokio::test]
async fn cached_entries_do_not_leak_between_posts() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", CHAT_PATH)
        .with_status(200)
        .with_body(chat_envelope(SUMMARY_JSON))
        .expect(2)
        .create_async()
        .await;

    let summarizer = summarizer(&server);

    let (a, b) = futures::future::join(
        summarizer.get_summary("A", "Title A", "<p>alpha</p>"),
        summarizer.get_summary("B", "Title B", "<p>beta</p>"),
    )
    .await;
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(a.post_id, "A");
    assert_eq!(b.post_id, "B");
    assert_ne!(a.id, b.id);
    assert_eq!(summarizer.cache().len().await, 2);
    assert_eq!(summarizer.cache().get("A").await.unwrap().post_id, "A");

    mock.assert_async().await;
}

#[tokio::test]
async fn clear_forces_regeneration() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", CHAT_PATH)
        .with_status(200)
        .with_body(chat_envelope(SUMMARY_JSON))
        .expect(2)
        .create_async()
        .await;

    let summarizer = summarizer(&server);

    let before = summarizer.get_summary("p", "t", "c").await.unwrap();
    summarizer.clear_cache().await;
    assert!(summarizer.cache().is_empty().await);
    let after = summarizer.get_summary("p", "t", "c").await.unwrap();

    assert_ne!(before.id, after.id);
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_credential_fails_without_calling_upstream() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", CHAT_PATH)
        .with_status(200)
        .with_body(chat_envelope(SUMMARY_JSON))
        .expect(0)
        .create_async()
        .await;

    let client = AiClient::new(&ai_config(&server, None)).unwrap();
    let summarizer = Summarizer::new(Arc::new(client), Arc::new(SummaryCache::new()));

    let err = summarizer.get_summary("p", "t", "c").await.unwrap_err();

    assert!(matches!(err, AppError::MissingApiKey(_)));
    assert!(err.is_configuration());
    assert!(summarizer.cache().is_empty().await);
    mock.assert_async().await;
}

#[tokio::test]
async fn upstream_failure_is_surfaced_and_not_cached() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", CHAT_PATH)
        .with_status(429)
        .with_body(r#"{"error":{"message":"Rate limit exceeded"}}"#)
        .expect(2)
        .create_async()
        .await;

    let summarizer = summarizer(&server);

    for _ in 0..2 {
        match summarizer.get_summary("p", "t", "c").await {
            Err(AppError::UpstreamStatus { status, body }) => {
                assert_eq!(status, 429);
                assert!(body.contains("Rate limit exceeded"));
            }
            other => panic!("expected upstream status error, got {:?}", other),
        }
    }

    assert!(summarizer.cache().is_empty().await);
    mock.assert_async().await;
}

#[tokio::test]
async fn envelope_without_choices_is_a_shape_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", CHAT_PATH)
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let summarizer = summarizer(&server);
    let err = summarizer.get_summary("p", "t", "c").await.unwrap_err();

    assert!(matches!(err, AppError::UpstreamShape(_)));
    assert!(err.is_upstream());
    assert!(summarizer.cache().is_empty().await);
}

#[tokio::test]
async fn generative_content_envelope_is_accepted() {
    let mut server = mockito::Server::new_async().await;
    let body = json!({
        "candidates": [{
            "content": { "parts": [{ "text": format!("```json\n{}\n```", SUMMARY_JSON) }], "role": "model" }
        }]
    });
    let _mock = server
        .mock("POST", CHAT_PATH)
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let summary = summarizer(&server)
        .get_summary("p", "t", "c")
        .await
        .unwrap();

    assert_eq!(summary.summary, "Tardigrades survive extremes.");
    assert_eq!(summary.key_points.len(), 2);
}

#[tokio::test]
async fn prose_reply_degrades_and_read_time_uses_full_content() {
    let mut server = mockito::Server::new_async().await;
    let prose = format!("I'm sorry, here is a summary instead: {}", "cells ".repeat(100));
    let _mock = server
        .mock("POST", CHAT_PATH)
        .with_status(200)
        .with_body(chat_envelope(&prose))
        .create_async()
        .await;

    // Far longer than the prompt prefix, still counted in full.
    let content = format!("<p>{}</p>", vec!["mitosis"; 1000].join(" "));
    let summary = summarizer(&server)
        .get_summary("p", "Cell division", &content)
        .await
        .unwrap();

    assert!(summary.summary.ends_with("..."));
    assert_eq!(summary.summary.chars().count(), 303);
    assert!(summary.key_points.is_empty());
    assert_eq!(summary.estimated_read_time, "5 min read");
}

#[tokio::test]
async fn request_carries_prompt_and_sampling_settings() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", CHAT_PATH)
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({
                "model": "gpt-4o-mini",
                "temperature": 0.3,
                "max_tokens": 1024
            })),
            Matcher::Regex("Title: Tardigrades".to_string()),
            Matcher::Regex("Water bears are tiny".to_string()),
        ]))
        .with_status(200)
        .with_body(chat_envelope(SUMMARY_JSON))
        .expect(1)
        .create_async()
        .await;

    summarizer(&server)
        .get_summary("p", "Tardigrades", "<p>Water bears are tiny.</p>")
        .await
        .unwrap();

    mock.assert_async().await;
}
