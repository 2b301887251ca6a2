use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::Config;
use crate::models::Message;

pub struct ChatClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl ChatClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Send the full message list to the chat-completion endpoint and return
    /// the assistant text. An empty reply means the response carried no
    /// recognizable content; callers treat that as a degraded turn, not an
    /// error.
    pub async fn send_messages(&self, messages: &[Message], max_tokens: u32) -> Result<String> {
        if messages.is_empty() {
            anyhow::bail!("messages must be a non-empty list");
        }

        let payload = json!({
            "model": self.model,
            "messages": messages,
            "max_completion_tokens": max_tokens,
        });

        let url = format!("{}/chat/completions", self.endpoint);
        debug!("POST {} ({} messages)", url, messages.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .context("Failed to send request to chat endpoint")?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            // Prefer the structured error payload when the endpoint sends one.
            let detail = serde_json::from_str::<Value>(&body)
                .map(|v| v.to_string())
                .unwrap_or(body);
            anyhow::bail!("chat API error ({}): {}", status, detail);
        }

        let value = response
            .json::<Value>()
            .await
            .context("Failed to parse chat API response")?;

        Ok(extract_reply(&value))
    }
}

/// Pull the assistant text out of a chat-completion response body.
///
/// The hosted endpoint is not consistent about response shape across
/// providers and models, so extraction tries each known layout in priority
/// order and degrades to a structural scan instead of failing the turn:
/// 1. OpenAI style: `choices[0].message.content` (or `.text`), then a bare
///    `choices[0].text`.
/// 2. A top-level `output_text` string.
/// 3. An `output` array of content parts typed `output_text`, concatenated.
/// 4. The first non-empty string anywhere in the value.
///
/// Returns an empty string when none of those produce text.
pub fn extract_reply(value: &Value) -> String {
    if let Some(choice) = value
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
    {
        if let Some(message) = choice.get("message") {
            let content = message
                .get("content")
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .or_else(|| {
                    message
                        .get("text")
                        .and_then(Value::as_str)
                        .filter(|s| !s.trim().is_empty())
                });
            if let Some(content) = content {
                return content.trim().to_string();
            }
        }
        if let Some(text) = choice.get("text").and_then(Value::as_str) {
            if !text.trim().is_empty() {
                return text.trim().to_string();
            }
        }
    }

    if let Some(text) = value.get("output_text").and_then(Value::as_str) {
        if !text.is_empty() {
            return text.trim().to_string();
        }
    }

    if let Some(output) = value.get("output").and_then(Value::as_array) {
        let mut accumulated = String::new();
        for item in output {
            if let Some(parts) = item.get("content").and_then(Value::as_array) {
                for part in parts {
                    if part.get("type").and_then(Value::as_str) == Some("output_text") {
                        if let Some(text) = part.get("text").and_then(Value::as_str) {
                            accumulated.push_str(text);
                        }
                    }
                }
            }
        }
        if !accumulated.trim().is_empty() {
            return accumulated.trim().to_string();
        }
    }

    first_string(value)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Depth-first search for the first non-empty string anywhere in the value.
/// Objects are walked by value in iteration order, arrays by index.
fn first_string(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Object(map) => map.values().find_map(first_string),
        Value::Array(items) => items.iter().find_map(first_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Recognized Shape Tests ====================

    #[test]
    fn test_openai_message_content() {
        let value = json!({"choices": [{"message": {"content": "hello"}}]});
        assert_eq!(extract_reply(&value), "hello");
    }

    #[test]
    fn test_openai_message_text_when_content_is_blank() {
        let value = json!({"choices": [{"message": {"content": "", "text": "fallback"}}]});
        assert_eq!(extract_reply(&value), "fallback");
    }

    #[test]
    fn test_openai_choice_level_text() {
        let value = json!({"choices": [{"text": "  completion style  "}]});
        assert_eq!(extract_reply(&value), "completion style");
    }

    #[test]
    fn test_top_level_output_text() {
        let value = json!({"output_text": "x"});
        assert_eq!(extract_reply(&value), "x");
    }

    #[test]
    fn test_output_array_parts_are_concatenated() {
        let value = json!({
            "output": [
                {"content": [
                    {"type": "output_text", "text": "one "},
                    {"type": "reasoning", "text": "ignored"},
                ]},
                {"content": [{"type": "output_text", "text": "two"}]},
            ]
        });
        assert_eq!(extract_reply(&value), "one two");
    }

    #[test]
    fn test_choices_take_priority_over_output_text() {
        let value = json!({
            "choices": [{"message": {"content": "primary"}}],
            "output_text": "secondary",
        });
        assert_eq!(extract_reply(&value), "primary");
    }

    // ==================== Fallback Scan Tests ====================

    #[test]
    fn test_unrecognized_shape_scans_for_a_string() {
        let value = json!({"foo": {"bar": ["baz"]}});
        assert_eq!(extract_reply(&value), "baz");
    }

    #[test]
    fn test_scan_skips_empty_strings() {
        let value = json!({"a": ["", "found"]});
        assert_eq!(extract_reply(&value), "found");
    }

    #[test]
    fn test_empty_object_yields_empty_string() {
        assert_eq!(extract_reply(&json!({})), "");
    }

    #[test]
    fn test_numbers_and_nulls_yield_empty_string() {
        let value = json!({"a": 1, "b": [null, 2.5, true]});
        assert_eq!(extract_reply(&value), "");
    }

    #[test]
    fn test_empty_choices_fall_through() {
        let value = json!({"choices": [], "output_text": "used instead"});
        assert_eq!(extract_reply(&value), "used instead");
    }

    // ==================== Client Validation Tests ====================

    #[tokio::test]
    async fn test_empty_message_list_is_rejected_before_any_request() {
        let config = Config {
            api_key: "test-key".to_string(),
            model: "gpt-5-nano".to_string(),
            endpoint: "http://127.0.0.1:9/v1/".to_string(),
            news_ttl_secs: 3600,
            max_news_items: 10,
            max_output_tokens: 16,
        };
        let client = ChatClient::new(&config).unwrap();
        let err = client.send_messages(&[], 16).await.unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }
}
