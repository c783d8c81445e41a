//! Anthropic Messages API 客户端
//!
//! 直接用 reqwest 调用 `/v1/messages`：system 消息合并到顶层 `system` 字段，其余按 user / assistant 传入；
//! 响应中所有 `text` 块按顺序拼接为最终文本。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::llm::{LlmClient, LlmError, Message, Role};

pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn new(api_key: &str, model: &str, temperature: f32, max_tokens: u32, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key: api_key.to_string(),
            base_url: ANTHROPIC_BASE_URL.to_string(),
            model: model.to_string(),
            temperature,
            max_tokens,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn build_request_body(&self, messages: &[Message]) -> Value {
        let system = messages
            .iter()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let turns: Vec<Value> = messages
            .iter()
            .filter_map(|m| match m.role {
                Role::User => Some(json!({ "role": "user", "content": m.content })),
                Role::Assistant => Some(json!({ "role": "assistant", "content": m.content })),
                Role::System => None,
            })
            .collect();

        let mut body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "messages": turns,
        });
        if !system.is_empty() {
            body["system"] = json!(system);
        }
        body
    }
}

/// 拼接响应中的 text 块
fn parse_response_text(body: &Value) -> Result<String, LlmError> {
    let text = body["content"]
        .as_array()
        .map(|blocks| {
            blocks
                .iter()
                .filter(|b| b["type"].as_str() == Some("text"))
                .filter_map(|b| b["text"].as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();
    if text.is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    Ok(text)
}

/// 从错误响应体中取出 error.message，取不到时返回原文
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError> {
        let body = self.build_request_body(messages);

        let resp = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        let status = resp.status();
        let response_body = resp
            .text()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: error_message(&response_body),
            });
        }

        let json: Value = serde_json::from_str(&response_body)
            .map_err(|e| LlmError::Request(format!("failed to parse response JSON: {e}")))?;
        parse_response_text(&json)
    }

    fn provider(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
