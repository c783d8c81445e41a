//! Mock LLM 客户端（用于测试，无需 API）
//!
//! 按顺序回放预设回复，并记录收到的每组消息，便于断言提示词内容。

use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::{LlmClient, LlmError, Message};

/// 脚本化客户端：回复用尽后返回最后一条
#[derive(Debug, Default)]
pub struct MockLlmClient {
    replies: Mutex<Vec<Result<String, String>>>,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl MockLlmClient {
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            replies: Mutex::new(vec![Ok(reply.into())]),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 每次调用都失败（模拟提供方错误）
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            replies: Mutex::new(vec![Err(message.into())]),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 已收到的调用（每次一组消息）
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(messages.to_vec());
        }
        let next = {
            let mut replies = self
                .replies
                .lock()
                .map_err(|e| LlmError::Request(e.to_string()))?;
            if replies.len() > 1 {
                replies.remove(0)
            } else {
                replies.first().cloned().unwrap_or_else(|| Ok(String::new()))
            }
        };
        next.map_err(LlmError::Request)
    }

    fn provider(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replays_and_records() {
        let llm = MockLlmClient::with_reply("hello");
        assert_eq!(llm.complete(&[Message::user("a")]).await.unwrap(), "hello");
        assert_eq!(llm.complete(&[Message::user("b")]).await.unwrap(), "hello");
        let calls = llm.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1][0].content, "b");
    }

    #[tokio::test]
    async fn test_mock_failing() {
        let llm = MockLlmClient::failing("quota exceeded");
        let err = llm.complete(&[]).await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }
}
