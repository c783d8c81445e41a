//! LLM 客户端抽象
//!
//! 所有后端（OpenAI 兼容 / Anthropic / 脚本化 Mock）实现 LlmClient：complete 为单次阻塞请求，不需要流式。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 消息角色（与 LLM API 一致）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    System,
    User,
    Assistant,
}

/// 单条消息
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// LLM 调用错误
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("provider returned an empty completion")]
    EmptyResponse,

    #[error("invalid request: {0}")]
    Build(String),
}

/// LLM 客户端 trait：非流式完成
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// 非流式完成，返回首个候选的文本
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError>;

    /// 后端名称（写入执行日志）
    fn provider(&self) -> &str;

    /// 模型名称
    fn model(&self) -> &str;
}
