//! 流水线错误类型
//!
//! 配置错误在流水线启动前抛出；Search / Generate 失败直接向上传播终止本次运行；
//! Fetch 失败只在 Scrape 阶段内部记录日志并吞掉，不会以错误形式离开该阶段。

use thiserror::Error;

use crate::llm::LlmError;

/// 运行过程中可能出现的错误（配置、凭据、能力调用、状态合并）
#[derive(Error, Debug)]
pub enum OutreachError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing {0}. Set it in the environment.")]
    MissingCredential(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Search failed: {0}")]
    Search(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Approval failed: {0}")]
    Approval(String),

    #[error("Send failed: {0}")]
    Send(String),

    /// 阶段返回的增量违反了状态不变量（审批被覆盖、邮件草稿缺少摘要）
    #[error("Invalid state delta from {stage}: {reason}")]
    InvalidDelta { stage: &'static str, reason: String },
}

impl From<config::ConfigError> for OutreachError {
    fn from(e: config::ConfigError) -> Self {
        OutreachError::Config(e.to_string())
    }
}

impl OutreachError {
    /// 是否属于启动前的配置类错误（CLI / HTTP 层可据此区分提示）
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            OutreachError::Config(_) | OutreachError::MissingCredential(_) | OutreachError::InvalidInput(_)
        )
    }
}
