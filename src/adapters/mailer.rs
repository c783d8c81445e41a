//! Send 适配器：投递已批准的邮件
//!
//! 目前只提供 MockMailer（不做真实投递）；接入真实传输时在边界替换实现即可，失败由 Send 阶段记录而不终止运行。

use async_trait::async_trait;

use crate::core::OutreachError;

/// 投递结果描述（写入执行日志）
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendOutcome {
    pub detail: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, draft: &str) -> Result<SendOutcome, OutreachError>;
}

/// 模拟发送
#[derive(Debug, Default)]
pub struct MockMailer;

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, draft: &str) -> Result<SendOutcome, OutreachError> {
        tracing::info!(chars = draft.chars().count(), "mock send");
        Ok(SendOutcome {
            detail: "Mock sending email... ✅".to_string(),
        })
    }
}
