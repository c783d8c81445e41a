//! 发送阶段：仅在批准后投递；投递失败只记录，不终止运行

use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::Mailer;
use crate::core::{Approval, OutreachError, PipelineState, StateDelta};
use crate::stages::Stage;

pub struct SendStage {
    mailer: Arc<dyn Mailer>,
}

impl SendStage {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }
}

#[async_trait]
impl Stage for SendStage {
    fn name(&self) -> &'static str {
        "send"
    }

    async fn run(&self, state: &PipelineState) -> Result<StateDelta, OutreachError> {
        let entry = if state.approval() == Approval::Approved {
            let draft = state.email_draft().unwrap_or_default();
            match self.mailer.send(draft).await {
                Ok(outcome) => format!("[send] {}", outcome.detail),
                Err(e) => {
                    tracing::warn!(error = %e, "send failed");
                    let reason = match e {
                        OutreachError::Send(msg) => msg,
                        other => other.to_string(),
                    };
                    format!("[send] Send failed: {}", reason)
                }
            }
        } else {
            "[send] Not sending (not approved).".to_string()
        };
        Ok(StateDelta::new().with_log(entry))
    }
}
