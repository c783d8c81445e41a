//! 审批阶段：三态闸门
//!
//! - 已有结论：空增量（可重复进入）
//! - 非交互：直接记为拒绝，不阻塞
//! - 交互：交给 Approver，编辑后的草稿先替换再记录批准

use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::Approver;
use crate::core::{Approval, OutreachError, PipelineState, StateDelta};
use crate::stages::Stage;

pub struct ApprovalStage {
    approver: Arc<dyn Approver>,
}

impl ApprovalStage {
    pub fn new(approver: Arc<dyn Approver>) -> Self {
        Self { approver }
    }
}

#[async_trait]
impl Stage for ApprovalStage {
    fn name(&self) -> &'static str {
        "approval"
    }

    async fn run(&self, state: &PipelineState) -> Result<StateDelta, OutreachError> {
        if state.approval().is_decided() {
            return Ok(StateDelta::new());
        }

        if !state.interactive() {
            return Ok(StateDelta {
                approval: Some(Approval::Declined),
                ..StateDelta::default()
            }
            .with_log("[approval] Awaiting human approval (non-interactive mode)."));
        }

        let draft = state.email_draft().unwrap_or_default();
        let decision = self.approver.review(draft).await?;
        let approval = Approval::from_bool(decision.approved);
        let entry = match approval {
            Approval::Approved => "[approval] Approved by user input.",
            _ => "[approval] Not approved by user input.",
        };

        Ok(StateDelta {
            email_draft: decision.edited_draft,
            approval: Some(approval),
            ..StateDelta::default()
        }
        .with_log(entry))
    }
}
