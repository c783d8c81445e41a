//! Approval 适配器：人工审批邮件草稿
//!
//! ConsoleApprover 在终端展示草稿并读取 y / N / edit；读取 stdin 是阻塞操作，放到 spawn_blocking 中执行，
//! 可配置超时（超时按拒绝处理）。AutoDecline 用于服务端等非交互场景，立即返回“不批准”。

use std::io::{BufRead, Read, Write};
use std::time::Duration;

use async_trait::async_trait;

use crate::core::OutreachError;

/// 审批结果：编辑过的草稿隐含批准
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApprovalDecision {
    pub approved: bool,
    pub edited_draft: Option<String>,
}

impl ApprovalDecision {
    pub fn declined() -> Self {
        Self {
            approved: false,
            edited_draft: None,
        }
    }
}

/// 人工审批能力
#[async_trait]
pub trait Approver: Send + Sync {
    async fn review(&self, draft: &str) -> Result<ApprovalDecision, OutreachError>;
}

/// 终端输入的三种选择
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleChoice {
    Approve,
    Decline,
    Edit,
}

/// 解析终端输入：y / yes 批准，edit 编辑，其余（含空输入）拒绝
pub fn parse_choice(input: &str) -> ConsoleChoice {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => ConsoleChoice::Approve,
        "edit" => ConsoleChoice::Edit,
        _ => ConsoleChoice::Decline,
    }
}

/// 在给定输入输出上完成一次审批交互（终端与测试共用）
pub fn prompt_for_approval<R: BufRead, W: Write>(
    draft: &str,
    input: &mut R,
    output: &mut W,
) -> Result<ApprovalDecision, OutreachError> {
    let io_err = |e: std::io::Error| OutreachError::Approval(e.to_string());

    writeln!(output, "\n===== EMAIL DRAFT FOR APPROVAL =====\n").map_err(io_err)?;
    writeln!(output, "{}", draft).map_err(io_err)?;
    writeln!(output, "\n====================================\n").map_err(io_err)?;
    write!(output, "Approve and mock-send? [y/N/edit]: ").map_err(io_err)?;
    output.flush().map_err(io_err)?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(io_err)?;

    match parse_choice(&line) {
        ConsoleChoice::Approve => Ok(ApprovalDecision {
            approved: true,
            edited_draft: None,
        }),
        ConsoleChoice::Decline => Ok(ApprovalDecision::declined()),
        ConsoleChoice::Edit => {
            writeln!(
                output,
                "Enter your edited email draft. Finish with Ctrl-D (Linux/macOS) or Ctrl-Z then Enter (Windows).\n"
            )
            .map_err(io_err)?;
            output.flush().map_err(io_err)?;
            let mut edited = String::new();
            input.read_to_string(&mut edited).map_err(io_err)?;
            let edited = edited.trim();
            Ok(ApprovalDecision {
                approved: true,
                edited_draft: (!edited.is_empty()).then(|| edited.to_string()),
            })
        }
    }
}

/// 终端审批
///
/// 超时后阻塞读取的线程无法取消，会一直停在 stdin 上；CLI 通过 `agent::block_on_cli` 限时关闭运行时，
/// 不等待该线程。
pub struct ConsoleApprover {
    timeout: Option<Duration>,
}

impl ConsoleApprover {
    pub fn new(timeout_secs: Option<u64>) -> Self {
        Self {
            timeout: timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    /// 在阻塞线程上执行一次交互，受超时约束（超时按拒绝处理）
    pub async fn review_with<F>(&self, interact: F) -> Result<ApprovalDecision, OutreachError>
    where
        F: FnOnce() -> Result<ApprovalDecision, OutreachError> + Send + 'static,
    {
        let task = tokio::task::spawn_blocking(interact);

        let joined = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, task).await {
                Ok(joined) => joined,
                Err(_) => {
                    tracing::warn!(timeout_ms = limit.as_millis() as u64, "approval timed out, declining");
                    return Ok(ApprovalDecision::declined());
                }
            },
            None => task.await,
        };
        joined.map_err(|e| OutreachError::Approval(e.to_string()))?
    }
}

#[async_trait]
impl Approver for ConsoleApprover {
    async fn review(&self, draft: &str) -> Result<ApprovalDecision, OutreachError> {
        let draft = draft.to_string();
        self.review_with(move || {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut output = std::io::stdout();
            prompt_for_approval(&draft, &mut input, &mut output)
        })
        .await
    }
}

/// 非交互审批：始终不批准，需要在流水线之外另行审批
#[derive(Debug, Default)]
pub struct AutoDecline;

#[async_trait]
impl Approver for AutoDecline {
    async fn review(&self, _draft: &str) -> Result<ApprovalDecision, OutreachError> {
        Ok(ApprovalDecision::declined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str) -> (ApprovalDecision, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let decision = prompt_for_approval("EMAIL:\nHello", &mut reader, &mut out).unwrap();
        (decision, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("Y\n"), ConsoleChoice::Approve);
        assert_eq!(parse_choice("yes"), ConsoleChoice::Approve);
        assert_eq!(parse_choice(" EDIT "), ConsoleChoice::Edit);
        assert_eq!(parse_choice(""), ConsoleChoice::Decline);
        assert_eq!(parse_choice("sure"), ConsoleChoice::Decline);
    }

    #[test]
    fn test_prompt_shows_draft_and_approves() {
        let (decision, shown) = run("y\n");
        assert!(decision.approved);
        assert!(decision.edited_draft.is_none());
        assert!(shown.contains("EMAIL:\nHello"));
        assert!(shown.contains("[y/N/edit]"));
    }

    #[test]
    fn test_prompt_empty_input_declines() {
        let (decision, _) = run("\n");
        assert_eq!(decision, ApprovalDecision::declined());
    }

    #[test]
    fn test_prompt_edit_reads_until_eof() {
        let (decision, _) = run("edit\nHi there\n\n");
        assert!(decision.approved);
        assert_eq!(decision.edited_draft.as_deref(), Some("Hi there"));
    }

    #[test]
    fn test_prompt_empty_edit_keeps_draft_but_approves() {
        let (decision, _) = run("edit\n   \n");
        assert!(decision.approved);
        assert!(decision.edited_draft.is_none());
    }

    #[test]
    fn test_timed_out_prompt_does_not_hold_runtime_shutdown() {
        // 发送端一直存活：读取线程在整个测试期间保持阻塞，模拟无人应答的终端
        let (_keep_open, blocked) = std::sync::mpsc::channel::<()>();
        let started = std::time::Instant::now();

        let decision = crate::agent::block_on_cli(async move {
            ConsoleApprover::with_timeout(Duration::from_millis(50))
                .review_with(move || {
                    let _ = blocked.recv();
                    Ok(ApprovalDecision {
                        approved: true,
                        edited_draft: None,
                    })
                })
                .await
        })
        .unwrap()
        .unwrap();

        assert_eq!(decision, ApprovalDecision::declined());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_interaction_within_timeout_is_used() {
        let decision = ConsoleApprover::with_timeout(Duration::from_secs(5))
            .review_with(|| {
                Ok(ApprovalDecision {
                    approved: true,
                    edited_draft: Some("Hi there".into()),
                })
            })
            .await
            .unwrap();
        assert!(decision.approved);
        assert_eq!(decision.edited_draft.as_deref(), Some("Hi there"));
    }

    #[tokio::test]
    async fn test_auto_decline() {
        let decision = AutoDecline.review("draft").await.unwrap();
        assert!(!decision.approved);
    }
}
