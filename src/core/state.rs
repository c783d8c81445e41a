//! 流水线状态与增量合并
//!
//! PipelineState 在一次运行中只创建一次，按值在阶段之间流转；每个阶段只返回它改动的字段（StateDelta），
//! 由 `PipelineState::apply` 统一合并。合并策略：
//!
//! | 字段 | 策略 |
//! |------|------|
//! | `company` / `interactive` / `verbose` | 不可变，增量中没有对应字段 |
//! | `company_url` / `queries` / `search_results` / `website_content` / `summary` / `email_draft` | 出现即替换 |
//! | `approval` | 只写一次：已决定后再写入视为非法增量 |
//! | `log` | 仅追加，保持整个运行的全序 |

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::OutreachError;

/// 单条搜索结果（Search 适配器按原顺序返回）
///
/// 提供方可能省略字段或给出 null，两者都按空字符串处理。
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// 可能为空：部分搜索结果不带 url
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, alias = "content", deserialize_with = "null_as_empty")]
    pub snippet: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// 一个查询及其结果块
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBlock {
    pub query: String,
    pub results: Vec<SearchHit>,
}

/// 审批三态：未决定 / 已批准 / 已拒绝
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Approval {
    #[default]
    Undecided,
    Approved,
    Declined,
}

impl Approval {
    pub fn from_bool(approved: bool) -> Self {
        if approved {
            Approval::Approved
        } else {
            Approval::Declined
        }
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, Approval::Undecided)
    }

    /// 对外输出用：未决定为 None
    pub fn as_option(&self) -> Option<bool> {
        match self {
            Approval::Undecided => None,
            Approval::Approved => Some(true),
            Approval::Declined => Some(false),
        }
    }
}

/// 流水线状态：一次运行的全部累积结果
#[derive(Clone, Debug, Serialize)]
pub struct PipelineState {
    company: String,
    pub company_url: Option<String>,
    pub queries: Vec<String>,
    pub search_results: Vec<SearchBlock>,
    pub website_content: String,
    summary: Option<String>,
    email_draft: Option<String>,
    approval: Approval,
    interactive: bool,
    verbose: bool,
    log: Vec<String>,
}

impl PipelineState {
    /// 创建初始状态；公司名为空时拒绝（流水线尚未启动，属于输入错误）
    pub fn new(
        company: impl Into<String>,
        company_url: Option<String>,
        interactive: bool,
        verbose: bool,
    ) -> Result<Self, OutreachError> {
        let company = company.into().trim().to_string();
        if company.is_empty() {
            return Err(OutreachError::InvalidInput(
                "company name must not be empty".to_string(),
            ));
        }
        // 空白 URL 视同未提供
        let company_url = company_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());
        Ok(Self {
            company,
            company_url,
            queries: Vec::new(),
            search_results: Vec::new(),
            website_content: String::new(),
            summary: None,
            email_draft: None,
            approval: Approval::Undecided,
            interactive,
            verbose,
            log: Vec::new(),
        })
    }

    /// 调用方预先给定审批结果（例如在流水线外已完成审批）；已决定的结果不会被改写
    pub fn with_approval(mut self, approval: Approval) -> Self {
        if !self.approval.is_decided() {
            self.approval = approval;
        }
        self
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn email_draft(&self) -> Option<&str> {
        self.email_draft.as_deref()
    }

    pub fn approval(&self) -> Approval {
        self.approval
    }

    pub fn interactive(&self) -> bool {
        self.interactive
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// 合并一个阶段的增量。违反不变量时返回 InvalidDelta，状态保持不变。
    pub fn apply(&mut self, stage: &'static str, delta: StateDelta) -> Result<(), OutreachError> {
        if let Some(approval) = delta.approval {
            if self.approval.is_decided() && approval != self.approval {
                return Err(OutreachError::InvalidDelta {
                    stage,
                    reason: format!("approval already decided as {:?}", self.approval),
                });
            }
        }
        if delta.email_draft.is_some() && delta.summary.is_none() && self.summary.is_none() {
            return Err(OutreachError::InvalidDelta {
                stage,
                reason: "email draft produced without a summary".to_string(),
            });
        }

        if let Some(url) = delta.company_url {
            self.company_url = Some(url);
        }
        if let Some(queries) = delta.queries {
            self.queries = queries;
        }
        if let Some(results) = delta.search_results {
            self.search_results = results;
        }
        if let Some(content) = delta.website_content {
            self.website_content = content;
        }
        if let Some(summary) = delta.summary {
            self.summary = Some(summary);
        }
        if let Some(draft) = delta.email_draft {
            self.email_draft = Some(draft);
        }
        if let Some(approval) = delta.approval {
            self.approval = approval;
        }
        for entry in delta.log {
            if self.verbose {
                tracing::info!(target: "outreach::log", "{}", entry);
            } else {
                tracing::debug!(target: "outreach::log", "{}", entry);
            }
            self.log.push(entry);
        }
        Ok(())
    }
}

/// 阶段增量：None 表示不改动该字段；log 为本阶段新增的日志条目
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateDelta {
    pub company_url: Option<String>,
    pub queries: Option<Vec<String>>,
    pub search_results: Option<Vec<SearchBlock>>,
    pub website_content: Option<String>,
    pub summary: Option<String>,
    pub email_draft: Option<String>,
    pub approval: Option<Approval>,
    pub log: Vec<String>,
}

impl StateDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条日志
    pub fn push_log(&mut self, entry: impl Into<String>) {
        self.log.push(entry.into());
    }

    pub fn with_log(mut self, entry: impl Into<String>) -> Self {
        self.push_log(entry);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == StateDelta::default()
    }
}
