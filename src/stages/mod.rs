//! 流水线阶段
//!
//! 每个阶段读取当前完整状态，只返回改动字段的增量；阶段在构造时拿到所需适配器，运行结束后不持有状态引用。

pub mod approval;
pub mod draft;
pub mod generate_queries;
pub mod scrape;
pub mod search;
pub mod send;

use async_trait::async_trait;

use crate::core::{OutreachError, PipelineState, StateDelta};

pub use approval::ApprovalStage;
pub use draft::{parse_summary_and_email, DraftStage};
pub use generate_queries::GenerateQueriesStage;
pub use scrape::ScrapeStage;
pub use search::SearchStage;
pub use send::SendStage;

/// 阶段 trait：当前状态 -> 增量
#[async_trait]
pub trait Stage: Send + Sync {
    /// 阶段名（日志与错误上下文）
    fn name(&self) -> &'static str;

    async fn run(&self, state: &PipelineState) -> Result<StateDelta, OutreachError>;
}
