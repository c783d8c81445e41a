//! 流水线编排器
//!
//! 固定顺序：GenerateQueries → Search → Scrape → Draft → Approval → Send。
//! 严格串行：上一阶段的增量合并完成后才启动下一阶段；阶段错误不在这里捕获，原样返回给调用方。

use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use crate::adapters::{Approver, Fetcher, Mailer, SearchProvider};
use crate::config::AppConfig;
use crate::core::{OutreachError, PipelineState};
use crate::llm::LlmClient;
use crate::stages::{
    ApprovalStage, DraftStage, GenerateQueriesStage, ScrapeStage, SearchStage, SendStage, Stage,
};

/// 一次运行所需的全部能力适配器
#[derive(Clone)]
pub struct Capabilities {
    pub search: Arc<dyn SearchProvider>,
    pub fetcher: Arc<dyn Fetcher>,
    pub llm: Arc<dyn LlmClient>,
    pub approver: Arc<dyn Approver>,
    pub mailer: Arc<dyn Mailer>,
}

/// 阶段调参（每查询结果数、正文与摘要截断长度）
#[derive(Debug, Clone, Copy)]
pub struct PipelineSettings {
    pub results_per_query: usize,
    pub max_text_chars: usize,
    pub snippet_chars: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            results_per_query: 4,
            max_text_chars: 6000,
            snippet_chars: 220,
        }
    }
}

impl From<&AppConfig> for PipelineSettings {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            results_per_query: cfg.search.results_per_query,
            max_text_chars: cfg.scrape.max_text_chars,
            snippet_chars: cfg.scrape.snippet_chars,
        }
    }
}

/// 编排器：持有固定的阶段列表
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(caps: Capabilities, settings: PipelineSettings) -> Self {
        let stages: Vec<Box<dyn Stage>> = vec![
            Box::new(GenerateQueriesStage),
            Box::new(SearchStage::new(caps.search, settings.results_per_query)),
            Box::new(ScrapeStage::new(caps.fetcher, settings.max_text_chars)),
            Box::new(DraftStage::new(caps.llm, settings.snippet_chars)),
            Box::new(ApprovalStage::new(caps.approver)),
            Box::new(SendStage::new(caps.mailer)),
        ];
        Self { stages }
    }

    /// 阶段名（按执行顺序）
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// 执行全部阶段并返回最终状态
    pub async fn run(&self, initial: PipelineState) -> Result<PipelineState, OutreachError> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("pipeline", %run_id, company = %initial.company());

        async move {
            let mut state = initial;
            for stage in &self.stages {
                let name = stage.name();
                tracing::debug!(stage = name, "stage started");
                let delta = match stage.run(&state).await {
                    Ok(delta) => delta,
                    Err(e) => {
                        tracing::error!(stage = name, error = %e, "stage failed, aborting run");
                        return Err(e);
                    }
                };
                let added = delta.log.len();
                state.apply(name, delta)?;
                tracing::debug!(stage = name, log_entries = added, "stage merged");
            }
            tracing::info!(approval = ?state.approval(), "pipeline finished");
            Ok(state)
        }
        .instrument(span)
        .await
    }
}
