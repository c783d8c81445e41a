//! 搜索阶段：逐条查询、保持顺序，并在调用方未给 URL 时解析主 URL
//!
//! 任一查询失败立即向上传播（后续阶段假设已尝试的查询结果完整）。

use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::SearchProvider;
use crate::core::{OutreachError, PipelineState, SearchBlock, StateDelta};
use crate::stages::Stage;

/// 按块、块内按结果顺序，取第一个非空 url
pub fn pick_first_url(blocks: &[SearchBlock]) -> Option<String> {
    blocks
        .iter()
        .flat_map(|b| b.results.iter())
        .map(|hit| hit.url.trim())
        .find(|url| !url.is_empty())
        .map(String::from)
}

pub struct SearchStage {
    provider: Arc<dyn SearchProvider>,
    results_per_query: usize,
}

impl SearchStage {
    pub fn new(provider: Arc<dyn SearchProvider>, results_per_query: usize) -> Self {
        Self {
            provider,
            results_per_query,
        }
    }
}

#[async_trait]
impl Stage for SearchStage {
    fn name(&self) -> &'static str {
        "search"
    }

    async fn run(&self, state: &PipelineState) -> Result<StateDelta, OutreachError> {
        let mut delta = StateDelta::new();
        let mut gathered = Vec::with_capacity(state.queries.len());

        for query in &state.queries {
            delta.push_log(format!("[search] {} query -> {}", self.provider.name(), query));
            let results = self.provider.search(query, self.results_per_query).await?;
            gathered.push(SearchBlock {
                query: query.clone(),
                results,
            });
        }

        let resolved = state
            .company_url
            .clone()
            .or_else(|| pick_first_url(&gathered));
        match &resolved {
            Some(url) => delta.push_log(format!("[search] Using '{}' as primary URL", url)),
            None => delta.push_log("[search] No URL found; scraping step will be skipped."),
        }

        delta.search_results = Some(gathered);
        delta.company_url = resolved;
        Ok(delta)
    }
}
