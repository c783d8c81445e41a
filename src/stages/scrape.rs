//! 抓取阶段：主页 + 可选 About 页
//!
//! 没有 URL 时直接跳过；主页或 About 页抓取失败都只记日志，website_content 取能拿到的部分。
//! 这是唯一允许吞掉外部能力错误的阶段。

use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::{extract_text, find_about_link, normalize_url, Fetcher};
use crate::core::{OutreachError, PipelineState, StateDelta};
use crate::stages::Stage;

pub struct ScrapeStage {
    fetcher: Arc<dyn Fetcher>,
    max_text_chars: usize,
}

impl ScrapeStage {
    pub fn new(fetcher: Arc<dyn Fetcher>, max_text_chars: usize) -> Self {
        Self {
            fetcher,
            max_text_chars,
        }
    }
}

#[async_trait]
impl Stage for ScrapeStage {
    fn name(&self) -> &'static str {
        "scrape"
    }

    async fn run(&self, state: &PipelineState) -> Result<StateDelta, OutreachError> {
        let mut delta = StateDelta::new();

        let Some(url) = state.company_url.as_deref() else {
            delta.push_log("[scrape] Skipping: no URL available.");
            delta.website_content = Some(String::new());
            return Ok(delta);
        };

        let normalized = normalize_url(url);
        delta.push_log(format!("[scrape] Fetching {}", normalized));
        let primary_html = match self.fetcher.fetch(&normalized).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(url = %normalized, error = %e, "homepage fetch failed");
                delta.push_log(format!("[scrape] Failed to fetch homepage: {}", e));
                delta.website_content = Some(String::new());
                return Ok(delta);
            }
        };

        let base_text = extract_text(&primary_html, self.max_text_chars);

        let mut about_text = String::new();
        if let Some(about_link) = find_about_link(&primary_html, &normalized) {
            delta.push_log(format!("[scrape] Fetching About page -> {}", about_link));
            match self.fetcher.fetch(&about_link).await {
                Ok(html) => about_text = extract_text(&html, self.max_text_chars),
                Err(e) => {
                    tracing::warn!(url = %about_link, error = %e, "about page fetch failed");
                    delta.push_log(format!("[scrape] Failed to fetch About page: {}", e));
                }
            }
        }

        let combined = format!("{}\n\n{}", base_text, about_text).trim().to_string();
        delta.website_content = Some(combined);
        Ok(delta)
    }
}
