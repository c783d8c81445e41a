//! Fetch 适配器：GET 页面原文
//!
//! 固定 User-Agent 与超时；非 2xx 状态视为失败。是否吞掉失败由 Scrape 阶段决定，适配器只如实返回错误。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::core::OutreachError;

/// 抓取页面原文
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, OutreachError>;
}

/// 基于 reqwest 的 HTTP 抓取
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, OutreachError> {
        tracing::info!(url = %url, "fetching page");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| OutreachError::Fetch(format!("request to {} failed: {}", url, e)))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(OutreachError::Fetch(format!("HTTP {} for {}", status, url)));
        }
        let body = resp
            .text()
            .await
            .map_err(|e| OutreachError::Fetch(format!("read body: {}", e)))?;

        // 去除 BOM，避免 HTML 解析把它当成正文
        Ok(match body.strip_prefix('\u{FEFF}') {
            Some(rest) => rest.to_string(),
            None => body,
        })
    }
}
