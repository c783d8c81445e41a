//! Search 适配器：Tavily 搜索 API
//!
//! POST JSON（api_key、query、max_results），结果保持提供方原始排序；`content` 字段映射为 snippet。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::core::{OutreachError, SearchHit};

pub const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";

/// 搜索能力：返回按相关度排序的结果
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, OutreachError>;

    /// 提供方名称（写入执行日志）
    fn name(&self) -> &str;
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

/// Tavily 搜索客户端
pub struct TavilySearch {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl TavilySearch {
    pub fn new(api_key: &str, endpoint: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key: api_key.to_string(),
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl SearchProvider for TavilySearch {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, OutreachError> {
        tracing::info!(query = %query, limit, "tavily search");
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&json!({
                "api_key": self.api_key,
                "query": query,
                "max_results": limit,
            }))
            .send()
            .await
            .map_err(|e| OutreachError::Search(format!("request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(OutreachError::Search(format!("HTTP {}: {}", status, body.trim())));
        }

        let parsed: TavilyResponse = resp
            .json()
            .await
            .map_err(|e| OutreachError::Search(format!("invalid response: {}", e)))?;
        Ok(parsed.results)
    }

    fn name(&self) -> &str {
        "Tavily"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_search_maps_results_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "api_key": "tvly-test",
                "query": "Acme latest news",
                "max_results": 4
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": "Acme latest news",
                "results": [
                    {"title": "B", "url": "https://b.example", "content": "second", "score": 0.4},
                    {"title": "A", "content": "no url here", "score": 0.9}
                ]
            })))
            .mount(&server)
            .await;

        let search = TavilySearch::new("tvly-test", &server.uri(), 5);
        let hits = search.search("Acme latest news", 4).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "B");
        assert_eq!(hits[0].snippet, "second");
        assert_eq!(hits[1].url, "");
    }

    #[tokio::test]
    async fn test_search_error_status_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let search = TavilySearch::new("nope", &server.uri(), 5);
        let err = search.search("q", 4).await.unwrap_err();
        assert!(matches!(err, OutreachError::Search(ref m) if m.contains("401") && m.contains("bad key")));
    }

    #[tokio::test]
    async fn test_search_tolerates_null_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"title": null, "url": "https://a.example", "content": null},
                    {"title": "B", "url": null, "content": "body"}
                ]
            })))
            .mount(&server)
            .await;

        let search = TavilySearch::new("tvly-test", &server.uri(), 5);
        let hits = search.search("Acme latest news", 4).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "");
        assert_eq!(hits[0].url, "https://a.example");
        assert_eq!(hits[0].snippet, "");
        assert_eq!(hits[1].url, "");
        assert_eq!(hits[1].snippet, "body");
    }
}
