//! 能力装配：按配置与凭据创建 LLM 客户端和各适配器
//!
//! CLI 与 HTTP 服务共用同一套装配逻辑，二者只在“是否交互”上不同。

use std::sync::Arc;

use crate::adapters::{AutoDecline, ConsoleApprover, HttpFetcher, MockMailer, TavilySearch};
use crate::config::{AppConfig, Credentials, Provider};
use crate::core::Capabilities;
use crate::llm::{AnthropicClient, LlmClient, OpenAiClient};

/// 根据 [llm] 段选择后端
pub fn create_llm(cfg: &AppConfig, creds: &Credentials) -> Arc<dyn LlmClient> {
    let llm = &cfg.llm;
    match llm.provider {
        Provider::OpenAi => {
            tracing::info!("Using OpenAI LLM ({})", llm.model);
            Arc::new(OpenAiClient::new(
                llm.base_url.as_deref(),
                &llm.model,
                &creds.llm_api_key,
                llm.temperature,
            ))
        }
        Provider::Anthropic => {
            tracing::info!("Using Anthropic LLM ({})", llm.model);
            let client = AnthropicClient::new(
                &creds.llm_api_key,
                &llm.model,
                llm.temperature,
                llm.max_tokens,
                llm.timeout_secs,
            );
            match llm.base_url.as_deref() {
                Some(url) => Arc::new(client.with_base_url(url)),
                None => Arc::new(client),
            }
        }
    }
}

impl Capabilities {
    /// 生产环境装配：Tavily 搜索、HTTP 抓取、所选 LLM、控制台或自动拒绝审批、模拟发送
    pub fn from_config(cfg: &AppConfig, creds: &Credentials, interactive: bool) -> Self {
        let approver: Arc<dyn crate::adapters::Approver> = if interactive {
            Arc::new(ConsoleApprover::new(cfg.approval.timeout_secs))
        } else {
            Arc::new(AutoDecline)
        };
        Self {
            search: Arc::new(TavilySearch::new(
                &creds.tavily_api_key,
                &cfg.search.endpoint,
                cfg.search.timeout_secs,
            )),
            fetcher: Arc::new(HttpFetcher::new(
                &cfg.scrape.user_agent,
                cfg.scrape.timeout_secs,
            )),
            llm: create_llm(cfg, creds),
            approver,
            mailer: Arc::new(MockMailer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials {
            tavily_api_key: "tvly".into(),
            llm_api_key: "key".into(),
        }
    }

    #[test]
    fn test_create_llm_follows_provider() {
        let mut cfg = AppConfig::default();
        let llm = create_llm(&cfg, &creds());
        assert_eq!(llm.provider(), "openai");
        assert_eq!(llm.model(), "gpt-4o-mini");

        cfg.llm.provider = Provider::Anthropic;
        cfg.llm.model = "claude-3-5-haiku-latest".into();
        let llm = create_llm(&cfg, &creds());
        assert_eq!(llm.provider(), "anthropic");
        assert_eq!(llm.model(), "claude-3-5-haiku-latest");
    }

    #[test]
    fn test_capabilities_from_config() {
        let caps = Capabilities::from_config(&AppConfig::default(), &creds(), false);
        assert_eq!(caps.search.name(), "Tavily");
        assert_eq!(caps.llm.provider(), "openai");
    }
}
