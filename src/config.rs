//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `OUTREACH__*` 覆盖（双下划线表示嵌套，如 `OUTREACH__LLM__PROVIDER=anthropic`）。
//! API Key 不放在配置文件里，由 `Credentials::from_env` 在启动时一次性读取，再显式传给适配器。

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::core::OutreachError;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LlmSection,
    pub search: SearchSection,
    pub scrape: ScrapeSection,
    pub approval: ApprovalSection,
    pub web: WebSection,
}

/// LLM 提供方
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAi,
    Anthropic,
}

impl Provider {
    /// 该提供方需要的 API Key 环境变量
    pub fn api_key_var(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "anthropic" => Ok(Provider::Anthropic),
            other => Err(format!("unknown provider '{}', expected openai or anthropic", other)),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenAi => write!(f, "openai"),
            Provider::Anthropic => write!(f, "anthropic"),
        }
    }
}

/// [llm] 段：后端选择、模型与采样参数
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    pub provider: Provider,
    pub model: String,
    pub temperature: f32,
    /// Anthropic 必填的输出上限
    pub max_tokens: u32,
    /// OpenAI 兼容端点（自建代理等），不设则用官方地址
    pub base_url: Option<String>,
    /// 单次请求超时（秒），作用于 reqwest 直连的后端
    pub timeout_secs: u64,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: Provider::OpenAi,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.35,
            max_tokens: 1024,
            base_url: None,
            timeout_secs: 60,
        }
    }
}

/// [search] 段：每条查询的结果上限、端点与超时
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    pub results_per_query: usize,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            results_per_query: 4,
            endpoint: crate::adapters::TAVILY_ENDPOINT.to_string(),
            timeout_secs: 20,
        }
    }
}

/// [scrape] 段：抓取超时、正文与摘要截断长度、User-Agent
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeSection {
    pub timeout_secs: u64,
    pub max_text_chars: usize,
    pub snippet_chars: usize,
    pub user_agent: String,
}

impl Default for ScrapeSection {
    fn default() -> Self {
        Self {
            timeout_secs: 12,
            max_text_chars: 6000,
            snippet_chars: 220,
            user_agent: "researcher-agent/0.1".to_string(),
        }
    }
}

/// [approval] 段：交互审批超时（不设则无限等待）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApprovalSection {
    pub timeout_secs: Option<u64>,
}

/// [web] 段：监听地址与允许的前端来源
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebSection {
    pub bind: String,
    pub allowed_origins: Vec<String>,
}

impl Default for WebSection {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

/// 从 config 目录加载配置，环境变量 OUTREACH__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 OUTREACH__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        } else {
            tracing::warn!(path = %path.display(), "config file not found, ignoring");
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("OUTREACH")
            .separator("__")
            .try_parsing(true),
    );

    builder.build()?.try_deserialize()
}

/// 启动时读取的凭据：搜索 Key 与所选 LLM 提供方的 Key
#[derive(Clone)]
pub struct Credentials {
    pub tavily_api_key: String,
    pub llm_api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("tavily_api_key", &"***")
            .field("llm_api_key", &"***")
            .finish()
    }
}

impl Credentials {
    /// 从进程环境读取；缺失即配置错误（流水线尚未启动）
    pub fn from_env(provider: Provider) -> Result<Self, OutreachError> {
        Self::from_lookup(provider, |key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取（便于测试，不依赖进程环境）
    pub fn from_lookup<F>(provider: Provider, lookup: F) -> Result<Self, OutreachError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(OutreachError::MissingCredential(key))
        };
        Ok(Self {
            tavily_api_key: read("TAVILY_API_KEY")?,
            llm_api_key: read(provider.api_key_var())?,
        })
    }
}
