//! 无头运行入口
//!
//! CLI 与 HTTP 服务都经由这里启动一次完整运行：
//! RunRequest 描述输入与可选的后端覆盖，run_workflow 执行流水线，RunReport 是对外输出的投影。

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{AppConfig, Provider};
use crate::core::{Capabilities, OutreachError, Pipeline, PipelineSettings, PipelineState};

/// 一次运行的请求参数（HTTP 请求体同构）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunRequest {
    pub company: String,
    #[serde(default)]
    pub url: Option<String>,
    /// 不填则沿用配置文件中的 [llm].provider
    #[serde(default)]
    pub provider: Option<Provider>,
    /// 不填则沿用配置文件中的 [llm].model
    #[serde(default)]
    pub model: Option<String>,
}

impl RunRequest {
    pub fn new(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            ..Self::default()
        }
    }

    /// 在基础配置上叠加本次请求的后端覆盖
    pub fn resolve_config(&self, base: &AppConfig) -> AppConfig {
        let mut cfg = base.clone();
        if let Some(provider) = self.provider {
            cfg.llm.provider = provider;
        }
        if let Some(model) = self.model.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            cfg.llm.model = model.to_string();
        }
        cfg
    }
}

/// 运行结果的对外投影
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub summary: Option<String>,
    pub email_draft: Option<String>,
    /// 未决定时为 null
    pub approved: Option<bool>,
    pub log: Vec<String>,
}

impl From<&PipelineState> for RunReport {
    fn from(state: &PipelineState) -> Self {
        Self {
            summary: state.summary().map(String::from),
            email_draft: state.email_draft().map(String::from),
            approved: state.approval().as_option(),
            log: state.log().to_vec(),
        }
    }
}

/// 用给定能力执行一次完整运行
pub async fn run_workflow(
    request: &RunRequest,
    caps: Capabilities,
    settings: PipelineSettings,
    interactive: bool,
    verbose: bool,
) -> Result<PipelineState, OutreachError> {
    let state = PipelineState::new(request.company.as_str(), request.url.clone(), interactive, verbose)?;
    tracing::info!(
        company = %state.company(),
        url = ?state.company_url,
        interactive,
        "starting outreach run"
    );
    Pipeline::new(caps, settings).run(state).await
}

/// CLI 运行时关闭时等待阻塞任务的上限
const CLI_SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

/// 在专用运行时上执行 CLI 主逻辑，结束后限时关闭
///
/// 审批超时后读取 stdin 的阻塞线程仍在等待输入，默认的运行时析构会无限期等它；
/// 这里只等 `CLI_SHUTDOWN_GRACE`，进程随后正常退出。
pub fn block_on_cli<F: Future>(future: F) -> std::io::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let output = runtime.block_on(future);
    runtime.shutdown_timeout(CLI_SHUTDOWN_GRACE);
    Ok(output)
}
