//! Outreach - 冷启动外联研究智能体
//!
//! 给定公司名（可选官网），依次完成：生成查询 → 网络搜索 → 抓取官网与 About 页 → LLM 撰写摘要与邮件 → 人工审批 → 模拟发送。
//!
//! 模块划分：
//! - **adapters**: 外部能力适配器（Tavily 搜索、HTTP 抓取与正文提取、控制台审批、模拟发送）
//! - **agent**: 无头运行入口（CLI 与 HTTP 服务共用）
//! - **config**: 应用配置加载（TOML + 环境变量）与凭据读取
//! - **core**: 流水线状态、增量合并、阶段编排、错误类型
//! - **llm**: LLM 客户端抽象与实现（OpenAI 兼容 / Anthropic / Mock）
//! - **stages**: 六个流水线阶段
//! - **web**: HTTP 服务路由（需启用 `web` feature）

pub mod adapters;
pub mod agent;
pub mod config;
pub mod core;
pub mod llm;
pub mod observability;
pub mod stages;
#[cfg(feature = "web")]
pub mod web;

pub use agent::{run_workflow, RunReport, RunRequest};
pub use core::{OutreachError, Pipeline, PipelineState};
