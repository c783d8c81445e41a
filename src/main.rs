//! Outreach 命令行
//!
//! 用法：outreach "Acme Robotics" --url acme.com --provider anthropic --model claude-3-5-haiku-latest
//! 交互模式运行：草稿生成后在终端审批（y / N / edit）。

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use outreach::{
    agent::block_on_cli,
    config::{load_config, Credentials, Provider},
    core::{Capabilities, PipelineSettings},
    observability, run_workflow, RunRequest,
};

#[derive(Parser, Debug)]
#[command(name = "outreach", version, about = "Research a company and draft a cold outreach email")]
struct Cli {
    /// Company name to research
    company: String,

    /// Company website (skips the search-based URL discovery)
    #[arg(long)]
    url: Option<String>,

    /// LLM model name
    #[arg(long)]
    model: Option<String>,

    /// LLM provider: openai or anthropic
    #[arg(long)]
    provider: Option<Provider>,

    /// Extra config file layered over config/default.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    observability::init();
    let cli = Cli::parse();

    // 运行时限时关闭：审批超时后残留的 stdin 读取线程不会卡住退出
    block_on_cli(run(cli)).context("Failed to start async runtime")?
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let base = load_config(cli.config.clone()).context("Failed to load configuration")?;
    let request = RunRequest {
        company: cli.company,
        url: cli.url,
        provider: cli.provider,
        model: cli.model,
    };
    let cfg = request.resolve_config(&base);
    let creds = Credentials::from_env(cfg.llm.provider)?;

    let caps = Capabilities::from_config(&cfg, &creds, true);
    let state = run_workflow(&request, caps, PipelineSettings::from(&cfg), true, true)
        .await
        .context("Outreach run failed")?;

    println!("\n===== RUN COMPLETE =====");
    println!("Company: {}", state.company());
    println!("\nSummary:\n{}", state.summary().unwrap_or_default());
    println!("\nEmail draft:\n{}", state.email_draft().unwrap_or_default());
    println!("\nApproved: {}", state.approval().as_option().unwrap_or(false));
    Ok(())
}
