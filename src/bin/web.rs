//! Outreach HTTP 服务
//!
//! 启动: cargo run --bin outreach-web --features web
//! 默认监听 0.0.0.0:8000，可通过 [web].bind 或 OUTREACH__WEB__BIND 覆盖

#![cfg(feature = "web")]

use anyhow::Context;
use outreach::{
    config::load_config,
    observability,
    web::{env_capabilities, router, AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init();

    let cfg = load_config(None).context("Failed to load configuration")?;
    let bind = cfg.web.bind.clone();
    let app = router(AppState::new(cfg, env_capabilities()));

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    tracing::info!("Outreach API: http://{}", bind);
    axum::serve(listener, app).await?;

    Ok(())
}
