//! HTTP 服务路由
//!
//! - `GET /health` → `{"status":"ok"}`
//! - `POST /api/run` → 非交互、非 verbose 运行一次流水线，返回 RunReport
//!
//! 任何错误统一返回 500 `{"detail": "<message>"}`，不返回部分状态。

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::agent::{run_workflow, RunReport, RunRequest};
use crate::config::{AppConfig, Credentials};
use crate::core::{Capabilities, OutreachError, PipelineSettings};

/// 按（已叠加请求覆盖的）配置构建本次运行的能力
pub type CapabilityFactory =
    Arc<dyn Fn(&AppConfig) -> Result<Capabilities, OutreachError> + Send + Sync>;

/// 生产用工厂：每次请求从环境读取凭据，HTTP 运行永不交互
pub fn env_capabilities() -> CapabilityFactory {
    Arc::new(|cfg: &AppConfig| {
        let creds = Credentials::from_env(cfg.llm.provider)?;
        Ok(Capabilities::from_config(cfg, &creds, false))
    })
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub capabilities: CapabilityFactory,
}

impl AppState {
    pub fn new(config: AppConfig, capabilities: CapabilityFactory) -> Self {
        Self {
            config: Arc::new(config),
            capabilities,
        }
    }
}

/// 统一错误响应
pub struct ApiError(OutreachError);

impl From<OutreachError> for ApiError {
    fn from(e: OutreachError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_config() {
            tracing::warn!(error = %self.0, "run request rejected before pipeline start");
        } else {
            tracing::error!(error = %self.0, "run request failed");
        }
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "detail": self.0.to_string() })),
        )
            .into_response()
    }
}

/// 前端来源白名单；无法解析的来源跳过
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "invalid CORS origin, skipped");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.web.allowed_origins);
    Router::new()
        .route("/health", get(health))
        .route("/api/run", post(run))
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn run(
    State(state): State<AppState>,
    Json(request): Json<RunRequest>,
) -> Result<Json<RunReport>, ApiError> {
    let cfg = request.resolve_config(&state.config);
    let caps = (state.capabilities)(&cfg)?;
    let final_state =
        run_workflow(&request, caps, PipelineSettings::from(&cfg), false, false).await?;
    Ok(Json(RunReport::from(&final_state)))
}
