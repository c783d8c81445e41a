//! 生成搜索查询：公司名的纯函数，不调用外部能力

use async_trait::async_trait;

use crate::core::{OutreachError, PipelineState, StateDelta};
use crate::stages::Stage;

/// 固定两条查询：最新动态 + 业务概览
pub fn build_queries(company: &str) -> Vec<String> {
    vec![
        format!("{} latest news", company),
        format!("{} what they do overview", company),
    ]
}

pub struct GenerateQueriesStage;

#[async_trait]
impl Stage for GenerateQueriesStage {
    fn name(&self) -> &'static str {
        "generate_queries"
    }

    async fn run(&self, state: &PipelineState) -> Result<StateDelta, OutreachError> {
        let queries = build_queries(state.company());
        let entry = format!("[generate_queries] Prepared queries: {:?}", queries);
        Ok(StateDelta {
            queries: Some(queries),
            ..StateDelta::default()
        }
        .with_log(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queries_are_deterministic() {
        let state = PipelineState::new("Acme", None, false, false).unwrap();
        let delta = GenerateQueriesStage.run(&state).await.unwrap();
        assert_eq!(
            delta.queries.unwrap(),
            vec!["Acme latest news", "Acme what they do overview"]
        );
        assert_eq!(
            delta.log,
            vec![r#"[generate_queries] Prepared queries: ["Acme latest news", "Acme what they do overview"]"#]
        );
    }
}
