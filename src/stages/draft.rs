//! 撰写阶段：拼装研究材料，单次调用 LLM，按 `EMAIL:` 分隔摘要与邮件
//!
//! 没有分隔符时整段文本同时作为摘要与草稿（降级但不报错）；LLM 调用失败直接向上传播。

use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::{shorten, ELLIPSIS};
use crate::core::{OutreachError, PipelineState, SearchBlock, StateDelta};
use crate::llm::{LlmClient, Message};
use crate::stages::Stage;

const EMAIL_MARKER: &str = "EMAIL:";
const SUMMARY_MARKER: &str = "SUMMARY:";

pub const SYSTEM_PROMPT: &str =
    "You are a sales researcher who writes accurate, upbeat summaries and tailored outreach emails.";

/// 把搜索结果展平为提示词中的条目列表
pub fn format_search_snippets(blocks: &[SearchBlock], snippet_chars: usize) -> String {
    let mut lines = Vec::new();
    for block in blocks {
        lines.push(format!("- Query: {}", block.query));
        for hit in &block.results {
            let title = if hit.title.trim().is_empty() {
                "Untitled result"
            } else {
                hit.title.as_str()
            };
            lines.push(format!(
                "  * {} - {} ({})",
                title,
                shorten(&hit.snippet, snippet_chars, ELLIPSIS),
                hit.url
            ));
        }
    }
    lines.join("\n")
}

/// 构造用户提示词
pub fn build_prompt(company: &str, research: &str, website_content: &str) -> String {
    format!(
        r#"Using the research below, produce two sections:
SUMMARY:
- Three crisp bullets describing what the company does and any timely news.

EMAIL:
- A concise cold email with a subject line and 3-5 sentence body that connects our AI automation services to their needs/news.
- Write in a helpful, non-pushy tone. Keep under 180 words.

Company: {company}
Research findings:
{research}

Website content:
{website_content}
"#
    )
}

/// 解析 LLM 输出，返回 (summary, email_draft)
pub fn parse_summary_and_email(raw: &str) -> (String, String) {
    let content = raw.trim();
    match content.split_once(EMAIL_MARKER) {
        Some((summary_part, email_part)) => {
            let summary = summary_part.replace(SUMMARY_MARKER, "").trim().to_string();
            let email = format!("{}\n{}", EMAIL_MARKER, email_part.trim());
            (summary, email)
        }
        None => (content.to_string(), content.to_string()),
    }
}

pub struct DraftStage {
    llm: Arc<dyn LlmClient>,
    snippet_chars: usize,
}

impl DraftStage {
    pub fn new(llm: Arc<dyn LlmClient>, snippet_chars: usize) -> Self {
        Self { llm, snippet_chars }
    }
}

#[async_trait]
impl Stage for DraftStage {
    fn name(&self) -> &'static str {
        "draft"
    }

    async fn run(&self, state: &PipelineState) -> Result<StateDelta, OutreachError> {
        let mut delta = StateDelta::new();
        let research = format_search_snippets(&state.search_results, self.snippet_chars);
        let prompt = build_prompt(state.company(), &research, &state.website_content);

        delta.push_log(format!(
            "[draft] Calling LLM model '{}' via {}",
            self.llm.model(),
            self.llm.provider()
        ));
        let raw = self
            .llm
            .complete(&[Message::system(SYSTEM_PROMPT), Message::user(prompt)])
            .await?;
        let (summary, email) = parse_summary_and_email(&raw);
        delta.push_log("[draft] LLM response received");

        delta.summary = Some(summary);
        delta.email_draft = Some(email);
        Ok(delta)
    }
}
