//! 集成测试共用的假适配器

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use outreach::adapters::{ApprovalDecision, Approver, AutoDecline, Fetcher, MockMailer, SearchProvider};
use outreach::core::{Capabilities, OutreachError, SearchHit};
use outreach::llm::MockLlmClient;

/// 每条查询返回同一组结果；可设置为失败
pub struct FakeSearch {
    hits: Vec<SearchHit>,
    fail: Option<String>,
    pub queries: Mutex<Vec<String>>,
}

impl FakeSearch {
    pub fn with_hits(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            fail: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            hits: Vec::new(),
            fail: Some(message.to_string()),
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SearchProvider for FakeSearch {
    async fn search(&self, query: &str, _limit: usize) -> Result<Vec<SearchHit>, OutreachError> {
        self.queries.lock().unwrap().push(query.to_string());
        match &self.fail {
            Some(msg) => Err(OutreachError::Search(msg.clone())),
            None => Ok(self.hits.clone()),
        }
    }

    fn name(&self) -> &str {
        "Fake"
    }
}

/// 按 URL 返回固定页面；未登记的 URL 视为超时
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    pub fetched: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String, OutreachError> {
        self.fetched.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| OutreachError::Fetch(format!("timed out fetching {}", url)))
    }
}

/// 固定决定的审批者，记录调用次数
pub struct ScriptedApprover {
    decision: ApprovalDecision,
    pub calls: AtomicUsize,
}

impl ScriptedApprover {
    pub fn new(approved: bool, edited: Option<&str>) -> Self {
        Self {
            decision: ApprovalDecision {
                approved,
                edited_draft: edited.map(String::from),
            },
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Approver for ScriptedApprover {
    async fn review(&self, _draft: &str) -> Result<ApprovalDecision, OutreachError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.decision.clone())
    }
}

pub fn hit(title: &str, url: &str, snippet: &str) -> SearchHit {
    SearchHit {
        title: title.to_string(),
        url: url.to_string(),
        snippet: snippet.to_string(),
    }
}

pub const DRAFT_REPLY: &str =
    "SUMMARY:\n- Acme builds warehouse robots\n\nEMAIL:\nSubject: Automating Acme\n\nHi Acme team,";

/// 默认组合：非交互审批、模拟发送
pub fn capabilities(
    search: Arc<dyn SearchProvider>,
    fetcher: Arc<dyn Fetcher>,
    llm: Arc<MockLlmClient>,
) -> Capabilities {
    Capabilities {
        search,
        fetcher,
        llm,
        approver: Arc::new(AutoDecline),
        mailer: Arc::new(MockMailer),
    }
}
