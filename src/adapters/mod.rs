//! 能力适配器：搜索、抓取与文本提取、审批、发送
//!
//! 每个适配器只包一个外部副作用；凭据在构造时显式传入，阶段逻辑里不读环境变量。

pub mod approval;
pub mod extract;
pub mod fetch;
pub mod mailer;
pub mod search;

pub use approval::{ApprovalDecision, Approver, AutoDecline, ConsoleApprover};
pub use extract::{extract_text, find_about_link, normalize_url, shorten, ELLIPSIS};
pub use fetch::{Fetcher, HttpFetcher};
pub use mailer::{Mailer, MockMailer, SendOutcome};
pub use search::{SearchProvider, TavilySearch, TAVILY_ENDPOINT};
