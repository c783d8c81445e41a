//! LLM 层：客户端抽象与实现（OpenAI 兼容 / Anthropic / Mock）

pub mod anthropic;
pub mod mock;
pub mod openai;
pub mod traits;

pub use anthropic::AnthropicClient;
pub use mock::MockLlmClient;
pub use openai::OpenAiClient;
pub use traits::{LlmClient, LlmError, Message, Role};
