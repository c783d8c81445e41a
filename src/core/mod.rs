//! 核心编排层：错误类型、流水线状态与增量合并、阶段编排、能力装配

pub mod builder;
pub mod error;
pub mod orchestrator;
pub mod state;

pub use builder::create_llm;
pub use error::OutreachError;
pub use orchestrator::{Capabilities, Pipeline, PipelineSettings};
pub use state::{Approval, PipelineState, SearchBlock, SearchHit, StateDelta};
