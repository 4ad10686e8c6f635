pub mod cli;
mod common;
pub mod json;
pub mod outputs;

pub use common::{AgentSummary, summarize_agents};
