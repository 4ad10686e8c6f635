use drover_core::AgentId;
use drover_core::allocator::{Allocator, CycleReport};

#[derive(clap::ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outputs {
    Cli,
    Json,
}

pub trait Output {
    fn print_agent_order(&self, allocator: &Allocator, order: &[AgentId]);
    fn print_cycle_report(&self, allocator: &Allocator, report: &CycleReport);

    fn print_error(&self, error: anyhow::Error);
}
