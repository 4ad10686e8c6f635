use drover_core::AgentId;
use drover_core::allocator::Allocator;
use drover_core::resources::Resources;
use drover_core::sorter::AgentSorter;

/// State of one agent as shown to the user.
pub struct AgentSummary {
    pub id: AgentId,
    pub total: Resources,
    pub allocated: Resources,
    pub available: Resources,
    /// Only known to the resource-weighted sorter.
    pub allocation_ratio: Option<f64>,
}

/// Summaries of agents in the given order, unknown agents are skipped.
pub fn summarize_agents(allocator: &Allocator, order: &[AgentId]) -> Vec<AgentSummary> {
    order
        .iter()
        .filter_map(|id| {
            Some(AgentSummary {
                id: id.clone(),
                total: allocator.total(id)?.clone(),
                allocated: allocator.allocated(id)?.clone(),
                available: allocator.available(id)?,
                allocation_ratio: match allocator.sorter() {
                    AgentSorter::ResourceWeighted(sorter) => Some(sorter.allocation_ratio(id)),
                    AgentSorter::Lexicographic(_) | AgentSorter::Random(_) => None,
                },
            })
        })
        .collect()
}
