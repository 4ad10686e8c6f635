use crate::internal::common::ids::AgentId;
use crate::internal::common::resources::Resources;
use crate::internal::sorter::SortPolicy;
use crate::internal::sorter::totals::ResourceTotals;

/// Visits agents in the order of their identifiers.
///
/// Capacity is tracked only to keep the bookkeeping identical to the other
/// sorters, the order never depends on it.
#[derive(Debug, Default)]
pub struct LexicographicSorter {
    totals: ResourceTotals,
}

impl LexicographicSorter {
    pub fn totals(&self) -> &ResourceTotals {
        &self.totals
    }
}

impl SortPolicy for LexicographicSorter {
    fn sort(&mut self, ids: &mut [AgentId]) {
        ids.sort_unstable();
    }

    fn add(&mut self, agent_id: &AgentId, resources: &Resources) {
        log::debug!("Adding {resources} to agent {agent_id}");
        self.totals.add(agent_id, resources);
    }

    fn remove(&mut self, agent_id: &AgentId, resources: &Resources) {
        log::debug!("Removing {resources} from agent {agent_id}");
        self.totals.remove(agent_id, resources);
    }

    fn allocated(&mut self, _agent_id: &AgentId, _resources: &Resources) {
        /* Utilization is ignored */
    }

    fn unallocated(&mut self, _agent_id: &AgentId, _resources: &Resources) {
        /* Utilization is ignored */
    }
}
