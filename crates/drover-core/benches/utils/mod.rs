use drover_core::AgentId;
use drover_core::resources::{
    CPU_RESOURCE_NAME, MEM_RESOURCE_NAME, NETWORK_BANDWIDTH_RESOURCE_NAME, Resource, Resources,
};
use drover_core::sorter::{AgentSorter, SortPolicy, SorterKind};

pub fn agent_ids(count: usize) -> Vec<AgentId> {
    (0..count).map(|i| AgentId::new(format!("agent-{i:06}"))).collect()
}

pub fn capacity(cpus: u64, mem: u64) -> Resources {
    [
        Resource::scalar(CPU_RESOURCE_NAME, cpus),
        Resource::scalar(MEM_RESOURCE_NAME, mem),
        Resource::scalar(NETWORK_BANDWIDTH_RESOURCE_NAME, 1000u64),
    ]
    .into_iter()
    .collect()
}

/// Sorter with `ids` registered, every other agent partially allocated.
pub fn create_sorter(kind: SorterKind, ids: &[AgentId]) -> AgentSorter {
    let mut sorter = AgentSorter::with_seed(kind, 0);
    for (i, id) in ids.iter().enumerate() {
        sorter.add(id, &capacity(16, 64 * 1024));
        if i % 2 == 0 {
            sorter.allocated(id, &capacity((i % 16) as u64, 1024));
        }
    }
    sorter
}
