use crate::internal::common::ids::AgentId;
use crate::internal::sorter::SortPolicy;

pub fn agent_ids(names: &[&str]) -> Vec<AgentId> {
    names.iter().map(|name| AgentId::new(*name)).collect()
}

pub fn sorted_ids<S: SortPolicy>(sorter: &mut S, names: &[&str]) -> Vec<AgentId> {
    let mut ids = agent_ids(names);
    sorter.sort(&mut ids);
    ids
}
