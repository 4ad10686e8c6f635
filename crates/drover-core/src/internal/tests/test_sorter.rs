use proptest::prelude::*;

use crate::internal::common::ids::AgentId;
use crate::internal::common::resources::{
    CPU_RESOURCE_NAME, MEM_RESOURCE_NAME, Resource, ResourceAmount, Resources,
};
use crate::internal::sorter::{
    AgentSorter, ResourceTotals, ResourceWeightedSorter, SortPolicy, SorterKind,
};
use crate::internal::tests::utils::resources::{cpus, mem, resources};
use crate::internal::tests::utils::sorter::{agent_ids, sorted_ids};
use crate::internal::tests::utils::sorted_vec;

const RESERVED_ROLE: &str = "web";

fn volume() -> Resource {
    Resource::scalar("disk", 50u64).into_shared()
}

/// Unreserved cpus and mem, cpus reserved for a role and copies of a shared
/// volume.
#[derive(Debug, Clone, Copy)]
struct Amounts {
    cpus: u64,
    mem: u64,
    reserved_cpus: u64,
    volumes: u32,
}

#[derive(Debug, Clone)]
enum TotalsOp {
    Add { agent: usize, amounts: Amounts },
    Remove { agent: usize, amounts: Amounts },
}

fn amounts() -> impl Strategy<Value = Amounts> {
    (0..8u64, 0..2048u64, 0..4u64, 0..3u32).prop_map(|(cpus, mem, reserved_cpus, volumes)| {
        Amounts {
            cpus,
            mem,
            reserved_cpus,
            volumes,
        }
    })
}

fn totals_op() -> impl Strategy<Value = TotalsOp> {
    prop_oneof![
        (0..3usize, amounts()).prop_map(|(agent, amounts)| TotalsOp::Add { agent, amounts }),
        (0..3usize, amounts()).prop_map(|(agent, amounts)| TotalsOp::Remove { agent, amounts }),
    ]
}

fn units(amount: Option<ResourceAmount>) -> u64 {
    amount.map(|a| a.units()).unwrap_or(0)
}

fn capacity(cpus: u64, mem: u64) -> Resources {
    resources([
        Resource::scalar(CPU_RESOURCE_NAME, cpus),
        Resource::scalar(MEM_RESOURCE_NAME, mem),
    ])
}

fn agent_resources(amounts: Amounts) -> Resources {
    let mut result = capacity(amounts.cpus, amounts.mem);
    result += Resource::scalar(CPU_RESOURCE_NAME, amounts.reserved_cpus).with_role(RESERVED_ROLE);
    for _ in 0..amounts.volumes {
        result += volume();
    }
    result
}

/// Clamps `amounts` to what the agent currently holds.
fn removable(current: &Resources, amounts: Amounts) -> Amounts {
    let reserved = current
        .get(CPU_RESOURCE_NAME, RESERVED_ROLE)
        .and_then(|r| r.as_scalar());
    Amounts {
        cpus: amounts.cpus.min(units(current.unreserved_scalar(CPU_RESOURCE_NAME))),
        mem: amounts.mem.min(units(current.unreserved_scalar(MEM_RESOURCE_NAME))),
        reserved_cpus: amounts.reserved_cpus.min(units(reserved)),
        volumes: amounts.volumes.min(current.shared_count(&volume())),
    }
}

fn sum_of_agents(totals: &ResourceTotals, ids: &[AgentId]) -> Resources {
    let mut sum = Resources::new();
    for resources in ids.iter().filter_map(|id| totals.get(id)) {
        sum += &resources.stripped_scalar_quantity();
    }
    sum
}

proptest! {
    #[test]
    fn totals_match_sum_of_agents(ops in prop::collection::vec(totals_op(), 0..50)) {
        let ids = agent_ids(&["a", "b", "c"]);
        let mut totals = ResourceTotals::default();
        for op in ops {
            match op {
                TotalsOp::Add { agent, amounts } => {
                    totals.add(&ids[agent], &agent_resources(amounts));
                }
                TotalsOp::Remove { agent, amounts } => {
                    let Some(current) = totals.get(&ids[agent]) else {
                        continue;
                    };
                    let amounts = removable(current, amounts);
                    totals.remove(&ids[agent], &agent_resources(amounts));
                }
            }
            prop_assert_eq!(totals.scalar_quantities(), &sum_of_agents(&totals, &ids));
        }
    }

    #[test]
    fn weighted_ratio_stays_in_bounds(
        agents in prop::collection::vec((1..16u64, 1..4096u64), 1..6),
        usage in prop::collection::vec((0..6usize, 0..16u64, 0..4096u64), 0..20),
    ) {
        let names: Vec<String> = (0..agents.len()).map(|i| format!("agent-{i}")).collect();
        let ids: Vec<AgentId> = names.iter().map(|n| AgentId::new(n.as_str())).collect();
        let mut sorter = ResourceWeightedSorter::default();
        let mut free: Vec<(u64, u64)> = agents.clone();
        for (id, (cpus, mem)) in ids.iter().zip(&agents) {
            sorter.add(id, &capacity(*cpus, *mem));
        }
        for (agent, cpus, mem) in usage {
            let index = agent % ids.len();
            let (free_cpus, free_mem) = &mut free[index];
            let cpus = cpus.min(*free_cpus);
            let mem = mem.min(*free_mem);
            *free_cpus -= cpus;
            *free_mem -= mem;
            sorter.allocated(&ids[index], &capacity(cpus, mem));
        }

        for id in &ids {
            let ratio = sorter.allocation_ratio(id);
            prop_assert!((0.0..=1.0 + 1e-9).contains(&ratio), "ratio {} of {}", ratio, id);
        }

        let mut order = ids.clone();
        sorter.sort(&mut order);
        prop_assert_eq!(sorted_vec(order.clone()), sorted_vec(ids.clone()));
        for pair in order.windows(2) {
            prop_assert!(sorter.allocation_ratio(&pair[0]) <= sorter.allocation_ratio(&pair[1]));
        }
    }
}

#[test]
fn test_lexicographic_sort_is_idempotent() {
    let mut sorter = AgentSorter::new(SorterKind::Lexicographic);
    let first = sorted_ids(&mut sorter, &["b", "c", "a"]);
    let mut second = first.clone();
    sorter.sort(&mut second);
    assert_eq!(first, second);
    assert_eq!(first, agent_ids(&["a", "b", "c"]));
}

#[test]
fn test_all_sorters_keep_capacity_in_sync() {
    for kind in SorterKind::ALL {
        let mut sorter = AgentSorter::with_seed(kind, 42);
        let a = AgentId::new("a");
        sorter.add(&a, &resources([cpus(4.0), mem(1024.0)]));
        sorter.add(&a, &resources([cpus(2.0)]));
        sorter.remove(&a, &resources([cpus(1.0)]));
        if let Some(totals) = sorter.totals() {
            assert_eq!(
                totals.get(&a),
                Some(&resources([cpus(5.0), mem(1024.0)])),
                "{kind}"
            );
        }
        let order = sorted_ids(&mut sorter, &["x", "a"]);
        assert_eq!(sorted_vec(order), agent_ids(&["a", "x"]));
    }
}

#[test]
fn test_weighted_idle_agents_before_busy() {
    let mut sorter = AgentSorter::new(SorterKind::ResourceWeighted);
    for id in agent_ids(&["a", "b", "c"]) {
        sorter.add(&id, &resources([cpus(4.0), mem(1000.0)]));
    }
    sorter.allocated(&"a".into(), &resources([cpus(2.0), mem(500.0)]));
    sorter.allocated(&"c".into(), &resources([cpus(1.0)]));

    let order = sorted_ids(&mut sorter, &["a", "b", "c"]);
    assert_eq!(order, agent_ids(&["b", "c", "a"]));

    sorter.unallocated(&"a".into(), &resources([cpus(2.0), mem(500.0)]));
    let order = sorted_ids(&mut sorter, &["a", "b", "c"]);
    assert_eq!(order[2], AgentId::new("c"));
}
