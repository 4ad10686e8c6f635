use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::internal::common::ids::AgentId;
use crate::internal::common::resources::Resources;
use crate::internal::sorter::SortPolicy;

/// Visits agents in a uniformly random order. Keeps no state besides the
/// random generator.
#[derive(Debug)]
pub struct RandomSorter {
    rng: SmallRng,
}

impl Default for RandomSorter {
    fn default() -> Self {
        RandomSorter {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl RandomSorter {
    /// Creates a sorter that always produces the same sequence of permutations.
    pub fn with_seed(seed: u64) -> Self {
        RandomSorter {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl SortPolicy for RandomSorter {
    fn sort(&mut self, ids: &mut [AgentId]) {
        ids.shuffle(&mut self.rng);
    }

    fn add(&mut self, _agent_id: &AgentId, _resources: &Resources) {}

    fn remove(&mut self, _agent_id: &AgentId, _resources: &Resources) {}

    fn allocated(&mut self, _agent_id: &AgentId, _resources: &Resources) {}

    fn unallocated(&mut self, _agent_id: &AgentId, _resources: &Resources) {}
}
