use crate::internal::common::Map;
use crate::internal::common::ids::AgentId;
use crate::internal::common::resources::Resources;
use crate::internal::sorter::SortPolicy;
use crate::internal::sorter::totals::ResourceTotals;

/// Weight of each scalar dimension (resource name) of one agent.
pub type DimensionWeights = Map<String, f64>;

/// Visits the least utilized agents first.
///
/// Utilization of an agent is the ratio between the weighted sum of its
/// allocated resources and the weighted sum of its capacity. Each dimension
/// `d` with capacity `c_d` gets the weight `(1 / c_d) / Σ_k (1 / c_k)`, so
/// scarce dimensions (e.g. a couple of GPUs) are not hidden behind abundant
/// ones (e.g. disk). With these weights the ratio is the mean utilization over
/// the agent's dimensions.
///
/// All derived tables are recomputed eagerly, and only for the agent touched
/// by the call.
#[derive(Debug, Default)]
pub struct ResourceWeightedSorter {
    totals: ResourceTotals,
    allocated: Map<AgentId, Resources>,

    idle_weights: Map<AgentId, DimensionWeights>,
    total_weights: Map<AgentId, f64>,
    allocation_weights: Map<AgentId, f64>,
    allocation_ratios: Map<AgentId, f64>,
}

pub(crate) fn compute_idle_weights(capacity: &Resources) -> DimensionWeights {
    let quantities = capacity.stripped_scalar_quantity();
    let inverse: Vec<(&str, f64)> = quantities
        .iter()
        .filter_map(|resource| {
            let amount = resource.as_scalar()?.as_f64();
            (amount > 0.0).then(|| (resource.name(), 1.0 / amount))
        })
        .collect();
    let norm: f64 = inverse.iter().map(|(_, w)| w).sum();
    if norm <= 0.0 {
        return DimensionWeights::new();
    }
    inverse
        .into_iter()
        .map(|(name, w)| (name.to_string(), w / norm))
        .collect()
}

/// Weighted sum of the stripped scalar quantity of `resources`.
/// Dimensions without a weight do not contribute.
pub(crate) fn compute_weight(weights: &DimensionWeights, resources: &Resources) -> f64 {
    resources
        .stripped_scalar_quantity()
        .iter()
        .filter_map(|resource| Some(weights.get(resource.name())? * resource.as_scalar()?.as_f64()))
        .sum()
}

impl ResourceWeightedSorter {
    pub fn totals(&self) -> &ResourceTotals {
        &self.totals
    }

    pub fn allocated_resources(&self, agent_id: &AgentId) -> Option<&Resources> {
        self.allocated.get(agent_id)
    }

    /// Agents without any allocation have the ratio 0.
    pub fn allocation_ratio(&self, agent_id: &AgentId) -> f64 {
        self.allocation_ratios.get(agent_id).copied().unwrap_or(0.0)
    }

    pub fn idle_weights(&self, agent_id: &AgentId) -> Option<&DimensionWeights> {
        self.idle_weights.get(agent_id)
    }

    pub fn total_weight(&self, agent_id: &AgentId) -> Option<f64> {
        self.total_weights.get(agent_id).copied()
    }

    pub fn allocation_weight(&self, agent_id: &AgentId) -> Option<f64> {
        self.allocation_weights.get(agent_id).copied()
    }

    fn update_capacity_weights(&mut self, agent_id: &AgentId) {
        match self.totals.get(agent_id) {
            Some(capacity) => {
                let weights = compute_idle_weights(capacity);
                let total_weight = compute_weight(&weights, capacity);
                self.idle_weights.insert(agent_id.clone(), weights);
                self.total_weights.insert(agent_id.clone(), total_weight);
            }
            None => {
                self.idle_weights.remove(agent_id);
                self.total_weights.remove(agent_id);
            }
        }
    }

    fn update_allocation_weights(&mut self, agent_id: &AgentId) {
        let Some(allocated) = self.allocated.get(agent_id) else {
            self.allocation_weights.remove(agent_id);
            self.allocation_ratios.remove(agent_id);
            return;
        };
        let weight = self
            .idle_weights
            .get(agent_id)
            .map(|weights| compute_weight(weights, allocated))
            .unwrap_or(0.0);
        let total_weight = self.total_weights.get(agent_id).copied().unwrap_or(0.0);
        let ratio = if total_weight > 0.0 {
            weight / total_weight
        } else {
            0.0
        };
        log::trace!("Allocation ratio of agent {agent_id}: {ratio}");
        self.allocation_weights.insert(agent_id.clone(), weight);
        self.allocation_ratios.insert(agent_id.clone(), ratio);
    }

    fn forget_agent_weights(&mut self, agent_id: &AgentId) {
        self.idle_weights.remove(agent_id);
        self.total_weights.remove(agent_id);
        self.allocation_weights.remove(agent_id);
        self.allocation_ratios.remove(agent_id);
    }
}

impl SortPolicy for ResourceWeightedSorter {
    fn sort(&mut self, ids: &mut [AgentId]) {
        ids.sort_unstable_by(|a, b| {
            self.allocation_ratio(a)
                .total_cmp(&self.allocation_ratio(b))
        });
    }

    fn add(&mut self, agent_id: &AgentId, resources: &Resources) {
        if resources.is_empty() {
            return;
        }
        log::debug!("Adding {resources} to agent {agent_id}");
        self.totals.add(agent_id, resources);
        self.update_capacity_weights(agent_id);
        self.update_allocation_weights(agent_id);
    }

    fn remove(&mut self, agent_id: &AgentId, resources: &Resources) {
        if resources.is_empty() {
            return;
        }
        log::debug!("Removing {resources} from agent {agent_id}");
        self.totals.remove(agent_id, resources);
        self.update_capacity_weights(agent_id);
        self.update_allocation_weights(agent_id);
    }

    fn allocated(&mut self, agent_id: &AgentId, resources: &Resources) {
        if resources.is_empty() {
            return;
        }
        log::trace!("Allocated {resources} on agent {agent_id}");
        *self.allocated.entry(agent_id.clone()).or_default() += resources;
        if !self.idle_weights.contains_key(agent_id) {
            self.update_capacity_weights(agent_id);
        }
        self.update_allocation_weights(agent_id);
    }

    /// Panics when the agent has no allocation containing `resources`.
    fn unallocated(&mut self, agent_id: &AgentId, resources: &Resources) {
        let Some(allocated) = self.allocated.get_mut(agent_id) else {
            panic!("No allocation recorded on agent {agent_id}");
        };
        assert!(
            allocated.contains(resources),
            "Resources {allocated} at agent {agent_id} does not contain {resources}"
        );
        log::trace!("Unallocated {resources} on agent {agent_id}");
        *allocated -= resources;

        if allocated.is_empty() {
            self.allocated.remove(agent_id);
            self.forget_agent_weights(agent_id);
        } else {
            self.update_allocation_weights(agent_id);
        }
    }
}
