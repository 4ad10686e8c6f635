use crate::internal::common::Map;
use crate::internal::common::ids::AgentId;
use crate::internal::common::resources::Resources;

/// Declared capacity per agent together with the cluster-wide sum of the
/// stripped scalar quantities.
///
/// The sum always equals the sum of per-agent stripped scalar quantities,
/// with each shared resource counted once per agent no matter how many copies
/// the agent holds.
#[derive(Debug, Default)]
pub struct ResourceTotals {
    resources: Map<AgentId, Resources>,
    scalar_quantities: Resources,
}

impl ResourceTotals {
    pub fn add(&mut self, agent_id: &AgentId, resources: &Resources) {
        if resources.is_empty() {
            return;
        }
        let total = self.resources.entry(agent_id.clone()).or_default();

        // Shared resources contribute to the quantities only when the agent
        // does not hold a copy already
        let new_shared = resources
            .shared()
            .filter(|resource| !total.contains_resource(resource));
        *total += resources;

        let quantities = (&resources.non_shared() + &new_shared).stripped_scalar_quantity();
        self.scalar_quantities += &quantities;
    }

    /// Panics when `resources` are not part of the agent's capacity.
    pub fn remove(&mut self, agent_id: &AgentId, resources: &Resources) {
        if resources.is_empty() {
            return;
        }
        let Some(total) = self.resources.get_mut(agent_id) else {
            panic!("Removing {resources} from unknown agent {agent_id}");
        };
        assert!(
            total.contains(resources),
            "{total} does not contain {resources} on agent {agent_id}"
        );
        *total -= resources;

        let absent_shared = resources
            .shared()
            .filter(|resource| !total.contains_resource(resource));
        let quantities = (&resources.non_shared() + &absent_shared).stripped_scalar_quantity();
        assert!(
            self.scalar_quantities.contains(&quantities),
            "Total quantities {} do not contain {quantities}",
            self.scalar_quantities
        );
        self.scalar_quantities -= &quantities;

        if total.is_empty() {
            self.resources.remove(agent_id);
        }
    }

    #[inline]
    pub fn get(&self, agent_id: &AgentId) -> Option<&Resources> {
        self.resources.get(agent_id)
    }

    #[inline]
    pub fn contains_agent(&self, agent_id: &AgentId) -> bool {
        self.resources.contains_key(agent_id)
    }

    pub fn agents(&self) -> impl Iterator<Item = &AgentId> {
        self.resources.keys()
    }

    #[inline]
    pub fn scalar_quantities(&self) -> &Resources {
        &self.scalar_quantities
    }
}
