mod lexicographic;
mod random;
mod totals;
mod weighted;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::internal::common::ids::AgentId;
use crate::internal::common::resources::Resources;

pub use lexicographic::LexicographicSorter;
pub use random::RandomSorter;
pub use totals::ResourceTotals;
pub use weighted::{DimensionWeights, ResourceWeightedSorter};

/// Policy deciding in which order agents are offered to workloads.
///
/// Implementations are not thread-safe, calls have to be serialized by the
/// caller.
pub trait SortPolicy {
    /// Reorders `ids` in place.
    fn sort(&mut self, ids: &mut [AgentId]);

    /// Adds declared capacity of an agent. Empty `resources` are ignored.
    fn add(&mut self, agent_id: &AgentId, resources: &Resources);

    /// Removes declared capacity of an agent.
    /// Panics when `resources` are not part of the agent's capacity.
    fn remove(&mut self, agent_id: &AgentId, resources: &Resources);

    /// Records that `resources` started to be used on the agent.
    fn allocated(&mut self, agent_id: &AgentId, resources: &Resources);

    /// Records that `resources` stopped being used on the agent.
    fn unallocated(&mut self, agent_id: &AgentId, resources: &Resources);
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SorterKind {
    #[default]
    Lexicographic,
    Random,
    ResourceWeighted,
}

impl SorterKind {
    pub const ALL: [SorterKind; 3] = [
        SorterKind::Lexicographic,
        SorterKind::Random,
        SorterKind::ResourceWeighted,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SorterKind::Lexicographic => "lexicographic",
            SorterKind::Random => "random",
            SorterKind::ResourceWeighted => "resource-weighted",
        }
    }
}

impl Display for SorterKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SorterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SorterKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown agent sorter '{s}', expected one of: lexicographic, random, resource-weighted"
                )
            })
    }
}

/// The agent sorter selected by configuration.
#[derive(Debug)]
pub enum AgentSorter {
    Lexicographic(LexicographicSorter),
    Random(RandomSorter),
    ResourceWeighted(ResourceWeightedSorter),
}

impl AgentSorter {
    pub fn new(kind: SorterKind) -> Self {
        match kind {
            SorterKind::Lexicographic => AgentSorter::Lexicographic(Default::default()),
            SorterKind::Random => AgentSorter::Random(Default::default()),
            SorterKind::ResourceWeighted => AgentSorter::ResourceWeighted(Default::default()),
        }
    }

    /// Like [`AgentSorter::new`], but a random sorter gets a fixed seed.
    pub fn with_seed(kind: SorterKind, seed: u64) -> Self {
        match kind {
            SorterKind::Random => AgentSorter::Random(RandomSorter::with_seed(seed)),
            kind => Self::new(kind),
        }
    }

    pub fn kind(&self) -> SorterKind {
        match self {
            AgentSorter::Lexicographic(_) => SorterKind::Lexicographic,
            AgentSorter::Random(_) => SorterKind::Random,
            AgentSorter::ResourceWeighted(_) => SorterKind::ResourceWeighted,
        }
    }

    /// Capacity bookkeeping, the random sorter does not keep any.
    pub fn totals(&self) -> Option<&ResourceTotals> {
        match self {
            AgentSorter::Lexicographic(sorter) => Some(sorter.totals()),
            AgentSorter::Random(_) => None,
            AgentSorter::ResourceWeighted(sorter) => Some(sorter.totals()),
        }
    }

    fn policy(&mut self) -> &mut dyn SortPolicy {
        match self {
            AgentSorter::Lexicographic(sorter) => sorter as &mut dyn SortPolicy,
            AgentSorter::Random(sorter) => sorter as &mut dyn SortPolicy,
            AgentSorter::ResourceWeighted(sorter) => sorter as &mut dyn SortPolicy,
        }
    }
}

impl SortPolicy for AgentSorter {
    fn sort(&mut self, ids: &mut [AgentId]) {
        self.policy().sort(ids)
    }

    fn add(&mut self, agent_id: &AgentId, resources: &Resources) {
        self.policy().add(agent_id, resources)
    }

    fn remove(&mut self, agent_id: &AgentId, resources: &Resources) {
        self.policy().remove(agent_id, resources)
    }

    fn allocated(&mut self, agent_id: &AgentId, resources: &Resources) {
        self.policy().allocated(agent_id, resources)
    }

    fn unallocated(&mut self, agent_id: &AgentId, resources: &Resources) {
        self.policy().unallocated(agent_id, resources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorter_kind_parse() {
        for kind in SorterKind::ALL {
            assert_eq!(kind.to_string().parse::<SorterKind>().unwrap(), kind);
        }
        assert!("weighted".parse::<SorterKind>().is_err());
        assert_eq!(SorterKind::default(), SorterKind::Lexicographic);
    }

    #[test]
    fn test_factory_selects_variant() {
        for kind in SorterKind::ALL {
            assert_eq!(AgentSorter::new(kind).kind(), kind);
            assert_eq!(AgentSorter::with_seed(kind, 7).kind(), kind);
        }
        assert!(AgentSorter::new(SorterKind::Random).totals().is_none());
        assert!(AgentSorter::new(SorterKind::ResourceWeighted)
            .totals()
            .is_some());
    }
}
