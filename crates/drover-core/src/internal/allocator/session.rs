use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::internal::admission::{AdmissionError, TaskDeclaration, enforce_bandwidth};
use crate::internal::allocator::report::{CycleReport, TaskOutcome};
use crate::internal::common::Map;
use crate::internal::common::error::DroverError;
use crate::internal::common::ids::AgentId;
use crate::internal::common::resources::Resources;
use crate::internal::sorter::{AgentSorter, SortPolicy, SorterKind};

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    pub sorter: SorterKind,
    /// Run bandwidth admission on every launched task.
    pub network_bandwidth_enforcement: bool,
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error(transparent)]
    Admission(#[from] AdmissionError),
    #[error("Task requests {requested} but agent {agent} has only {available} available")]
    InsufficientResources {
        agent: AgentId,
        requested: Resources,
        available: Resources,
    },
    #[error("Agent {0} is not registered")]
    UnknownAgent(AgentId),
}

/// A task accepted by an agent. `task` carries the admitted resources,
/// including a network bandwidth added by admission.
#[derive(Debug, Clone)]
pub struct Launch {
    pub agent: AgentId,
    pub task: TaskDeclaration,
}

#[derive(Debug, Default)]
struct AgentState {
    total: Resources,
    allocated: Resources,
}

impl AgentState {
    /// Shared resources are not consumed by allocations, they stay available
    /// as long as the agent declares them.
    fn available(&self) -> Resources {
        let free = &self.total.non_shared() - &self.allocated.non_shared();
        &free + &self.total.shared()
    }
}

/// Registry of agents with their capacity and usage, keeping the configured
/// sorter in sync with every change.
#[derive(Debug)]
pub struct Allocator {
    config: AllocatorConfig,
    sorter: AgentSorter,
    agents: Map<AgentId, AgentState>,
}

impl Allocator {
    pub fn new(config: AllocatorConfig) -> Self {
        let sorter = AgentSorter::new(config.sorter);
        Self::with_sorter(config, sorter)
    }

    /// Uses an already constructed sorter, e.g. a seeded random one.
    /// The sorter kind in `config` is replaced by the kind of `sorter`.
    pub fn with_sorter(mut config: AllocatorConfig, sorter: AgentSorter) -> Self {
        config.sorter = sorter.kind();
        Allocator {
            config,
            sorter,
            agents: Default::default(),
        }
    }

    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    pub fn sorter(&self) -> &AgentSorter {
        &self.sorter
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn contains_agent(&self, agent_id: &AgentId) -> bool {
        self.agents.contains_key(agent_id)
    }

    pub fn total(&self, agent_id: &AgentId) -> Option<&Resources> {
        self.agents.get(agent_id).map(|agent| &agent.total)
    }

    pub fn allocated(&self, agent_id: &AgentId) -> Option<&Resources> {
        self.agents.get(agent_id).map(|agent| &agent.allocated)
    }

    pub fn available(&self, agent_id: &AgentId) -> Option<Resources> {
        self.agents.get(agent_id).map(|agent| agent.available())
    }

    pub fn add_agent(&mut self, agent_id: AgentId, total: Resources) -> crate::Result<()> {
        if self.agents.contains_key(&agent_id) {
            return Err(DroverError::AgentAlreadyExists(agent_id));
        }
        log::debug!("New agent {agent_id} with {total}");
        self.sorter.add(&agent_id, &total);
        self.agents.insert(
            agent_id,
            AgentState {
                total,
                allocated: Resources::new(),
            },
        );
        Ok(())
    }

    /// Replaces the declared capacity of an agent. Current allocations are
    /// kept even if they do not fit into the new capacity.
    pub fn update_agent(&mut self, agent_id: &AgentId, total: Resources) -> crate::Result<()> {
        let agent = self
            .agents
            .get_mut(agent_id)
            .ok_or_else(|| DroverError::UnknownAgent(agent_id.clone()))?;
        log::debug!("Agent {agent_id} updated: {} -> {total}", agent.total);
        self.sorter.remove(agent_id, &agent.total);
        self.sorter.add(agent_id, &total);
        agent.total = total;
        Ok(())
    }

    /// Unregisters an agent and returns its declared capacity.
    pub fn remove_agent(&mut self, agent_id: &AgentId) -> crate::Result<Resources> {
        let agent = self
            .agents
            .remove(agent_id)
            .ok_or_else(|| DroverError::UnknownAgent(agent_id.clone()))?;
        log::debug!("Agent {agent_id} removed");
        if !agent.allocated.is_empty() {
            self.sorter.unallocated(agent_id, &agent.allocated);
        }
        self.sorter.remove(agent_id, &agent.total);
        Ok(agent.total)
    }

    /// All registered agents in the order in which they should be offered.
    pub fn agent_order(&mut self) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self.agents.keys().cloned().collect();
        self.sorter.sort(&mut ids);
        ids
    }

    /// Tries to start `task` on the agent. `task` itself is not modified,
    /// the admitted declaration is returned in [`Launch`].
    pub fn launch(
        &mut self,
        agent_id: &AgentId,
        task: &TaskDeclaration,
    ) -> Result<Launch, LaunchError> {
        let agent = self
            .agents
            .get(agent_id)
            .ok_or_else(|| LaunchError::UnknownAgent(agent_id.clone()))?;

        let mut task = task.clone();
        if self.config.network_bandwidth_enforcement {
            enforce_bandwidth(&agent.total, &mut task)?;
        }
        self.allocate(agent_id, task.resources.clone())?;
        log::debug!("Task {} launched on {agent_id} with {}", task.id, task.resources);
        Ok(Launch {
            agent: agent_id.clone(),
            task,
        })
    }

    /// Records usage of `resources` on the agent without any admission.
    pub fn allocate(&mut self, agent_id: &AgentId, resources: Resources) -> Result<(), LaunchError> {
        let agent = self
            .agents
            .get_mut(agent_id)
            .ok_or_else(|| LaunchError::UnknownAgent(agent_id.clone()))?;
        let available = agent.available();
        if !available.contains(&resources) {
            return Err(LaunchError::InsufficientResources {
                agent: agent_id.clone(),
                requested: resources,
                available,
            });
        }
        agent.allocated += &resources;
        if !resources.is_empty() {
            self.sorter.allocated(agent_id, &resources);
        }
        Ok(())
    }

    /// Releases resources of a finished task.
    pub fn finish(&mut self, agent_id: &AgentId, resources: &Resources) -> crate::Result<()> {
        let agent = self
            .agents
            .get_mut(agent_id)
            .ok_or_else(|| DroverError::UnknownAgent(agent_id.clone()))?;
        if !agent.allocated.contains(resources) {
            return Err(DroverError::GenericError(format!(
                "Agent {agent_id} has {} allocated, cannot release {resources}",
                agent.allocated
            )));
        }
        agent.allocated -= resources;
        if !resources.is_empty() {
            self.sorter.unallocated(agent_id, resources);
        }
        Ok(())
    }

    /// Places tasks one by one on the first agent that accepts them. The
    /// agent order is computed once at the beginning of the cycle.
    ///
    /// Admission errors caused by the task reject it right away. An agent
    /// without CPUs is skipped like an agent without enough free resources.
    pub fn run_cycle(&mut self, tasks: &[TaskDeclaration]) -> CycleReport {
        trace_time!("allocator", "cycle", {
            let agent_order = self.agent_order();
            let outcomes = tasks
                .iter()
                .map(|task| self.place(&agent_order, task))
                .collect();
            let report = CycleReport {
                agent_order,
                outcomes,
            };
            log::debug!(
                "Allocation cycle finished: {} placed, {} rejected, {} unplaced",
                report.placed_count(),
                report.rejected_count(),
                report.unplaced_count()
            );
            report
        })
    }

    fn place(&mut self, agent_order: &[AgentId], task: &TaskDeclaration) -> TaskOutcome {
        for agent_id in agent_order {
            match self.launch(agent_id, task) {
                Ok(launch) => {
                    return TaskOutcome::Placed {
                        task: launch.task.id,
                        agent: launch.agent,
                        resources: launch.task.resources,
                    };
                }
                // The agent has no CPUs to split the bandwidth pool by
                Err(LaunchError::Admission(AdmissionError::NoAgentCpu)) => {
                    log::debug!("Agent {agent_id} cannot derive bandwidth of task {}", task.id);
                }
                Err(LaunchError::Admission(error)) => {
                    log::debug!("Task {} rejected on {agent_id}: {error}", task.id);
                    return TaskOutcome::Rejected {
                        task: task.id.clone(),
                        agent: agent_id.clone(),
                        error,
                    };
                }
                Err(LaunchError::InsufficientResources { .. }) | Err(LaunchError::UnknownAgent(_)) => {}
            }
        }
        log::debug!("Task {} could not be placed", task.id);
        TaskOutcome::Unplaced {
            task: task.id.clone(),
        }
    }
}
