use crate::internal::admission::AdmissionError;
use crate::internal::common::ids::{AgentId, TaskId};
use crate::internal::common::resources::Resources;

#[derive(Debug, Clone)]
pub enum TaskOutcome {
    /// The task was launched on `agent` with its admitted resources.
    Placed {
        task: TaskId,
        agent: AgentId,
        resources: Resources,
    },
    /// Admission of the task failed on `agent`, it is not offered further.
    Rejected {
        task: TaskId,
        agent: AgentId,
        error: AdmissionError,
    },
    /// No agent had enough free resources.
    Unplaced { task: TaskId },
}

impl TaskOutcome {
    pub fn task_id(&self) -> &TaskId {
        match self {
            TaskOutcome::Placed { task, .. }
            | TaskOutcome::Rejected { task, .. }
            | TaskOutcome::Unplaced { task } => task,
        }
    }

    pub fn agent_id(&self) -> Option<&AgentId> {
        match self {
            TaskOutcome::Placed { agent, .. } | TaskOutcome::Rejected { agent, .. } => Some(agent),
            TaskOutcome::Unplaced { .. } => None,
        }
    }

    pub fn is_placed(&self) -> bool {
        matches!(self, TaskOutcome::Placed { .. })
    }
}

/// Result of one allocation cycle, outcomes are in the order of the input
/// tasks.
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    /// Agent order used for the whole cycle.
    pub agent_order: Vec<AgentId>,
    pub outcomes: Vec<TaskOutcome>,
}

impl CycleReport {
    pub fn placed(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.outcomes.iter().filter(|o| o.is_placed())
    }

    pub fn placed_count(&self) -> usize {
        self.placed().count()
    }

    pub fn rejected_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, TaskOutcome::Rejected { .. }))
            .count()
    }

    pub fn unplaced_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, TaskOutcome::Unplaced { .. }))
            .count()
    }

    pub fn outcome(&self, task_id: &TaskId) -> Option<&TaskOutcome> {
        self.outcomes.iter().find(|o| o.task_id() == task_id)
    }
}
