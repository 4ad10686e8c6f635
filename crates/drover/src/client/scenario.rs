use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use drover_core::admission::{Labels, TaskDeclaration};
use drover_core::allocator::AllocatorConfig;
use drover_core::resources::Resources;
use drover_core::{AgentId, TaskId};

use crate::client::resources::parse_resources;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AgentDef {
    id: String,
    resources: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AllocationDef {
    agent: String,
    resources: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TaskDef {
    id: String,
    name: Option<String>,
    #[serde(default)]
    resources: String,
    #[serde(default)]
    labels: BTreeMap<String, String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioDef {
    #[serde(default)]
    allocator: AllocatorConfig,
    #[serde(default)]
    agents: Vec<AgentDef>,
    #[serde(default)]
    allocations: Vec<AllocationDef>,
    #[serde(default)]
    tasks: Vec<TaskDef>,
}

/// Cluster state and workload loaded from a scenario file.
#[derive(Debug)]
pub struct Scenario {
    pub config: AllocatorConfig,
    pub agents: Vec<(AgentId, Resources)>,
    /// Usage that exists before the simulated cycle starts.
    pub allocations: Vec<(AgentId, Resources)>,
    pub tasks: Vec<TaskDeclaration>,
}

impl Scenario {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read scenario file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid scenario file {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let def: ScenarioDef = toml::from_str(content)?;

        let agents = def
            .agents
            .into_iter()
            .map(|agent| {
                let resources = parse_resources(&agent.resources)
                    .with_context(|| format!("Invalid resources of agent {}", agent.id))?;
                Ok((AgentId::from(agent.id), resources))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let allocations = def
            .allocations
            .into_iter()
            .map(|allocation| {
                let resources = parse_resources(&allocation.resources).with_context(|| {
                    format!("Invalid resources of allocation on {}", allocation.agent)
                })?;
                Ok((AgentId::from(allocation.agent), resources))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let tasks = def
            .tasks
            .into_iter()
            .map(|task| {
                let resources = parse_resources(&task.resources)
                    .with_context(|| format!("Invalid resources of task {}", task.id))?;
                Ok(TaskDeclaration {
                    id: TaskId::from(task.id),
                    name: task.name,
                    resources,
                    labels: task.labels.into_iter().collect::<Labels>(),
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Scenario {
            config: def.allocator,
            agents,
            allocations,
            tasks,
        })
    }
}
