use serde_json::{Value, json};

use drover_core::AgentId;
use drover_core::allocator::{Allocator, CycleReport, TaskOutcome};

use crate::client::output::outputs::Output;
use crate::client::output::{AgentSummary, summarize_agents};

#[derive(Default)]
pub struct JsonOutput;

impl JsonOutput {
    fn print(&self, data: Value) {
        println!("{data}");
    }
}

impl Output for JsonOutput {
    fn print_agent_order(&self, allocator: &Allocator, order: &[AgentId]) {
        self.print(json!({
            "sorter": allocator.config().sorter.name(),
            "agents": agent_order_json(&summarize_agents(allocator, order)),
        }));
    }

    fn print_cycle_report(&self, allocator: &Allocator, report: &CycleReport) {
        let agents = summarize_agents(allocator, &report.agent_order);
        self.print(cycle_report_json(report, &agents));
    }

    fn print_error(&self, error: anyhow::Error) {
        self.print(json!({ "error": format!("{error:#}") }));
    }
}

pub fn agent_order_json(agents: &[AgentSummary]) -> Value {
    agents
        .iter()
        .map(|agent| {
            let mut value = json!({
                "id": agent.id.as_str(),
                "total": agent.total.to_string(),
                "allocated": agent.allocated.to_string(),
                "available": agent.available.to_string(),
            });
            if let Some(ratio) = agent.allocation_ratio {
                value["allocation_ratio"] = json!(ratio);
            }
            value
        })
        .collect()
}

fn outcome_json(outcome: &TaskOutcome) -> Value {
    match outcome {
        TaskOutcome::Placed {
            task,
            agent,
            resources,
        } => json!({
            "task": task.as_str(),
            "outcome": "placed",
            "agent": agent.as_str(),
            "resources": resources.to_string(),
        }),
        TaskOutcome::Rejected { task, agent, error } => json!({
            "task": task.as_str(),
            "outcome": "rejected",
            "agent": agent.as_str(),
            "error": error.to_string(),
        }),
        TaskOutcome::Unplaced { task } => json!({
            "task": task.as_str(),
            "outcome": "unplaced",
        }),
    }
}

pub fn cycle_report_json(report: &CycleReport, agents: &[AgentSummary]) -> Value {
    json!({
        "agent_order": report.agent_order.iter().map(|id| id.as_str()).collect::<Vec<_>>(),
        "outcomes": report.outcomes.iter().map(outcome_json).collect::<Vec<_>>(),
        "summary": {
            "placed": report.placed_count(),
            "rejected": report.rejected_count(),
            "unplaced": report.unplaced_count(),
        },
        "agents": agent_order_json(agents),
    })
}
