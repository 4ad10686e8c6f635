use cli_table::format::{Justify, Separator};
use cli_table::{Cell, CellStruct, Color, ColorChoice, Style, Table, TableStruct, print_stdout};
use colored::Colorize;

use drover_core::AgentId;
use drover_core::allocator::{Allocator, CycleReport, TaskOutcome};
use drover_core::resources::Resources;

use crate::client::output::outputs::Output;
use crate::client::output::{AgentSummary, summarize_agents};

pub const OUTCOME_COLOR_PLACED: Color = Color::Green;
pub const OUTCOME_COLOR_REJECTED: Color = Color::Red;
pub const OUTCOME_COLOR_UNPLACED: Color = Color::Yellow;

pub struct CliOutput {
    color_policy: ColorChoice,
}

impl CliOutput {
    pub fn new(color_policy: ColorChoice) -> CliOutput {
        CliOutput { color_policy }
    }

    fn print_horizontal_table(&self, rows: Vec<Vec<CellStruct>>, header: Vec<CellStruct>) {
        let table = rows
            .table()
            .separator(
                Separator::builder()
                    .title(Some(Default::default()))
                    .column(Some(Default::default()))
                    .build(),
            )
            .title(header);
        self.print_table(table);
    }

    fn print_table(&self, table: TableStruct) {
        let table = table.color_choice(self.color_policy);
        if let Err(e) = print_stdout(table) {
            log::error!("Cannot print table to stdout: {e:?}");
        }
    }

    fn print_agent_table(&self, agents: &[AgentSummary]) {
        let with_ratio = agents.iter().any(|a| a.allocation_ratio.is_some());
        let rows: Vec<_> = agents
            .iter()
            .enumerate()
            .map(|(position, agent)| {
                let mut row = vec![
                    (position + 1).cell().justify(Justify::Right),
                    agent.id.as_str().cell(),
                    format_resources(&agent.total).cell(),
                    format_resources(&agent.allocated).cell(),
                    format_resources(&agent.available).cell(),
                ];
                if with_ratio {
                    row.push(format_ratio(agent.allocation_ratio).cell().justify(Justify::Right));
                }
                row
            })
            .collect();

        let mut header = vec![
            "#".cell().bold(true),
            "Agent".cell().bold(true),
            "Total".cell().bold(true),
            "Allocated".cell().bold(true),
            "Available".cell().bold(true),
        ];
        if with_ratio {
            header.push("Allocation ratio".cell().bold(true));
        }
        self.print_horizontal_table(rows, header);
    }
}

impl Output for CliOutput {
    fn print_agent_order(&self, allocator: &Allocator, order: &[AgentId]) {
        if order.is_empty() {
            println!("No agents");
            return;
        }
        println!("Agent order ({} sorter):", allocator.config().sorter);
        self.print_agent_table(&summarize_agents(allocator, order));
    }

    fn print_cycle_report(&self, allocator: &Allocator, report: &CycleReport) {
        let rows: Vec<_> = report
            .outcomes
            .iter()
            .map(|outcome| match outcome {
                TaskOutcome::Placed {
                    task,
                    agent,
                    resources,
                } => vec![
                    task.as_str().cell(),
                    "PLACED"
                        .cell()
                        .foreground_color(Some(OUTCOME_COLOR_PLACED)),
                    agent.as_str().cell(),
                    format_resources(resources).cell(),
                ],
                TaskOutcome::Rejected { task, agent, error } => vec![
                    task.as_str().cell(),
                    "REJECTED"
                        .cell()
                        .foreground_color(Some(OUTCOME_COLOR_REJECTED)),
                    agent.as_str().cell(),
                    error
                        .to_string()
                        .cell()
                        .foreground_color(Some(OUTCOME_COLOR_REJECTED)),
                ],
                TaskOutcome::Unplaced { task } => vec![
                    task.as_str().cell(),
                    "UNPLACED"
                        .cell()
                        .foreground_color(Some(OUTCOME_COLOR_UNPLACED)),
                    "".cell(),
                    "No agent has enough free resources".cell(),
                ],
            })
            .collect();
        let header = vec![
            "Task".cell().bold(true),
            "Outcome".cell().bold(true),
            "Agent".cell().bold(true),
            "Resources / Error".cell().bold(true),
        ];
        if !rows.is_empty() {
            self.print_horizontal_table(rows, header);
        }

        println!(
            "{} placed, {} rejected, {} unplaced",
            report.placed_count().to_string().green(),
            report.rejected_count().to_string().red(),
            report.unplaced_count().to_string().yellow()
        );

        println!("\nAgents after the cycle:");
        self.print_agent_table(&summarize_agents(allocator, &report.agent_order));
    }

    fn print_error(&self, error: anyhow::Error) {
        eprintln!("{error:?}");
    }
}

fn format_resources(resources: &Resources) -> String {
    if resources.is_empty() {
        return "-".to_string();
    }
    resources.iter().map(|r| r.to_string()).collect::<Vec<_>>().join("\n")
}

fn format_ratio(ratio: Option<f64>) -> String {
    match ratio {
        Some(ratio) => format!("{:.1} %", ratio * 100.0),
        None => "-".to_string(),
    }
}
