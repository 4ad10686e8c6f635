use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use drover_core::allocator::Allocator;
use drover_core::sorter::{AgentSorter, SorterKind};

use crate::client::globalsettings::GlobalSettings;
use crate::client::scenario::Scenario;

#[derive(Parser)]
pub struct ScenarioOpts {
    /// Path to a TOML scenario file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub scenario: PathBuf,

    /// Overrides the agent sorter of the scenario
    /// [possible values: lexicographic, random, resource-weighted]
    #[arg(long)]
    pub sorter: Option<SorterKind>,

    /// Seed of the random sorter
    #[arg(long)]
    pub seed: Option<u64>,

    /// Overrides whether bandwidth admission runs for launched tasks
    #[arg(long)]
    pub enforce_bandwidth: Option<bool>,
}

/// Builds an allocator with all agents of the scenario registered and its
/// pre-existing allocations recorded.
pub fn prepare_allocator(scenario: &Scenario, opts: &ScenarioOpts) -> anyhow::Result<Allocator> {
    let mut config = scenario.config.clone();
    if let Some(kind) = opts.sorter {
        config.sorter = kind;
    }
    if let Some(enforce) = opts.enforce_bandwidth {
        config.network_bandwidth_enforcement = enforce;
    }
    let sorter = match opts.seed {
        Some(seed) => AgentSorter::with_seed(config.sorter, seed),
        None => AgentSorter::new(config.sorter),
    };
    let mut allocator = Allocator::with_sorter(config, sorter);

    for (agent_id, resources) in &scenario.agents {
        allocator.add_agent(agent_id.clone(), resources.clone())?;
    }
    for (agent_id, resources) in &scenario.allocations {
        allocator
            .allocate(agent_id, resources.clone())
            .with_context(|| format!("Cannot record allocation of {resources} on {agent_id}"))?;
    }
    log::debug!(
        "Allocator prepared with {} agents, sorter: {}",
        allocator.agent_count(),
        allocator.config().sorter
    );
    Ok(allocator)
}

pub fn command_order(gsettings: &GlobalSettings, opts: ScenarioOpts) -> anyhow::Result<()> {
    let scenario = Scenario::load(&opts.scenario)?;
    let mut allocator = prepare_allocator(&scenario, &opts)?;
    let order = allocator.agent_order();
    gsettings.printer().print_agent_order(&allocator, &order);
    Ok(())
}

pub fn command_simulate(gsettings: &GlobalSettings, opts: ScenarioOpts) -> anyhow::Result<()> {
    let scenario = Scenario::load(&opts.scenario)?;
    let mut allocator = prepare_allocator(&scenario, &opts)?;
    let report = allocator.run_cycle(&scenario.tasks);
    gsettings.printer().print_cycle_report(&allocator, &report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use drover_core::AgentId;
    use drover_core::allocator::TaskOutcome;
    use drover_core::resources::ResourceAmount;

    const SCENARIO: &str = r#"
[allocator]
sorter = "resource-weighted"
network_bandwidth_enforcement = true

[[agents]]
id = "a"
resources = "cpus:4;mem:1024;network_bandwidth:2000"

[[agents]]
id = "b"
resources = "cpus:4;mem:1024;network_bandwidth:2000"

[[allocations]]
agent = "a"
resources = "cpus:2"

[[tasks]]
id = "t1"
resources = "cpus:1"
"#;

    fn opts() -> ScenarioOpts {
        ScenarioOpts {
            scenario: PathBuf::from("scenario.toml"),
            sorter: None,
            seed: None,
            enforce_bandwidth: None,
        }
    }

    #[test]
    fn test_prepare_allocator() {
        let scenario = Scenario::parse(SCENARIO).unwrap();
        let mut allocator = prepare_allocator(&scenario, &opts()).unwrap();
        assert_eq!(allocator.agent_count(), 2);
        assert_eq!(allocator.config().sorter, SorterKind::ResourceWeighted);
        assert_eq!(
            allocator
                .allocated(&AgentId::from("a"))
                .unwrap()
                .unreserved_scalar("cpus"),
            Some(ResourceAmount::new_units(2))
        );
        assert_eq!(
            allocator.agent_order(),
            vec![AgentId::from("b"), AgentId::from("a")]
        );
    }

    #[test]
    fn test_prepare_allocator_overrides() {
        let scenario = Scenario::parse(SCENARIO).unwrap();
        let opts = ScenarioOpts {
            sorter: Some(SorterKind::Lexicographic),
            enforce_bandwidth: Some(false),
            ..opts()
        };
        let mut allocator = prepare_allocator(&scenario, &opts).unwrap();
        assert_eq!(allocator.config().sorter, SorterKind::Lexicographic);
        assert!(!allocator.config().network_bandwidth_enforcement);
        assert_eq!(
            allocator.agent_order(),
            vec![AgentId::from("a"), AgentId::from("b")]
        );
    }

    #[test]
    fn test_prepare_allocator_seeded_random() {
        let scenario = Scenario::parse(SCENARIO).unwrap();
        let opts = ScenarioOpts {
            sorter: Some(SorterKind::Random),
            seed: Some(42),
            ..opts()
        };
        let mut first = prepare_allocator(&scenario, &opts).unwrap();
        let mut second = prepare_allocator(&scenario, &opts).unwrap();
        assert_eq!(first.config().sorter, SorterKind::Random);
        assert_eq!(first.agent_order(), second.agent_order());
    }

    #[test]
    fn test_prepare_allocator_invalid_allocation() {
        let scenario = Scenario::parse(
            r#"
[[agents]]
id = "a"
resources = "cpus:1"

[[allocations]]
agent = "a"
resources = "cpus:2"
"#,
        )
        .unwrap();
        let error = prepare_allocator(&scenario, &opts()).unwrap_err();
        assert_eq!(error.to_string(), "Cannot record allocation of cpus:2 on a");
    }

    #[test]
    fn test_prepare_allocator_duplicate_agent() {
        let scenario = Scenario::parse(
            "[[agents]]\nid = \"a\"\nresources = \"cpus:1\"\n\n[[agents]]\nid = \"a\"\nresources = \"cpus:2\"\n",
        )
        .unwrap();
        assert!(prepare_allocator(&scenario, &opts()).is_err());
    }

    #[test]
    fn test_simulated_cycle_uses_bandwidth_admission() {
        let scenario = Scenario::parse(SCENARIO).unwrap();
        let mut allocator = prepare_allocator(&scenario, &opts()).unwrap();
        let report = allocator.run_cycle(&scenario.tasks);
        match report.outcome(&"t1".into()) {
            Some(TaskOutcome::Placed {
                agent, resources, ..
            }) => {
                assert_eq!(agent.as_str(), "b");
                assert_eq!(
                    resources.unreserved_scalar("network_bandwidth"),
                    Some(ResourceAmount::new_units(500))
                );
            }
            outcome => panic!("Unexpected outcome {outcome:?}"),
        }
    }
}
