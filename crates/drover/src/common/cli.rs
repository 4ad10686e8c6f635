use clap::Parser;

use crate::client::commands::ScenarioOpts;
use crate::client::output::outputs::Outputs;

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum ColorPolicy {
    /// Use colors if the stdout is detected to be a terminal.
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

// Common CLI options
#[derive(Parser)]
pub struct CommonOpts {
    /// Sets console color policy
    #[arg(
        long,
        default_value_t = ColorPolicy::Auto,
        value_enum,
        global = true,
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub colors: ColorPolicy,

    /// Sets output formatting
    #[arg(
        long,
        env = "DROVER_OUTPUT_MODE",
        default_value_t = Outputs::Cli,
        value_enum,
        global = true,
        help_heading("GLOBAL OPTIONS")
    )]
    pub output_mode: Outputs,

    /// Enables more detailed log output
    #[arg(long, env = "DROVER_DEBUG", global = true, help_heading("GLOBAL OPTIONS"))]
    pub debug: bool,
}

// Root CLI options
#[derive(Parser)]
#[command(author, about, version, disable_help_subcommand(true), help_expected(true))]
pub struct RootOptions {
    #[clap(flatten)]
    pub common: CommonOpts,

    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Parser)]
pub enum SubCommand {
    /// Print the order in which agents would be offered to tasks
    Order(ScenarioOpts),
    /// Run one allocation cycle over the tasks of a scenario
    Simulate(ScenarioOpts),
}
