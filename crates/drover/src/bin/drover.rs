use std::io::IsTerminal;

use clap::{CommandFactory, FromArgMatches};
use cli_table::ColorChoice;

use drover::client::commands::{command_order, command_simulate};
use drover::client::globalsettings::GlobalSettings;
use drover::client::output::cli::CliOutput;
use drover::client::output::json::JsonOutput;
use drover::client::output::outputs::{Output, Outputs};
use drover::common::cli::{ColorPolicy, CommonOpts, RootOptions, SubCommand};
use drover::common::setup::setup_logging;

fn make_global_settings(opts: CommonOpts) -> GlobalSettings {
    let color_policy = match opts.colors {
        ColorPolicy::Always => ColorChoice::AlwaysAnsi,
        ColorPolicy::Auto => {
            if std::io::stdout().is_terminal() {
                ColorChoice::Auto
            } else {
                ColorChoice::Never
            }
        }
        ColorPolicy::Never => ColorChoice::Never,
    };

    let printer: Box<dyn Output> = match opts.output_mode {
        Outputs::Cli => {
            match color_policy {
                ColorChoice::Always | ColorChoice::AlwaysAnsi => {
                    colored::control::set_override(true)
                }
                ColorChoice::Never => colored::control::set_override(false),
                _ => {}
            }
            Box::new(CliOutput::new(color_policy))
        }
        Outputs::Json => Box::<JsonOutput>::default(),
    };

    GlobalSettings::new(printer)
}

fn main() -> anyhow::Result<()> {
    let matches = RootOptions::command().get_matches();
    let top_opts = match RootOptions::from_arg_matches(&matches) {
        Ok(opts) => opts,
        Err(error) => error.exit(),
    };

    setup_logging(top_opts.common.debug);

    let gsettings = make_global_settings(top_opts.common);

    let result = match top_opts.subcmd {
        SubCommand::Order(opts) => command_order(&gsettings, opts),
        SubCommand::Simulate(opts) => command_simulate(&gsettings, opts),
    };

    if let Err(error) = result {
        gsettings.printer().print_error(error);
        std::process::exit(1);
    }

    Ok(())
}
