use clap::ArgMatches;
use tracing::error;

use ordo_core::events;

pub mod helpers;

mod completions;
mod get;
mod list;
mod sources;
mod values;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup(matches.subcommand_name().unwrap_or_default());

    match matches.subcommand() {
        Some(("get", sub_matches)) => get::handle_get_command(sub_matches),
        Some(("list", sub_matches)) => list::handle_list_command(sub_matches),
        Some(("values", sub_matches)) => values::handle_values_command(sub_matches),
        Some(("sources", sub_matches)) => sources::handle_sources_command(sub_matches),
        Some(("completions", sub_matches)) => completions::handle_completions_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
