use clap::ArgMatches;
use tracing::info;

use super::helpers;

pub(crate) fn handle_sources_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.sources_started", json_output = json_output);

    let config = helpers::build_config(matches)?;
    let sources = config.sources();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&sources)?);
    } else if sources.is_empty() {
        println!("No configuration sources.");
    } else {
        for source in &sources {
            println!("{:>11}  {}", source.ordinal, source.name);
        }
    }

    info!(event = "cli.sources_completed", count = sources.len());
    Ok(())
}
