use clap::ArgMatches;
use tracing::{error, info};

use ordo_core::events;

use super::helpers;

pub(crate) fn handle_list_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.list_started", json_output = json_output);

    let config = helpers::build_config(matches)?;
    match helpers::with_secret_access(matches, || config.property_names()) {
        Ok(names) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&names)?);
            } else {
                for name in &names {
                    println!("{}", name);
                }
            }
            info!(event = "cli.list_completed", count = names.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to list properties: {}", e);
            error!(event = "cli.list_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
