use clap::ArgMatches;
use tracing::{error, info};

use ordo_core::events;

use super::helpers;

pub(crate) fn handle_values_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.values_started", json_output = json_output);

    let config = helpers::build_config(matches)?;
    match helpers::with_secret_access(matches, || config.values()) {
        Ok(values) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&values)?);
            } else {
                for value in &values {
                    println!(
                        "{}={}  ({})",
                        value.name(),
                        value.value().unwrap_or_default(),
                        value.location()
                    );
                }
            }
            info!(event = "cli.values_completed", count = values.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to resolve values: {}", e);
            error!(event = "cli.values_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
