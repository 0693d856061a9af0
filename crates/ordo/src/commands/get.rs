use clap::ArgMatches;
use tracing::{error, info};

use ordo_core::{OrdoError, events, expressions};

use super::helpers::{self, CliError};

pub(crate) fn handle_get_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let name = matches
        .get_one::<String>("name")
        .ok_or("Name argument is required")?;
    let raw = matches.get_flag("raw");
    let json_output = matches.get_flag("json");

    info!(
        event = "cli.get_started",
        name = name.as_str(),
        raw = raw,
        json_output = json_output
    );

    let config = helpers::build_config(matches)?;
    let result = helpers::with_secret_access(matches, || {
        if raw {
            expressions::without_expansion(|| config.get_config_value(name))
        } else {
            config.get_config_value(name)
        }
    });

    match result {
        Ok(Some(value)) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}", value.value().unwrap_or_default());
            }
            info!(
                event = "cli.get_completed",
                name = name.as_str(),
                source = value.source_name()
            );
            Ok(())
        }
        Ok(None) => {
            let e = CliError::NotFound { name: name.clone() };
            eprintln!("❌ {}", e);
            error!(event = "cli.get_not_found", name = name.as_str());
            Err(e.into())
        }
        Err(e) => {
            eprintln!("❌ Failed to resolve '{}': {}", name, e);
            error!(
                event = "cli.get_failed",
                name = name.as_str(),
                error = %e,
                code = e.error_code()
            );
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
