use clap::ArgMatches;
use clap_complete::Shell;
use tracing::info;

use crate::app::build_cli;

pub(crate) fn handle_completions_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let shell = matches
        .get_one::<Shell>("shell")
        .ok_or("Shell argument is required")?;

    let mut cmd = build_cli();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(*shell, &mut cmd, bin_name.as_str(), &mut std::io::stdout().lock());

    info!(
        event = "cli.completions_generated",
        shell = %shell,
        bin_name = bin_name.as_str()
    );
    Ok(())
}
