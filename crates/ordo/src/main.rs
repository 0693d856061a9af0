use ordo_core::init_logging;

mod app;
mod commands;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = app::build_cli();
    let matches = app.get_matches();

    // Logs are off unless asked for; stdout carries only command output
    let verbose = matches.get_flag("verbose");
    init_logging(!verbose, matches.get_flag("log-lookups"));

    commands::run_command(&matches)?;

    Ok(())
}
