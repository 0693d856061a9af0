use clap::{Arg, ArgAction, Command};

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Output in JSON format")
        .action(ArgAction::SetTrue)
}

pub fn build_cli() -> Command {
    Command::new("ordo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect configuration resolved through the ordo pipeline")
        .long_about("ORDO resolves configuration from the environment, TOML files and command-line values through an ordered pipeline of profiles, name mappings, expression expansion and secret locking, and prints what a program would see.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("profile")
                .long("profile")
                .short('p')
                .help("Active profile, highest precedence first (repeatable or comma separated)")
                .action(ArgAction::Append)
                .global(true),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .value_name("NAME=VALUE")
                .help("Set a property with the highest ordinal (repeatable)")
                .action(ArgAction::Append)
                .global(true),
        )
        .arg(
            Arg::new("file")
                .long("file")
                .short('f')
                .value_name("PATH")
                .help("Load an additional TOML file (repeatable)")
                .action(ArgAction::Append)
                .global(true),
        )
        .arg(
            Arg::new("secret")
                .long("secret")
                .value_name("NAME")
                .help("Treat a property as secret (repeatable)")
                .action(ArgAction::Append)
                .global(true),
        )
        .arg(
            Arg::new("relocate")
                .long("relocate")
                .value_name("OLD=NEW")
                .help("Read OLD from NEW first (repeatable)")
                .action(ArgAction::Append)
                .global(true),
        )
        .arg(
            Arg::new("fallback")
                .long("fallback")
                .value_name("NAME=FALLBACK")
                .help("Read FALLBACK when NAME has no value (repeatable)")
                .action(ArgAction::Append)
                .global(true),
        )
        .arg(
            Arg::new("unlock")
                .long("unlock")
                .help("Allow secret properties to be read")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("no-env")
                .long("no-env")
                .help("Do not read environment variables")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("log-lookups")
                .long("log-lookups")
                .help("Log every lookup with its value and location (secrets redacted)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("get")
                .about("Print the resolved value of a property")
                .arg(
                    Arg::new("name")
                        .help("Property name")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("raw")
                        .long("raw")
                        .help("Print the value without expanding ${...} references")
                        .action(ArgAction::SetTrue),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("list")
                .about("List every visible property name")
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("values")
                .about("Print every visible property with its resolved value")
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("sources")
                .about("List sources in priority order")
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .help("Target shell")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(clap_complete::Shell)),
                ),
        )
}
