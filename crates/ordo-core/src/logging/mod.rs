use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Target of the `core.lookup.*` events emitted by the logging stage.
pub const LOOKUP_TARGET: &str = "ordo_core::lookup";

/// Filter directives for the given settings, most general first.
///
/// `quiet` keeps only errors. `lookups` keeps lookup events at info even
/// when quiet, so lookup tracing does not require verbose output.
pub fn directives(quiet: bool, lookups: bool) -> Vec<String> {
    let mut directives = vec![if quiet { "ordo=error" } else { "ordo=info" }.to_string()];
    if lookups {
        directives.push(format!("{}=info", LOOKUP_TARGET));
    }
    directives
}

/// Install the JSON subscriber on stderr.
///
/// `RUST_LOG` is read first; the directives from [`directives`] are added
/// on top of it.
pub fn init_logging(quiet: bool, lookups: bool) {
    let mut filter = EnvFilter::from_default_env();
    for directive in directives(quiet, lookups) {
        filter = filter.add_directive(directive.parse().expect("Invalid log directive"));
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .init();
}
