use crate::args::LogLevel;
use is_terminal::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise the catalog crates log at `level`
/// and everything else at warn. Stdout stays reserved for command output.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level));

    // Ignore an already-installed subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .try_init();
}

fn default_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::new(format!(
        "warn,catalog={level},catalog_store={level},catalog_page={level},catalog_types={level}"
    ))
}
