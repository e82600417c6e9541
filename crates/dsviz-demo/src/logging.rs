#![forbid(unsafe_code)]

//! Subscriber setup for the `dsviz` binary.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Level implied by the number of `-v` flags.
#[must_use]
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Build a filter from `RUST_LOG`, falling back to `level` for dsviz
/// targets and warnings for everything else.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_lowercase();
        EnvFilter::new(format!(
            "warn,dsviz={level},dsviz_core={level},dsviz_runtime={level},dsviz_demo={level}"
        ))
    })
}

/// Install the global subscriber. Logs go to stderr so frames on stdout
/// stay machine-readable.
pub fn init(verbosity: u8, json: bool) {
    let filter = build_env_filter(level_for(verbosity));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}
