#![forbid(unsafe_code)]

//! Subscriber installation for the command-line harness.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an env-filter directive string.
pub const LOG_ENV: &str = "KINFOLK_LOG";

/// Directive used when [`LOG_ENV`] is unset or unparsable.
#[must_use]
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Filter from `env` if it parses, else from the verbosity count.
#[must_use]
pub fn filter_for(verbose: u8, env: Option<&str>) -> EnvFilter {
    env.and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbose)))
}

/// Install a stderr `fmt` subscriber. A second call is a no-op.
pub fn init(verbose: u8) {
    let env = std::env::var(LOG_ENV).ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbose, env.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn verbosity_raises_the_default() {
        assert_eq!(default_directive(0), "warn");
        assert_eq!(default_directive(1), "debug");
        assert_eq!(default_directive(5), "trace");
    }

    #[test]
    fn env_directives_win_when_valid() {
        let filter = filter_for(0, Some("kinfolk.store=trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
        let fallback = filter_for(1, Some("kinfolk=verbose"));
        assert_eq!(fallback.max_level_hint(), Some(LevelFilter::DEBUG));
        let unset = filter_for(0, None);
        assert_eq!(unset.max_level_hint(), Some(LevelFilter::WARN));
    }
}
