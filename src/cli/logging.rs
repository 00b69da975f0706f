//! Diagnostic logging with `tracing`
//!
//! Log lines go to stderr so list output on stdout stays pipeable.
//!
//! - `warn`: seed fallback, save failures, ignored config files (default)
//! - `info`: cascades, imports, created links
//! - `debug`: every mutation and save (`-v`)
//!
//! `PCAT_LOG` (or `RUST_LOG`) overrides the level with a full filter directive.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter variable checked before `RUST_LOG`
pub const ENV_LOG: &str = "PCAT_LOG";

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub with_ansi: bool,
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_ansi: console::colors_enabled_stderr(),
            with_target: false,
        }
    }
}

impl LogConfig {
    /// `-q` keeps errors only; `-v` enables debug output
    #[must_use]
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        let level = match (verbose, quiet) {
            (true, _) => Level::DEBUG,
            (false, true) => Level::ERROR,
            (false, false) => Level::WARN,
        };
        Self {
            level,
            with_target: verbose,
            ..Default::default()
        }
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(config: &LogConfig) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(config.with_target)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init();
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_env(ENV_LOG)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| {
            let level = level.as_str().to_lowercase();
            EnvFilter::new(format!("warn,pcat={level}"))
        })
}
