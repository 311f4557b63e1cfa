use spork_config::LoggingConfig;
use tracing::warn;
use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::EnvFilter;

const FALLBACK_DIRECTIVE: &str = "spork=info";

/// Install a fmt subscriber filtered by `RUST_LOG` plus the configured
/// directive.
///
/// Returns `false` when the embedding host already installed a global
/// subscriber; that one is kept.
pub fn init(config: &LoggingConfig) -> bool {
    let (filter, rejected) = build_filter(&config.level);
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok();
    if let Some(e) = rejected {
        warn!(level = %config.level, "invalid log directive, using {FALLBACK_DIRECTIVE}: {e}");
    }
    installed
}

/// `RUST_LOG` first, then the configured directive. A directive that does
/// not parse is replaced by the fallback and returned for reporting.
fn build_filter(level: &str) -> (EnvFilter, Option<ParseError>) {
    let (configured, rejected) = match level.parse::<Directive>() {
        Ok(_) => (level, None),
        Err(e) => (FALLBACK_DIRECTIVE, Some(e)),
    };
    let env = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let directives: Vec<&str> = [env.as_str(), configured]
        .into_iter()
        .filter(|d| !d.is_empty())
        .collect();
    (EnvFilter::new(directives.join(",")), rejected)
}
