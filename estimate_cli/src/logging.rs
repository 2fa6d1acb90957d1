//! Logger setup. `RUST_LOG` overrides the default filter.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "estimate_core=debug,estimate_cli=debug,info"
    } else {
        "estimate_core=info,estimate_cli=info,warn"
    }
}

/// Log to stderr so stdout stays clean for results and JSON.
pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_parse() {
        for verbose in [false, true] {
            assert!(EnvFilter::try_new(default_filter(verbose)).is_ok());
        }
    }

    #[test]
    fn test_verbose_raises_both_crates_to_debug() {
        assert!(default_filter(true).contains("estimate_core=debug"));
        assert!(default_filter(true).contains("estimate_cli=debug"));
        assert!(default_filter(false).contains("estimate_core=info"));
        assert!(default_filter(false).contains("estimate_cli=info"));
    }
}
