//! Common types and utilities shared across binaries

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an explicit `tracing` filter
pub const LOG_FILTER_ENV: &str = "FA_LOG";

/// Global CLI options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    #[arg(short, long, global = true, help = "Decrease verbosity")]
    pub quiet: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity (-v for debug, -vv for trace)")]
    pub verbose: u8,
}

impl GlobalOpts {
    /// Get the effective verbosity level
    /// - 0: quiet/warn only
    /// - 1: debug (-v)
    /// - 2: trace (-vv)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

/// Set up the console/file logger and the `tracing` subscriber used by the
/// library crates. `FA_LOG` overrides the filter derived from verbosity.
pub fn init_logging(opts: &GlobalOpts) {
    if let Err(e) = fa_logger::init_with_verbosity(opts.verbosity_level()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(fa_logger::verbosity_to_tracing_level()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_wins_over_verbose() {
        let opts = GlobalOpts {
            quiet: true,
            verbose: 2,
        };
        assert_eq!(opts.verbosity_level(), 0);
    }

    #[test]
    fn test_verbose_count_is_level() {
        let opts = GlobalOpts {
            quiet: false,
            verbose: 2,
        };
        assert_eq!(opts.verbosity_level(), 2);
        assert_eq!(GlobalOpts::default().verbosity_level(), 0);
    }
}
