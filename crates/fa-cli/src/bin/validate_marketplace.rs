use clap::Parser;
use fa::commands::validate;
use fa::{common, GlobalOpts};
use fa_config::Config;
use fa_logger as logger;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "validate-marketplace")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Validate the plugin marketplace",
    long_about = "Check marketplace.json and every plugin directory under plugins/ against the marketplace schema."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    /// Marketplace root directory
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    common::init_logging(&cli.global);

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            logger::warn(&format!("Failed to load config, using defaults: {}", e));
            Config::default()
        }
    };

    let code = validate::handle_validate(&cli.root, &config);
    if code != 0 {
        logger::step(&format!("Validation exited with code {}", code));
    }
    std::process::exit(code);
}
