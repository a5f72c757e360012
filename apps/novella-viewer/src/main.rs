//! Novella Viewer
//!
//! Opens a window, creates a Vulkan instance and surface for it, selects the
//! first device and queue family that can present to the surface, creates
//! the logical device and then waits for the window to be closed.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p novella-viewer -- [OPTIONS]
//! ```
//!
//! ## Options
//!
//! - `-c, --config <PATH>`: Configuration file (default: novella.toml)
//! - `--prefer-discrete`: Scan discrete GPUs before other devices
//! - `--no-validation`: Disable Vulkan validation layers
//! - `-h, --help`: Print help message
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

use anyhow::Context;
use novella_app::{init_logging, run_app, AppConfig, SelectionPolicy};
use novella_core::EngineConfig;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // Check for help flag before starting the app
    if args.iter().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }

    init_logging();

    let engine = match config_path(&args)? {
        Some(path) => EngineConfig::load_from_path(path).context("Failed to load configuration")?,
        None => EngineConfig::load(),
    };

    let mut config = AppConfig::from(&engine);
    if args.iter().any(|arg| arg == "--prefer-discrete") {
        config = config.with_policy(SelectionPolicy::PreferDiscrete);
    }
    if args.iter().any(|arg| arg == "--no-validation") {
        config = config.with_validation(false);
    }

    tracing::debug!("Viewer config: {config:?}");

    run_app(config)
}

fn config_path(args: &[String]) -> anyhow::Result<Option<&str>> {
    match args.iter().position(|arg| arg == "-c" || arg == "--config") {
        Some(i) => args
            .get(i + 1)
            .map(|path| Some(path.as_str()))
            .context("--config requires a path"),
        None => Ok(None),
    }
}

fn print_help() {
    eprintln!(
        "Novella Viewer

USAGE:
    cargo run -p novella-viewer -- [OPTIONS]

OPTIONS:
    -c, --config <PATH>     Configuration file (default: novella.toml)
    --prefer-discrete       Scan discrete GPUs before other devices
    --no-validation         Disable Vulkan validation layers
    -h, --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}
