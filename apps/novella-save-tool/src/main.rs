//! Novella Save Tool
//!
//! Small utility around persisted game data.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p novella-save-tool -- <COMMAND> [PATH] [OPTIONS]
//! ```
//!
//! ## Commands
//!
//! - `write [PATH]`: Write the sample save document (default: save.data)
//! - `read [PATH]`: Decode and print a save document (default: save.data)
//! - `scenes [PATH]`: List the `scenes` table (default: save_data.sqlite3)
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

use std::path::PathBuf;

use anyhow::{bail, Context};
use novella_core::EngineConfig;
use novella_save::{read_save_file, write_save_file, SaveData, Scene};
use novella_store::RecordStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

enum Command {
    Write,
    Read,
    Scenes,
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config_path = None;
    let mut positional = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                config_path = Some(iter.next().context("--config requires a path")?);
            }
            other if other.starts_with('-') => bail!("Unknown option: {other}"),
            other => positional.push(other),
        }
    }

    let config = match config_path {
        Some(path) => EngineConfig::load_from_path(path).context("Failed to load configuration")?,
        None => EngineConfig::load(),
    };

    let (command, path) = match positional.as_slice() {
        [command] => (parse_command(command)?, None),
        [command, path] => (parse_command(command)?, Some(PathBuf::from(path))),
        _ => bail!("Expected a command and at most one path, see --help"),
    };

    match command {
        Command::Write => {
            let path = path.unwrap_or(config.storage.save_path);
            let data = sample_save_data();
            info!("write: {data}");
            write_save_file(&path, &data)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        Command::Read => {
            let path = path.unwrap_or(config.storage.save_path);
            let data = read_save_file(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            println!("{data}");
        }
        Command::Scenes => {
            let path = path.unwrap_or(config.storage.database_path);
            list_scenes(&path)?;
        }
    }

    Ok(())
}

fn parse_command(command: &str) -> anyhow::Result<Command> {
    match command {
        "write" => Ok(Command::Write),
        "read" => Ok(Command::Read),
        "scenes" => Ok(Command::Scenes),
        other => bail!("Unknown command: {other}"),
    }
}

/// Two scenes read, the second one most recently.
fn sample_save_data() -> SaveData {
    let mut data = SaveData::new();
    data.record_visit(Scene::new(1, 1, 1));
    data.record_visit(Scene::new(1, 1, 2));
    data
}

fn list_scenes(path: &std::path::Path) -> anyhow::Result<()> {
    let store = RecordStore::open(path)?;
    {
        let mut query = store.scenes()?;
        for record in query.rows()? {
            let record = record?;
            println!("id: {}, title: {}", record.id, record.title);
        }
    }
    store.close()?;
    Ok(())
}

fn print_help() {
    eprintln!(
        "Novella Save Tool

USAGE:
    cargo run -p novella-save-tool -- <COMMAND> [PATH] [OPTIONS]

COMMANDS:
    write [PATH]            Write the sample save document (default: save.data)
    read [PATH]             Decode and print a save document (default: save.data)
    scenes [PATH]           List the scenes table (default: save_data.sqlite3)

OPTIONS:
    -c, --config <PATH>     Configuration file (default: novella.toml)
    -h, --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}
