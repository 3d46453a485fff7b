// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `mmp-opcua`: resolve an OPC UA node set into machine and sensor metadata.
//!
//! Reads a JSON [`RawNodeSet`], runs the metadata pipeline with the stored
//! parser config (overridable per call) and prints the result as JSON, an
//! indented tree or a summary table. Logs go to stderr; `RUST_LOG` controls
//! the level (default `info`).

mod render;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use mmp_app_core::config::{ConfigError, ConfigService, ConfigStore, PARSER_CONFIG_KEY};
use mmp_config_fs::FsConfigStore;
use mmp_opcua::{parse_metadata, ParserConfig, RawNodeSet};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mmp-opcua", author, version, about = "Resolve OPC UA machine/sensor metadata")]
struct Cli {
    /// Config directory (defaults to the platform config dir, e.g. `~/.config/mmp`)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a JSON node set and print the classified metadata.
    Parse(ParseArgs),
    /// Inspect or initialise the stored parser config.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug)]
struct ParseArgs {
    /// JSON node set (`{"nodes": [...]}`)
    file: PathBuf,
    /// Machine type id; overrides the stored value for this run
    #[arg(long = "machine-type", value_name = "ID")]
    machine_type: Option<String>,
    /// Sensor type id; overrides the stored value for this run
    #[arg(long = "sensor-type", value_name = "ID")]
    sensor_type: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the effective parser config as JSON.
    Show,
    /// Write the default parser config (plus any overrides) to the store.
    Init {
        /// Replace an existing stored config
        #[arg(long)]
        force: bool,
        /// Machine type id to store instead of the default
        #[arg(long = "machine-type", value_name = "ID")]
        machine_type: Option<String>,
        /// Sensor type id to store instead of the default
        #[arg(long = "sensor-type", value_name = "ID")]
        sensor_type: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Snapshot as pretty JSON
    Json,
    /// Indented substructure tree
    Tree,
    /// Machine, sensor count, dangling references and digest
    Summary,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Parse(args) => run_parse(cli.config_dir, &args, &mut out),
        Commands::Config(cmd) => run_config(cli.config_dir, cmd, &mut out),
    }
}

fn open_store(config_dir: Option<PathBuf>) -> Result<FsConfigStore> {
    let store = match config_dir {
        Some(dir) => FsConfigStore::at(&dir)
            .with_context(|| format!("cannot open config dir {}", dir.display()))?,
        None => FsConfigStore::new().context("cannot open user config dir")?,
    };
    debug!(dir = %store.base().display(), "config store opened");
    Ok(store)
}

/// Stored config, or defaults when no store is reachable.
fn stored_parser_config(config_dir: Option<PathBuf>) -> Result<ParserConfig> {
    let explicit = config_dir.is_some();
    match open_store(config_dir) {
        Ok(store) => Ok(ConfigService::new(store).parser_config()?),
        // Only an explicit --config-dir is required to open.
        Err(err) if !explicit => {
            warn!(error = %err, "config store unavailable; using built-in type ids");
            Ok(ParserConfig::default())
        }
        Err(err) => Err(err),
    }
}

fn run_parse(config_dir: Option<PathBuf>, args: &ParseArgs, out: &mut impl Write) -> Result<()> {
    let config = stored_parser_config(config_dir)?
        .with_overrides(args.machine_type.as_deref(), args.sensor_type.as_deref());

    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;
    let set = RawNodeSet::from_json_slice(&bytes)
        .with_context(|| format!("{} is not a JSON node set", args.file.display()))?;
    let metadata = parse_metadata(&set.nodes, &config)
        .with_context(|| format!("cannot resolve {}", args.file.display()))?;

    match args.format {
        Format::Json => render::json(&metadata, out),
        Format::Tree => render::tree(&metadata, out),
        Format::Summary => render::summary(&metadata, out),
    }
}

fn run_config(config_dir: Option<PathBuf>, cmd: ConfigCommand, out: &mut impl Write) -> Result<()> {
    let store = open_store(config_dir)?;
    match cmd {
        ConfigCommand::Show => {
            let config = ConfigService::new(store).parser_config()?;
            serde_json::to_writer_pretty(&mut *out, &config)?;
            writeln!(out)?;
        }
        ConfigCommand::Init {
            force,
            machine_type,
            sensor_type,
        } => {
            let exists = match store.load_raw(PARSER_CONFIG_KEY) {
                Ok(_) => true,
                Err(ConfigError::NotFound) => false,
                Err(err) => return Err(err.into()),
            };
            if exists && !force {
                anyhow::bail!(
                    "parser config already exists in {} (use --force to replace it)",
                    store.base().display()
                );
            }
            let config = ParserConfig::default()
                .with_overrides(machine_type.as_deref(), sensor_type.as_deref());
            let path = store.base().join(format!("{PARSER_CONFIG_KEY}.json"));
            ConfigService::new(store).save_parser_config(&config)?;
            writeln!(out, "wrote {}", path.display())?;
        }
    }
    Ok(())
}
