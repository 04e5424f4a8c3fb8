//! Rachana - scenario maker daemon
//!
//! Reads length-prefixed requests (`seed`, `next_scenario`) on stdin and
//! writes replies (`scenario`, `finished`, `error`) on stdout. Logs go to
//! stderr.

use clap::{Parser, Subcommand};
use rachana::map::{BuiltinMaps, DirectoryMapSource, LaneSampler, MapSource};
use rachana::protocol::{NodeHost, Serializer, WireFormat};
use rachana::{Config, Result, ScenarioMaker};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
const DEFAULT_CONFIG_PATH: &str = "rachana.toml";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory of `<name>.yaml` maps (overrides the config file)
    #[arg(short, long)]
    maps_dir: Option<PathBuf>,

    /// Wire format (overrides the config file)
    #[arg(short, long, value_enum)]
    wire: Option<WireFormat>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve scenarios over stdin/stdout (default)
    Serve,
    /// Seed once and print every generated scenario as a JSON line
    Generate {
        #[arg(short, long, default_value = "0")]
        seed: u64,
    },
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Config::load(DEFAULT_CONFIG_PATH)?,
        None => Config::default(),
    };

    if let Some(dir) = &args.maps_dir {
        config.map.maps_dir = Some(dir.display().to_string());
    }
    if let Some(wire) = args.wire {
        config.transport.wire_format = wire;
    }
    Ok(config)
}

fn map_source(config: &Config) -> Result<Box<dyn MapSource>> {
    Ok(match &config.map.maps_dir {
        Some(dir) => {
            log::info!("Loading maps from {}", dir);
            Box::new(DirectoryMapSource::new(dir)?)
        }
        None => Box::new(BuiltinMaps::new()),
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    // Logs stay on stderr; stdout carries protocol frames
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .target(env_logger::Target::Stderr)
    .init();

    log::info!("Rachana v{} starting...", env!("CARGO_PKG_VERSION"));
    log::info!(
        "Maps: {:?}, {} scenario(s) per map, {} robot(s) per scenario",
        config.generation.maps,
        config.generation.scenarios_per_map,
        config.robots.total()
    );

    let maps = map_source(&config)?;
    let wire_format = config.transport.wire_format;
    let mut maker = ScenarioMaker::new(config, maps, LaneSampler)?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let stdin = io::stdin().lock();
            let stdout = io::stdout().lock();
            let mut host = NodeHost::new(stdin, stdout, Serializer::new(wire_format));
            host.run(&mut maker)?;
        }
        Command::Generate { seed } => {
            maker.on_seed(seed)?;
            let mut out = io::stdout().lock();
            while let Some(scenario) = maker.next_scenario() {
                let line = serde_json::to_string(&scenario)
                    .map_err(|e| rachana::Error::Serialization(e.to_string()))?;
                writeln!(out, "{}", line)?;
            }
        }
    }

    log::info!("Rachana stopped");
    Ok(())
}
