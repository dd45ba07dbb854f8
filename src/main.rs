//! Epimethean -- command-line driver for the turn engine.
//!
//! `parse` checks a single order file, `generate` writes a starter galaxy,
//! and `turn` runs one turn against a galaxy file and prints the report.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use epimethean::catalog::UnitCatalog;
use epimethean::config::EngineConfig;
use epimethean::engine::Engine;
use epimethean::galaxy::{generate, Galaxy, GenerateOptions, PlayerId};
use epimethean::orders::{annotate, format_orders, parse};

#[derive(Debug, Parser)]
#[command(author, version, about = "Epimethean turn engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse an order file and echo it with any errors
    Parse {
        /// Path to the order file
        file: PathBuf,
    },

    /// Generate a starter galaxy
    Generate {
        #[arg(long, default_value_t = 4)]
        players: u32,

        /// Star systems per player
        #[arg(long, default_value_t = 6)]
        systems_per_player: u32,

        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Where to write the galaxy JSON
        #[arg(long)]
        out: PathBuf,
    },

    /// Run one turn
    Turn {
        /// Galaxy JSON to resolve
        #[arg(long)]
        galaxy: PathBuf,

        /// Player orders as `<player>=<file>`, e.g. `1=orders/p1.txt`
        #[arg(long = "orders", value_parser = parse_order_arg, num_args = 1..)]
        orders: Vec<(PlayerId, PathBuf)>,

        /// Comma-separated phase list (uses the configured default when omitted)
        #[arg(long, value_delimiter = ',')]
        phases: Vec<String>,

        /// Engine config JSON (uses the builtin config when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Unit catalog JSON (uses the builtin catalog when omitted)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Where to write the resolved galaxy (overwrites the input when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn parse_order_arg(arg: &str) -> Result<(PlayerId, PathBuf), String> {
    let (player, path) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected <player>=<file>, got '{}'", arg))?;
    let player = player.trim_start_matches(['P', 'p']);
    let id = player
        .parse::<u32>()
        .map_err(|_| format!("invalid player '{}'", player))?;
    Ok((PlayerId(id), PathBuf::from(path)))
}

fn read_orders(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read orders from {:?}", path))
}

fn run_parse(file: &Path) -> Result<()> {
    let input = read_orders(file)?;
    let parsed = parse(&input);
    print!("{}", annotate(&input, &parsed));
    println!(";; {} orders accepted, {} lines rejected", parsed.orders.len(), parsed.errors.len());
    print!("{}", format_orders(&parsed.orders));
    Ok(())
}

fn run_generate(options: GenerateOptions, out: &Path) -> Result<()> {
    let galaxy = generate(&options)?;
    galaxy.write_file(out)?;
    info!(
        players = options.players,
        seed = options.seed,
        hulls = galaxy.hulls.len(),
        out = %out.display(),
        "galaxy generated"
    );
    Ok(())
}

struct TurnArgs {
    galaxy: PathBuf,
    orders: Vec<(PlayerId, PathBuf)>,
    phases: Vec<String>,
    config: Option<PathBuf>,
    catalog: Option<PathBuf>,
    out: Option<PathBuf>,
}

fn run_turn(args: TurnArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::builtin(),
    };
    let catalog = match &args.catalog {
        Some(path) => UnitCatalog::from_file(path)?,
        None => UnitCatalog::builtin(),
    };
    let mut galaxy = Galaxy::from_file(&args.galaxy)?;

    let mut bundles = Vec::with_capacity(args.orders.len());
    for (player, path) in &args.orders {
        if galaxy.player(*player).is_none() {
            bail!("no player {} in {:?}", player, args.galaxy);
        }
        let parsed = parse(&read_orders(path)?);
        for error in &parsed.errors {
            eprintln!("{} {}", player, error);
        }
        bundles.push(parsed.into_phase_orders(*player));
    }

    let engine = Engine::new(catalog, config);
    let report = if args.phases.is_empty() {
        engine.execute_default(&mut galaxy, &bundles)?
    } else {
        let phases: Vec<&str> = args.phases.iter().map(String::as_str).collect();
        engine.execute(&mut galaxy, &bundles, &phases)?
    };

    let out = args.out.as_ref().unwrap_or(&args.galaxy);
    galaxy.write_file(out)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Parse { file } => run_parse(&file),
        Command::Generate {
            players,
            systems_per_player,
            seed,
            out,
        } => run_generate(
            GenerateOptions {
                players,
                systems_per_player,
                seed,
            },
            &out,
        ),
        Command::Turn {
            galaxy,
            orders,
            phases,
            config,
            catalog,
            out,
        } => run_turn(TurnArgs {
            galaxy,
            orders,
            phases,
            config,
            catalog,
            out,
        }),
    }
}
