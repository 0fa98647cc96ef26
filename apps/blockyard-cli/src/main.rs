//! Blockyard headless sandbox
//!
//! Creates, inspects and edits Blockyard world documents without a window.
//! Editing runs a real sandbox session fed from a replay script.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p blockyard-cli -- <COMMAND> [OPTIONS]
//! ```
//!
//! ## Commands
//!
//! - `new <OUT>`: Write the initial ground world
//! - `stats <WORLD>`: Print block count, bounds and colors of a world
//! - `replay <SCRIPT>`: Run a scripted session
//!
//! ## Options
//!
//! - `--grid <N>`: Ground blocks per side (default: 10)
//! - `--config <FILE>`: Session configuration as JSON
//! - `--world <FILE>`: Start `replay` from this world instead of the ground
//! - `--out <FILE>`: Save the world after `replay`
//! - `-h, --help`: Print help message
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod script;

use std::path::PathBuf;

use anyhow::{bail, Context};
use blockyard_core::Color;
use blockyard_session::{Session, SessionConfig, SessionNotice};
use blockyard_world::{exchange, World};
use hashbrown::HashSet;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
enum CliCommand {
    New { out: PathBuf },
    Stats { world: PathBuf },
    Replay {
        script: PathBuf,
        world: Option<PathBuf>,
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliArgs {
    command: CliCommand,
    grid: Option<i32>,
    config: Option<PathBuf>,
}

impl CliArgs {
    /// Parse arguments, excluding the program name.
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut positional = Vec::new();
        let mut grid = None;
        let mut config = None;
        let mut world = None;
        let mut out = None;

        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            let mut value = || {
                i += 1;
                args.get(i)
                    .cloned()
                    .with_context(|| format!("{arg} expects a value"))
            };
            match arg {
                "--grid" => {
                    let raw = value()?;
                    grid = Some(raw.parse().with_context(|| format!("invalid --grid '{raw}'"))?);
                }
                "--config" => config = Some(PathBuf::from(value()?)),
                "--world" => world = Some(PathBuf::from(value()?)),
                "--out" => out = Some(PathBuf::from(value()?)),
                flag if flag.starts_with("--") => bail!("unknown option '{flag}'"),
                _ => positional.push(args[i].clone()),
            }
            i += 1;
        }

        let command = match positional.as_slice() {
            [cmd, out] if cmd == "new" => CliCommand::New { out: out.into() },
            [cmd, world] if cmd == "stats" => CliCommand::Stats {
                world: world.into(),
            },
            [cmd, script] if cmd == "replay" => CliCommand::Replay {
                script: script.into(),
                world,
                out,
            },
            [] => bail!("missing command (try --help)"),
            other => bail!("unrecognised arguments: {}", other.join(" ")),
        };

        Ok(Self {
            command,
            grid,
            config,
        })
    }

    fn session_config(&self) -> anyhow::Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::load(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => SessionConfig::default(),
        };
        if let Some(grid) = self.grid {
            config = config.with_grid(grid);
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    // Check for help flag before doing anything else
    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = CliArgs::parse(&args)?;
    let config = cli.session_config()?;

    match cli.command {
        CliCommand::New { out } => {
            let world = config.ground.generate();
            exchange::save_to_path(&world, &out)
                .with_context(|| format!("writing {}", out.display()))?;
        }
        CliCommand::Stats { world } => {
            let blocks = exchange::load_from_path(&world, config.block_size())
                .with_context(|| format!("reading {}", world.display()))?;
            let mut loaded = World::new(config.block_size());
            loaded.replace_all(blocks);
            print_stats(&loaded);
        }
        CliCommand::Replay { script, world, out } => {
            let text = std::fs::read_to_string(&script)
                .with_context(|| format!("reading script {}", script.display()))?;
            let commands =
                script::parse(&text).with_context(|| format!("parsing {}", script.display()))?;

            let mut session = match world {
                Some(path) => {
                    let blocks = exchange::load_from_path(&path, config.block_size())
                        .with_context(|| format!("reading {}", path.display()))?;
                    let mut start = World::new(config.block_size());
                    start.replace_all(blocks);
                    Session::with_world(config, start)
                }
                None => Session::new(config)?,
            };

            let notices = script::replay(&mut session, &commands);
            let failures = notices
                .iter()
                .filter(|n| {
                    matches!(
                        n,
                        SessionNotice::ImportFailed { .. } | SessionNotice::SaveFailed { .. }
                    )
                })
                .count();
            info!(
                ticks = session.ticks(),
                blocks = session.world().len(),
                failures,
                "replay finished"
            );

            if let Some(out) = out {
                session
                    .save(&out)
                    .with_context(|| format!("writing {}", out.display()))?;
            }
        }
    }

    Ok(())
}

fn print_stats(world: &World) {
    println!("blocks:  {}", world.len());
    match world.bounds() {
        Some((min, max)) => println!("bounds:  {min} .. {max}"),
        None => println!("bounds:  (empty)"),
    }
    let colors: HashSet<Color> = world.blocks().map(|b| b.color).collect();
    let mut colors: Vec<_> = colors.into_iter().collect();
    colors.sort_unstable_by_key(|c| c.packed());
    let listed: Vec<String> = colors.iter().map(ToString::to_string).collect();
    println!("colors:  {} [{}]", colors.len(), listed.join(", "));
}

fn print_help() {
    eprintln!(
        "Blockyard headless sandbox

USAGE:
    cargo run -p blockyard-cli -- <COMMAND> [OPTIONS]

COMMANDS:
    new <OUT>               Write the initial ground world to OUT
    stats <WORLD>           Print block count, bounds and colors of WORLD
    replay <SCRIPT>         Run a scripted sandbox session

OPTIONS:
    --grid <N>              Ground blocks per side (default: 10)
    --config <FILE>         Session configuration as JSON; missing fields
                            keep their defaults
    --world <FILE>          Start replay from FILE instead of the ground
    --out <FILE>            Save the world to FILE after replay

OTHER:
    -h, --help              Print this help message

SCRIPT LINES:
    press <KEY> | release <KEY>     KEY: w a s d space shift ctrl 1 2 escape
    click left|right                Press and release a mouse button
    look <DX> <DY>                  Raw pointer motion
    lock | unlock                   Grant or revoke pointer lock
    tool 1|2                        Place/remove tool or paint tool
    color <#rrggbb|rgb(r, g, b)>    Pick a palette color
    speed                           Cycle normal, fast, slow
    save <FILE> | load <FILE>       Export or import the world
    tick [N]                        Run N frames (default: 1)
    wait                            Wait for an outstanding load
    # ...                           Comment

EXAMPLES:
    # Fresh world with a 20x20 ground
    cargo run -p blockyard-cli -- new world.json --grid 20

    # Edit a world with a script
    cargo run -p blockyard-cli -- replay build.txt --world world.json --out world.json

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}
