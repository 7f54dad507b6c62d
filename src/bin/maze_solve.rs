use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

use slide_maze::core::grid::Grid;
use slide_maze::core::moves::MoveKind;
use slide_maze::render;
use slide_maze::scenario::{parse_dimensions, Scenario, SearchConfig};
use slide_maze::scenarios;
use slide_maze::search::movegen::MoveRules;

#[derive(Parser)]
#[command(name = "maze_solve")]
#[command(about = "Search for a turn sequence that walks the token out of a sliding maze")]
struct Cmd {
    /// Hex maze pattern, one nibble per cell, row-major
    pattern: Option<String>,
    /// Dimensions as ROWSxCOLUMNS, e.g. 4x5
    dimensions: Option<String>,
    /// Turn budget
    turns: Option<u8>,

    /// Load a JSON scenario file instead of positional arguments
    #[arg(long, conflicts_with_all = ["pattern", "builtin"])]
    scenario: Option<PathBuf>,

    /// Use a built-in scenario by name
    #[arg(long, conflicts_with = "pattern")]
    builtin: Option<String>,

    /// Worker threads
    #[arg(long)]
    workers: Option<usize>,

    /// Stop after this many solutions
    #[arg(long)]
    limit: Option<usize>,

    /// Give up after expanding this many nodes
    #[arg(long)]
    max_nodes: Option<u64>,

    /// Comma-separated rows that may be rotated (default: all)
    #[arg(long, value_delimiter = ',')]
    rows: Option<Vec<usize>>,

    /// Comma-separated columns that may be rotated (default: all)
    #[arg(long, value_delimiter = ',')]
    columns: Option<Vec<usize>>,

    /// Comma-separated rotation kinds: row_right,row_left,column_down,column_up
    #[arg(long, value_delimiter = ',')]
    rotations: Option<Vec<String>>,

    /// Print only the move list
    #[arg(long)]
    quiet: bool,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = match cmd.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let scn = load(&cmd)?;
    tracing::info!(
        name = %scn.name,
        cells = scn.grid.len(),
        turns = scn.turns,
        "scenario loaded"
    );

    let root = scn.root();
    if root.is_goal() {
        println!("Already at the exit.");
        return Ok(());
    }

    let outcome = scn.solve()?;
    let Some(best) = outcome.best() else {
        println!(
            "No solution within {} turns ({} nodes expanded, stop: {:?}).",
            scn.turns, outcome.counts.expanded, outcome.stop
        );
        std::process::exit(1);
    };

    if cmd.quiet {
        println!("{}", best.notation());
    } else {
        print!("{}", render::summary(best));
    }
    Ok(())
}

fn load(cmd: &Cmd) -> Result<Scenario> {
    let mut scn = if let Some(path) = &cmd.scenario {
        Scenario::from_path(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?
    } else if let Some(name) = &cmd.builtin {
        match scenarios::by_name(name)? {
            Some(s) => s,
            None => bail!(
                "unknown scenario {name}; available: {}",
                scenarios::names().join(", ")
            ),
        }
    } else {
        let (Some(pattern), Some(dimensions), Some(turns)) =
            (&cmd.pattern, &cmd.dimensions, cmd.turns)
        else {
            bail!("expected PATTERN DIMENSIONS TURNS, --scenario FILE or --builtin NAME");
        };
        let (rows, columns) = parse_dimensions(dimensions)?;
        if rows as usize * columns as usize != pattern.len() {
            bail!("maze pattern is not of size {dimensions}");
        }
        let grid = Grid::parse(pattern, columns as usize)?;
        Scenario {
            name: "command line".to_string(),
            rules: Arc::new(MoveRules::all(&grid)),
            grid,
            turns,
            search: SearchConfig::default(),
        }
    };

    if cmd.rows.is_some() || cmd.columns.is_some() || cmd.rotations.is_some() {
        let kinds = match &cmd.rotations {
            Some(list) => list
                .iter()
                .map(|s| MoveKind::parse(s).with_context(|| format!("unknown rotation {s:?}")))
                .collect::<Result<Vec<_>>>()?,
            None => scn.rules.kinds().to_vec(),
        };
        let rules = MoveRules::new(
            &scn.grid,
            cmd.rows.clone().unwrap_or_else(|| scn.rules.rows().to_vec()),
            cmd.columns
                .clone()
                .unwrap_or_else(|| scn.rules.columns().to_vec()),
            kinds,
        )?;
        scn.rules = Arc::new(rules);
    }

    if let Some(w) = cmd.workers {
        scn.search.workers = w;
    }
    if let Some(l) = cmd.limit {
        scn.search.result_limit = l;
    }
    if let Some(n) = cmd.max_nodes {
        scn.search.max_nodes = n;
    }
    scn.search.validate()?;

    Ok(scn)
}
