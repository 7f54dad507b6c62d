use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use slide_maze::core::moves::Move;
use slide_maze::render;
use slide_maze::scenario::Scenario;
use slide_maze::scenarios;
use slide_maze::state::StateNode;

#[derive(Parser)]
#[command(name = "maze_replay")]
#[command(about = "Replay a move list such as `R1 D0 (2,3)` against a scenario")]
struct Cmd {
    /// JSON scenario file
    #[arg(long, conflicts_with = "builtin")]
    scenario: Option<PathBuf>,

    /// Built-in scenario name
    #[arg(long)]
    builtin: Option<String>,

    /// Moves: (row,col) walks, R<n>/L<n> row rotations, D<n>/U<n> column rotations
    #[arg(required = true)]
    moves: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();

    let scn = match (&cmd.scenario, &cmd.builtin) {
        (Some(path), _) => Scenario::from_path(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        (None, Some(name)) => match scenarios::by_name(name)? {
            Some(s) => s,
            None => bail!(
                "unknown scenario {name}; available: {}",
                scenarios::names().join(", ")
            ),
        },
        (None, None) => bail!("one of --scenario or --builtin is required"),
    };

    let mut node = scn.root();
    print!("{}", render::draw_node(&node));
    for text in &cmd.moves {
        let mv = Move::parse(text, node.grid())?;
        node = StateNode::try_apply(&node, mv)?;
        println!(">>> {}", mv.notation(node.grid().columns()));
        print!("{}", render::draw_node(&node));
    }

    if node.is_goal() {
        println!(
            "Reached the exit with {} turns left: {}",
            node.turns_remaining(),
            node.notation()
        );
        Ok(())
    } else {
        println!("Token is not at the exit: {}", node.notation());
        std::process::exit(1);
    }
}
