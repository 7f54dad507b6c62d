use slide_maze::core::moves::Move;
use slide_maze::error::MazeError;
use slide_maze::render;
use slide_maze::scenarios;
use slide_maze::state::StateNode;

fn replay(name: &str, moves: &[&str]) -> Result<std::sync::Arc<StateNode>, MazeError> {
    let scn = scenarios::by_name(name)?.expect("built-in scenario");
    let mut node = scn.root();
    for text in moves {
        let mv = Move::parse(text, node.grid())?;
        node = StateNode::try_apply(&node, mv)?;
    }
    Ok(node)
}

#[test]
fn known_solution_replays_to_the_exit() {
    let node = replay("slide_demo", &["R1", "(1,1)"]).unwrap();
    assert!(node.is_goal());
    assert_eq!(node.turns_remaining(), 0);
    assert_eq!(node.depth(), 2);
    assert_eq!(node.notation(), "R1 (1,1)");
}

#[test]
fn replay_accepts_rotations_outside_the_allow_list() {
    // `connector` only lists row 1 and right rotations; a replay may still rotate row 0 left.
    let node = replay("connector", &["L0"]).unwrap();
    assert_eq!(node.grid().to_string(), "534a00008");
    assert_eq!(node.location(), 0);
}

#[test]
fn unreachable_walk_is_illegal() {
    let err = replay("slide_demo", &["(1,1)"]).unwrap_err();
    assert!(matches!(err, MazeError::IllegalMove { .. }), "{err}");
    assert!(err.to_string().contains("(1,1)"));
}

#[test]
fn walking_in_place_is_illegal() {
    let err = replay("slide_demo", &["(0,0)"]).unwrap_err();
    assert!(matches!(err, MazeError::IllegalMove { .. }));
}

#[test]
fn turn_budget_is_enforced() {
    let err = replay("corridor", &["(0,1)", "R0"]).unwrap_err();
    assert!(err.to_string().contains("no turns remaining"), "{err}");
}

#[test]
fn out_of_range_rotation_is_rejected() {
    let err = replay("slide_demo", &["D2"]).unwrap_err();
    assert!(matches!(
        err,
        MazeError::OutOfRange {
            what: "column",
            value: 2,
            bound: 2
        }
    ));
}

#[test]
fn summary_lists_each_step() {
    let node = replay("slide_demo", &["R1", "(1,1)"]).unwrap();
    let text = render::summary(&node);
    assert!(text.contains(">>> R1"));
    assert!(text.contains(">>> (1,1)"));
    assert!(text.ends_with("SOLUTION: R1 (1,1) (0 turns left)\n"));
    // Root plus two steps, one token each.
    assert_eq!(text.matches('¥').count(), 3);
}
