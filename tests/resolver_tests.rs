//! Resolver integration tests over hand-built annotated trees.

use drillbook::{candidate_solution, resolve, Color, Marker, TreeBuilder, TreeError};

// =============================================================================
// Mainline Extraction
// =============================================================================

#[test]
fn test_five_solution_linear_tree_black() {
    // A linear tree with 5 Black plies: exactly 5 solutions in mainline
    // order and a single line covering all of them.
    let mut b = TreeBuilder::new(Color::White);
    let mut parent = b.root();
    let mut ids = Vec::new();
    for san in [
        "d4", "Nf6", "c4", "e6", "Nc3", "Bb4", "e3", "O-O", "Bd3", "d5",
    ] {
        parent = b.child(parent, san);
        ids.push(parent);
    }
    let tree = b.finish();

    let res = resolve(&tree, Color::Black).unwrap();

    let expected: Vec<_> = ids.iter().copied().skip(1).step_by(2).collect();
    assert_eq!(res.solutions, expected);
    assert_eq!(res.solutions.len(), 5);

    assert_eq!(res.lines.len(), 1);
    assert_eq!(res.lines[0].len(), 5);
    let first_pair = res.lines[0].pairs().next().unwrap();
    assert_eq!(first_pair, (ids[0], ids[1]));
}

#[test]
fn test_solution_moves_match_tree_moves() {
    let mut b = TreeBuilder::new(Color::White);
    let e4 = b.child(b.root(), "e4");
    let e5 = b.child(e4, "e5");
    let tree = b.finish();

    let res = resolve(&tree, Color::Black).unwrap();
    assert_eq!(res.solutions, vec![e5]);
    assert_eq!(tree.get(e5).mv.as_ref().unwrap().san, "e5");
}

// =============================================================================
// Blunders and Alternatives
// =============================================================================

#[test]
fn test_blunder_reply_found_under_flipped_perspective() {
    // A problem with one plain child and one blunder child, the blunder
    // child having its own reply: 2 solutions total.
    let mut b = TreeBuilder::new(Color::White);
    let e4 = b.child(b.root(), "e4");
    let e5 = b.child(e4, "e5");
    let f6 = b.blunder(e4, "f6");
    let qh5 = b.child(f6, "Qh5");
    let tree = b.finish();

    let res = resolve(&tree, Color::Black).unwrap();

    assert_eq!(res.solutions, vec![e5, qh5]);
    assert_eq!(res.lines.len(), 2);
    assert_eq!(res.lines[0].nodes, vec![e4, e5]);
    assert_eq!(res.lines[1].nodes, vec![f6, qh5]);
}

#[test]
fn test_blunder_without_reply_contributes_nothing() {
    let mut b = TreeBuilder::new(Color::White);
    let e4 = b.child(b.root(), "e4");
    let e5 = b.child(e4, "e5");
    let _f6 = b.blunder(e4, "f6");
    let tree = b.finish();

    let res = resolve(&tree, Color::Black).unwrap();

    // The blunder node itself is never a solution; with no modeled
    // refutation there is nothing to drill under the flipped view.
    assert_eq!(res.solutions, vec![e5]);
    assert_eq!(res.lines.len(), 1);
}

#[test]
fn test_alternative_is_an_independent_solution_and_line() {
    let mut b = TreeBuilder::new(Color::White);
    let e4 = b.child(b.root(), "e4");
    let e5 = b.child(e4, "e5");
    let c5 = b.alternative(e4, "c5");
    let tree = b.finish();

    let res = resolve(&tree, Color::Black).unwrap();

    assert_eq!(res.solutions, vec![e5, c5]);
    assert_eq!(res.lines.len(), 2);
    // Both lines begin at the shared problem.
    assert_eq!(res.lines[0].nodes, vec![e4, e5]);
    assert_eq!(res.lines[1].nodes, vec![e4, c5]);
}

#[test]
fn test_deep_tree_mixing_all_annotations() {
    // Mainline with an alternative and a refuted blunder hanging off
    // the same problem, each annotation spawning its own line.
    let mut b = TreeBuilder::new(Color::White);
    let e4 = b.child(b.root(), "e4");
    let e5 = b.child(e4, "e5");
    let nf3 = b.child(e5, "Nf3");
    let nc6 = b.child(nf3, "Nc6");
    let c5 = b.alternative(e4, "c5");
    let nf3_sic = b.child(c5, "Nf3");
    let d6 = b.child(nf3_sic, "d6");
    let f6 = b.blunder(e4, "f6");
    let qh5 = b.child(f6, "Qh5");
    let tree = b.finish();

    let res = resolve(&tree, Color::Black).unwrap();

    assert_eq!(res.solutions, vec![e5, nc6, c5, d6, qh5]);
    assert_eq!(res.lines.len(), 3);
    assert_eq!(res.lines[0].nodes, vec![e4, e5, nf3, nc6]);
    assert_eq!(res.lines[1].nodes, vec![e4, c5, nf3_sic, d6]);
    assert_eq!(res.lines[2].nodes, vec![f6, qh5]);
}

// =============================================================================
// Structural Errors
// =============================================================================

#[test]
fn test_two_unmarked_children_is_ambiguous() {
    let mut b = TreeBuilder::new(Color::White);
    let e4 = b.child(b.root(), "e4");
    b.child(e4, "e5");
    b.child(e4, "c5");
    let tree = b.finish();

    let err = resolve(&tree, Color::Black).unwrap_err();
    assert!(matches!(err, TreeError::AmbiguousSolution { count: 2, .. }));
}

#[test]
fn test_marking_one_branch_resolves_ambiguity() {
    let mut b = TreeBuilder::new(Color::White);
    let e4 = b.child(b.root(), "e4");
    let e5 = b.child(e4, "e5");
    b.alternative(e4, "c5");
    let tree = b.finish();

    assert_eq!(candidate_solution(&tree, e4).unwrap(), Some(e5));
    assert!(resolve(&tree, Color::Black).is_ok());
}

#[test]
fn test_both_markers_on_one_node_is_error() {
    let mut b = TreeBuilder::new(Color::White);
    let e4 = b.child(b.root(), "e4");
    b.child(e4, "e5");
    let bad = b.blunder(e4, "f6");
    let mut tree = b.finish();
    tree.get_mut(bad).markers.push(Marker::Alternative);

    let err = resolve(&tree, Color::Black).unwrap_err();
    assert_eq!(err, TreeError::ConflictingMarkers { node: bad });
}

#[test]
fn test_error_in_sideline_propagates() {
    // The ambiguity sits deep inside an alternative branch; resolution
    // still refuses the whole tree rather than guessing.
    let mut b = TreeBuilder::new(Color::White);
    let e4 = b.child(b.root(), "e4");
    b.child(e4, "e5");
    let c5 = b.alternative(e4, "c5");
    let nf3 = b.child(c5, "Nf3");
    b.child(nf3, "d6");
    b.child(nf3, "Nc6");
    let tree = b.finish();

    assert!(resolve(&tree, Color::Black).is_err());
}
