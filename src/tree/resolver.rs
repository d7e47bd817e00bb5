//! Training-content resolution.
//!
//! Walks an annotated move tree under a trainee perspective and
//! classifies every reachable node:
//!
//! - a **problem** is a position where the trainee is to move;
//! - a **solution** is a position reached immediately after the trainee's
//!   move (opponent to move next).
//!
//! The resolver yields the flat set of solution nodes and the set of
//! complete lines. Traversal is deterministic and left-to-right in child
//! declaration order; callers may rely on the exact output ordering.
//!
//! Crossing a blunder edge flips the perspective, so the continuation is
//! drilled from the opponent's viewpoint (refutations become solutions).
//! Alternative edges keep the perspective and start an independent line.

use crate::core::Color;
use crate::error::TreeError;

use super::node::{Marker, NodeId};
use super::tree::MoveTree;

/// One complete playable drill: node IDs alternating problem/solution,
/// beginning at a problem and ending at its last solution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    /// Alternating problem/solution node IDs. Always even in length.
    pub nodes: Vec<NodeId>,
}

impl Line {
    /// Iterate over (problem, solution) pairs in play order.
    pub fn pairs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Number of problem/solution pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len() / 2
    }

    /// Check if the line holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The trainable content extracted from one tree.
#[derive(Clone, Debug, Default)]
pub struct Resolution {
    /// Every solution node, in traversal order.
    pub solutions: Vec<NodeId>,

    /// Every complete line, in traversal order. Empty lines are dropped.
    pub lines: Vec<Line>,
}

/// True iff the side to move at `node` equals the trainee perspective.
#[must_use]
pub fn is_problem(tree: &MoveTree, node: NodeId, perspective: Color) -> bool {
    tree.get(node).to_move == perspective
}

/// True iff the side to move differs from the perspective and the node
/// has a producing move. The root is never a solution.
#[must_use]
pub fn is_solution(tree: &MoveTree, node: NodeId, perspective: Color) -> bool {
    let n = tree.get(node);
    n.to_move != perspective && !n.is_root()
}

/// The marker carried by a node, rejecting the blunder+alternative
/// combination instead of picking a precedence.
fn marker_of(tree: &MoveTree, node: NodeId) -> Result<Option<Marker>, TreeError> {
    let n = tree.get(node);
    let blunder = n.has_marker(Marker::Blunder);
    let alternative = n.has_marker(Marker::Alternative);
    match (blunder, alternative) {
        (true, true) => Err(TreeError::ConflictingMarkers { node }),
        (true, false) => Ok(Some(Marker::Blunder)),
        (false, true) => Ok(Some(Marker::Alternative)),
        (false, false) => Ok(None),
    }
}

/// The unique unmarked child of a problem node, if any.
///
/// More than one unmarked child makes the trainee move ambiguous, which
/// is fatal for the subtree; zero unmarked children is a hanging problem.
pub fn candidate_solution(tree: &MoveTree, node: NodeId) -> Result<Option<NodeId>, TreeError> {
    let mut candidate = None;
    let mut count = 0;
    for &child in &tree.get(node).children {
        if marker_of(tree, child)?.is_none() {
            candidate = Some(child);
            count += 1;
        }
    }
    if count > 1 {
        return Err(TreeError::AmbiguousSolution { node, count });
    }
    Ok(candidate)
}

/// Resolve a tree under a perspective into solutions and lines.
pub fn resolve(tree: &MoveTree, perspective: Color) -> Result<Resolution, TreeError> {
    let mut out = Resolution::default();
    walk(tree, tree.root(), perspective, Vec::new(), &mut out)?;
    tracing::debug!(
        solutions = out.solutions.len(),
        lines = out.lines.len(),
        %perspective,
        "resolved tree"
    );
    Ok(out)
}

fn close_line(prefix: Vec<NodeId>, out: &mut Resolution) {
    if !prefix.is_empty() {
        out.lines.push(Line { nodes: prefix });
    }
}

fn walk(
    tree: &MoveTree,
    node: NodeId,
    perspective: Color,
    prefix: Vec<NodeId>,
    out: &mut Resolution,
) -> Result<(), TreeError> {
    if is_problem(tree, node, perspective) {
        match candidate_solution(tree, node)? {
            // The candidate continues the current line.
            Some(solution) => walk(tree, solution, perspective, prefix, out)?,
            // Hanging problem: the line ends at the previous solution.
            None => close_line(prefix, out),
        }
        // Alternates and blunder refutations are independent lines, not
        // continuations; each starts from an empty prefix. A blunder edge
        // is the only place the perspective flips.
        for &child in &tree.get(node).children {
            match marker_of(tree, child)? {
                Some(Marker::Alternative) => {
                    walk(tree, child, perspective, Vec::new(), out)?;
                }
                Some(Marker::Blunder) => {
                    walk(tree, child, perspective.flip(), Vec::new(), out)?;
                }
                None => {}
            }
        }
    } else {
        let mut prefix = prefix;
        if is_solution(tree, node, perspective) {
            out.solutions.push(node);
            prefix.push(tree.get(node).parent);
            prefix.push(node);
        }
        let children = &tree.get(node).children;
        if children.is_empty() {
            close_line(prefix, out);
        } else {
            // Each opponent reply resumes the trainee's perspective with
            // its own copy of the accumulated prefix.
            for &child in children.iter() {
                walk(tree, child, perspective, prefix.clone(), out)?;
            }
        }
    }
    Ok(())
}
