//! Annotated move trees and training-content resolution.

pub mod node;
pub mod resolver;
pub mod tree;

pub use node::{Marker, Move, MoveNode, NodeId};
pub use resolver::{candidate_solution, is_problem, is_solution, resolve, Line, Resolution};
pub use tree::{MoveTree, TreeBuilder};
