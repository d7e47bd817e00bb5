//! In-memory collaborators.
//!
//! `MemoryStore` and `ScriptedPresenter` back the integration tests and
//! make sessions runnable without a real board or filesystem.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::core::Color;
use crate::error::StoreError;
use crate::tree::{Move, MoveTree};

use super::presentation::{Presenter, UserInput};
use super::storage::{TreeId, TreeStore};

/// Map-backed tree store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    trees: FxHashMap<String, MoveTree>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a tree.
    pub fn put(&mut self, id: &TreeId, tree: MoveTree) {
        self.trees.insert(id.0.clone(), tree);
    }

    /// Peek at a stored tree.
    #[must_use]
    pub fn get(&self, id: &TreeId) -> Option<&MoveTree> {
        self.trees.get(&id.0)
    }
}

impl TreeStore for MemoryStore {
    fn load(&mut self, id: &TreeId) -> Result<MoveTree, StoreError> {
        self.trees
            .get(&id.0)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.0.clone()))
    }

    fn save(&mut self, id: &TreeId, tree: &MoveTree) -> Result<(), StoreError> {
        self.trees.insert(id.0.clone(), tree.clone());
        Ok(())
    }
}

/// Presenter that replays a scripted input sequence.
///
/// Shown positions and the configured perspective are recorded so tests
/// can assert on the presentation traffic. An exhausted script quits.
#[derive(Clone, Debug, Default)]
pub struct ScriptedPresenter {
    inputs: VecDeque<UserInput>,
    /// Every position shown, as move paths from the root.
    pub shown: Vec<Vec<Move>>,
    /// The last perspective set.
    pub perspective: Option<Color>,
}

impl ScriptedPresenter {
    /// Create a presenter with no scripted inputs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a move answer.
    pub fn push_move(&mut self, san: &str) {
        self.inputs.push_back(UserInput::Move(Move::new(san)));
    }

    /// Queue a quit.
    pub fn push_quit(&mut self) {
        self.inputs.push_back(UserInput::Quit);
    }

    /// Number of inputs not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl Presenter for ScriptedPresenter {
    fn set_perspective(&mut self, side: Color) {
        self.perspective = Some(side);
    }

    fn show_position(&mut self, moves: &[Move]) {
        self.shown.push(moves.to_vec());
    }

    fn read_input(&mut self) -> UserInput {
        self.inputs.pop_front().unwrap_or(UserInput::Quit)
    }
}
